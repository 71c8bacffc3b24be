use crate::*;
use test_context::AsyncTestContext;
pub use test_context::test_context;
use wiremock::MockServer;

pub const SEARCH_PATH: &str = "/api/enhancements/search/sql";

/// A `wiremock` server standing in for the search backend, and an
/// [`HttpBackend`] pointed at it.
pub struct BackendServer {
    pub server: MockServer,
    pub backend: HttpBackend,
}

impl AsyncTestContext for BackendServer {
    async fn setup() -> Self {
        crate::testing::common_init();
        let server = MockServer::start().await;
        let backend = HttpBackend::new(format!("{}{SEARCH_PATH}", server.uri()));
        Self { server, backend }
    }

    async fn teardown(self) {
        let requests = self.server.received_requests().await.unwrap_or_default();
        trace!("Backend server saw {} request(s)", requests.len());
    }
}
