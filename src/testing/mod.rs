#![cfg(test)]
crate::reexport!(mock);
crate::reexport!(context);
pub use rstest::*;

pub(crate) fn common_init() {
    use std::sync::Once;
    use tracing_subscriber::EnvFilter;
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        // Only initialize once for all tests
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env()) // <- reads RUST_LOG
            .with_test_writer() // ensures it integrates with `cargo test` output
            .init();
    });
}

mod backend_server_tests {
    use super::{super::*, *};

    #[test_context(BackendServer)]
    #[tokio::test]
    async fn can_reach_server(ctx: &mut BackendServer) {
        assert!(ctx.backend.url().starts_with(&ctx.server.uri()));
        assert!(ctx.backend.url().ends_with(SEARCH_PATH));
    }

    #[tokio::test]
    async fn mock_records_queries() -> Result {
        common_init();
        let backend = MockBackend::new().with_table("t", &[("id", "long")]);
        let response = backend.query(describe_query("t")).await?;
        assert_eq!(Table::from_describe("t", &response)?.columns.len(), 1);
        assert!(backend.query("SELECT 1".into()).await.is_err());
        assert_eq!(backend.queries(), [describe_query("t"), "SELECT 1".to_string()]);
        Ok(())
    }
}
