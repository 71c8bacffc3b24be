use crate::*;
use moka::future::Cache;
use std::time::Duration;

/// Memoizes backend responses by SQL text, so repeated keystrokes over the
/// same tables do not repeat `DESCRIBE` and value queries.
///
/// Concurrent requests for the same query share one backend call. Failures
/// are handed to every waiter and never stored.
#[derive(Clone)]
pub struct CachedBackend<B> {
    inner: B,
    cache: Cache<String, QueryResponse>,
}

impl<B: QueryBackend> CachedBackend<B> {
    pub fn new(inner: B, capacity: u64, time_to_live: Duration) -> Self {
        Self {
            inner,
            cache: Cache::builder()
                .max_capacity(capacity)
                .time_to_live(time_to_live)
                .build(),
        }
    }

    pub fn from_config(inner: B, config: &Config) -> Self {
        Self::new(
            inner,
            config.cache_capacity,
            Duration::from_secs(config.cache_ttl_secs),
        )
    }

    pub fn inner(&self) -> &B {
        &self.inner
    }
}

impl<B: QueryBackend> QueryBackend for CachedBackend<B> {
    async fn query(&self, sql: String) -> Result<QueryResponse> {
        Ok(self
            .cache
            .try_get_with(sql.clone(), self.inner.query(sql))
            .await?)
    }
}
