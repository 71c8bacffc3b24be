use confique::Config as _;
use std::sync::OnceLock;

#[derive(confique::Config)]
pub struct Config {
    /// Endpoint accepting `{"query": {"qs", "format"}, "df"}` POST bodies.
    #[config(
        env = "QSUGGEST_BACKEND_URL",
        default = "http://localhost:5601/api/enhancements/search/sql"
    )]
    pub backend_url: String,
    #[config(env = "QSUGGEST_SUGGEST_VALUES", default = true)]
    pub suggest_values: bool,
    #[config(env = "QSUGGEST_VALUES_LIMIT", default = 10)]
    pub values_limit: usize,
    #[config(env = "QSUGGEST_REQUEST_TIMEOUT_MS", default = 5000)]
    pub request_timeout_ms: u64,
    #[config(env = "QSUGGEST_CACHE_TTL_SECS", default = 300)]
    pub cache_ttl_secs: u64,
    #[config(env = "QSUGGEST_CACHE_CAPACITY", default = 512)]
    pub cache_capacity: u64,
}

pub fn config() -> &'static Config {
    static CONFIG: OnceLock<Config> = OnceLock::new();
    CONFIG.get_or_init(|| {
        Config::builder()
            .env()
            .load()
            .expect("Failed to load one or more value configuration from the current environment")
    })
}
