use qsuggest::{
    Autocomplete, CachedBackend, CursorPosition, Error, HttpBackend, ResolverSettings, Result,
    config,
};
use std::io::Write as _;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Cursor just past the last character of `query`.
fn end_of(query: &str) -> CursorPosition {
    let line = query.split('\n').count();
    let column = query.rsplit('\n').next().unwrap_or_default().chars().count() + 1;
    CursorPosition::new(line, column)
}

#[tokio::main]
async fn main() -> Result {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env()) // <- reads RUST_LOG
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let Some(query) = args.next() else {
        return Err(Error::Config("usage: qsuggest <query> [column]".into()));
    };
    let cursor = match args.next() {
        Some(column) => CursorPosition::new(
            1,
            column
                .parse()
                .map_err(|_| Error::Config(format!("invalid cursor column '{column}'")))?,
        ),
        None => end_of(&query),
    };

    let config = config();
    debug!("Using backend {} for cursor {cursor}", config.backend_url);
    let backend = CachedBackend::from_config(HttpBackend::from_config(config)?, config);
    let autocomplete = Autocomplete::new(backend, ResolverSettings::from(config));
    let suggestions = autocomplete.get_suggestions(&query, cursor).await?;

    let mut out = std::io::stdout().lock();
    for suggestion in &suggestions {
        serde_json::to_writer(&mut out, suggestion)?;
        writeln!(out)?;
    }
    Ok(())
}
