use crate::{CursorPosition, TokenType};
use std::{sync::Arc, time::Duration};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Cursor {0} does not resolve to a token")]
    CursorNotFound(CursorPosition),

    #[error("Candidate collection failed: {0}")]
    Collection(String),

    #[error("Token type {0} has no vocabulary entry")]
    Vocabulary(TokenType),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Backend query timed out after {0:?}")]
    Timeout(Duration),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Shared(#[from] Arc<Error>),
}

pub type Result<T = ()> = std::result::Result<T, Error>;
