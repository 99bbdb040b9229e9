use std::io::Error as IoError;

use thiserror::Error;

/// Result type used throughout the bridge library.
pub type Result<T,> = std::result::Result<T, RelayError,>;

#[derive(Debug, Error,)]
pub enum RelayError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),
    #[error("invalid call: {0}")]
    InvalidCall(String,),
    #[error("bridge server rejected the reply with status {0}")]
    ReplyRejected(u16,),
    #[error("config error: {0}")]
    Config(String,),
    #[error("config file could not be parsed: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("{0:#}")]
    Io(#[from] IoError),
}

impl RelayError {
    pub(crate) fn invalid_call(reason: impl Into<String,>,) -> Self {
        Self::InvalidCall(reason.into(),)
    }
}
