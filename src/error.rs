use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChefError {
    /// The backend answered with a non-success status.
    #[error("{context} (HTTP {status})")]
    Network {
        context: &'static str,
        status: StatusCode,
    },

    /// The request never produced a usable response: connect failure,
    /// timeout, or a body that did not decode.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Rejected locally before any request was made.
    #[error("{0}")]
    Validation(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ChefError {
    pub fn validation(message: impl Into<String>) -> Self {
        ChefError::Validation(message.into())
    }

    pub fn is_network(&self) -> bool {
        matches!(self, ChefError::Network { .. } | ChefError::Transport(_))
    }
}

impl From<url::ParseError> for ChefError {
    fn from(err: url::ParseError) -> Self {
        ChefError::Config(format!("bad API url: {}", err))
    }
}
