use shared::error::ApiError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid server url '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("server url '{0}' cannot carry a request path")]
    CannotBeABase(String),
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("{endpoint} answered with unexpected status {status}")]
    Status { endpoint: &'static str, status: u16 },
    #[error("malformed {endpoint} response: {source}")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("request rejected: {0}")]
    Application(#[from] ApiError),
}

impl ClientError {
    /// Everything except a structured rejection is a transport-level failure:
    /// the user only ever sees a fixed message for those.
    pub fn is_transport(&self) -> bool {
        !matches!(self, Self::Application(_))
    }
}
