use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    BadRequest,
    NotFound,
    Validation,
    Internal,
    Unknown,
}

impl ErrorCode {
    pub fn from_status(status: u16) -> Self {
        match status {
            400 => Self::BadRequest,
            404 => Self::NotFound,
            422 => Self::Validation,
            500..=599 => Self::Internal,
            _ => Self::Unknown,
        }
    }
}

/// A rejected request as the server described it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{code:?} ({status}): {}", .detail.as_deref().unwrap_or("no detail"))]
pub struct ApiError {
    pub code: ErrorCode,
    pub status: u16,
    pub detail: Option<String>,
}

impl ApiError {
    pub fn new(status: u16, detail: Option<String>) -> Self {
        Self {
            code: ErrorCode::from_status(status),
            status,
            detail,
        }
    }
}
