use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    Network,
    HttpStatus,
    Parse,
    Validation,
}

/// Failure of a directory operation. Every variant is recoverable: the
/// caller turns it into a status message and waits for the next user action.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContactError {
    #[error("network error: {0}")]
    Network(String),
    #[error("unexpected status {status}{}", format_body(.body))]
    HttpStatus { status: u16, body: String },
    #[error("invalid response body: {0}")]
    Parse(String),
    #[error("{0}")]
    Validation(String),
}

fn format_body(body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        String::new()
    } else {
        format!(" {body}")
    }
}

impl ContactError {
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Network(_) => ErrorCode::Network,
            Self::HttpStatus { .. } => ErrorCode::HttpStatus,
            Self::Parse(_) => ErrorCode::Parse,
            Self::Validation(_) => ErrorCode::Validation,
        }
    }
}
