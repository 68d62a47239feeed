use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type AppResult<T> = Result<T, AppError>;

/// Why a submission attempt ended in `Failed`. The `Display` output is the
/// raw error text that message selection inspects; response bodies are kept
/// out of it and only logged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("validation failed: {}", .0.join(", "))]
    Validation(Vec<String>),
    #[error("Request failed with status code {status}")]
    Rejected {
        status: u16,
        server_message: Option<String>,
        body: String,
    },
    #[error("failed to reach intake endpoint: {0}")]
    Transport(String),
    #[error("unexpected submission error: {0}")]
    Unexpected(String),
}

impl SubmitError {
    /// Structured message supplied by the intake service, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            SubmitError::Rejected {
                server_message: Some(message),
                ..
            } => Some(message),
            _ => None,
        }
    }
}
