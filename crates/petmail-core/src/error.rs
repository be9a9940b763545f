//! Error types for Petmail.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Empty input: nothing to extract")]
    EmptyInput,

    #[error("Missing default subject")]
    MissingDefaultSubject,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Whether the error was caused by the caller's input rather than by
    /// configuration loading.
    pub fn is_caller_error(&self) -> bool {
        matches!(self, Self::EmptyInput | Self::MissingDefaultSubject | Self::Config(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
