//! Error types shared across Ballbot crates.

use std::path::PathBuf;

/// Top-level error type for Ballbot operations.
#[derive(Debug, thiserror::Error)]
pub enum BallbotError {
    /// A divisor component, scalar, or time delta was exactly zero.
    #[error("Division error: {message}")]
    Division { message: String },

    /// The locator has no further observation to offer.
    #[error("No frame available: {message}")]
    NoFrameAvailable { message: String },

    #[error("Capture error: {message}")]
    Capture { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using BallbotError.
pub type BallbotResult<T> = Result<T, BallbotError>;

impl BallbotError {
    pub fn division(msg: impl Into<String>) -> Self {
        Self::Division {
            message: msg.into(),
        }
    }

    pub fn no_frame(msg: impl Into<String>) -> Self {
        Self::NoFrameAvailable {
            message: msg.into(),
        }
    }

    pub fn capture(msg: impl Into<String>) -> Self {
        Self::Capture {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Whether this error signals an exhausted observation source rather
    /// than a failure.
    pub fn is_exhausted(&self) -> bool {
        matches!(self, Self::NoFrameAvailable { .. })
    }
}
