use std::path::PathBuf;

use edgeswipe_core::config::SwipeConfigError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DemoError>;

#[derive(Debug, Error)]
pub enum DemoError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(#[from] SwipeConfigError),

    #[error("config serialization failed: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("script not found: {path}")]
    MissingScript { path: PathBuf },

    #[error("script step {step}: {message}")]
    Script { step: usize, message: String },

    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },
}

impl DemoError {
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidArgument { .. } => 2,
            Self::Config(_) | Self::MissingScript { .. } | Self::Script { .. } => 3,
            _ => 1,
        }
    }

    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn script(step: usize, message: impl Into<String>) -> Self {
        Self::Script {
            step,
            message: message.into(),
        }
    }
}
