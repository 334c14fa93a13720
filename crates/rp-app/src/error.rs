//! Error type for the service layer.

use std::path::PathBuf;

/// Wraps the errors of every backend crate behind one interface for the CLI.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Bin(#[from] rp_binio::BinError),

    #[error(transparent)]
    Profiles(#[from] rp_profiles::ProfilesError),

    #[error(transparent)]
    Interp(#[from] rp_interp::InterpError),

    #[error(transparent)]
    Summary(#[from] rp_summary::SummaryError),

    #[error(transparent)]
    Text(#[from] rp_text::TextError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to read config file: {path}")]
    ConfigFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write config file: {path}")]
    ConfigFileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Config validation failed: {0}")]
    Validation(String),

    #[error("Failed to open {path}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for rp-app operations.
pub type AppResult<T> = Result<T, AppError>;
