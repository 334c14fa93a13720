use std::path::PathBuf;

use rp_interp::InterpError;
use rp_profiles::ProfilesError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TextError {
    #[error("Cannot open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Line {line}: unsupported directive {directive}")]
    Unsupported { line: usize, directive: String },

    #[error("Unsupported date format: {format}")]
    UnsupportedDateFormat { format: String },

    #[error("Invalid date '{text}'")]
    InvalidDate { text: String },

    #[error("No data rows found")]
    NoData,

    #[error("Profiles error: {0}")]
    Profiles(#[from] ProfilesError),

    #[error("Interpolation error: {0}")]
    Interp(#[from] InterpError),
}

impl TextError {
    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        TextError::Parse {
            line,
            message: message.into(),
        }
    }
}

impl From<rp_core::CoreError> for TextError {
    fn from(e: rp_core::CoreError) -> Self {
        TextError::InvalidDate {
            text: e.to_string(),
        }
    }
}

pub type TextResult<T> = Result<T, TextError>;
