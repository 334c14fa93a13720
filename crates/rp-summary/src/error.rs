use std::path::PathBuf;

use rp_binio::BinError;
use rp_profiles::ProfilesError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SummaryError {
    #[error("Cannot open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot create {path}: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot remove stale {path}: {source}")]
    Remove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Binary format error: {0}")]
    Bin(#[from] BinError),

    #[error("Profiles error: {0}")]
    Profiles(#[from] ProfilesError),

    #[error("Invalid summary data: {what}")]
    Format { what: String },
}

pub type SummaryResult<T> = Result<T, SummaryError>;
