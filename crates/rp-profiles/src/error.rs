use rp_interp::InterpError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProfilesError {
    #[error("Inconsistent length: expected {expected}, found {found}")]
    InconsistentLength { expected: usize, found: usize },

    #[error("Index {index} out of range (len {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Missing vector: {keyword}")]
    MissingVector { keyword: String },

    #[error("Interpolation error: {0}")]
    Interp(#[from] InterpError),
}

pub type ProfilesResult<T> = Result<T, ProfilesError>;
