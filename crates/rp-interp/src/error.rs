use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum InterpError {
    #[error("Invalid argument: {what}")]
    InvalidArgument { what: String },

    #[error("Length mismatch: {times} times vs {values} values")]
    LengthMismatch { times: usize, values: usize },

    #[error("Empty series")]
    EmptySeries,

    #[error("Repeated timestamp at index {index}")]
    RepeatedTimestamp { index: usize },
}

pub type InterpResult<T> = Result<T, InterpError>;
