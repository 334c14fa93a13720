//! Codec errors.

use thiserror::Error;

/// Result type for codec operations.
pub type BinResult<T> = Result<T, BinError>;

/// Errors raised while reading or writing blocked binary files.
///
/// None of these are recovered inside the codec. A stream that produced an
/// error is left at an unspecified position and must not be reused.
#[derive(Error, Debug)]
pub enum BinError {
    /// Malformed or truncated structure, or a failed byte-order probe.
    #[error("Format error: {what}")]
    Format { what: String },

    /// Type tag outside CHAR/INTE/REAL/DOUB/LOGI/MESS.
    #[error("Unsupported data type '{tag}' for keyword '{keyword}'")]
    UnsupportedType { tag: String, keyword: String },

    /// Illegal parameter, e.g. a negative element count.
    #[error("Invalid argument: {what}")]
    InvalidArgument { what: String },

    /// Stream level failure, tagged with the keyword being processed.
    #[error("I/O failure at keyword '{keyword}': {source}")]
    Io {
        keyword: String,
        #[source]
        source: std::io::Error,
    },
}

impl BinError {
    pub(crate) fn format(what: impl Into<String>) -> Self {
        BinError::Format { what: what.into() }
    }

    pub(crate) fn invalid(what: impl Into<String>) -> Self {
        BinError::InvalidArgument { what: what.into() }
    }

    /// Map a read failure: running out of bytes is a format problem, anything
    /// else is reported as I/O.
    pub(crate) fn on_read(keyword: &str, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::UnexpectedEof {
            BinError::format(format!("unexpected end of file in keyword '{keyword}'"))
        } else {
            BinError::Io {
                keyword: keyword.to_string(),
                source,
            }
        }
    }

    pub(crate) fn on_write(keyword: &str, source: std::io::Error) -> Self {
        BinError::Io {
            keyword: keyword.to_string(),
            source,
        }
    }
}
