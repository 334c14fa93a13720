//! rp-core: shared foundation for the reservoir profiles crates.
//!
//! Contains:
//! - numeric (Real + tolerances + float helpers)
//! - dates (calendar arithmetic used by the text readers and summary files)
//! - error (shared error type)

pub mod dates;
pub mod error;
pub mod numeric;

pub use dates::*;
pub use error::{CoreError, CoreResult};
pub use numeric::*;
