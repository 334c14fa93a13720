//! rp-profiles: in-memory columnar time series ("profiles").
//!
//! - [`Profiles`]: a set of equally long sample vectors with start date,
//!   grid dimensions and rate representation
//! - [`keyword`]: classification of summary keywords (well/group/rate/...)
//! - [`diff_profiles`]: vector-wise difference of two sets
//! - [`DateAxis`] and [`profiles_from_dated_values`]: building a set from
//!   dated samples

pub mod axis;
pub mod dated;
pub mod diff;
pub mod error;
pub mod keyword;
pub mod profiles;
pub mod vector;

pub use axis::DateAxis;
pub use dated::{DatedValue, profiles_from_dated_values};
pub use diff::diff_profiles;
pub use error::{ProfilesError, ProfilesResult};
pub use profiles::{GridDim, Profiles};
pub use vector::{NO_NAME, ProfilesVector};
