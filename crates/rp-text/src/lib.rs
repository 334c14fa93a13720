//! rp-text: text formats for profiles data.
//!
//! - [`ofm`]: OFM/vol production history files
//! - [`welldata`]: column formatted well data, one row per well and date
//! - [`dates`]: the date notations used by both

pub mod dates;
pub mod error;
pub mod ofm;
pub mod split;
pub mod welldata;

pub use dates::{DateFormat, format_date, parse_date};
pub use error::{TextError, TextResult};
pub use ofm::{OfmOptions, ReadType, parse_ofm, read_ofm};
pub use welldata::{read_welldata, read_welldata_file, write_welldata, write_welldata_file};
