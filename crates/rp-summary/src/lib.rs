//! rp-summary: simulator summary file sets.
//!
//! A set is `<root>.SMSPEC` (vector metadata) plus either one unified
//! `<root>.UNSMRY` or numbered `<root>.S0001`, `<root>.S0002`, ... data files
//! holding one `PARAMS` record per time step.

pub mod error;
pub mod paths;
pub mod reader;
pub mod writer;

pub use error::{SummaryError, SummaryResult};
pub use reader::{SummaryReader, read_summary_set};
pub use writer::{STEPS_PER_FILE, SummaryWriter};
