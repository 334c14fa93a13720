//! Shared service layer for the profiles tools.
//!
//! The CLI is a thin shell over these functions: inspecting binary files,
//! summarizing and diffing summary sets, deriving vectors and converting
//! between OFM, well-data text and summary files.

pub mod config;
pub mod error;
pub mod import_service;
pub mod inspect;
pub mod summary_service;

pub use config::{ImportConfig, load_import_config, save_import_config, validate_import_config};
pub use error::{AppError, AppResult};
pub use import_service::{ImportReport, export_welldata, import_ofm, import_welldata};
pub use inspect::{dump_blocks, list_blocks};
pub use summary_service::{
    DeriveKind, DiffReport, SummaryInfo, derive_vector, diff_summaries, extract_series,
    load_summary, summary_info, write_series_csv, write_summary_set,
};
