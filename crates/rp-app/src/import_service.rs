//! Conversions between text formats and summary sets.

use std::path::{Path, PathBuf};

use chrono::{NaiveDateTime, TimeDelta};
use rp_profiles::Profiles;
use rp_text::{read_ofm, read_welldata_file, write_welldata_file};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::{ImportConfig, validate_import_config};
use crate::error::{AppError, AppResult};
use crate::summary_service::{load_summary, write_summary_set};

/// What an import wrote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportReport {
    pub wells: usize,
    pub vectors: usize,
    pub steps: usize,
    /// Spec file first, then data files.
    pub files: Vec<PathBuf>,
}

fn write_set(profiles: &Profiles, out_root: &Path, unified: bool) -> AppResult<ImportReport> {
    let files = write_summary_set(profiles, out_root, unified)?;
    Ok(ImportReport {
        wells: profiles.well_names().len(),
        vectors: profiles.vector_count(),
        steps: profiles.step_count(),
        files,
    })
}

/// Run one OFM import job.
pub fn import_ofm(config: &ImportConfig) -> AppResult<ImportReport> {
    validate_import_config(config)?;
    let profiles = read_ofm(&config.input, &config.ofm)?;
    let report = write_set(&profiles, &config.output_root, config.unified)?;
    info!(
        input = %config.input.display(),
        wells = report.wells,
        steps = report.steps,
        "imported OFM file"
    );
    Ok(report)
}

pub fn import_welldata(path: &Path, out_root: &Path, unified: bool) -> AppResult<ImportReport> {
    let profiles = read_welldata_file(path)?;
    let report = write_set(&profiles, out_root, unified)?;
    info!(input = %path.display(), wells = report.wells, "imported well data");
    Ok(report)
}

/// Start date plus `days`, rejecting values no calendar date can hold.
fn calendar_instant(start: NaiveDateTime, days: f64) -> AppResult<NaiveDateTime> {
    let out_of_range =
        || AppError::InvalidInput(format!("TIME value {days} is not a valid day offset"));
    let seconds = (days * 86_400.0).round();
    if !seconds.is_finite() || seconds.abs() >= i64::MAX as f64 {
        return Err(out_of_range());
    }
    TimeDelta::try_seconds(seconds as i64)
        .and_then(|delta| start.checked_add_signed(delta))
        .ok_or_else(out_of_range)
}

/// Add `DAY`/`MONTH`/`YEAR` from the start date and `TIME` when missing.
fn ensure_calendar(profiles: &mut Profiles) -> AppResult<()> {
    if profiles.get_vector("DAY", None, None).is_some() {
        return Ok(());
    }
    let time = profiles.require("TIME", None)?.data().to_vec();
    let (mut day, mut month, mut year) = (Vec::new(), Vec::new(), Vec::new());
    for t in time {
        let at = calendar_instant(profiles.start_date, t)?;
        let (d, m, y) = rp_core::dmy(at.date());
        day.push(d);
        month.push(m);
        year.push(y);
    }
    profiles.set_vector("DAY", day, None, None, Some(""))?;
    profiles.set_vector("MONTH", month, None, None, Some(""))?;
    profiles.set_vector("YEAR", year, None, None, Some(""))?;
    debug!("added calendar vectors from TIME");
    Ok(())
}

/// Write the well vectors of a summary set as column text. Returns the
/// number of wells written.
pub fn export_welldata(root: &Path, path: &Path) -> AppResult<usize> {
    let mut profiles = load_summary(root)?;
    ensure_calendar(&mut profiles)?;
    write_welldata_file(&profiles, path)?;
    let wells = profiles.well_names().len();
    info!(output = %path.display(), wells, "exported well data");
    Ok(wells)
}
