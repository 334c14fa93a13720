//! Summary set queries, differences and derived vectors.

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use rp_core::{Tolerances, nearly_equal};
use rp_interp::{cumulative_from_rate, rate_from_cumulative};
use rp_profiles::keyword::is_timedef;
use rp_profiles::{NO_NAME, Profiles, diff_profiles};
use rp_summary::{SummaryWriter, read_summary_set};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{AppError, AppResult};

/// Overview of a loaded set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryInfo {
    pub id: Option<String>,
    pub vectors: usize,
    pub steps: usize,
    pub wells: Vec<String>,
    pub groups: Vec<String>,
    pub start_date: NaiveDateTime,
    /// First and last `TIME` sample, if the set has any.
    pub time_range: Option<(f64, f64)>,
    pub grid_dim: (usize, usize, usize),
    pub backwards: bool,
}

pub fn load_summary(root: &Path) -> AppResult<Profiles> {
    Ok(read_summary_set(root)?)
}

/// Write `profiles` as a summary set; spec file first, then data files.
pub fn write_summary_set(profiles: &Profiles, root: &Path, unified: bool) -> AppResult<Vec<PathBuf>> {
    Ok(SummaryWriter::new(root, unified).write_all(profiles)?)
}

pub fn summary_info(profiles: &Profiles) -> SummaryInfo {
    let time_range = profiles
        .get_time()
        .and_then(|t| Some((*t.first()?, *t.last()?)));
    SummaryInfo {
        id: profiles.id.clone(),
        vectors: profiles.vector_count(),
        steps: profiles.step_count(),
        wells: profiles.well_names(),
        groups: profiles.group_names(),
        start_date: profiles.start_date,
        time_range,
        grid_dim: profiles.grid_dim,
        backwards: profiles.backwards,
    }
}

/// `(time, value)` pairs of one vector.
pub fn extract_series(
    profiles: &Profiles,
    keyword: &str,
    name: Option<&str>,
) -> AppResult<Vec<(f64, f64)>> {
    let time = profiles.require("TIME", None)?.data();
    let values = profiles.require(keyword, name)?.data();
    Ok(time.iter().copied().zip(values.iter().copied()).collect())
}

/// Write a series as two column CSV with a `time,<column>` header.
pub fn write_series_csv<W: Write>(out: &mut W, column: &str, series: &[(f64, f64)]) -> AppResult<()> {
    writeln!(out, "time,{column}")?;
    for (t, v) in series {
        writeln!(out, "{t},{v}")?;
    }
    out.flush()?;
    Ok(())
}

/// Outcome of [`diff_summaries`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiffReport {
    /// Vectors in the difference set, time definitions excluded.
    pub compared: usize,
    /// Compared vectors whose samples agree on a shared time axis.
    pub identical: usize,
    pub files: Vec<PathBuf>,
}

/// Write `a - b` as a new summary set at `out_root`.
pub fn diff_summaries(
    a_root: &Path,
    b_root: &Path,
    out_root: &Path,
    unified: bool,
) -> AppResult<DiffReport> {
    let a = load_summary(a_root)?;
    let b = load_summary(b_root)?;
    let diff = diff_profiles(&a, &b)?;

    let tol = Tolerances::single_precision();
    let same_axis = a.get_time() == b.get_time();
    let mut compared = 0;
    let mut identical = 0;
    for v in diff.iter().filter(|v| !is_timedef(v.keyword())) {
        compared += 1;
        let (Some(x), Some(y)) = (
            a.get_vector(v.keyword(), Some(v.name()), Some(v.num())),
            b.get_vector(v.keyword(), Some(v.name()), Some(v.num())),
        ) else {
            continue;
        };
        if same_axis
            && x.data()
                .iter()
                .zip(y.data())
                .all(|(&p, &q)| nearly_equal(p, q, tol))
        {
            identical += 1;
        }
    }

    let files = write_summary_set(&diff, out_root, unified)?;
    info!(compared, identical, out = %out_root.display(), "wrote summary difference");
    Ok(DiffReport {
        compared,
        identical,
        files,
    })
}

/// Direction of a derived vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeriveKind {
    /// Cumulative from a rate.
    Cumulative,
    /// Rate from a cumulative.
    Rate,
}

fn derived_unit(unit: &str, kind: DeriveKind) -> String {
    if unit.is_empty() || unit == NO_NAME {
        return unit.to_string();
    }
    match kind {
        DeriveKind::Cumulative => unit.strip_suffix("/D").unwrap_or(unit).to_string(),
        DeriveKind::Rate => format!("{unit}/D"),
    }
}

/// Add `target` computed from `source` on the `TIME` axis. Returns its index.
///
/// The new vector takes the owner and identifier of the source.
pub fn derive_vector(
    profiles: &mut Profiles,
    source: &str,
    name: Option<&str>,
    target: &str,
    kind: DeriveKind,
) -> AppResult<usize> {
    if target.trim().is_empty() {
        return Err(AppError::InvalidInput("target keyword is empty".to_string()));
    }
    let time = profiles.require("TIME", None)?.data();
    let src = profiles.require(source, name)?;
    let data = match kind {
        DeriveKind::Cumulative => cumulative_from_rate(time, src.data())?,
        DeriveKind::Rate => rate_from_cumulative(time, src.data())?,
    };
    let owner = src.name().to_string();
    let num = src.num();
    let unit = derived_unit(src.unit(), kind);
    let index = profiles.set_vector(target, data, Some(owner.as_str()), Some(num), Some(unit.as_str()))?;
    info!(source, target, ?kind, "derived vector");
    Ok(index)
}
