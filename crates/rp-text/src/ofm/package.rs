//! Turning per-well OFM tables into a profiles set.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rp_interp::{InterpMode, resample};
use rp_profiles::keyword::is_rate;
use rp_profiles::{DateAxis, Profiles};
use tracing::debug;

use super::ReadType;
use crate::{TextError, TextResult};

/// Rows of one well, dates strictly increasing.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct WellTable {
    pub name: String,
    pub dates: Vec<NaiveDate>,
    pub rows: Vec<Vec<f64>>,
}

struct Target {
    column: &'static str,
    rate: &'static str,
    total: &'static str,
    injection: bool,
}

const VOLUMES: [Target; 6] = [
    Target { column: "GAS", rate: "WGPR", total: "WGPT", injection: false },
    Target { column: "OIL", rate: "WOPR", total: "WOPT", injection: false },
    Target { column: "WATER", rate: "WWPR", total: "WWPT", injection: false },
    Target { column: "GINJ", rate: "WGIR", total: "WGIT", injection: true },
    Target { column: "OINJ", rate: "WOIR", total: "WOIT", injection: true },
    Target { column: "WINJ", rate: "WWIR", total: "WWIT", injection: true },
];

const OTHERS: [(&str, &str, &str); 3] = [
    ("BHP", "WBHP", "BARS"),
    ("THP", "WTHP", "BARS"),
    ("WEFF", "WEFF", ""),
];

/// `(column index, keyword, unit)` for every column that becomes a vector.
fn keyword_map(
    columns: &[String],
    cumulative: bool,
    read_type: ReadType,
) -> Vec<(usize, &'static str, &'static str)> {
    let index = |name: &str| columns.iter().position(|c| c == name);
    let mut map = Vec::new();
    for t in &VOLUMES {
        let wanted = match read_type {
            ReadType::All => true,
            ReadType::Production => !t.injection,
            ReadType::Injection => t.injection,
        };
        if let (true, Some(i)) = (wanted, index(t.column)) {
            if cumulative {
                map.push((i, t.total, "SM3"));
            } else {
                map.push((i, t.rate, "SM3/D"));
            }
        }
    }
    for (column, keyword, unit) in OTHERS {
        if let Some(i) = index(column) {
            map.push((i, keyword, unit));
        }
    }
    map
}

pub(crate) struct Packaging<'a> {
    pub columns: &'a [String],
    pub cumulative: bool,
    pub time_shift: bool,
    pub read_type: ReadType,
    pub aliases: &'a BTreeMap<String, String>,
}

impl Packaging<'_> {
    pub fn build(&self, wells: &[WellTable]) -> TextResult<Profiles> {
        let axis = DateAxis::from_dates(wells.iter().flat_map(|w| w.dates.iter().copied()));
        if axis.is_empty() {
            return Err(TextError::NoData);
        }
        let mut profiles = axis.new_profiles("OFM", self.time_shift)?;
        let targets = axis.times();
        let keys = keyword_map(self.columns, self.cumulative, self.read_type);

        for (iw, well) in wells.iter().enumerate() {
            let name = self.aliases.get(&well.name).unwrap_or(&well.name);
            let num = i32::try_from(iw + 1).unwrap_or(i32::MAX);
            let times: Vec<f64> = well.dates.iter().map(|&d| axis.time_of(d)).collect();
            for &(col, keyword, unit) in &keys {
                let mut values: Vec<f64> = well
                    .rows
                    .iter()
                    .map(|r| r.get(col).copied().unwrap_or(0.0))
                    .collect();
                if self.time_shift {
                    values.rotate_right(1);
                    values[0] = 0.0;
                }
                let mode = if is_rate(keyword) {
                    InterpMode::for_rates(self.time_shift)
                } else {
                    InterpMode::Linear
                };
                let data = resample(&targets, &times, &values, mode)?;
                profiles.set_vector(keyword, data, Some(name.as_str()), Some(num), Some(unit))?;
            }
            debug!(well = %name, num, steps = well.dates.len(), "packaged OFM well");
        }
        Ok(profiles)
    }
}
