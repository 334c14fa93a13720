//! OFM/vol production history files.
//!
//! A file holds directives (`*METRIC`, `*DAILY`, `*DATE *OIL *GAS ...`),
//! well sections started with `*NAME <well>` and whitespace or tab separated
//! data rows. Each well becomes a set of `W...` vectors on the union of all
//! dates.

mod layout;
mod package;

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use rp_profiles::Profiles;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::dates::DateFormat;
use crate::{TextError, TextResult};
use layout::{Frequency, Layout};
use package::{Packaging, WellTable};

/// Which volume columns become vectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadType {
    #[default]
    All,
    Production,
    Injection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OfmOptions {
    /// Format of `*DATE` columns, e.g. `dd.MM.yyyy`.
    pub date_format: String,
    /// Value for missing fields. `None` carries the previous row's value.
    pub undef_value: Option<f64>,
    pub set_nonnegative: bool,
    /// Treat rates as constant backwards over each period.
    pub time_shift: bool,
    pub read_type: ReadType,
    /// Well renames applied when packaging.
    pub aliases: BTreeMap<String, String>,
}

impl Default for OfmOptions {
    fn default() -> Self {
        Self {
            date_format: "dd.MM.yyyy".to_string(),
            undef_value: None,
            set_nonnegative: true,
            time_shift: true,
            read_type: ReadType::All,
            aliases: BTreeMap::new(),
        }
    }
}

/// Read an OFM file from disk.
pub fn read_ofm(path: impl AsRef<Path>, options: &OfmOptions) -> TextResult<Profiles> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| TextError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let profiles = parse_ofm(BufReader::new(file), options)?;
    info!(
        path = %path.display(),
        vectors = profiles.vector_count(),
        steps = profiles.step_count(),
        "read OFM file"
    );
    Ok(profiles)
}

struct Wells {
    done: Vec<WellTable>,
    current: Option<WellTable>,
    time_shift: bool,
}

impl Wells {
    fn start(&mut self, name: &str, frequency: Frequency) {
        self.flush(frequency);
        self.current = Some(WellTable {
            name: name.to_string(),
            dates: Vec::new(),
            rows: Vec::new(),
        });
    }

    fn current_name(&self) -> Option<&str> {
        self.current.as_ref().map(|w| w.name.as_str())
    }

    fn flush(&mut self, frequency: Frequency) {
        let Some(mut well) = self.current.take() else {
            return;
        };
        let (Some(&last_date), Some(last_row)) = (well.dates.last(), well.rows.last()) else {
            warn!(well = %well.name, "well without data rows skipped");
            return;
        };
        if self.time_shift {
            let next = match frequency {
                Frequency::Daily => rp_core::add_days(last_date, 1),
                Frequency::Monthly => rp_core::add_months_clamped(last_date, 1),
                Frequency::Yearly => rp_core::add_years_clamped(last_date, 1),
            };
            let row = last_row.clone();
            well.dates.push(next);
            well.rows.push(row);
        }
        if let Some(pos) = self.done.iter().position(|w| w.name == well.name) {
            warn!(well = %well.name, "well appears twice, earlier data replaced");
            self.done.remove(pos);
        }
        self.done.push(well);
    }
}

/// Parse OFM text into a set with id `OFM`.
pub fn parse_ofm<R: BufRead>(reader: R, options: &OfmOptions) -> TextResult<Profiles> {
    let date_format: DateFormat = options.date_format.parse()?;
    let mut layout = Layout::new(options.undef_value);
    let mut wells = Wells {
        done: Vec::new(),
        current: None,
        time_shift: options.time_shift,
    };
    let mut previous: Vec<f64> = Vec::new();
    let mut reading = true;

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line?;
        let text = line.trim_end_matches('\r').trim_start();
        if text.starts_with("--") {
            continue;
        }
        let text = match text.find("--") {
            Some(i) => &text[..i],
            None => text,
        }
        .trim_end();
        let upper = text.to_ascii_uppercase();

        if text.is_empty() || upper.starts_with("\\*") {
            continue;
        } else if upper.contains("*READOFF") {
            reading = false;
        } else if upper.contains("*READON") {
            reading = true;
        } else if !reading {
            continue;
        } else if let Some(pos) = upper.find("*NAME") {
            let name = text[pos + "*NAME".len()..].trim();
            wells.start(name, layout.frequency);
            previous = layout.initial_values();
        } else if upper.contains('*') {
            if layout.apply_directive(&upper, line_no)? {
                previous = layout.initial_values();
            }
        } else {
            if !layout.is_declared() {
                return Err(TextError::parse(line_no, "data row before column declaration"));
            }
            let mut row = layout.parse_row(text, line_no, date_format, &previous)?;
            if let Some(name) = row.well.take() {
                if wells.current_name() != Some(name.as_str()) {
                    wells.start(&name, layout.frequency);
                    previous = layout.initial_values();
                    row = layout.parse_row(text, line_no, date_format, &previous)?;
                }
            }
            if options.set_nonnegative {
                row.values.iter_mut().for_each(|v| *v = v.max(0.0));
            }
            if layout.undef.is_none() {
                previous.clone_from(&row.values);
            }
            layout.normalize(row.date, &mut row.values);

            let Some(well) = wells.current.as_mut() else {
                return Err(TextError::parse(line_no, "data row before any well name"));
            };
            if well.dates.last().is_some_and(|&d| row.date <= d) {
                return Err(TextError::parse(
                    line_no,
                    format!("date {} not after the previous row of {}", row.date, well.name),
                ));
            }
            well.dates.push(row.date);
            well.rows.push(row.values);
        }
    }
    wells.flush(layout.frequency);
    debug!(wells = wells.done.len(), columns = ?layout.names(), "parsed OFM tables");

    Packaging {
        columns: layout.names(),
        cumulative: layout.cumulative,
        time_shift: options.time_shift,
        read_type: options.read_type,
        aliases: &options.aliases,
    }
    .build(&wells.done)
}
