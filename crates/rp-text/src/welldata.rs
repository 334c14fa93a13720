//! Column formatted well data.
//!
//! ```text
//! # Backwards constant
//! #
//! WELL      DATE  WOPR  WBHP
//! ""        ""    SM3/D  BARS
//! "OP1"  01.01.2020  100  250
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use rp_profiles::{DatedValue, Profiles, profiles_from_dated_values};
use tracing::{debug, info};

use crate::dates::{DateFormat, format_date};
use crate::split::split_terms;
use crate::{TextError, TextResult};

/// Well keywords written, in column order.
pub const WELL_KEYWORDS: [&str; 18] = [
    "WOPR", "WGPR", "WWPR", "WOIR", "WGIR", "WWIR", "WOPRH", "WGPRH", "WWPRH", "WOPT", "WGPT",
    "WWPT", "WOIT", "WGIT", "WWIT", "WEFF", "WBHP", "WTHP",
];

const DATE_FORMAT: DateFormat = DateFormat::Separated('.');

fn unit_text(unit: &str) -> &str {
    if unit.is_empty() || unit == rp_profiles::NO_NAME {
        "\"\""
    } else {
        unit
    }
}

/// Write the well vectors of `profiles`, one row per well and step.
pub fn write_welldata<W: Write>(profiles: &Profiles, out: &mut W) -> TextResult<()> {
    let day = profiles.require("DAY", None)?.data();
    let month = profiles.require("MONTH", None)?.data();
    let year = profiles.require("YEAR", None)?.data();

    let keys: Vec<(&str, &str)> = WELL_KEYWORDS
        .iter()
        .filter_map(|&k| profiles.get_vector(k, None, None).map(|v| (k, v.unit())))
        .collect();

    let rep = if profiles.backwards {
        "Backwards"
    } else {
        "Forwards"
    };
    writeln!(out, "# {rep} constant")?;
    writeln!(out, "#")?;
    write!(out, "WELL      DATE  ")?;
    for (key, _) in &keys {
        write!(out, "{key}  ")?;
    }
    writeln!(out)?;
    write!(out, "\"\"        \"\"    ")?;
    for (_, unit) in &keys {
        write!(out, "{}  ", unit_text(unit))?;
    }
    writeln!(out)?;

    let wells = profiles.well_names();
    for well in &wells {
        let columns: Vec<Option<&[f64]>> = keys
            .iter()
            .map(|(k, _)| profiles.get_vector(k, Some(well.as_str()), None).map(|v| v.data()))
            .collect();
        for i in 0..profiles.step_count() {
            let date = rp_core::date(year[i] as i32, month[i] as u32, day[i] as u32)?;
            write!(out, "\"{well}\"  {}", format_date(date))?;
            for col in &columns {
                write!(out, "  {}", col.map_or(0.0, |d| d[i]))?;
            }
            writeln!(out)?;
        }
    }
    out.flush()?;
    debug!(wells = wells.len(), keys = keys.len(), "wrote well data");
    Ok(())
}

pub fn write_welldata_file(profiles: &Profiles, path: impl AsRef<Path>) -> TextResult<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| TextError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    write_welldata(profiles, &mut BufWriter::new(file))?;
    info!(path = %path.display(), "wrote well data file");
    Ok(())
}

fn is_header_key(term: &str) -> bool {
    term == "WELL" || term == "DATE" || WELL_KEYWORDS.contains(&term)
}

/// Read column formatted well data into a set with id `TEXT`.
pub fn read_welldata<R: BufRead>(reader: R) -> TextResult<Profiles> {
    let mut backwards = true;
    let mut keywords: Vec<String> = Vec::new();
    let mut units: Vec<String> = Vec::new();
    let mut expect_units = false;
    let mut records = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line?;
        let line = line.trim_end_matches('\r');

        if let Some(comment) = line.strip_prefix('#') {
            let terms = split_terms(comment, line_no)?;
            match terms.first().map(String::as_str) {
                Some("Backwards") => backwards = true,
                Some("Forwards") => backwards = false,
                _ => {}
            }
            continue;
        }
        let text = line.split('#').next().unwrap_or_default();
        let terms = split_terms(text, line_no)?;
        if terms.is_empty() {
            continue;
        }

        if is_header_key(&terms[0]) {
            if let Some(bad) = terms.iter().find(|t| !is_header_key(t)) {
                return Err(TextError::parse(line_no, format!("unsupported keyword {bad}")));
            }
            keywords = terms
                .into_iter()
                .filter(|t| t != "WELL" && t != "DATE")
                .collect();
            expect_units = true;
            continue;
        }

        let expected = keywords.len() + 2;
        if expect_units {
            if terms.len() != expected {
                return Err(TextError::parse(
                    line_no,
                    format!("expected {expected} units, found {}", terms.len()),
                ));
            }
            units = terms[2..].to_vec();
            expect_units = false;
            continue;
        }

        if keywords.is_empty() {
            return Err(TextError::parse(line_no, "data row before keyword line"));
        }
        if terms.len() != expected {
            return Err(TextError::parse(
                line_no,
                format!("expected {expected} items, found {}", terms.len()),
            ));
        }
        let date = DATE_FORMAT
            .parse(&terms[1])
            .map_err(|e| TextError::parse(line_no, e.to_string()))?;
        for (key, item) in keywords.iter().zip(&terms[2..]) {
            let value: f64 = item
                .parse()
                .map_err(|_| TextError::parse(line_no, format!("invalid number '{item}'")))?;
            records.push(DatedValue::new(key, &terms[0], date, value));
        }
    }

    if records.is_empty() {
        return Err(TextError::NoData);
    }
    let mut profiles = profiles_from_dated_values(&records, backwards)?;
    profiles.id = Some("TEXT".to_string());
    for v in profiles.iter_mut() {
        if let Some(i) = keywords.iter().position(|k| k == v.keyword()) {
            if let Some(unit) = units.get(i) {
                v.set_unit(unit);
            }
        }
    }
    debug!(
        vectors = profiles.vector_count(),
        steps = profiles.step_count(),
        "read well data"
    );
    Ok(profiles)
}

pub fn read_welldata_file(path: impl AsRef<Path>) -> TextResult<Profiles> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| TextError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    read_welldata(BufReader::new(file))
}
