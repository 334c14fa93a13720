//! Building a set from flattened `(keyword, owner, date, value)` records.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rp_interp::{InterpMode, Series};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::keyword::{is_cumulative, is_rate};
use crate::{DateAxis, Profiles, ProfilesResult};

/// One dated sample of a keyword for an owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatedValue {
    pub keyword: String,
    pub owner: String,
    pub date: NaiveDate,
    pub value: f64,
}

impl DatedValue {
    pub fn new(keyword: &str, owner: &str, date: NaiveDate, value: f64) -> Self {
        Self {
            keyword: keyword.trim().to_string(),
            owner: owner.trim().to_string(),
            date,
            value,
        }
    }
}

/// Resampling rule for a keyword under the given rate representation.
pub fn mode_for(keyword: &str, backwards: bool) -> InterpMode {
    if is_rate(keyword) {
        InterpMode::for_rates(backwards)
    } else if is_cumulative(keyword) {
        InterpMode::LinearVolume
    } else {
        InterpMode::Linear
    }
}

/// Collect records onto their common date axis.
///
/// Each `(keyword, owner)` pair becomes one vector. Owners are numbered from 1
/// in order of first appearance. Samples are resampled from the owner's own
/// dates onto the axis; a later record for the same date replaces an earlier one.
pub fn profiles_from_dated_values(
    records: &[DatedValue],
    backwards: bool,
) -> ProfilesResult<Profiles> {
    let axis = DateAxis::from_dates(records.iter().map(|r| r.date));
    let mut profiles = axis.new_profiles("DATED", backwards)?;
    let targets = axis.times();

    let mut owners: Vec<&str> = Vec::new();
    let mut series: Vec<((&str, &str), BTreeMap<NaiveDate, f64>)> = Vec::new();
    for r in records {
        if !owners.contains(&r.owner.as_str()) {
            owners.push(&r.owner);
        }
        let key = (r.keyword.as_str(), r.owner.as_str());
        match series.iter_mut().find(|(k, _)| *k == key) {
            Some((_, samples)) => {
                samples.insert(r.date, r.value);
            }
            None => series.push((key, BTreeMap::from([(r.date, r.value)]))),
        }
    }

    for ((keyword, owner), samples) in &series {
        let times: Vec<f64> = samples.keys().map(|&d| axis.time_of(d)).collect();
        let values: Vec<f64> = samples.values().copied().collect();
        let resampled =
            Series::new(&times, &values)?.resample(&targets, mode_for(keyword, backwards));
        let num = owners.iter().position(|o| o == owner).map_or(0, |i| i as i32 + 1);
        profiles.set_vector(keyword, resampled, Some(*owner), Some(num), None)?;
    }
    debug!(
        vectors = profiles.vector_count(),
        steps = profiles.step_count(),
        owners = owners.len(),
        "built profiles from dated values"
    );
    Ok(profiles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rp_core::date;

    #[test]
    fn modes_follow_keyword_class() {
        assert_eq!(mode_for("WOPR", true), InterpMode::Backwards);
        assert_eq!(mode_for("WOPR", false), InterpMode::Forwards);
        assert_eq!(mode_for("WOPT", true), InterpMode::LinearVolume);
        assert_eq!(mode_for("WBHP", true), InterpMode::Linear);
    }

    #[test]
    fn owners_share_one_axis() {
        let d1 = date(2020, 1, 1).unwrap();
        let d2 = date(2020, 1, 11).unwrap();
        let d3 = date(2020, 1, 21).unwrap();
        let records = vec![
            DatedValue::new("WOPR", "A", d1, 100.0),
            DatedValue::new("WOPR", "A", d3, 300.0),
            DatedValue::new("WOPR", "B", d2, 50.0),
            DatedValue::new("WOPT", "B", d2, 500.0),
            DatedValue::new("WOPT", "B", d3, 900.0),
        ];
        let p = profiles_from_dated_values(&records, true).unwrap();
        assert_eq!(p.get_time().unwrap(), &[0.0, 10.0, 20.0]);

        let a = p.get_vector("WOPR", Some("A"), None).unwrap();
        assert_eq!(a.num(), 1);
        assert_eq!(a.data(), &[100.0, 300.0, 300.0]);

        let b = p.get_vector("WOPR", Some("B"), None).unwrap();
        assert_eq!(b.num(), 2);
        assert_eq!(b.data(), &[50.0, 50.0, 0.0]);

        let cum = p.get_vector("WOPT", Some("B"), None).unwrap();
        assert_eq!(cum.data(), &[500.0, 500.0, 900.0]);
        assert_eq!(p.well_names(), vec!["A".to_string(), "B".to_string()]);
    }

    #[test]
    fn empty_input_gives_empty_axis() {
        let p = profiles_from_dated_values(&[], true).unwrap();
        assert_eq!(p.step_count(), 0);
        assert_eq!(p.vector_count(), 4);
    }
}
