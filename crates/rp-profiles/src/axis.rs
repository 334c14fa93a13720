//! Common date axis for sets built from dated samples.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::{Profiles, ProfilesResult};

/// Sorted, de-duplicated dates with `TIME` measured in days from the first.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DateAxis {
    dates: Vec<NaiveDate>,
}

impl DateAxis {
    pub fn from_dates(dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        let set: BTreeSet<NaiveDate> = dates.into_iter().collect();
        Self {
            dates: set.into_iter().collect(),
        }
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn first(&self) -> Option<NaiveDate> {
        self.dates.first().copied()
    }

    /// Days from the first axis date to `date`.
    pub fn time_of(&self, date: NaiveDate) -> f64 {
        self.first()
            .map_or(0.0, |start| rp_core::days_between(start, date) as f64)
    }

    pub fn times(&self) -> Vec<f64> {
        self.dates.iter().map(|&d| self.time_of(d)).collect()
    }

    /// Create a set on this axis holding `TIME`, `DAY`, `MONTH` and `YEAR`.
    ///
    /// The start date is the first axis date at midnight.
    pub fn new_profiles(&self, id: &str, backwards: bool) -> ProfilesResult<Profiles> {
        let mut p = Profiles::new(Some(id));
        p.backwards = backwards;
        if let Some(start) = self.first() {
            p.start_date = start.and_time(chrono::NaiveTime::MIN);
        }
        let (mut day, mut month, mut year) = (Vec::new(), Vec::new(), Vec::new());
        for &d in &self.dates {
            let (dd, mm, yy) = rp_core::dmy(d);
            day.push(dd);
            month.push(mm);
            year.push(yy);
        }
        p.set_vector("TIME", self.times(), None, None, Some("DAYS"))?;
        p.set_vector("DAY", day, None, None, Some(""))?;
        p.set_vector("MONTH", month, None, None, Some(""))?;
        p.set_vector("YEAR", year, None, None, Some(""))?;
        Ok(p)
    }
}
