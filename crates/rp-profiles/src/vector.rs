//! A single profiles vector.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Placeholder for an unset owner name, unit or LGR name.
pub const NO_NAME: &str = ":+:+:+:+";

/// One sampled quantity: keyword, owner, identifier and samples.
///
/// Text fields are stored trimmed. The sample count is controlled by the
/// owning [`Profiles`](crate::Profiles), so samples are read-only here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfilesVector {
    keyword: String,
    name: String,
    num: i32,
    unit: String,
    lgr_name: String,
    data: Vec<f64>,
    index: usize,
}

impl ProfilesVector {
    pub(crate) fn new(
        keyword: &str,
        data: Vec<f64>,
        name: Option<&str>,
        num: Option<i32>,
        unit: Option<&str>,
        index: usize,
    ) -> Self {
        Self {
            keyword: keyword.trim().to_string(),
            name: name.map_or_else(|| NO_NAME.to_string(), |n| n.trim().to_string()),
            num: num.unwrap_or(0),
            unit: unit.map_or_else(|| NO_NAME.to_string(), |u| u.trim().to_string()),
            lgr_name: NO_NAME.to_string(),
            data,
            index,
        }
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Owner name, or `None` for the placeholder.
    pub fn owner(&self) -> Option<&str> {
        (self.name != NO_NAME).then_some(self.name.as_str())
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = name.trim().to_string();
    }

    pub fn num(&self) -> i32 {
        self.num
    }

    pub fn set_num(&mut self, num: i32) {
        self.num = num;
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn set_unit(&mut self, unit: &str) {
        self.unit = unit.trim().to_string();
    }

    pub fn lgr_name(&self) -> &str {
        &self.lgr_name
    }

    pub fn set_lgr_name(&mut self, lgr_name: &str) {
        self.lgr_name = lgr_name.trim().to_string();
    }

    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Position within the owning set.
    pub fn index(&self) -> usize {
        self.index
    }

    pub(crate) fn set_data(&mut self, data: Vec<f64>) {
        self.data = data;
    }

    pub(crate) fn data_mut(&mut self) -> &mut Vec<f64> {
        &mut self.data
    }

    pub(crate) fn matches(&self, keyword: &str, name: Option<&str>, num: Option<i32>) -> bool {
        self.keyword == keyword
            && name.is_none_or(|n| self.name == n.trim())
            && num.is_none_or(|n| self.num == n)
    }
}

impl fmt::Display for ProfilesVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {}",
            self.keyword, self.name, self.num, self.unit, self.lgr_name
        )
    }
}
