//! The profiles container.

use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::vector::{NO_NAME, ProfilesVector};
use crate::{ProfilesError, ProfilesResult};

/// Grid dimensions `(nx, ny, nz)`.
pub type GridDim = (usize, usize, usize);

/// A set of profiles vectors sharing one time axis.
///
/// Every vector holds exactly [`step_count`](Self::step_count) samples. Only
/// [`set_vector`](Self::set_vector) (on an empty axis) and
/// [`append_tstep`](Self::append_tstep) change the step count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profiles {
    pub id: Option<String>,
    pub start_date: NaiveDateTime,
    pub grid_dim: GridDim,
    /// Rates are constant backwards over each step (`true`) or forwards.
    pub backwards: bool,
    vectors: Vec<ProfilesVector>,
    steps: usize,
}

impl Default for Profiles {
    fn default() -> Self {
        Self {
            id: None,
            start_date: rp_core::default_start(),
            grid_dim: (1, 1, 1),
            backwards: true,
            vectors: Vec::new(),
            steps: 0,
        }
    }
}

impl Profiles {
    pub fn new(id: Option<&str>) -> Self {
        Self {
            id: id.map(str::to_string),
            ..Self::default()
        }
    }

    /// Declare empty vectors from parallel metadata lists.
    pub fn with_keywords(
        id: Option<&str>,
        keywords: &[String],
        names: Option<&[String]>,
        nums: Option<&[i32]>,
        units: Option<&[String]>,
    ) -> ProfilesResult<Self> {
        let n = keywords.len();
        for len in [names.map(<[_]>::len), nums.map(<[_]>::len), units.map(<[_]>::len)]
            .into_iter()
            .flatten()
        {
            if len != n {
                return Err(ProfilesError::InconsistentLength {
                    expected: n,
                    found: len,
                });
            }
        }
        let mut p = Self::new(id);
        p.vectors = keywords
            .iter()
            .enumerate()
            .map(|(i, key)| {
                ProfilesVector::new(
                    key,
                    Vec::new(),
                    names.map(|v| v[i].as_str()),
                    nums.map(|v| v[i]),
                    units.map(|v| v[i].as_str()),
                    i,
                )
            })
            .collect();
        Ok(p)
    }

    pub fn vector_count(&self) -> usize {
        self.vectors.len()
    }

    pub fn step_count(&self) -> usize {
        self.steps
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ProfilesVector> {
        self.vectors.iter()
    }

    /// Mutable access to vector metadata. Sample data stays read-only.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, ProfilesVector> {
        self.vectors.iter_mut()
    }

    pub fn vector(&self, index: usize) -> ProfilesResult<&ProfilesVector> {
        self.vectors
            .get(index)
            .ok_or(ProfilesError::IndexOutOfRange {
                index,
                len: self.vectors.len(),
            })
    }

    /// First vector matching the keyword, and the name/identifier when given.
    pub fn get_vector(
        &self,
        keyword: &str,
        name: Option<&str>,
        num: Option<i32>,
    ) -> Option<&ProfilesVector> {
        let key = keyword.trim();
        self.vectors.iter().find(|v| v.matches(key, name, num))
    }

    /// Mutable access for metadata edits; samples stay under container control.
    pub fn get_vector_mut(
        &mut self,
        keyword: &str,
        name: Option<&str>,
        num: Option<i32>,
    ) -> Option<&mut ProfilesVector> {
        let key = keyword.trim();
        self.vectors.iter_mut().find(|v| v.matches(key, name, num))
    }

    /// Insert or replace a vector. Returns its index.
    ///
    /// A replaced vector keeps its unit. On a set without samples yet, the
    /// new length becomes the step count and any declared vectors are zero
    /// filled to match.
    pub fn set_vector(
        &mut self,
        keyword: &str,
        data: Vec<f64>,
        name: Option<&str>,
        num: Option<i32>,
        unit: Option<&str>,
    ) -> ProfilesResult<usize> {
        if self.steps == 0 {
            if !data.is_empty() {
                self.steps = data.len();
                for v in &mut self.vectors {
                    v.data_mut().resize(self.steps, 0.0);
                }
            }
        } else if data.len() != self.steps {
            return Err(ProfilesError::InconsistentLength {
                expected: self.steps,
                found: data.len(),
            });
        }

        let key = keyword.trim();
        if let Some(v) = self.vectors.iter_mut().find(|v| v.matches(key, name, num)) {
            v.set_data(data);
            return Ok(v.index());
        }
        let index = self.vectors.len();
        let mut data = data;
        data.resize(self.steps, 0.0);
        self.vectors
            .push(ProfilesVector::new(key, data, name, num, unit, index));
        Ok(index)
    }

    /// Append one sample to every vector. Returns the new step count.
    pub fn append_tstep(&mut self, values: &[f64]) -> ProfilesResult<usize> {
        if values.len() != self.vectors.len() {
            return Err(ProfilesError::InconsistentLength {
                expected: self.vectors.len(),
                found: values.len(),
            });
        }
        for (v, &x) in self.vectors.iter_mut().zip(values) {
            v.data_mut().push(x);
        }
        self.steps += 1;
        Ok(self.steps)
    }

    /// All vector values at step `istep`.
    pub fn get_step(&self, istep: usize) -> ProfilesResult<Vec<f64>> {
        if istep >= self.steps {
            return Err(ProfilesError::IndexOutOfRange {
                index: istep,
                len: self.steps,
            });
        }
        Ok(self.vectors.iter().map(|v| v.data()[istep]).collect())
    }

    pub fn get_time(&self) -> Option<&[f64]> {
        self.get_vector("TIME", None, None).map(ProfilesVector::data)
    }

    /// Like [`get_vector`](Self::get_vector) but absence is an error.
    pub fn require(&self, keyword: &str, name: Option<&str>) -> ProfilesResult<&ProfilesVector> {
        self.get_vector(keyword, name, None)
            .ok_or_else(|| ProfilesError::MissingVector {
                keyword: keyword.trim().to_string(),
            })
    }

    pub fn keywords(&self) -> Vec<&str> {
        self.vectors.iter().map(ProfilesVector::keyword).collect()
    }

    pub fn names(&self) -> Vec<&str> {
        self.vectors.iter().map(ProfilesVector::name).collect()
    }

    pub fn nums(&self) -> Vec<i32> {
        self.vectors.iter().map(ProfilesVector::num).collect()
    }

    pub fn units(&self) -> Vec<&str> {
        self.vectors.iter().map(ProfilesVector::unit).collect()
    }

    /// Sorted owner names of well vectors.
    pub fn well_names(&self) -> Vec<String> {
        self.owner_names('W')
    }

    /// Sorted owner names of group vectors.
    pub fn group_names(&self) -> Vec<String> {
        self.owner_names('G')
    }

    fn owner_names(&self, prefix: char) -> Vec<String> {
        self.vectors
            .iter()
            .filter(|v| v.keyword().starts_with(prefix) && v.name() != NO_NAME)
            .map(|v| v.name().to_string())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

impl<'a> IntoIterator for &'a Profiles {
    type Item = &'a ProfilesVector;
    type IntoIter = std::slice::Iter<'a, ProfilesVector>;

    fn into_iter(self) -> Self::IntoIter {
        self.vectors.iter()
    }
}

impl fmt::Display for Profiles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (nx, ny, nz) = self.grid_dim;
        writeln!(f, "Profiles set:        {}", self.id.as_deref().unwrap_or("None"))?;
        writeln!(f, "No of vectors:       {}", self.vector_count())?;
        writeln!(f, "No of time steps:    {}", self.steps)?;
        writeln!(f, "Grid dimension:      {nx} {ny} {nz}")?;
        writeln!(f, "Start date:          {}", self.start_date)?;
        write!(
            f,
            "Rate representation: {}",
            if self.backwards {
                "Backwards constant"
            } else {
                "Forwards constant"
            }
        )
    }
}
