//! Summary set reader.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use rp_binio::{Block, BlockData, BlockReader};
use rp_profiles::Profiles;
use tracing::{debug, info, warn};

use crate::paths::{numbered_path, set_name, spec_path, unified_path};
use crate::{SummaryError, SummaryResult};

/// Reader for one summary set.
///
/// [`open`](Self::open) only checks the `SMSPEC` file; data files are opened
/// by [`read_summary`](Self::read_summary) in ascending order.
pub struct SummaryReader {
    root: PathBuf,
    spec: Option<File>,
    keys: usize,
    steps: usize,
    files: usize,
}

fn open(path: &Path) -> SummaryResult<File> {
    File::open(path).map_err(|source| SummaryError::Open {
        path: path.to_path_buf(),
        source,
    })
}

fn format(what: impl Into<String>) -> SummaryError {
    SummaryError::Format { what: what.into() }
}

fn trimmed(values: &[String]) -> Vec<String> {
    values.iter().map(|s| s.trim().to_string()).collect()
}

impl SummaryReader {
    pub fn open(root: impl AsRef<Path>) -> SummaryResult<Self> {
        let root = root.as_ref().to_path_buf();
        let spec = open(&spec_path(&root))?;
        Ok(Self {
            root,
            spec: Some(spec),
            keys: 0,
            steps: 0,
            files: 0,
        })
    }

    /// Vectors declared by the last [`read_spec`](Self::read_spec).
    pub fn key_count(&self) -> usize {
        self.keys
    }

    /// Time steps read so far.
    pub fn step_count(&self) -> usize {
        self.steps
    }

    /// Data files read so far.
    pub fn file_count(&self) -> usize {
        self.files
    }

    /// Read vector metadata, start date and grid dimensions.
    ///
    /// The returned set has its vectors declared but no samples.
    pub fn read_spec(&mut self) -> SummaryResult<Profiles> {
        let path = spec_path(&self.root);
        let file = match self.spec.take() {
            Some(f) => f,
            None => open(&path)?,
        };
        let mut reader = BlockReader::new(BufReader::new(file))?;

        let mut dimens: Option<Vec<i32>> = None;
        let mut keywords: Vec<String> = Vec::new();
        let mut names: Option<Vec<String>> = None;
        let mut nums: Option<Vec<i32>> = None;
        let mut units: Option<Vec<String>> = None;
        let mut start_date = rp_core::default_start();

        for block in reader.blocks() {
            let Block { keyword, data } = block?;
            match (keyword.as_str(), data) {
                ("DIMENS", BlockData::Inte(v)) => dimens = Some(v),
                ("KEYWORDS", BlockData::Char(v)) => keywords = trimmed(&v),
                ("WGNAMES" | "NAMES", BlockData::Char(v)) => names = Some(trimmed(&v)),
                ("NUMS", BlockData::Inte(v)) => nums = Some(v),
                ("UNITS", BlockData::Char(v)) => units = Some(trimmed(&v)),
                ("STARTDAT", BlockData::Inte(v)) => start_date = start_date_from(&v)?,
                (other, data) => debug!(keyword = other, kind = %data.kind(), "skipping spec block"),
            }
        }

        let mut profiles = Profiles::with_keywords(
            Some(set_name(&self.root).as_str()),
            &keywords,
            names.as_deref(),
            nums.as_deref(),
            units.as_deref(),
        )?;
        profiles.start_date = start_date;
        if let Some(d) = &dimens {
            if d.len() < 4 {
                return Err(format(format!("DIMENS holds {} values, expected 4+", d.len())));
            }
            if usize::try_from(d[0]).ok() != Some(keywords.len()) {
                warn!(
                    declared = d[0],
                    found = keywords.len(),
                    "DIMENS vector count differs from KEYWORDS"
                );
            }
            let dim = |x: i32| {
                usize::try_from(x).map_err(|_| format(format!("negative grid dimension {x}")))
            };
            profiles.grid_dim = (dim(d[1])?, dim(d[2])?, dim(d[3])?);
        }
        self.keys = profiles.vector_count();
        info!(path = %path.display(), vectors = self.keys, "read summary spec");
        Ok(profiles)
    }

    /// Append every time step of the data files to `profiles`.
    ///
    /// The unified file is used when it can be opened. Otherwise numbered
    /// files are read from 1 until the first one that cannot be opened.
    pub fn read_summary(&mut self, profiles: &mut Profiles) -> SummaryResult<()> {
        let unified = unified_path(&self.root);
        if let Ok(file) = File::open(&unified) {
            return self.read_data_file(&unified, file, profiles);
        }
        for number in 1.. {
            let path = numbered_path(&self.root, number);
            let file = match File::open(&path) {
                Ok(f) => f,
                Err(source) if self.files == 0 => return Err(SummaryError::Open { path, source }),
                Err(_) => break,
            };
            self.read_data_file(&path, file, profiles)?;
        }
        Ok(())
    }

    fn read_data_file(
        &mut self,
        path: &Path,
        file: File,
        profiles: &mut Profiles,
    ) -> SummaryResult<()> {
        let mut reader = BlockReader::new(BufReader::new(file))?;
        let mut steps = 0;
        for block in reader.blocks() {
            let block = block?;
            if block.keyword != "PARAMS" {
                continue;
            }
            let values = match block.data {
                BlockData::Real(v) => v.into_iter().map(f64::from).collect(),
                BlockData::Doub(v) => v,
                other => {
                    return Err(format(format!(
                        "PARAMS in {} has type {}",
                        path.display(),
                        other.kind()
                    )));
                }
            };
            profiles.append_tstep(&values)?;
            steps += 1;
        }
        self.files += 1;
        self.steps += steps;
        info!(path = %path.display(), steps, "read summary data file");
        Ok(())
    }
}

fn start_date_from(v: &[i32]) -> SummaryResult<chrono::NaiveDateTime> {
    let field = |i: usize| {
        u32::try_from(v[i]).map_err(|_| format(format!("negative STARTDAT field {}", v[i])))
    };
    let (day, month, year) = match v.len() {
        3 | 6.. => (field(0)?, field(1)?, v[2]),
        n => return Err(format(format!("STARTDAT holds {n} values, expected 3 or 6"))),
    };
    let (hour, minute, second) = if v.len() >= 6 {
        (field(3)?, field(4)?, field(5)?)
    } else {
        (0, 0, 0)
    };
    rp_core::datetime(year, month, day, hour, minute, second)
        .map_err(|e| format(format!("STARTDAT: {e}")))
}

/// Open a set and read spec and data in one go.
pub fn read_summary_set(root: impl AsRef<Path>) -> SummaryResult<Profiles> {
    let mut reader = SummaryReader::open(root)?;
    let mut profiles = reader.read_spec()?;
    reader.read_summary(&mut profiles)?;
    Ok(profiles)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_date_forms() {
        let d = start_date_from(&[15, 3, 2021]).unwrap();
        assert_eq!(d, rp_core::datetime(2021, 3, 15, 0, 0, 0).unwrap());
        let d = start_date_from(&[1, 1, 2000, 6, 30, 15]).unwrap();
        assert_eq!(d, rp_core::datetime(2000, 1, 1, 6, 30, 15).unwrap());
        assert!(start_date_from(&[31, 2, 2021]).is_err());
        assert!(start_date_from(&[1, 1]).is_err());
        assert!(start_date_from(&[1, -1, 2000]).is_err());
    }

    #[test]
    fn missing_spec_is_open_error() {
        let dir = tempfile::tempdir().unwrap();
        match SummaryReader::open(dir.path().join("NOPE")) {
            Err(SummaryError::Open { path, .. }) => assert!(path.ends_with("NOPE.SMSPEC")),
            Err(other) => panic!("unexpected error {other}"),
            Ok(_) => panic!("opened a missing file"),
        }
    }
}
