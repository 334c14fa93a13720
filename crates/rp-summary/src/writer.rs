//! Summary set writer.

use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

use chrono::{Datelike, Timelike};
use rp_binio::{Block, BlockData, BlockWriter, pad8};
use rp_profiles::Profiles;
use tracing::{debug, info};

use crate::paths::{numbered_path, spec_path, unified_path};
use crate::{SummaryError, SummaryResult};

/// Time steps per numbered data file.
pub const STEPS_PER_FILE: usize = 200;

type FileWriter = BlockWriter<BufWriter<File>>;

/// Writes a [`Profiles`] set as `SMSPEC` plus data files.
#[derive(Debug, Clone)]
pub struct SummaryWriter {
    root: PathBuf,
    unified: bool,
    steps_per_file: usize,
}

fn create(path: &Path) -> SummaryResult<FileWriter> {
    let file = File::create(path).map_err(|source| SummaryError::Create {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BlockWriter::new(BufWriter::new(file)))
}

/// Delete `path` if present. Returns whether a file was removed.
fn remove_stale(path: &Path) -> SummaryResult<bool> {
    match fs::remove_file(path) {
        Ok(()) => {
            debug!(path = %path.display(), "removed stale summary data file");
            Ok(true)
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(source) => Err(SummaryError::Remove {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn to_i32(value: usize, what: &str) -> SummaryResult<i32> {
    i32::try_from(value).map_err(|_| SummaryError::Format {
        what: format!("{what} {value} does not fit a 32 bit integer"),
    })
}

fn char_block(keyword: &str, values: &[&str]) -> Block {
    Block::new(keyword, BlockData::Char(values.iter().map(|s| pad8(s)).collect()))
}

impl SummaryWriter {
    pub fn new(root: impl AsRef<Path>, unified: bool) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            unified,
            steps_per_file: STEPS_PER_FILE,
        }
    }

    /// Change the numbered file size. Zero is treated as one.
    pub fn with_steps_per_file(mut self, steps: usize) -> Self {
        self.steps_per_file = steps.max(1);
        self
    }

    /// Write `<root>.SMSPEC`.
    pub fn write_spec(&self, profiles: &Profiles) -> SummaryResult<PathBuf> {
        let path = spec_path(&self.root);
        let mut w = create(&path)?;

        let nkeys = to_i32(profiles.vector_count(), "vector count")?;
        let (nx, ny, nz) = profiles.grid_dim;
        let sd = profiles.start_date;
        let start = vec![
            sd.day() as i32,
            sd.month() as i32,
            sd.year(),
            sd.hour() as i32,
            sd.minute() as i32,
            sd.second() as i32,
        ];

        let blocks = [
            char_block("RESTART", &[""; 9]),
            Block::new(
                "DIMENS",
                BlockData::Inte(vec![
                    nkeys,
                    to_i32(nx, "grid dimension")?,
                    to_i32(ny, "grid dimension")?,
                    to_i32(nz, "grid dimension")?,
                    0,
                    -1,
                ]),
            ),
            char_block("KEYWORDS", &profiles.keywords()),
            char_block("WGNAMES", &profiles.names()),
            Block::new("NUMS", BlockData::Inte(profiles.nums())),
            char_block("UNITS", &profiles.units()),
            Block::new("STARTDAT", BlockData::Inte(start)),
        ];
        for block in &blocks {
            w.write_block(block)?;
        }
        w.flush()?;
        info!(path = %path.display(), vectors = nkeys, "wrote summary spec");
        Ok(path)
    }

    /// Write the data files and return their paths in order.
    ///
    /// Each file starts with `SEQHDR`; each step is a `MINISTEP` index followed
    /// by the `PARAMS` values in single precision. A set without steps writes
    /// no data file. Data files left by an earlier write to the same root are
    /// removed.
    pub fn write_summary(&self, profiles: &Profiles) -> SummaryResult<Vec<PathBuf>> {
        let mut written = Vec::new();
        let mut current: Option<FileWriter> = None;

        for istep in 0..profiles.step_count() {
            let rollover = !self.unified && istep % self.steps_per_file == 0;
            if current.is_none() || rollover {
                if let Some(mut w) = current.take() {
                    w.flush()?;
                }
                let path = if self.unified {
                    unified_path(&self.root)
                } else {
                    numbered_path(&self.root, istep / self.steps_per_file + 1)
                };
                let mut w = create(&path)?;
                w.write_block(&Block::new("SEQHDR", BlockData::Inte(vec![-1])))?;
                debug!(path = %path.display(), first_step = istep, "opened summary data file");
                written.push(path);
                current = Some(w);
            }
            let Some(w) = current.as_mut() else {
                continue;
            };
            let values: Vec<f32> = profiles
                .get_step(istep)?
                .into_iter()
                .map(|v| v as f32)
                .collect();
            w.write_block(&Block::new(
                "MINISTEP",
                BlockData::Inte(vec![to_i32(istep, "step index")?]),
            ))?;
            w.write_block(&Block::new("PARAMS", BlockData::Real(values)))?;
        }
        if let Some(mut w) = current {
            w.flush()?;
        }
        self.remove_other_layout(written.len())?;
        info!(
            root = %self.root.display(),
            steps = profiles.step_count(),
            files = written.len(),
            "wrote summary data"
        );
        Ok(written)
    }

    /// Remove data files of an earlier write that the reader would pick up
    /// next to the `written` files of this one.
    fn remove_other_layout(&self, written: usize) -> SummaryResult<()> {
        let first_stale = if self.unified {
            1
        } else {
            written + 1
        };
        if !self.unified || written == 0 {
            remove_stale(&unified_path(&self.root))?;
        }
        let mut number = first_stale;
        while remove_stale(&numbered_path(&self.root, number))? {
            number += 1;
        }
        Ok(())
    }

    /// Spec followed by data files.
    pub fn write_all(&self, profiles: &Profiles) -> SummaryResult<Vec<PathBuf>> {
        let mut paths = vec![self.write_spec(profiles)?];
        paths.extend(self.write_summary(profiles)?);
        Ok(paths)
    }
}
