//! Listing and dumping blocked binary files.

use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;

use rp_binio::BlockReader;
use tracing::debug;

use crate::error::{AppError, AppResult};

fn open_blocks(path: &Path) -> AppResult<BlockReader<BufReader<File>>> {
    let file = File::open(path).map_err(|e| AppError::Open {
        path: path.to_path_buf(),
        source: e,
    })?;
    let reader = BlockReader::new(BufReader::new(file))?;
    debug!(path = %path.display(), endian = ?reader.endian(), "opened block file");
    Ok(reader)
}

/// Write one `keyword count type` line per block.
pub fn list_blocks<W: Write>(path: &Path, out: &mut W) -> AppResult<()> {
    open_blocks(path)?.list_all(out)?;
    Ok(())
}

/// Like [`list_blocks`] with the values of every block.
pub fn dump_blocks<W: Write>(path: &Path, out: &mut W) -> AppResult<()> {
    open_blocks(path)?.dump_all(out)?;
    Ok(())
}
