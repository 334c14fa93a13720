//! File names of a summary set.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

fn with_suffix(root: &Path, suffix: &str) -> PathBuf {
    let mut s = OsString::from(root.as_os_str());
    s.push(suffix);
    PathBuf::from(s)
}

pub fn spec_path(root: &Path) -> PathBuf {
    with_suffix(root, ".SMSPEC")
}

pub fn unified_path(root: &Path) -> PathBuf {
    with_suffix(root, ".UNSMRY")
}

/// `<root>.S0001` style name; wider than four digits only when needed.
pub fn numbered_path(root: &Path, number: usize) -> PathBuf {
    with_suffix(root, &format!(".S{number:04}"))
}

/// Set name used as profiles id: the last component of the root.
pub fn set_name(root: &Path) -> String {
    root.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| root.display().to_string())
}
