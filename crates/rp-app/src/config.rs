//! YAML job files for OFM imports.

use std::path::{Path, PathBuf};

use rp_text::{DateFormat, OfmOptions};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

fn default_unified() -> bool {
    true
}

/// One OFM import: input file, output summary root and reader options.
///
/// Reader options sit at the top level of the YAML document next to
/// `input`, `output_root` and `unified`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportConfig {
    pub input: PathBuf,
    pub output_root: PathBuf,
    #[serde(default = "default_unified")]
    pub unified: bool,
    #[serde(flatten)]
    pub ofm: OfmOptions,
}

impl ImportConfig {
    pub fn new(input: impl Into<PathBuf>, output_root: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output_root: output_root.into(),
            unified: true,
            ofm: OfmOptions::default(),
        }
    }
}

/// Load and validate a job file.
pub fn load_import_config(path: &Path) -> AppResult<ImportConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| AppError::ConfigFileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let config: ImportConfig = serde_yaml::from_str(&content)
        .map_err(|e| AppError::Config(format!("Failed to parse import YAML: {}", e)))?;

    validate_import_config(&config)?;
    Ok(config)
}

pub fn save_import_config(path: &Path, config: &ImportConfig) -> AppResult<()> {
    let content = serde_yaml::to_string(config)
        .map_err(|e| AppError::Config(format!("Failed to serialize import config: {}", e)))?;

    std::fs::write(path, content).map_err(|e| AppError::ConfigFileWrite {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}

pub fn validate_import_config(config: &ImportConfig) -> AppResult<()> {
    if config.input.as_os_str().is_empty() {
        return Err(AppError::Validation("input file must be given".to_string()));
    }
    if config.output_root.as_os_str().is_empty() {
        return Err(AppError::Validation("output_root must be given".to_string()));
    }
    config
        .ofm
        .date_format
        .parse::<DateFormat>()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    Ok(())
}
