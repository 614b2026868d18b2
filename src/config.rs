//! Detection configuration: thresholds, mask mode, and format-extension
//! overrides, with fail-fast validation and optional `doble.toml`
//! loading. File values sit under CLI flags; flags win.
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{DetectError, Result};
use crate::lang;
use crate::tokenize::mask::MaskMode;

/// Name of the configuration file looked up in the analysis root.
pub const CONFIG_FILE: &str = "doble.toml";

/// Validated detection options. Constructed from defaults, a config
/// file, and CLI flags before the driver starts.
#[derive(Debug, Clone)]
pub struct DetectionConfig {
    /// Minimum clone size in lines.
    pub min_lines: usize,
    /// Clones spanning more lines than this are rejected entirely.
    pub max_lines: usize,
    /// Window width and minimum clone size in significant tokens.
    pub min_tokens: usize,
    /// Optional byte cap on either side of a clone.
    pub max_size: Option<usize>,
    pub mode: MaskMode,
    /// Lowercase mask keys, for case-insensitive languages.
    pub ignore_case: bool,
    /// Format → file extensions overrides, consumed by discovery and
    /// surfaced in reporting.
    pub formats_exts: BTreeMap<String, Vec<String>>,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            min_lines: 5,
            max_lines: 1000,
            min_tokens: 50,
            max_size: None,
            mode: MaskMode::default(),
            ignore_case: false,
            formats_exts: BTreeMap::new(),
        }
    }
}

impl DetectionConfig {
    /// Reject nonsensical thresholds before any file is processed.
    pub fn validate(&self) -> Result<()> {
        if self.min_tokens < 1 {
            return Err(DetectError::InvalidConfig(
                "min_tokens must be at least 1".to_string(),
            ));
        }
        if self.min_lines < 1 {
            return Err(DetectError::InvalidConfig(
                "min_lines must be at least 1".to_string(),
            ));
        }
        if self.max_lines < self.min_lines {
            return Err(DetectError::InvalidConfig(format!(
                "max_lines ({}) must not be smaller than min_lines ({})",
                self.max_lines, self.min_lines
            )));
        }
        for format in self.formats_exts.keys() {
            if lang::find(format).is_none() {
                return Err(DetectError::InvalidConfig(format!(
                    "formats_exts names unknown format {format:?}"
                )));
            }
        }
        Ok(())
    }
}

/// Raw values from `doble.toml`. Every field is optional; missing ones
/// fall back to CLI flags or defaults during merging.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub min_lines: Option<usize>,
    pub max_lines: Option<usize>,
    pub min_tokens: Option<usize>,
    pub max_size: Option<usize>,
    pub mode: Option<MaskMode>,
    pub ignore_case: Option<bool>,
    pub formats_exts: Option<BTreeMap<String, Vec<String>>>,
    /// Glob patterns for the discovery collaborator.
    pub exclude: Option<Vec<String>>,
}

/// Load and parse a configuration file. Parse failures are configuration
/// errors (fail fast), not I/O warnings.
pub fn load_file(path: &Path) -> Result<FileConfig> {
    let text = fs::read_to_string(path)?;
    toml::from_str(&text)
        .map_err(|err| DetectError::InvalidConfig(format!("{}: {err}", path.display())))
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
