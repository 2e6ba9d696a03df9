//! User configuration (`config.toml`).

use directories::ProjectDirs;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{Result, TabulaError};

/// Filter used when neither `RUST_LOG` nor the config sets one.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Maximum number of undo snapshots; unbounded when absent.
    pub history_limit: Option<usize>,
    /// `tracing` filter directive, e.g. `"debug"` or `"tabula_core=trace"`.
    pub log_level: Option<String>,
    pub export: ExportConfig,
}

/// Fixed export rectangle. When either side is missing the populated extent is used.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportConfig {
    pub rows: Option<usize>,
    pub cols: Option<usize>,
}

pub fn default_config_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("", "", "tabula")?;
    let mut path = proj.config_dir().to_path_buf();
    path.push("config.toml");
    Some(path)
}

impl Config {
    pub fn from_toml(content: &str, path: &Path) -> Result<Config> {
        toml::from_str(content).map_err(|source| TabulaError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load from `explicit` (which must exist), else from the default
    /// location when present, else defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Config> {
        let path = match explicit {
            Some(p) => p.to_path_buf(),
            None => match default_config_path() {
                Some(p) if p.is_file() => p,
                _ => return Ok(Config::default()),
            },
        };
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml(&content, &path)
    }

    pub fn log_filter(&self) -> &str {
        self.log_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }

    pub fn export_dims(&self) -> Option<(usize, usize)> {
        Some((self.export.rows?, self.export.cols?))
    }
}
