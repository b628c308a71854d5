//! Config file loading.
//!
//! The config is a YAML document; every key is optional:
//!
//! ```yaml
//! locale:
//!   decimal_separator: ","
//!   group_separator: "."
//! unknown: indicate
//! marker: "?? "
//! vars:
//!   player:
//!     name: Ada
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tagfmt::NumberLocale;

use crate::cli::UnknownKey;

/// File looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "tagfmt.yaml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub locale: NumberLocale,
    pub unknown: Option<UnknownKey>,
    pub marker: Option<String>,
    pub vars: Option<serde_json::Value>,
}

impl Config {
    /// Loads `explicit` if given, else `tagfmt.yaml` in `cwd` if it
    /// exists, else the defaults.
    pub fn load(explicit: Option<&Path>, cwd: &Path) -> Result<Self> {
        let path: PathBuf = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let candidate = cwd.join(DEFAULT_CONFIG_FILE);
                if !candidate.is_file() {
                    tracing::debug!("no config file, using defaults");
                    return Ok(Self::default());
                }
                candidate
            }
        };

        tracing::debug!(path = %path.display(), "loading config");
        let text = fs::read_to_string(&path)
            .with_context(|| format!("failed to read config file '{}'", path.display()))?;
        Self::from_yaml(&text)
            .with_context(|| format!("invalid config file '{}'", path.display()))
    }

    /// Parses a config document. An empty document gives the defaults.
    pub fn from_yaml(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(text)?)
    }
}
