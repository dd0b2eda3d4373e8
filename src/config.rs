//! YAML configuration file support for the `simprint` CLI.
//!
//! Mirrors one pass's worth of [`simprint_pipeline::PassConfig`] plus a
//! version header and optional distro file list, loadable from a single
//! YAML document.
//!
//! ## Example YAML configuration
//!
//! ```yaml
//! version: "1.0"
//! name: "cs50-pset3"
//!
//! pass:
//!   pass_name: "default"
//!   k: 25
//!   t: 35
//!   by_span: false
//!   top_n: 50
//!   parallel: true
//!
//! distro: ["distro/helpers.c"]
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use simprint_pipeline::PassConfig;
use simprint_span::PassName;
use thiserror::Error;

/// Errors that can occur when loading a `simprint` YAML configuration file.
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),

    #[error("missing required field: {0}")]
    MissingField(String),
}

/// Top-level YAML configuration for one `simprint` run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SimprintConfig {
    /// Configuration format version.
    pub version: String,

    /// Optional configuration name/description.
    #[serde(default)]
    pub name: Option<String>,

    /// Pass configuration (k, t, top_n, ...).
    pub pass: PassYamlConfig,

    /// Paths of distro/template files to subtract before scoring.
    #[serde(default)]
    pub distro: Vec<String>,
}

/// The part of [`SimprintConfig`] that maps directly onto
/// [`simprint_pipeline::PassConfig`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PassYamlConfig {
    #[serde(default = "default_pass_name")]
    pub pass_name: String,

    pub k: usize,

    pub t: usize,

    #[serde(default)]
    pub by_span: bool,

    #[serde(default = "default_top_n")]
    pub top_n: usize,

    #[serde(default)]
    pub parallel: bool,
}

fn default_pass_name() -> String {
    "default".to_string()
}

fn default_top_n() -> usize {
    50
}

impl SimprintConfig {
    /// Load a YAML configuration file from the given path.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse YAML configuration from a string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: SimprintConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => Ok(()),
            v => Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }?;

        if self.pass.k == 0 {
            return Err(ConfigLoadError::Validation("pass.k must be >= 1".to_string()));
        }
        if self.pass.t < self.pass.k {
            return Err(ConfigLoadError::Validation(
                "pass.t must be >= pass.k".to_string(),
            ));
        }
        if self.pass.top_n == 0 {
            return Err(ConfigLoadError::Validation(
                "pass.top_n must be >= 1".to_string(),
            ));
        }

        Ok(())
    }

    /// Convert to the [`PassConfig`] the pipeline driver expects.
    pub fn to_pass_config(&self) -> PassConfig {
        PassConfig {
            pass_name: PassName::from(self.pass.pass_name.as_str()),
            k: self.pass.k,
            t: self.pass.t,
            by_span: self.pass.by_span,
            top_n: self.pass.top_n,
            parallel: self.pass.parallel,
        }
    }
}
