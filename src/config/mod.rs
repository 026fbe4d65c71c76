//! @acp:module "Configuration"
//! @acp:summary "Project configuration loading, defaults and validation"
//! @acp:domain cli
//! @acp:layer config

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::report::OutputFormat;
use crate::scoring::{ScoringConfig, ScoringMethod, DEFAULT_MARGIN};

/// Default config file name in the working directory
pub const CONFIG_FILE: &str = ".advisor.config.json";

fn default_config_schema() -> String {
    "https://advisor.dev/schemas/v1/config.schema.json".to_string()
}

fn default_version() -> String {
    "1.0.0".to_string()
}

/// Main advisor configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// JSON Schema URL for validation
    #[serde(rename = "$schema", default = "default_config_schema")]
    pub schema: String,

    #[serde(default = "default_version")]
    pub version: String,

    /// Process-wide scoring defaults
    #[serde(default)]
    pub scoring: ScoringSettings,

    /// Catalog file used when a command gets no --catalog
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog: Option<PathBuf>,

    #[serde(default)]
    pub output: OutputSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schema: default_config_schema(),
            version: default_version(),
            scoring: ScoringSettings::default(),
            catalog: None,
            output: OutputSettings::default(),
        }
    }
}

impl Config {
    /// Load config from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save config to a file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load from `path` when it exists, otherwise defaults
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!("No config at {:?}, using defaults", path);
            Ok(Self::default())
        }
    }

    /// Validated scoring configuration.
    ///
    /// The margin is stored signed so that a negative value in the file is
    /// reported here instead of failing deserialization with a vague message.
    pub fn scoring(&self) -> Result<ScoringConfig> {
        ScoringConfig::new(self.scoring.method, self.scoring.margin)
    }

    /// Scoring configuration with per-run overrides applied
    pub fn scoring_with(
        &self,
        method: Option<ScoringMethod>,
        margin: Option<i64>,
    ) -> Result<ScoringConfig> {
        ScoringConfig::new(
            method.unwrap_or(self.scoring.method),
            margin.unwrap_or(self.scoring.margin),
        )
    }
}

/// Scoring section of the config file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub method: ScoringMethod,

    #[serde(default = "default_margin")]
    pub margin: i64,
}

fn default_margin() -> i64 {
    i64::from(DEFAULT_MARGIN)
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self {
            method: ScoringMethod::default(),
            margin: default_margin(),
        }
    }
}

/// Output section of the config file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputSettings {
    /// Default format for the rank command
    #[serde(default)]
    pub format: OutputFormat,
}
