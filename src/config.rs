//! Advisor configuration.
//!
//! The first of these that applies is loaded:
//! 1. the path given explicitly (`--config`)
//! 2. `$HOME_ADVISOR_CONFIG`
//! 3. `./home-advisor.toml`, when it exists
//! 4. built-in defaults
//!
//! Environment overrides apply afterwards:
//! - `HOME_ADVISOR_SAMPLE_STEP` - union sampling step
//! - `HOME_ADVISOR_FORMAT` - `text` or `json`
//! - `HOME_ADVISOR_LOG` - log filter directive
//!
//! ```toml
//! [inference]
//! sample_step = 0.1
//!
//! [output]
//! format = "text"
//! explain = false
//!
//! [log]
//! level = "warn"
//! ```

use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::FuzzyResult;
use crate::fuzzy_set::{MIN_SAMPLE_STEP, SAMPLE_STEP};
use crate::inference::MamdaniInference;

pub const CONFIG_ENV: &str = "HOME_ADVISOR_CONFIG";
pub const SAMPLE_STEP_ENV: &str = "HOME_ADVISOR_SAMPLE_STEP";
pub const FORMAT_ENV: &str = "HOME_ADVISOR_FORMAT";
pub const LOG_ENV: &str = "HOME_ADVISOR_LOG";
pub const LOCAL_CONFIG: &str = "home-advisor.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvisorConfig {
    pub inference: InferenceConfig,
    pub output: OutputConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InferenceConfig {
    /// Step at which aggregated membership functions are sampled
    pub sample_step: f64,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            sample_step: SAMPLE_STEP,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Also report input memberships and fired rules
    pub explain: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `tracing` filter directive, e.g. `warn` or `fuzzy_home_advisor=debug`
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(ConfigError::InvalidValue {
                key: "output.format".to_string(),
                reason: format!("expected `text` or `json`, got `{s}`"),
            }),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AdvisorConfig {
    /// Loads from the first applicable location, then applies environment
    /// overrides and validates.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match Self::config_path(explicit) {
            Some(path) => Self::load_from_file(&path)?,
            None => Self::default(),
        };

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    /// Defaults plus environment overrides, ignoring every config file.
    pub fn load_defaults() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    pub fn config_path(explicit: Option<&Path>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(path.to_path_buf());
        }

        if let Some(path) = env::var_os(CONFIG_ENV).filter(|path| !path.is_empty()) {
            return Some(PathBuf::from(path));
        }

        let local = PathBuf::from(LOCAL_CONFIG);

        local.exists().then_some(local)
    }

    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load_from_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: PathBuf::from("<string>"),
            source,
        })
    }

    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| env::var(key).ok())
    }

    /// Applies overrides read through `lookup`, keyed by environment variable name.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        if let Some(val) = lookup(SAMPLE_STEP_ENV) {
            self.inference.sample_step = val.trim().parse().map_err(|e| ConfigError::InvalidValue {
                key: SAMPLE_STEP_ENV.to_string(),
                reason: format!("`{val}`: {e}"),
            })?;
        }

        if let Some(val) = lookup(FORMAT_ENV) {
            self.output.format = val.parse()?;
        }

        if let Some(val) = lookup(LOG_ENV) {
            self.log.level = val;
        }

        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let step = self.inference.sample_step;

        if !(step.is_finite() && step >= MIN_SAMPLE_STEP) {
            return Err(ConfigError::InvalidValue {
                key: "inference.sample_step".to_string(),
                reason: format!("must be a finite number of at least {MIN_SAMPLE_STEP}, got {step}"),
            });
        }

        Ok(())
    }

    pub fn inference(&self) -> FuzzyResult<MamdaniInference> {
        MamdaniInference::new(self.inference.sample_step)
    }
}
