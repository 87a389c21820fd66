//! Serializable configuration bundling ensemble execution settings with the
//! simulation parameters.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::{SimulationParameters, StrainPreset};
use crate::errors::{ConfigError, ParameterError};

/// Default number of runs per ensemble.
pub const DEFAULT_RUNS: usize = 100;

/// The master configuration struct.
/// Can be deserialized from a file to fully reproduce an ensemble.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    pub execution: ExecutionConfig,
    pub parameters: SimulationParameters,
    /// Preset the rates were taken from, if any (informational)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strain: Option<StrainPreset>,
}

/// How an ensemble is executed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionConfig {
    /// Number of independent runs
    pub runs: usize,
    /// Optional master seed for reproducibility
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            runs: DEFAULT_RUNS,
            seed: None,
        }
    }
}

impl Configuration {
    /// Configuration for a strain preset with default execution settings.
    pub fn for_strain(strain: StrainPreset, initial_divergence: f64) -> Result<Self, ParameterError> {
        Ok(Self {
            execution: ExecutionConfig::default(),
            parameters: SimulationParameters::for_strain(strain, initial_divergence)?,
            strain: Some(strain),
        })
    }

    /// Validate execution settings and parameters.
    pub fn validate(&self) -> Result<(), ParameterError> {
        if self.execution.runs == 0 {
            return Err(ParameterError::InvalidRunCount);
        }
        self.parameters.validate()
    }

    /// Parse and validate a configuration from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a configuration file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Write the configuration as pretty-printed JSON.
    pub fn to_json_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            execution: ExecutionConfig::default(),
            parameters: SimulationParameters::default(),
            strain: Some(StrainPreset::Normal),
        }
    }
}
