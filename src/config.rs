use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::error::ModelError;

/// Hyper-parameters shared by every model in the crate.
///
/// Keys that are not recognised are kept in `extra` so wrappers can carry
/// their own settings without a new struct.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ModelConfig {
    #[serde(default = "default_learning_rate")]
    pub learning_rate: f32,
    #[serde(default = "default_epochs")]
    pub epochs: usize,
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default)]
    pub model_type: ModelType,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_learning_rate() -> f32 {
    0.01
}

fn default_epochs() -> usize {
    100
}

fn default_batch_size() -> usize {
    32
}

fn default_seed() -> u64 {
    42
}

/// Supported model types.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelType {
    LinearRegression,
    LogisticRegression,
}

impl Default for ModelType {
    fn default() -> Self {
        ModelType::LinearRegression
    }
}

impl FromStr for ModelType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "linear" | "linearregression" | "linear_regression" => Ok(ModelType::LinearRegression),
            "logistic" | "logisticregression" | "logistic_regression" => {
                Ok(ModelType::LogisticRegression)
            }
            _ => Err(format!(
                "Unknown model type: {}. Expected one of `linear` or `logistic`",
                s
            )),
        }
    }
}

impl ModelConfig {
    pub fn new(learning_rate: f32, model_type: ModelType) -> Self {
        Self {
            learning_rate,
            model_type,
            ..Self::default()
        }
    }

    /// Checks that the training hyper-parameters are usable.
    pub fn validate(&self) -> Result<(), ModelError> {
        if !self.learning_rate.is_finite() || self.learning_rate <= 0.0 {
            return Err(ModelError::InvalidConfig(format!(
                "learning_rate must be a positive number, got {}",
                self.learning_rate
            )));
        }
        if self.epochs == 0 {
            return Err(ModelError::InvalidConfig("epochs must be at least 1".to_string()));
        }
        if self.batch_size == 0 {
            return Err(ModelError::InvalidConfig(
                "batch_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Custom setting stored alongside the known hyper-parameters.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }

    /// Reads a configuration from a JSON file and validates it.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let config_json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let config: ModelConfig = serde_json::from_str(&config_json)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            learning_rate: default_learning_rate(),
            epochs: default_epochs(),
            batch_size: default_batch_size(),
            seed: default_seed(),
            model_type: ModelType::default(),
            extra: Map::new(),
        }
    }
}

/// Output options for [`predict`](crate::models::TensorScriptModel::predict).
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct PredictOptions {
    /// Reshape the flat prediction into one row per input row.
    pub json: bool,
    /// Keep raw values; when false every value is rounded to the nearest integer.
    /// Halves round away from zero (`-1.5` becomes `-2`, not `-1`).
    pub probability: bool,
}

impl Default for PredictOptions {
    fn default() -> Self {
        Self {
            json: true,
            probability: true,
        }
    }
}

impl PredictOptions {
    pub fn flat() -> Self {
        Self {
            json: false,
            ..Self::default()
        }
    }

    pub fn labels() -> Self {
        Self {
            probability: false,
            ..Self::default()
        }
    }
}
