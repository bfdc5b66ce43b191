//! Configuration for TerraNet demos.
//!
//! JSON files read by the binaries. Every field has a default, so a partial
//! file only overrides what it names.

use std::{fs, path::Path, path::PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use terranet_burn::ModelConfig;

/// Configuration for the inference demo.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InferenceConfig {
    /// Model configuration.
    pub model: ModelConfig,
    /// Number of rasters per forward pass.
    pub batch_size: usize,
    /// Number of timed forward passes.
    pub runs: usize,
    /// Seed for weight initialization and the random input raster.
    pub seed: Option<u64>,
    /// Weights saved by `model_manager init`. Fresh weights are used when absent.
    pub weights: Option<PathBuf>,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            model: ModelConfig::new(),
            batch_size: 1,
            runs: 3,
            seed: None,
            weights: None,
        }
    }
}

impl InferenceConfig {
    /// Reads a configuration from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let config_str = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        serde_json::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Writes the configuration as pretty JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }
}
