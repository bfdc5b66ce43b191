//! Core configuration structures for TerraNet.
//!
//! This module contains the primary configuration structures that define
//! which model is built and for which raster.

use crate::error::{TerraNetError, TerraNetResult};
use crate::models::modules::branch_radii;
use burn::prelude::*;

use super::enums::*;

/// Per-sample shape of the input raster.
#[derive(Config, Debug, PartialEq, Eq)]
pub struct InputShape {
    /// Number of input channels.
    pub channels: usize,
    /// Raster height in pixels.
    pub height: usize,
    /// Raster width in pixels.
    pub width: usize,
}

/// Main configuration for a TerraNet model.
#[derive(Config, Debug)]
pub struct ModelConfig {
    /// The architecture to build.
    #[config(default = "Architecture::PoolNet")]
    pub architecture: Architecture,
    /// Shape of the input raster.
    #[config(default = "InputShape::new(4, 128, 128)")]
    pub input_shape: InputShape,
    /// Ground distance covered by one pixel, in meters.
    #[config(default = "20.0")]
    pub pixel_resolution: f64,
}

impl ModelConfig {
    /// Validate the configuration and return appropriate errors for invalid settings.
    ///
    /// # Errors
    ///
    /// Returns `Err(TerraNetError::InvalidConfiguration)` if any validation rule is violated.
    pub fn validate(&self) -> TerraNetResult<()> {
        let InputShape {
            channels,
            height,
            width,
        } = self.input_shape;

        // 1. Shape must be non-empty
        if channels == 0 || height == 0 || width == 0 {
            return Err(TerraNetError::InvalidConfiguration {
                reason: format!(
                    "Input shape must be non-empty, got [{channels}, {height}, {width}]"
                ),
            });
        }

        // 2. Pixel resolution must give usable radii
        branch_radii(self.pixel_resolution)?;

        // 3. Raster must survive every reduction
        let min_size = self.architecture.min_spatial_size();
        if height < min_size || width < min_size {
            return Err(TerraNetError::InvalidConfiguration {
                reason: format!(
                    "{:?} needs rasters of at least {min_size}x{min_size}, got {height}x{width}",
                    self.architecture
                ),
            });
        }

        Ok(())
    }
}
