//! Enumeration types used in model configurations.

use burn::prelude::*;

/// The network architecture to build.
#[derive(Config, Debug, PartialEq, Eq)]
pub enum Architecture {
    /// Three-layer fully convolutional baseline.
    Fcn,
    /// Encoder-decoder with skip connections.
    UNet,
    /// Multi-resolution pooling network with learned branch fusion.
    PoolNet,
}

impl Architecture {
    /// Smallest raster side the architecture accepts.
    ///
    /// Each 4x reduction needs at least one pixel left after the last one.
    #[must_use]
    pub const fn min_spatial_size(&self) -> usize {
        match self {
            Self::Fcn => 1,
            Self::UNet | Self::PoolNet => 64,
        }
    }
}
