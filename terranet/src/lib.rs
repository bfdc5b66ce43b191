//! # TerraNet-Burn
//!
//! Convolutional networks that regress a dense single-channel raster (e.g. terrain
//! elevation) from a multi-channel input raster, built using the Burn deep learning
//! framework.
//!
//! ## Modules
//!
//! - `config`: Configuration structures selecting the architecture, the input
//!   raster shape and the pixel resolution.
//! - `error`: Defines the custom error types used throughout the crate.
//! - `models`: The architectures (`Fcn`, `UNet`, `PoolNet`) and their building blocks.
//!
//! ## Key Components
//!
//! - `PoolNet`: The multi-resolution pooling network. It decodes four encoder
//!   depths independently and fuses them with a learned 1x1 convolution.
//! - `NeighborSampler`: Fixed kernels sampling vertical neighbors at the radius
//!   of each resolution branch.
//! - `ModelConfig`: The primary configuration struct that drives model construction.
//! - `TerraNetError`: The enum for all possible errors.
//!
//! ## Training and evaluation
//!
//! The backend decides the mode. On an `Autodiff` backend BatchNorm layers update
//! their running statistics; the module returned by `AutodiffModule::valid`, or one
//! built on a plain backend, only reads them.

mod config;
mod error;
mod models;

#[cfg(test)]
mod tests;

// Re-export specific configuration types instead of wildcard
#[doc(inline)]
pub use config::{Architecture, InputShape, ModelConfig};
#[doc(inline)]
pub use error::{TerraNetError, TerraNetResult};
#[doc(inline)]
pub use models::{
    modules::{
        branch_radii, neighbor_mask, neighbor_offsets, radius_for, sample_neighbors, BasicBlock,
        BasicBlockConfig, DownSample, DownSampleConfig, NeighborSampler, Pipeline, Stage,
        UpSample, UpSampleConfig, BRANCH_DISTANCES, MAX_NEIGHBOR_RADIUS, NEIGHBOR_COUNT,
    },
    Fcn, FcnConfig, PoolNet, PoolNetConfig, PoolNetRecord, TerraNet, TerraNetRecord, UNet,
    UNetConfig, UNetUpSample, UNetUpSampleConfig, BRANCH_COUNT,
};
