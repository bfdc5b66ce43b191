//! # Model Architectures
//!
//! This module aggregates the network architectures and their building blocks.
//! It is organized into sub-modules for clarity:
//!
//! - `modules`: Building blocks shared by the architectures: the basic convolution
//!   block, 4x down- and up-sampling, stage pipelines and neighbor sampling.
//! - `fcn`: The plain fully convolutional baseline.
//! - `unet`: The U-Net encoder-decoder.
//! - `pool_net`: The multi-resolution pooling network.
//! - `terranet`: The `TerraNet` enum wrapping any of the above.

pub mod fcn;
pub mod modules;
pub mod pool_net;
pub mod terranet;
pub mod unet;

pub use fcn::{Fcn, FcnConfig};
pub use pool_net::{PoolNet, PoolNetConfig, PoolNetRecord, BRANCH_COUNT};
pub use terranet::{TerraNet, TerraNetRecord};
pub use unet::{UNet, UNetConfig, UNetUpSample, UNetUpSampleConfig};
