//! # Resolution Blocks
//!
//! `DownSample` trades spatial extent for channels with a 4x4 max pool, and
//! `UpSample` undoes it with a stride-4 transposed convolution. Both keep every
//! resolution change an exact factor of four.

use burn::{
    nn::{
        conv::{ConvTranspose2d, ConvTranspose2dConfig},
        pool::{MaxPool2d, MaxPool2dConfig},
    },
    prelude::*,
};

use super::{BasicBlock, BasicBlockConfig};

/// Spatial factor applied by every resolution change.
pub const SCALE_FACTOR: usize = 4;

/// Builds the `5x5`, stride-1, padding-2 transposed convolution that keeps the
/// spatial size unchanged.
pub fn same_size_deconv<B: Backend>(
    in_channels: usize,
    out_channels: usize,
    device: &Device<B>,
) -> ConvTranspose2d<B> {
    ConvTranspose2dConfig::new([in_channels, out_channels], [5, 5])
        .with_stride([1, 1])
        .with_padding([2, 2])
        .init(device)
}

/// Builds the transposed convolution that expands each spatial dimension by
/// [`SCALE_FACTOR`].
pub fn expanding_deconv<B: Backend>(channels: usize, device: &Device<B>) -> ConvTranspose2d<B> {
    ConvTranspose2dConfig::new([channels, channels], [SCALE_FACTOR, SCALE_FACTOR])
        .with_stride([SCALE_FACTOR, SCALE_FACTOR])
        .init(device)
}

/// Configuration for the `DownSample` module.
#[derive(Config, Debug)]
pub struct DownSampleConfig {
    /// Number of input channels.
    pub in_channels: usize,
    /// Number of output channels.
    pub out_channels: usize,
}

impl DownSampleConfig {
    /// Initializes a new `DownSample` module.
    pub fn init<B: Backend>(&self, device: &Device<B>) -> DownSample<B> {
        DownSample {
            block_in: BasicBlockConfig::new(self.in_channels, self.in_channels).init(device),
            block_out: BasicBlockConfig::new(self.in_channels, self.out_channels).init(device),
            pool: MaxPool2dConfig::new([SCALE_FACTOR, SCALE_FACTOR])
                .with_strides([SCALE_FACTOR, SCALE_FACTOR])
                .init(),
        }
    }
}

/// Two basic blocks followed by a non-overlapping 4x4 max pool.
#[derive(Module, Debug)]
pub struct DownSample<B: Backend> {
    block_in: BasicBlock<B>,
    block_out: BasicBlock<B>,
    pool: MaxPool2d,
}

impl<B: Backend> DownSample<B> {
    /// # Shapes
    /// - input: `[batch, in_channels, H, W]`
    /// - output: `[batch, out_channels, H / 4, W / 4]` (floored)
    pub fn forward(&self, x: Tensor<B, 4>) -> Tensor<B, 4> {
        let x = self.block_in.forward(x);
        let x = self.block_out.forward(x);
        self.pool.forward(x)
    }
}

/// Configuration for the `UpSample` module.
#[derive(Config, Debug)]
pub struct UpSampleConfig {
    /// Number of input channels.
    pub in_channels: usize,
    /// Number of output channels.
    pub out_channels: usize,
}

impl UpSampleConfig {
    /// Initializes a new `UpSample` module.
    pub fn init<B: Backend>(&self, device: &Device<B>) -> UpSample<B> {
        UpSample {
            deconv_same: same_size_deconv(self.in_channels, self.in_channels, device),
            deconv_up: expanding_deconv(self.in_channels, device),
            block_in: BasicBlockConfig::new(self.in_channels, self.in_channels).init(device),
            block_out: BasicBlockConfig::new(self.in_channels, self.out_channels).init(device),
        }
    }
}

/// A 4x spatial expansion followed by two basic blocks.
#[derive(Module, Debug)]
pub struct UpSample<B: Backend> {
    deconv_same: ConvTranspose2d<B>,
    deconv_up: ConvTranspose2d<B>,
    block_in: BasicBlock<B>,
    block_out: BasicBlock<B>,
}

impl<B: Backend> UpSample<B> {
    /// # Shapes
    /// - input: `[batch, in_channels, H, W]`
    /// - output: `[batch, out_channels, 4 * H, 4 * W]`
    pub fn forward(&self, x: Tensor<B, 4>) -> Tensor<B, 4> {
        let x = self.deconv_same.forward(x);
        let x = self.deconv_up.forward(x);
        let x = self.block_in.forward(x);
        self.block_out.forward(x)
    }
}
