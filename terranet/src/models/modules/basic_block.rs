//! # Basic Block
//!
//! Two `conv3x3 -> BatchNorm -> ReLU` stages. The spatial extent is preserved and
//! only the channel count changes. BatchNorm running statistics are updated when
//! the block runs on an autodiff backend and read only otherwise.

use burn::{
    nn::{
        conv::{Conv2d, Conv2dConfig},
        BatchNorm, BatchNormConfig, PaddingConfig2d, Relu,
    },
    prelude::*,
};

/// Configuration for the `BasicBlock` module.
#[derive(Config, Debug)]
pub struct BasicBlockConfig {
    /// Number of input channels. Also used for the intermediate stage.
    pub in_channels: usize,
    /// Number of output channels.
    pub out_channels: usize,
}

impl BasicBlockConfig {
    /// Initializes a new `BasicBlock` module.
    pub fn init<B: Backend>(&self, device: &Device<B>) -> BasicBlock<B> {
        let conv_in = Conv2dConfig::new([self.in_channels, self.in_channels], [3, 3])
            .with_stride([1, 1])
            .with_padding(PaddingConfig2d::Explicit(1, 1))
            .init(device);
        let conv_out = Conv2dConfig::new([self.in_channels, self.out_channels], [3, 3])
            .with_stride([1, 1])
            .with_padding(PaddingConfig2d::Explicit(1, 1))
            .init(device);

        BasicBlock {
            conv_in,
            bn_in: BatchNormConfig::new(self.in_channels).init(device),
            relu_in: Relu::new(),
            conv_out,
            bn_out: BatchNormConfig::new(self.out_channels).init(device),
            relu_out: Relu::new(),
        }
    }
}

/// A size-preserving convolution block.
#[derive(Module, Debug)]
pub struct BasicBlock<B: Backend> {
    conv_in: Conv2d<B>,
    bn_in: BatchNorm<B, 2>,
    relu_in: Relu,
    conv_out: Conv2d<B>,
    bn_out: BatchNorm<B, 2>,
    relu_out: Relu,
}

impl<B: Backend> BasicBlock<B> {
    /// # Shapes
    /// - input: `[batch, in_channels, H, W]`
    /// - output: `[batch, out_channels, H, W]`
    pub fn forward(&self, x: Tensor<B, 4>) -> Tensor<B, 4> {
        let x = self.conv_in.forward(x);
        let x = self.bn_in.forward(x);
        let x = self.relu_in.forward(x);
        let x = self.conv_out.forward(x);
        let x = self.bn_out.forward(x);
        self.relu_out.forward(x)
    }
}
