//! # Fully Convolutional Baseline
//!
//! A three-layer network without padding: the leading 5x5 transposed convolution
//! grows the raster by four pixels per axis and the two 3x3 valid convolutions
//! shrink it back, so the output has the input's spatial size.

use burn::{
    nn::{
        conv::{Conv2d, Conv2dConfig, ConvTranspose2d, ConvTranspose2dConfig},
        Relu,
    },
    prelude::*,
};

/// Configuration for the `Fcn` model.
#[derive(Config, Debug)]
pub struct FcnConfig {
    /// Number of input channels.
    pub in_channels: usize,
    /// Channels after the transposed convolution.
    #[config(default = "4")]
    pub hidden_channels: usize,
    /// Channels after the middle convolution.
    #[config(default = "8")]
    pub feature_channels: usize,
}

impl FcnConfig {
    /// Initializes a new `Fcn` model.
    pub fn init<B: Backend>(&self, device: &Device<B>) -> Fcn<B> {
        Fcn {
            deconv: ConvTranspose2dConfig::new([self.in_channels, self.hidden_channels], [5, 5])
                .init(device),
            relu: Relu::new(),
            conv_mid: Conv2dConfig::new([self.hidden_channels, self.feature_channels], [3, 3])
                .init(device),
            conv_out: Conv2dConfig::new([self.feature_channels, 1], [3, 3]).init(device),
        }
    }
}

/// Plain fully convolutional network.
#[derive(Module, Debug)]
pub struct Fcn<B: Backend> {
    deconv: ConvTranspose2d<B>,
    relu: Relu,
    conv_mid: Conv2d<B>,
    conv_out: Conv2d<B>,
}

impl<B: Backend> Fcn<B> {
    /// # Shapes
    /// - input: `[batch, in_channels, H, W]`
    /// - output: `[batch, 1, H, W]`
    pub fn forward(&self, x: Tensor<B, 4>) -> Tensor<B, 4> {
        let x = self.relu.forward(self.deconv.forward(x));
        let x = self.relu.forward(self.conv_mid.forward(x));
        self.conv_out.forward(x)
    }
}
