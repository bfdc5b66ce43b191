//! # U-Net
//!
//! Three 4x reductions and three matching expansions with skip connections.
//! Each expanded map is zero padded to the size of its skip connection before the
//! two are concatenated, since pooling floors sizes that are not multiples of four.

use burn::{nn::conv::ConvTranspose2d, prelude::*};
use burn_extra_ops::TensorExtraOps;

use super::modules::{
    expanding_deconv, same_size_deconv, BasicBlock, BasicBlockConfig, DownSample,
    DownSampleConfig, Pipeline, Stage,
};
use crate::error::{TerraNetError, TerraNetResult};

/// Configuration for the `UNetUpSample` module.
#[derive(Config, Debug)]
pub struct UNetUpSampleConfig {
    /// Channels after concatenating the expanded map with its skip connection.
    /// The expanded map and the skip connection carry half of them each.
    pub in_channels: usize,
    /// Number of output channels.
    pub out_channels: usize,
}

impl UNetUpSampleConfig {
    /// Initializes a new `UNetUpSample` module.
    pub fn init<B: Backend>(&self, device: &Device<B>) -> UNetUpSample<B> {
        let half = self.in_channels / 2;
        UNetUpSample {
            deconv_same: same_size_deconv(half, half, device),
            deconv_up: expanding_deconv(half, device),
            block_in: BasicBlockConfig::new(self.in_channels, self.out_channels).init(device),
            block_out: BasicBlockConfig::new(self.out_channels, self.out_channels).init(device),
        }
    }
}

/// Expansion step of the U-Net decoder.
#[derive(Module, Debug)]
pub struct UNetUpSample<B: Backend> {
    deconv_same: ConvTranspose2d<B>,
    deconv_up: ConvTranspose2d<B>,
    block_in: BasicBlock<B>,
    block_out: BasicBlock<B>,
}

impl<B: Backend> UNetUpSample<B> {
    /// Expands `x_down` by 4x, pads it to `x_skip`, concatenates both along the
    /// channel axis and mixes them.
    ///
    /// # Errors
    ///
    /// Returns `AlignmentOverflow` if the expanded map is larger than `x_skip`.
    pub fn forward(&self, x_down: Tensor<B, 4>, x_skip: Tensor<B, 4>) -> TerraNetResult<Tensor<B, 4>> {
        let [_, _, height, width] = x_skip.dims();
        let x = self.deconv_up.forward(self.deconv_same.forward(x_down));
        let x = x
            .align_to([height, width])
            .map_err(|err| TerraNetError::from_extra_ops("unet up-sample", err))?;

        let x = Tensor::cat(vec![x, x_skip], 1);
        let x = self.block_in.forward(x);
        Ok(self.block_out.forward(x))
    }
}

/// Configuration for the `UNet` model.
#[derive(Config, Debug)]
pub struct UNetConfig {
    /// Number of input channels.
    pub in_channels: usize,
}

impl UNetConfig {
    /// Initializes a new `UNet` model.
    pub fn init<B: Backend>(&self, device: &Device<B>) -> UNet<B> {
        UNet {
            stem: Pipeline::new(vec![
                Stage::Basic(BasicBlockConfig::new(self.in_channels, 32).init(device)),
                Stage::Basic(BasicBlockConfig::new(32, 64).init(device)),
            ]),
            down1: DownSampleConfig::new(64, 128).init(device),
            down2: DownSampleConfig::new(128, 256).init(device),
            down3: DownSampleConfig::new(256, 256).init(device),
            up1: UNetUpSampleConfig::new(256 * 2, 128).init(device),
            up2: UNetUpSampleConfig::new(128 * 2, 64).init(device),
            up3: UNetUpSampleConfig::new(64 * 2, 32).init(device),
            head: Pipeline::new(vec![
                Stage::Basic(BasicBlockConfig::new(32, 16).init(device)),
                Stage::Basic(BasicBlockConfig::new(16, 1).init(device)),
            ]),
        }
    }
}

/// U-Net encoder-decoder.
#[derive(Module, Debug)]
pub struct UNet<B: Backend> {
    stem: Pipeline<B>,
    down1: DownSample<B>,
    down2: DownSample<B>,
    down3: DownSample<B>,
    up1: UNetUpSample<B>,
    up2: UNetUpSample<B>,
    up3: UNetUpSample<B>,
    head: Pipeline<B>,
}

impl<B: Backend> UNet<B> {
    /// # Shapes
    /// - input: `[batch, in_channels, H, W]`
    /// - output: `[batch, 1, H, W]`
    ///
    /// # Errors
    ///
    /// Returns `AlignmentOverflow` if an expanded map outgrows its skip connection.
    pub fn forward(&self, x: Tensor<B, 4>) -> TerraNetResult<Tensor<B, 4>> {
        let x_in = self.stem.forward(x);
        let x_d1 = self.down1.forward(x_in.clone());
        let x_d2 = self.down2.forward(x_d1.clone());
        let x_d3 = self.down3.forward(x_d2.clone());

        let x_u1 = self.up1.forward(x_d3, x_d2)?;
        let x_u2 = self.up2.forward(x_u1, x_d1)?;
        let x_u3 = self.up3.forward(x_u2, x_in)?;

        Ok(self.head.forward(x_u3))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::TestBackend;
    use burn::tensor::Distribution;

    #[test]
    fn unet_preserves_spatial_size() {
        let device = Default::default();
        let model = UNetConfig::new(3).init::<TestBackend>(&device);
        let x = Tensor::<TestBackend, 4>::random([1, 3, 64, 64], Distribution::Default, &device);

        assert_eq!(model.forward(x).unwrap().dims(), [1, 1, 64, 64]);
    }

    #[test]
    fn unet_pads_expansions_of_uneven_sizes() {
        let device = Default::default();
        // 72 -> 18 -> 4 -> 1; the 4 -> 16 expansion is padded to 18.
        let model = UNetConfig::new(2).init::<TestBackend>(&device);
        let x = Tensor::<TestBackend, 4>::random([2, 2, 72, 72], Distribution::Default, &device);

        assert_eq!(model.forward(x).unwrap().dims(), [2, 1, 72, 72]);
    }

    #[test]
    fn up_sample_concatenates_skip_connection() {
        let device = Default::default();
        let up = UNetUpSampleConfig::new(8, 3).init::<TestBackend>(&device);
        let x_down = Tensor::<TestBackend, 4>::random([1, 4, 4, 4], Distribution::Default, &device);
        let x_skip = Tensor::<TestBackend, 4>::random([1, 4, 17, 18], Distribution::Default, &device);

        assert_eq!(up.forward(x_down, x_skip).unwrap().dims(), [1, 3, 17, 18]);
    }

    #[test]
    fn up_sample_rejects_smaller_skip_connection() {
        let device = Default::default();
        let up = UNetUpSampleConfig::new(8, 3).init::<TestBackend>(&device);
        let x_down = Tensor::<TestBackend, 4>::random([1, 4, 4, 4], Distribution::Default, &device);
        let x_skip = Tensor::<TestBackend, 4>::random([1, 4, 12, 12], Distribution::Default, &device);

        assert!(matches!(
            up.forward(x_down, x_skip),
            Err(TerraNetError::AlignmentOverflow { .. })
        ));
    }
}
