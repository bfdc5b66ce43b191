//! # Multi-Resolution Pooling Network
//!
//! `PoolNet` encodes the input raster at four resolutions (full, 1/4, 1/16 and
//! 1/64), decodes each resolution independently back to a single channel, and
//! fuses the four predictions with a learned 1x1 convolution.
//!
//! The branches roughly cover these ground distances:
//!
//! - branch 1 (from the 1/64 encoding): 1280 m to 1600 m
//! - branch 2 (from the 1/16 encoding): 320 m to 400 m
//! - branch 3 (from the 1/4 encoding): 80 m to 100 m
//! - branch 4 (from the full resolution encoding): 20 m to 25 m
//!
//! Each branch output is zero padded back to the input's spatial size before
//! fusion, since pooling floors odd sizes.

use burn::{
    nn::conv::{Conv2d, Conv2dConfig},
    prelude::*,
};
use burn_extra_ops::TensorExtraOps;

use super::modules::{
    branch_radii, same_size_deconv, BasicBlockConfig, DownSampleConfig, NeighborSampler, Pipeline,
    Stage, UpSampleConfig,
};
use crate::{
    config::InputShape,
    error::{TerraNetError, TerraNetResult},
};

/// Number of resolution branches.
pub const BRANCH_COUNT: usize = 4;

/// Channels produced by the full-resolution encoder level.
const STEM_CHANNELS: [usize; 2] = [64, 128];

/// `(in, out)` channels of the three down-sampling encoder levels.
const DOWN_CHANNELS: [(usize, usize); 3] = [(128, 256), (256, 512), (512, 512)];

/// Channels entering each branch's output projection.
const PROJECTION_CHANNELS: usize = 128;

/// `(in, out)` channels of the up-sampling stages of each branch, coarsest branch first.
const BRANCH_UP_CHANNELS: [&[(usize, usize)]; BRANCH_COUNT] = [
    &[(512, 512), (512, 256), (256, 128)],
    &[(512, 256), (256, 128)],
    &[(256, 128)],
    &[],
];

/// Configuration for the `PoolNet` model.
#[derive(Config, Debug)]
pub struct PoolNetConfig {
    /// Expected per-sample input shape.
    pub input_shape: InputShape,
    /// Ground distance covered by one pixel, in meters.
    pub pixel_resolution: f64,
}

impl PoolNetConfig {
    /// Initializes a `PoolNet` model.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if the pixel resolution is not a positive number.
    pub fn init<B: Backend>(&self, device: &Device<B>) -> TerraNetResult<PoolNet<B>> {
        let radii = branch_radii(self.pixel_resolution)?;

        let [stem_mid, stem_out] = STEM_CHANNELS;
        let mut encoder = Vec::with_capacity(BRANCH_COUNT);
        encoder.push(Pipeline::new(vec![
            Stage::Basic(BasicBlockConfig::new(self.input_shape.channels, stem_mid).init(device)),
            Stage::Basic(BasicBlockConfig::new(stem_mid, stem_out).init(device)),
        ]));
        for (in_channels, out_channels) in DOWN_CHANNELS {
            encoder.push(Pipeline::new(vec![Stage::Down(
                DownSampleConfig::new(in_channels, out_channels).init(device),
            )]));
        }

        let decoders = BRANCH_UP_CHANNELS
            .iter()
            .map(|ups| {
                let mut stages = ups
                    .iter()
                    .map(|&(in_channels, out_channels)| {
                        Stage::Up(UpSampleConfig::new(in_channels, out_channels).init(device))
                    })
                    .collect::<Vec<_>>();
                stages.push(Stage::Project(same_size_deconv(
                    PROJECTION_CHANNELS,
                    1,
                    device,
                )));
                Pipeline::new(stages)
            })
            .collect::<Vec<_>>();

        let fusion = Conv2dConfig::new([BRANCH_COUNT, 1], [1, 1])
            .with_stride([1, 1])
            .init(device);

        tracing::debug!(
            in_channels = self.input_shape.channels,
            pixel_resolution = self.pixel_resolution,
            ?radii,
            "initialized multi-resolution pooling network"
        );

        Ok(PoolNet {
            encoder,
            decoders,
            fusion,
            radii,
            input_shape: [
                self.input_shape.channels,
                self.input_shape.height,
                self.input_shape.width,
            ],
        })
    }
}

/// The multi-resolution pooling network.
#[derive(Module, Debug)]
pub struct PoolNet<B: Backend> {
    /// Encoder levels, finest first. Level `i` feeds on level `i - 1`.
    encoder: Vec<Pipeline<B>>,
    /// Decoder of each branch, coarsest first. Branch `i` decodes encoder level `3 - i`.
    decoders: Vec<Pipeline<B>>,
    /// Learned 1x1 blend of the branch predictions.
    fusion: Conv2d<B>,
    /// Neighbor radius of each branch, in pixels.
    radii: [usize; BRANCH_COUNT],
    /// Nominal `[channels, height, width]` of the input raster.
    input_shape: [usize; 3],
}

impl<B: Backend> PoolNet<B> {
    /// Runs the encoder cascade.
    ///
    /// # Returns
    ///
    /// The output of every encoder level, finest first:
    /// `[B, 128, H, W]`, `[B, 256, H/4, W/4]`, `[B, 512, H/16, W/16]`, `[B, 512, H/64, W/64]`.
    pub fn forward_enc(&self, x: Tensor<B, 4>) -> Vec<Tensor<B, 4>> {
        let mut features = Vec::with_capacity(self.encoder.len());
        let mut x = x;
        for level in &self.encoder {
            x = level.forward(x);
            features.push(x.clone());
        }
        features
    }

    /// Decodes every branch and aligns it to the input's spatial size.
    ///
    /// # Returns
    ///
    /// One `[B, 1, H, W]` prediction per branch, coarsest first.
    ///
    /// # Errors
    ///
    /// Returns `AlignmentOverflow` if a branch output is larger than the input.
    pub fn forward_branches(&self, x: Tensor<B, 4>) -> TerraNetResult<Vec<Tensor<B, 4>>> {
        let [_, _, height, width] = x.dims();
        let features = self.forward_enc(x);

        self.decoders
            .iter()
            .zip(features.into_iter().rev())
            .enumerate()
            .map(|(index, (decoder, feature))| {
                let branch = decoder.forward(feature);
                let [_, _, branch_h, branch_w] = branch.dims();
                if [branch_h, branch_w] != [height, width] {
                    tracing::warn!(
                        branch = index + 1,
                        from = ?[branch_h, branch_w],
                        to = ?[height, width],
                        "padding branch output"
                    );
                }
                branch.align_to([height, width]).map_err(|err| {
                    TerraNetError::from_extra_ops(&format!("branch {}", index + 1), err)
                })
            })
            .collect()
    }

    /// Full forward pass.
    ///
    /// # Shapes
    /// - input: `[batch, channels, H, W]`
    /// - output: `[batch, 1, H, W]`
    ///
    /// # Errors
    ///
    /// Returns `AlignmentOverflow` if a branch output is larger than the input.
    pub fn forward(&self, x: Tensor<B, 4>) -> TerraNetResult<Tensor<B, 4>> {
        let branches = self.forward_branches(x)?;
        // Branches are laid out along the channel axis so each sample keeps its own four predictions.
        let stacked = Tensor::cat(branches, 1);
        Ok(self.fusion.forward(stacked))
    }

    /// Neighbor radius of each branch, coarsest first.
    pub const fn radii(&self) -> [usize; BRANCH_COUNT] {
        self.radii
    }

    /// Nominal `[channels, height, width]` the model was configured for.
    pub const fn input_shape(&self) -> [usize; 3] {
        self.input_shape
    }

    /// Builds the neighbor sampler matching this model's branch radii on `device`.
    ///
    /// The sampler takes one channel per branch, e.g. the stacked output of
    /// [`PoolNet::forward_branches`].
    pub fn neighbor_sampler(&self, device: &Device<B>) -> TerraNetResult<NeighborSampler<B>> {
        NeighborSampler::new(&self.radii, device)
    }
}
