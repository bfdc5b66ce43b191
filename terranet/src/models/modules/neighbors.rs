//! # Neighbor Sampling
//!
//! Fixed, non-trainable kernels that read five vertical offsets around every pixel
//! of a single-channel map: the top edge of the window, halfway up, halfway down,
//! the bottom edge and the center. One kernel is built per resolution branch, with
//! a radius derived from the physical distance that branch covers.
//!
//! `NeighborSampler` is not part of `PoolNet::forward`. It is exposed as a
//! standalone utility through `PoolNet::neighbor_sampler`.

use burn::prelude::*;
use burn_extra_ops::{offset_kernel, sample_offsets};

use crate::error::{TerraNetError, TerraNetResult};

/// Distance in meters covered by each branch, coarsest first.
pub const BRANCH_DISTANCES: [f64; 4] = [640.0, 160.0, 40.0, 10.0];

/// Number of offsets sampled per pixel.
pub const NEIGHBOR_COUNT: usize = 5;

/// Largest neighbor radius a mask can be built for. A radius-`r` mask holds
/// `5 * (2r + 1)^2` values.
pub const MAX_NEIGHBOR_RADIUS: usize = 1024;

/// Radius in pixels for a target distance: `floor(distance / pixel_resolution) + 1`.
///
/// # Errors
///
/// Returns `InvalidConfiguration` unless `pixel_resolution` is finite and positive
/// and the radius does not exceed [`MAX_NEIGHBOR_RADIUS`].
pub fn radius_for(distance: f64, pixel_resolution: f64) -> TerraNetResult<usize> {
    if !pixel_resolution.is_finite() || pixel_resolution <= 0.0 {
        return Err(TerraNetError::InvalidConfiguration {
            reason: format!("pixel resolution must be positive, got {pixel_resolution}"),
        });
    }
    // Floor division on the exact remainder, so 160 / 3.2 gives 49 and not 50.
    let remainder = distance % pixel_resolution;
    let quotient = ((distance - remainder) / pixel_resolution).round();

    // `as` saturates, so an oversized quotient fails the checked add or the bound.
    (quotient as usize)
        .checked_add(1)
        .filter(|&radius| radius <= MAX_NEIGHBOR_RADIUS)
        .ok_or_else(|| TerraNetError::InvalidConfiguration {
            reason: format!(
                "pixel resolution {pixel_resolution} is too fine for a {distance} m neighborhood \
                 (radius above {MAX_NEIGHBOR_RADIUS} pixels)"
            ),
        })
}

/// Radii of the four branches for a given pixel resolution, coarsest first.
pub fn branch_radii(pixel_resolution: f64) -> TerraNetResult<[usize; 4]> {
    let mut radii = [0; 4];
    for (radius, &distance) in radii.iter_mut().zip(BRANCH_DISTANCES.iter()) {
        *radius = radius_for(distance, pixel_resolution)?;
    }
    Ok(radii)
}

/// `[row, col]` positions of the five samples inside a `(2r + 1)^2` window.
pub const fn neighbor_offsets(radius: usize) -> [[usize; 2]; NEIGHBOR_COUNT] {
    [
        [0, radius],
        [radius / 2, radius],
        [radius / 2 + radius, radius],
        [2 * radius, radius],
        [radius, radius],
    ]
}

/// Builds the `[5, 1, 2r + 1, 2r + 1]` one-hot neighbor kernel.
///
/// # Errors
///
/// Returns `InvalidConfiguration` if `radius` is zero or above [`MAX_NEIGHBOR_RADIUS`].
pub fn neighbor_mask<B: Backend>(radius: usize, device: &Device<B>) -> TerraNetResult<Tensor<B, 4>> {
    if radius == 0 || radius > MAX_NEIGHBOR_RADIUS {
        return Err(TerraNetError::InvalidConfiguration {
            reason: format!(
                "neighbor mask radius must be between 1 and {MAX_NEIGHBOR_RADIUS}, got {radius}"
            ),
        });
    }
    offset_kernel(&neighbor_offsets(radius), 2 * radius + 1, device)
        .map_err(|err| TerraNetError::from_extra_ops("neighbor mask", err))
}

/// Applies a radius-`r` mask to `[B, 1, H, W]`, giving `[B, 5, H, W]`.
/// Samples that fall outside the map are zero.
pub fn sample_neighbors<B: Backend>(
    x: Tensor<B, 4>,
    mask: Tensor<B, 4>,
    radius: usize,
) -> Tensor<B, 4> {
    sample_offsets(x, mask, radius)
}

/// Per-branch neighbor sampling with masks built once on a fixed device.
#[derive(Debug, Clone)]
pub struct NeighborSampler<B: Backend> {
    masks: Vec<(usize, Tensor<B, 4>)>,
}

impl<B: Backend> NeighborSampler<B> {
    /// Builds one mask per radius. Repeated radii share the same mask tensor.
    pub fn new(radii: &[usize], device: &Device<B>) -> TerraNetResult<Self> {
        let mut masks: Vec<(usize, Tensor<B, 4>)> = Vec::with_capacity(radii.len());
        for &radius in radii {
            let mask = match masks.iter().find(|(r, _)| *r == radius) {
                Some((_, mask)) => mask.clone(),
                None => neighbor_mask(radius, device)?,
            };
            masks.push((radius, mask));
        }
        Ok(Self { masks })
    }

    /// Builds the sampler for the four branch radii of a pixel resolution.
    pub fn for_resolution(pixel_resolution: f64, device: &Device<B>) -> TerraNetResult<Self> {
        Self::new(&branch_radii(pixel_resolution)?, device)
    }

    /// Radius used for each input channel.
    pub fn radii(&self) -> Vec<usize> {
        self.masks.iter().map(|(radius, _)| *radius).collect()
    }

    /// Samples every channel with its own radius.
    ///
    /// # Shapes
    /// - input: `[batch, n, H, W]` where `n` is the number of radii
    /// - output: `[batch, 5 * n, H, W]`; channels `5i..5i + 5` belong to input channel `i`
    ///
    /// # Errors
    ///
    /// Returns `InvalidTensorShape` if the channel count differs from the number of radii.
    pub fn forward(&self, features: Tensor<B, 4>) -> TerraNetResult<Tensor<B, 4>> {
        let [batch, channels, height, width] = features.dims();
        if channels != self.masks.len() {
            return Err(TerraNetError::InvalidTensorShape {
                expected: format!("[{batch}, {}, {height}, {width}]", self.masks.len()),
                actual: format!("[{batch}, {channels}, {height}, {width}]"),
            });
        }

        let sampled = self
            .masks
            .iter()
            .enumerate()
            .map(|(channel, (radius, mask))| {
                let x = features.clone().narrow(1, channel, 1);
                sample_neighbors(x, mask.clone(), *radius)
            })
            .collect::<Vec<_>>();

        Ok(Tensor::cat(sampled, 1))
    }
}
