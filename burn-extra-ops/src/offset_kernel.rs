//! # Fixed Offset Kernels
//!
//! Non-trainable convolution kernels whose output channels each pick a single
//! spatial offset out of a square window. Convolving a one-channel feature map
//! with such a kernel gathers, for every pixel, the values found at those
//! offsets. Offsets that fall outside the map read the convolution's zero padding.

use burn::{prelude::*, tensor::module::conv2d, tensor::ops::ConvOptions};

use crate::error::{ExtraOpsError, ExtraOpsResult};

/// Builds a `[offsets.len(), 1, size, size]` kernel with a single `1.0` per
/// output channel at the given `[row, col]` position.
///
/// # Errors
///
/// Returns [`ExtraOpsError::InvalidKernel`] if `size` is zero, no offsets are
/// given, an offset lies outside the window, or the kernel size overflows `usize`.
pub fn offset_kernel<B: Backend>(
    offsets: &[[usize; 2]],
    size: usize,
    device: &B::Device,
) -> ExtraOpsResult<Tensor<B, 4>> {
    if size == 0 || offsets.is_empty() {
        return Err(ExtraOpsError::InvalidKernel {
            reason: format!(
                "kernel needs a non-empty window and at least one offset, got size {size} with {} offsets",
                offsets.len()
            ),
        });
    }

    let (window, len) = size
        .checked_mul(size)
        .and_then(|window| Some((window, window.checked_mul(offsets.len())?)))
        .ok_or_else(|| ExtraOpsError::InvalidKernel {
            reason: format!(
                "a {size}x{size} window with {} offsets does not fit in memory",
                offsets.len()
            ),
        })?;
    let mut values = vec![0.0f32; len];
    for (channel, &[row, col]) in offsets.iter().enumerate() {
        if row >= size || col >= size {
            return Err(ExtraOpsError::InvalidKernel {
                reason: format!("offset ({row}, {col}) is outside a {size}x{size} window"),
            });
        }
        values[channel * window + row * size + col] = 1.0;
    }

    Ok(Tensor::from_data(
        TensorData::new(values, [offsets.len(), 1, size, size]),
        device,
    ))
}

/// Convolves a single-channel map `[B, 1, H, W]` with an offset kernel.
///
/// With `padding = size / 2` the output keeps the input's spatial extent and has
/// one channel per kernel offset.
pub fn sample_offsets<B: Backend>(
    x: Tensor<B, 4>,
    kernel: Tensor<B, 4>,
    padding: usize,
) -> Tensor<B, 4> {
    let options = ConvOptions::new([1, 1], [padding, padding], [1, 1], 1);
    conv2d(x, kernel, None, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::ndarray::NdArray;

    type TestBackend = NdArray<f32>;

    #[test]
    fn offset_kernel_places_single_ones() {
        let device = Default::default();
        let kernel = offset_kernel::<TestBackend>(&[[0, 1], [2, 2]], 3, &device).unwrap();
        assert_eq!(kernel.dims(), [2, 1, 3, 3]);

        let values = kernel.into_data().to_vec::<f32>().unwrap();
        assert_eq!(values.iter().filter(|&&v| v == 1.0).count(), 2);
        assert_eq!(values[1], 1.0);
        assert_eq!(values[9 + 8], 1.0);
    }

    #[test]
    fn offset_kernel_rejects_out_of_window_offset() {
        let device = Default::default();
        let result = offset_kernel::<TestBackend>(&[[3, 0]], 3, &device);
        assert!(matches!(result, Err(ExtraOpsError::InvalidKernel { .. })));
    }

    #[test]
    fn offset_kernel_rejects_overflowing_size() {
        let device = Default::default();
        let result = offset_kernel::<TestBackend>(&[[0, 0]], usize::MAX, &device);
        assert!(matches!(result, Err(ExtraOpsError::InvalidKernel { .. })));

        let size = 1 << (usize::BITS / 2 - 1);
        let offsets = vec![[0, 0]; 8];
        let result = offset_kernel::<TestBackend>(&offsets, size, &device);
        assert!(matches!(result, Err(ExtraOpsError::InvalidKernel { .. })));
    }

    #[test]
    fn sample_offsets_shifts_values() {
        let device = Default::default();
        // Offset (0, 1) in a 3x3 window reads the pixel one row above.
        let kernel = offset_kernel::<TestBackend>(&[[0, 1]], 3, &device).unwrap();
        let x = Tensor::<TestBackend, 4>::from_data(
            TensorData::new(vec![1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0], [1, 1, 3, 3]),
            &device,
        );

        let out = sample_offsets(x, kernel, 1);
        assert_eq!(out.dims(), [1, 1, 3, 3]);
        let values = out.into_data().to_vec::<f32>().unwrap();
        assert_eq!(values, vec![0.0, 0.0, 0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }
}
