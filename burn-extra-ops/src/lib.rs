//! Additional operations for the Burn deep learning framework
//!
//! This crate provides tensor operations used by the TerraNet models that are
//! not available in the core Burn framework: symmetric zero-padding alignment and
//! fixed, non-trainable offset-sampling kernels.

use burn::prelude::*;

mod align;
mod error;
mod offset_kernel;

// Convenient re-exports
pub use align::align_to;
pub use error::{ExtraOpsError, ExtraOpsResult};
pub use offset_kernel::{offset_kernel, sample_offsets};

/// Additional operations for Burn tensors
pub trait TensorExtraOps<B: Backend> {
    /// Symmetrically zero pad the spatial dimensions up to `target`.
    fn align_to(self, target: [usize; 2]) -> ExtraOpsResult<Tensor<B, 4>>;
}

impl<B: Backend> TensorExtraOps<B> for Tensor<B, 4> {
    fn align_to(self, target: [usize; 2]) -> ExtraOpsResult<Tensor<B, 4>> {
        align::align_to(self, target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::{
        backend::{ndarray::NdArray, Autodiff},
        tensor::Tensor,
    };

    type TestBackend = Autodiff<NdArray<f32>>;

    #[test]
    fn test_tensor_extra_ops() {
        let device = Default::default();
        let tensor = Tensor::<TestBackend, 4>::random(
            [2, 3, 5, 6],
            burn::tensor::Distribution::Normal(0.0, 1.0),
            &device,
        );

        let aligned = tensor.align_to([8, 8]).unwrap();
        assert_eq!(aligned.dims(), [2, 3, 8, 8]);
    }
}
