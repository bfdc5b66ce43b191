//! # Spatial Alignment
//!
//! Pads a `[B, C, H, W]` feature map with zeros so that its spatial extent
//! matches a target size. The difference is split evenly between both sides;
//! when it is odd the extra row or column goes after the content (bottom, right).

use burn::{prelude::*, tensor::ElementConversion};

use crate::error::{ExtraOpsError, ExtraOpsResult};

/// Zero pads amounts for one axis: `(before, after)`.
const fn split_padding(difference: usize) -> (usize, usize) {
    let before = difference / 2;
    (before, difference - before)
}

/// Symmetrically zero pads `x` to `[target_h, target_w]`.
///
/// # Errors
///
/// Returns [`ExtraOpsError::AlignmentOverflow`] if `x` is already larger than
/// the target in either spatial dimension. Nothing is cropped.
pub fn align_to<B: Backend>(x: Tensor<B, 4>, target: [usize; 2]) -> ExtraOpsResult<Tensor<B, 4>> {
    let [_, _, h, w] = x.dims();
    let [target_h, target_w] = target;

    if h > target_h || w > target_w {
        return Err(ExtraOpsError::AlignmentOverflow {
            actual: [h, w],
            target,
        });
    }
    if h == target_h && w == target_w {
        return Ok(x);
    }

    let (pad_t, pad_b) = split_padding(target_h - h);
    let (pad_l, pad_r) = split_padding(target_w - w);

    Ok(x.pad((pad_l, pad_r, pad_t, pad_b), B::FloatElem::from_elem(0.0)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::{ndarray::NdArray, Autodiff};

    type TestBackend = Autodiff<NdArray<f32>>;

    #[test]
    fn align_to_same_size_is_noop() {
        let device = Default::default();
        let x = Tensor::<TestBackend, 4>::ones([1, 2, 8, 8], &device);
        let aligned = align_to(x.clone(), [8, 8]).unwrap();

        aligned.to_data().assert_eq(&x.to_data(), true);
    }

    #[test]
    fn align_to_puts_odd_remainder_after_content() {
        let device = Default::default();
        let x = Tensor::<TestBackend, 4>::ones([1, 1, 2, 2], &device);
        let aligned = align_to(x, [5, 4]).unwrap();
        assert_eq!(aligned.dims(), [1, 1, 5, 4]);

        // height diff 3 -> 1 row above, 2 below; width diff 2 -> 1 column each side.
        let values = aligned.into_data().to_vec::<f32>().unwrap();
        #[rustfmt::skip]
        let expected = [
            0.0, 0.0, 0.0, 0.0,
            0.0, 1.0, 1.0, 0.0,
            0.0, 1.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 0.0,
            0.0, 0.0, 0.0, 0.0,
        ];
        assert_eq!(values, expected);
    }

    #[test]
    fn align_to_rejects_larger_input() {
        let device = Default::default();
        let x = Tensor::<TestBackend, 4>::zeros([1, 1, 10, 4], &device);

        match align_to(x, [8, 8]) {
            Err(ExtraOpsError::AlignmentOverflow { actual, target }) => {
                assert_eq!(actual, [10, 4]);
                assert_eq!(target, [8, 8]);
            }
            _ => panic!("Expected AlignmentOverflow error"),
        }
    }

    #[test]
    fn split_padding_is_front_light() {
        assert_eq!(split_padding(0), (0, 0));
        assert_eq!(split_padding(3), (1, 2));
        assert_eq!(split_padding(4), (2, 2));
    }
}
