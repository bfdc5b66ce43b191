use thiserror::Error;

/// Errors raised by the operations in this crate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtraOpsError {
    /// The tensor to align is larger than the target in at least one spatial dimension.
    #[error("cannot align {actual:?} to smaller target {target:?}")]
    AlignmentOverflow {
        /// Spatial size `[H, W]` of the tensor.
        actual: [usize; 2],
        /// Requested spatial size `[H, W]`.
        target: [usize; 2],
    },

    /// An offset kernel could not be built.
    #[error("invalid offset kernel: {reason}")]
    InvalidKernel {
        /// Why the kernel is invalid.
        reason: String,
    },
}

/// A specialized `Result` type for extra ops.
pub type ExtraOpsResult<T> = Result<T, ExtraOpsError>;
