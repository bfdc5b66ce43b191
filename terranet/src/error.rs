use burn_extra_ops::ExtraOpsError;
use thiserror::Error;

/// The error type for `TerraNet-Burn` operations.
///
/// Shape mismatches between chained layers are not represented here: Burn
/// reports them itself and they reach the caller unchanged.
#[derive(Error, Debug)]
pub enum TerraNetError {
    /// Error for when an invalid model configuration is provided.
    /// This can happen if configuration parameters are logically inconsistent.
    #[error("Invalid model configuration: {reason}")]
    InvalidConfiguration {
        /// The reason why the configuration is invalid.
        reason: String,
    },

    /// Error for when an input tensor has an invalid shape.
    #[error("Invalid input tensor shape: expected {expected}, got {actual}")]
    InvalidTensorShape {
        /// The expected tensor shape.
        expected: String,
        /// The actual tensor shape.
        actual: String,
    },

    /// A decoder output came out larger than the raster it must be aligned to.
    #[error("Branch {branch} output {actual:?} exceeds target size {target:?}")]
    AlignmentOverflow {
        /// Name of the stage whose output could not be aligned.
        branch: String,
        /// Spatial size `[H, W]` produced by the stage.
        actual: [usize; 2],
        /// Spatial size `[H, W]` it had to match.
        target: [usize; 2],
    },

    /// Error for when loading model weights fails.
    #[error("Failed to load weights: {reason}")]
    WeightLoadingFailed {
        /// The reason for the weight loading failure.
        reason: String,
    },

    /// Error for when saving model weights fails.
    #[error("Failed to save weights: {reason}")]
    WeightSavingFailed {
        /// The reason for the weight saving failure.
        reason: String,
    },
}

impl TerraNetError {
    /// Attaches the stage name to an error coming from `burn-extra-ops`.
    pub(crate) fn from_extra_ops(branch: &str, err: ExtraOpsError) -> Self {
        match err {
            ExtraOpsError::AlignmentOverflow { actual, target } => Self::AlignmentOverflow {
                branch: branch.to_string(),
                actual,
                target,
            },
            ExtraOpsError::InvalidKernel { reason } => Self::InvalidConfiguration { reason },
        }
    }
}

/// A specialized `Result` type for `TerraNet-Burn` operations.
pub type TerraNetResult<T> = Result<T, TerraNetError>;
