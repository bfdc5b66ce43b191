//! # TerraNet Model
//!
//! A single entry point over the available architectures. `ModelConfig::init`
//! validates the configuration and builds the requested network; `TerraNet`
//! forwards to it and handles saving and loading weights.

use std::path::PathBuf;

use burn::{
    prelude::*,
    record::{FullPrecisionSettings, NamedMpkFileRecorder},
};

use super::{Fcn, FcnConfig, PoolNet, PoolNetConfig, UNet, UNetConfig};
use crate::{
    config::{Architecture, ModelConfig},
    error::{TerraNetError, TerraNetResult},
};

impl ModelConfig {
    /// Initializes the configured model.
    ///
    /// # Arguments
    ///
    /// * `device` - The device to create the model on.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn init<B: Backend>(&self, device: &Device<B>) -> TerraNetResult<TerraNet<B>> {
        self.validate()?;
        let in_channels = self.input_shape.channels;

        let model = match self.architecture {
            Architecture::Fcn => TerraNet::Fcn(FcnConfig::new(in_channels).init(device)),
            Architecture::UNet => TerraNet::UNet(UNetConfig::new(in_channels).init(device)),
            Architecture::PoolNet => TerraNet::PoolNet(
                PoolNetConfig::new(self.input_shape.clone(), self.pixel_resolution).init(device)?,
            ),
        };

        tracing::info!(
            architecture = ?self.architecture,
            parameters = model.num_params(),
            "model initialized"
        );
        Ok(model)
    }
}

/// Any of the TerraNet architectures.
#[derive(Module, Debug)]
pub enum TerraNet<B: Backend> {
    /// Fully convolutional baseline.
    Fcn(Fcn<B>),
    /// U-Net with x4 levels.
    UNet(UNet<B>),
    /// Multi-resolution pooling network.
    PoolNet(PoolNet<B>),
}

impl<B: Backend> TerraNet<B> {
    /// Forward pass of the wrapped model.
    ///
    /// # Shapes
    /// - input: `[batch, channels, H, W]`
    /// - output: `[batch, 1, H, W]`
    pub fn forward(&self, x: Tensor<B, 4>) -> TerraNetResult<Tensor<B, 4>> {
        match self {
            Self::Fcn(model) => Ok(model.forward(x)),
            Self::UNet(model) => model.forward(x),
            Self::PoolNet(model) => model.forward(x),
        }
    }

    /// Saves the weights to a named MessagePack file (`.mpk` is appended).
    ///
    /// # Errors
    ///
    /// Returns `WeightSavingFailed` if the record cannot be written.
    pub fn save_weights(self, path: impl Into<PathBuf>) -> TerraNetResult<()> {
        let path = path.into();
        self.save_file(path.clone(), &NamedMpkFileRecorder::<FullPrecisionSettings>::new())
            .map_err(|err| TerraNetError::WeightSavingFailed {
                reason: format!("{}: {err}", path.display()),
            })
    }

    /// Loads weights saved by [`TerraNet::save_weights`] into this model.
    ///
    /// # Errors
    ///
    /// Returns `WeightLoadingFailed` if the file is missing or does not match the architecture.
    pub fn load_weights(self, path: impl Into<PathBuf>, device: &Device<B>) -> TerraNetResult<Self> {
        let path = path.into();
        self.load_file(
            path.clone(),
            &NamedMpkFileRecorder::<FullPrecisionSettings>::new(),
            device,
        )
        .map_err(|err| TerraNetError::WeightLoadingFailed {
            reason: format!("{}: {err}", path.display()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::InputShape;
    use crate::tests::TestBackend;
    use burn::tensor::Distribution;

    #[test]
    fn init_builds_requested_architecture() {
        let device = Default::default();
        let config = ModelConfig::new()
            .with_architecture(Architecture::Fcn)
            .with_input_shape(InputShape::new(3, 16, 16));

        let model = config.init::<TestBackend>(&device).unwrap();
        assert!(matches!(model, TerraNet::Fcn(_)));

        let x = Tensor::<TestBackend, 4>::random([1, 3, 16, 16], Distribution::Default, &device);
        assert_eq!(model.forward(x).unwrap().dims(), [1, 1, 16, 16]);
    }

    #[test]
    fn init_rejects_invalid_configuration() {
        let device = Default::default();
        let config = ModelConfig::new().with_input_shape(InputShape::new(3, 32, 32));

        assert!(matches!(
            config.init::<TestBackend>(&device),
            Err(TerraNetError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn weights_round_trip_through_file() {
        let device = Default::default();
        let config = ModelConfig::new()
            .with_architecture(Architecture::Fcn)
            .with_input_shape(InputShape::new(2, 12, 12));
        let model = config.init::<TestBackend>(&device).unwrap();
        let x = Tensor::<TestBackend, 4>::random([1, 2, 12, 12], Distribution::Default, &device);
        let expected = model.forward(x.clone()).unwrap();

        let path = std::env::temp_dir().join(format!("terranet-fcn-{}", std::process::id()));
        model.save_weights(path.clone()).unwrap();

        let restored = config
            .init::<TestBackend>(&device)
            .unwrap()
            .load_weights(path.clone(), &device)
            .unwrap();
        let actual = restored.forward(x).unwrap();
        let _ = std::fs::remove_file(path.with_extension("mpk"));

        actual.into_data().assert_eq(&expected.into_data(), true);
    }

    #[test]
    fn load_weights_reports_missing_file() {
        let device = Default::default();
        let model = ModelConfig::new()
            .with_architecture(Architecture::Fcn)
            .with_input_shape(InputShape::new(2, 12, 12))
            .init::<TestBackend>(&device)
            .unwrap();

        let result = model.load_weights("/nonexistent/terranet/weights", &device);
        assert!(matches!(
            result,
            Err(TerraNetError::WeightLoadingFailed { .. })
        ));
    }
}
