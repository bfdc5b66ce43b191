use burn::backend::{ndarray::NdArray, Autodiff};

use crate::config::{Architecture, InputShape, ModelConfig};
use crate::error::TerraNetError;

pub type TestBackend = NdArray<f32>;

pub type TestAutodiffBackend = Autodiff<TestBackend>;

/// Element-wise comparison with an absolute tolerance.
pub fn assert_close(actual: &[f32], expected: &[f32]) {
    assert_eq!(actual.len(), expected.len());
    for (index, (a, e)) in actual.iter().zip(expected).enumerate() {
        assert!((a - e).abs() <= 1e-6, "index {index}: {a} != {e}");
    }
}

#[test]
fn test_valid_configuration() {
    let config = ModelConfig::new();

    assert!(config.validate().is_ok());
    assert_eq!(config.architecture, Architecture::PoolNet);
    assert_eq!(config.input_shape, InputShape::new(4, 128, 128));
}

#[test]
fn test_empty_input_shape() {
    let config = ModelConfig::new().with_input_shape(InputShape::new(0, 128, 128));

    match config.validate() {
        Err(TerraNetError::InvalidConfiguration { reason }) => {
            assert!(reason.contains("Input shape must be non-empty"));
        }
        _ => panic!("Expected InvalidConfiguration error"),
    }
}

#[test]
fn test_invalid_pixel_resolution() {
    for pixel_resolution in [0.0, -1.0, f64::INFINITY] {
        let config = ModelConfig::new().with_pixel_resolution(pixel_resolution);

        match config.validate() {
            Err(TerraNetError::InvalidConfiguration { reason }) => {
                assert!(reason.contains("pixel resolution must be positive"));
            }
            _ => panic!("Expected InvalidConfiguration error"),
        }
    }
}

#[test]
fn test_pixel_resolution_too_fine_for_masks() {
    for pixel_resolution in [1e-20, 1e-3] {
        let config = ModelConfig::new().with_pixel_resolution(pixel_resolution);

        match config.validate() {
            Err(TerraNetError::InvalidConfiguration { reason }) => {
                assert!(reason.contains("too fine"));
            }
            _ => panic!("Expected InvalidConfiguration error"),
        }
    }
}

#[test]
fn test_raster_too_small_for_reductions() {
    for architecture in [Architecture::UNet, Architecture::PoolNet] {
        let config = ModelConfig::new()
            .with_architecture(architecture)
            .with_input_shape(InputShape::new(4, 63, 128));

        match config.validate() {
            Err(TerraNetError::InvalidConfiguration { reason }) => {
                assert!(reason.contains("needs rasters of at least 64x64"));
            }
            _ => panic!("Expected InvalidConfiguration error"),
        }
    }
}

#[test]
fn test_fcn_accepts_small_raster() {
    let config = ModelConfig::new()
        .with_architecture(Architecture::Fcn)
        .with_input_shape(InputShape::new(4, 3, 3));

    assert!(config.validate().is_ok());
}

#[test]
fn test_config_json_round_trip() {
    use burn::config::Config;

    let config = ModelConfig::new()
        .with_architecture(Architecture::UNet)
        .with_pixel_resolution(12.5);
    let json = config.to_string();
    let restored = ModelConfig::load_binary(json.as_bytes()).unwrap();

    assert_eq!(restored.architecture, Architecture::UNet);
    assert_eq!(restored.pixel_resolution, 12.5);
    assert_eq!(restored.input_shape, config.input_shape);
}
