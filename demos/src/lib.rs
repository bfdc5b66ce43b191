//! TerraNet Demos
//!
//! This crate provides demo applications for the TerraNet models.
//!
//! ## Available Binaries
//!
//! - `inference`: Builds or loads a model and times forward passes on a random raster
//! - `model_manager`: Prints, initializes and saves models and config files
//!
//! ## Usage
//!
//! ```bash
//! # Write a default config, then time the configured model
//! cargo run --bin model_manager -- write-config config.json
//! cargo run --bin inference -- --config config.json
//!
//! # Save freshly initialized weights and run them
//! cargo run --bin model_manager -- init --config config.json weights/poolnet
//! cargo run --bin inference -- --config config.json --weights weights/poolnet.mpk
//! ```

pub mod backend;
pub mod config;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

// Re-export commonly used items
pub use backend::{create_device, get_backend_name, SelectedBackend, SelectedDevice};
pub use config::InferenceConfig;

/// Installs the global tracing subscriber. `RUST_LOG` overrides the `info` default.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer().with_target(true);
    Registry::default().with(filter).with(fmt_layer).init();
}
