//! TerraNet Inference Example
//!
//! Builds the configured model (optionally loading saved weights), runs timed
//! forward passes on a random raster and reports the output statistics.
//!
//! ## Usage
//!
//! ```bash
//! # Default PoolNet on a 4x128x128 raster
//! cargo run --bin inference
//!
//! # Custom configuration and saved weights
//! cargo run --bin inference -- --config config.json --weights weights/poolnet.mpk
//!
//! # Also report each resolution branch of a PoolNet
//! cargo run --bin inference -- --branches --batch-size 2 --runs 5
//! ```

use std::{path::PathBuf, time::Instant};

use anyhow::{Context, Result};
use burn::{
    prelude::*,
    tensor::{Distribution, ElementConversion},
};
use clap::Parser;
use terranet_burn::{InputShape, TerraNet};
use terranet_demos::{
    create_device, get_backend_name, init_tracing, InferenceConfig, SelectedBackend,
};
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Weights to load instead of a fresh initialization
    #[arg(short, long)]
    weights: Option<PathBuf>,

    /// Rasters per forward pass
    #[arg(long)]
    batch_size: Option<usize>,

    /// Number of timed forward passes
    #[arg(long)]
    runs: Option<usize>,

    /// Seed for initialization and input
    #[arg(long)]
    seed: Option<u64>,

    /// Report every resolution branch (PoolNet only)
    #[arg(long)]
    branches: bool,
}

/// Min, max and mean of a tensor.
fn summarize<const D: usize>(tensor: Tensor<SelectedBackend, D>) -> (f32, f32, f32) {
    let min = tensor.clone().min().into_scalar().elem::<f32>();
    let max = tensor.clone().max().into_scalar().elem::<f32>();
    let mean = tensor.mean().into_scalar().elem::<f32>();
    (min, max, mean)
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    // Load configuration
    let mut config = match &args.config {
        Some(path) => InferenceConfig::load(path)?,
        None => InferenceConfig::default(),
    };

    // Apply command line overrides
    if args.weights.is_some() {
        config.weights = args.weights;
    }
    if let Some(batch_size) = args.batch_size {
        config.batch_size = batch_size;
    }
    if let Some(runs) = args.runs {
        config.runs = runs;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if config.batch_size == 0 {
        anyhow::bail!("Batch size must be at least 1");
    }

    let device = create_device(config.seed);
    info!(backend = get_backend_name(), seed = ?config.seed, "using backend");

    let mut model = config
        .model
        .init::<SelectedBackend>(&device)
        .context("Failed to build model")?;
    if let Some(weights) = &config.weights {
        model = model
            .load_weights(weights.clone(), &device)
            .context("Failed to load weights")?;
        info!(path = %weights.display(), "loaded weights");
    }

    let InputShape {
        channels,
        height,
        width,
    } = config.model.input_shape.clone();
    let input = Tensor::<SelectedBackend, 4>::random(
        [config.batch_size, channels, height, width],
        Distribution::Normal(0.0, 1.0),
        &device,
    );

    if config.runs == 0 {
        warn!("no forward pass requested");
    }
    for run in 1..=config.runs {
        let start = Instant::now();
        let prediction = model.forward(input.clone())?;
        // Reading a value forces lazy backends to finish the pass.
        let (min, max, mean) = summarize(prediction.clone());
        info!(
            run,
            elapsed_ms = start.elapsed().as_millis() as u64,
            shape = ?prediction.dims(),
            min,
            max,
            mean,
            "forward pass"
        );
    }

    if args.branches {
        match &model {
            TerraNet::PoolNet(net) => {
                let radii = net.radii();
                for (index, branch) in net.forward_branches(input)?.into_iter().enumerate() {
                    let (min, max, mean) = summarize(branch);
                    info!(
                        branch = index + 1,
                        neighbor_radius = radii[index],
                        min,
                        max,
                        mean,
                        "branch prediction"
                    );
                }
            }
            _ => warn!("--branches only applies to the PoolNet architecture"),
        }
    }

    Ok(())
}
