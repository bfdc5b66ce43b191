//! Model Manager Example
//!
//! Prints model structure and size, writes default config files, and saves
//! freshly initialized weights for later use by the `inference` binary.

use std::path::PathBuf;

use anyhow::{Context, Result};
use burn::module::Module;
use clap::{Parser, Subcommand};
use terranet_burn::{Architecture, ModelConfig};
use terranet_demos::{create_device, init_tracing, InferenceConfig, SelectedBackend};
use tracing::info;

#[derive(Parser)]
#[command(name = "model_manager")]
#[command(about = "TerraNet Model Manager")]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the parameter count of every architecture
    List,
    /// Print the module tree of the configured model
    Info {
        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Initialize a model and save its weights
    Init {
        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Output path (`.mpk` is appended)
        output: PathBuf,
    },
    /// Write a default configuration file
    WriteConfig {
        /// Output path
        output: PathBuf,
    },
}

fn load_config(path: Option<&PathBuf>) -> Result<InferenceConfig> {
    match path {
        Some(path) => InferenceConfig::load(path),
        None => Ok(InferenceConfig::default()),
    }
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();
    let device = create_device(None);

    match args.command {
        Commands::List => {
            for architecture in [Architecture::Fcn, Architecture::UNet, Architecture::PoolNet] {
                let model = ModelConfig::new()
                    .with_architecture(architecture.clone())
                    .init::<SelectedBackend>(&device)?;
                println!("{architecture:?}: {} parameters", model.num_params());
            }
        }
        Commands::Info { config } => {
            let config = load_config(config.as_ref())?;
            let model = config.model.init::<SelectedBackend>(&device)?;
            println!("{model}");
            println!("Parameters: {}", model.num_params());
        }
        Commands::Init { config, output } => {
            let config = load_config(config.as_ref())?;
            let model = config.model.init::<SelectedBackend>(&device)?;
            model
                .save_weights(output.clone())
                .context("Failed to save weights")?;
            info!(path = %output.with_extension("mpk").display(), "saved weights");
        }
        Commands::WriteConfig { output } => {
            InferenceConfig::default().save(&output)?;
            info!(path = %output.display(), "wrote default config");
        }
    }

    Ok(())
}
