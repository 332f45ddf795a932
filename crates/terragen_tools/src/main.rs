//! Asteroid terrain generation - authoring tools.
//!
//! # Usage
//!
//! ```bash
//! # Generate artifacts for every source map
//! cargo run -p terragen_tools -- generate --source-dir config/maps --output generated/maps
//!
//! # Regenerate with an explicit seed and config
//! cargo run -p terragen_tools -- generate --source-dir config/maps --output generated/maps \
//!     --config config/terragen.ron --seed 42
//!
//! # Check sources and config without writing anything
//! cargo run -p terragen_tools -- validate --source-dir config/maps
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use terragen_core::catalog::ResourceCatalog;
use terragen_tools::generate::{run_batch, BatchOptions};
use terragen_tools::validate::validate_sources;

#[derive(Parser)]
#[command(name = "terragen")]
#[command(about = "Authoring tools for asteroid terrain generation")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate encoded map artifacts from tile-map sources
    Generate {
        /// Directory of tile-map source documents
        #[arg(short, long, default_value = "config/maps")]
        source_dir: PathBuf,

        /// Output directory for artifacts and the batch report
        #[arg(short, long, default_value = "generated/maps")]
        output: PathBuf,

        /// Generation config file (RON); shipped defaults when absent
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Seed override on top of the config
        #[arg(long)]
        seed: Option<u64>,

        /// Maximum parallel files (0 = auto)
        #[arg(short, long, default_value = "0")]
        parallel: u32,
    },

    /// Validate sources and config without writing artifacts
    Validate {
        /// Directory of tile-map source documents
        #[arg(short, long, default_value = "config/maps")]
        source_dir: PathBuf,

        /// Generation config file (RON); shipped defaults when absent
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let catalog = ResourceCatalog::shipped();

    match cli.command {
        Commands::Generate {
            source_dir,
            output,
            config,
            seed,
            parallel,
        } => {
            let options = BatchOptions {
                source_dir,
                output_dir: output.clone(),
                config_path: config,
                seed,
                parallel,
            };
            match run_batch(&options, &catalog) {
                Ok(report) => {
                    if let Err(e) = report.save(&output.join("report.json")) {
                        tracing::error!("Failed to write batch report: {e}");
                        std::process::exit(1);
                    }
                    if !report.is_clean() {
                        for failure in &report.failures {
                            tracing::error!(file = %failure.file, "{}", failure.message);
                        }
                        std::process::exit(1);
                    }
                    tracing::info!("Generated {} artifact(s)", report.generated.len());
                }
                Err(e) => {
                    tracing::error!("Batch generation failed: {e}");
                    std::process::exit(1);
                }
            }
        }
        Commands::Validate { source_dir, config } => {
            match validate_sources(source_dir, config, &catalog) {
                Ok(summary) => {
                    if !summary.is_clean() {
                        for failure in &summary.failures {
                            tracing::error!(file = %failure.file, "{}", failure.message);
                        }
                        std::process::exit(1);
                    }
                    tracing::info!("Validation passed ({} file(s))", summary.checked);
                }
                Err(e) => {
                    tracing::error!("Validation failed: {e}");
                    std::process::exit(1);
                }
            }
        }
    }
}
