//! Machina CLI - launches the interactive part viewer

use anyhow::Result;
use clap::{Parser, Subcommand};
use machina_viewer::ViewerConfig;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "machina")]
#[command(about = "Interactive 3D machine-part viewer", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the viewer window
    View {
        /// Model files to cycle through (overrides the config list)
        models: Vec<PathBuf>,

        /// Path to a TOML viewer config
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::View { models, config } => {
            let mut viewer_config = match config {
                Some(path) => ViewerConfig::load(&path)?,
                None => ViewerConfig::default(),
            };

            if !models.is_empty() {
                viewer_config.models = models;
            }

            log::info!(
                "Starting viewer with {} model(s)",
                viewer_config.models.len()
            );

            machina_viewer::run(viewer_config)
        }
    }
}
