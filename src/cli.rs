use std::path::PathBuf;

use clap::{Parser, Subcommand};

use pageveil::{Result, VeilConfig};

use crate::commands;

/// pageveil - fingerprint presentation layer for CDP-driven browsers
#[derive(Parser)]
#[command(name = "pageveil")]
#[command(author, version, long_about = None)]
pub struct Cli {
    /// TOML config file; without it the recommended full profile is used
    #[arg(short, long, env = "PAGEVEIL_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Seed the sampler for reproducible output
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the generated init script
    Render,

    /// Validate the configuration and report covered surfaces
    Check,

    /// Connect to a running browser and install the layer on a new page
    Apply {
        /// CDP WebSocket URL (ws://...) or host:port
        #[arg(long, env = "PAGEVEIL_CDP")]
        cdp: String,

        /// Navigate the prepared page after install
        #[arg(long)]
        url: Option<String>,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let config = match &self.config {
            Some(path) => VeilConfig::load(Some(path))?,
            None => VeilConfig::recommended(),
        };

        match self.command {
            Commands::Render => commands::render::run(config, self.seed),
            Commands::Check => commands::check::run(config, self.seed, self.verbose),
            Commands::Apply { cdp, url } => {
                commands::apply::run(config, self.seed, cdp, url).await
            }
        }
    }
}
