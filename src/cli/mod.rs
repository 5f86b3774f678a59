pub mod commands;

use clap::{Parser, Subcommand};
use crate::error::Result;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "newspulse")]
#[command(about = "Aggregate news feeds into a single sanitized timeline")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug output
    #[arg(short, long, global = true)]
    pub debug: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a default configuration with the stock feed lineup
    Init,

    /// List configured feeds in fetch order
    Feeds,

    /// Fetch all feeds and print the merged timeline
    Fetch {
        /// Emit the aggregation as JSON
        #[arg(long)]
        json: bool,

        /// Keep only the newest N articles after merging
        #[arg(short, long)]
        limit: Option<usize>,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        // Initialize logging
        commands::init_logging(self.debug, self.verbose)?;

        match self.command {
            Commands::Init => commands::init(self.config).await,
            Commands::Feeds => commands::feeds(self.config).await,
            Commands::Fetch { json, limit } => commands::fetch(self.config, json, limit).await,
        }
    }
}
