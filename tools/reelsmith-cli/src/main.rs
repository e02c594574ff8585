//! Reelsmith CLI — Command-line interface for the video assembly pipeline.
//!
//! Usage:
//!   reelsmith process [OPTIONS]   Process all pending queue items
//!   reelsmith render <ID>         Render a single item, keep its work files
//!   reelsmith queue               Show queue items and their status
//!   reelsmith check               Check external tools and assets
//!   reelsmith init                Scaffold the data directory and config

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use reelsmith_common::AppConfig;

mod commands;
mod deliver;

#[derive(Parser)]
#[command(
    name = "reelsmith",
    about = "Assemble narrated slideshow videos from a content queue",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process all pending queue items end to end
    Process {
        /// Delivery directory for finished videos
        #[arg(short, long, default_value = "delivered")]
        output: PathBuf,

        /// Stop after this many items
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Render a single item by id, leaving its working files in place
    Render {
        /// Queue item id
        id: String,
    },

    /// Show queue items and their completion status
    Queue,

    /// Check external tools and assets
    Check,

    /// Scaffold the data directory and write a default config
    Init,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load();

    // Initialize logging
    let mut logging = config.logging.clone();
    if cli.verbose {
        logging.level = "debug".to_string();
    }
    reelsmith_common::logging::init_logging(&logging);

    match cli.command {
        Commands::Process { output, limit } => commands::process::run(config, output, limit).await,
        Commands::Render { id } => commands::render::run(config, id).await,
        Commands::Queue => commands::queue::run(config),
        Commands::Check => commands::check::run(config),
        Commands::Init => commands::init::run(config),
    }
}
