//! HazardWatch CLI - Command-line interface
//!
//! This binary provides a command-line interface to the HazardWatch library.

mod commands;
mod error;
mod render;
mod runner;

use clap::{Parser, Subcommand};

use commands::assess::AssessArgs;
use commands::config::ConfigCommands;
use commands::quakes::QuakesArgs;

#[derive(Parser)]
#[command(name = "hazardwatch")]
#[command(version = hazardwatch::VERSION)]
#[command(about = "Assess natural hazard risk for a location", long_about = None)]
struct Cli {
    /// Enable debug logging (overrides RUST_LOG) and mirror logs to stderr
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assess every hazard for a place name or "lat,lon" pair
    Assess(AssessArgs),

    /// List recent earthquakes around a location
    Quakes(QuakesArgs),

    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Assess(args) => commands::assess::run(args, cli.debug).await,
        Commands::Quakes(args) => commands::quakes::run(args, cli.debug).await,
        Commands::Config { command } => commands::config::run(command),
    };

    if let Err(e) = result {
        e.exit();
    }
}
