//! Configuration management CLI commands.
//!
//! Provides `config init`, `config path` and `config show`.

use std::path::Path;

use clap::Subcommand;
use hazardwatch::config::{config_file_path, ConfigFile};

use crate::error::CliError;

/// Config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Write a commented config file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Show the configuration file path
    Path,

    /// Show the effective configuration (file values over defaults)
    Show,
}

/// Run a config subcommand.
pub fn run(command: ConfigCommands) -> Result<(), CliError> {
    match command {
        ConfigCommands::Init { force } => run_init(&config_file_path(), force),
        ConfigCommands::Path => run_path(),
        ConfigCommands::Show => run_show(),
    }
}

/// Outcome of `config init`.
#[derive(Debug, PartialEq)]
enum InitOutcome {
    Created,
    Overwritten,
    AlreadyExists,
}

fn init_at(path: &Path, force: bool) -> Result<InitOutcome, CliError> {
    let existed = path.exists();
    if existed && !force {
        return Ok(InitOutcome::AlreadyExists);
    }

    ConfigFile::default().save_to(path)?;
    Ok(if existed {
        InitOutcome::Overwritten
    } else {
        InitOutcome::Created
    })
}

fn run_init(path: &Path, force: bool) -> Result<(), CliError> {
    match init_at(path, force)? {
        InitOutcome::Created => println!("Created {}", path.display()),
        InitOutcome::Overwritten => println!("Overwrote {} with defaults", path.display()),
        InitOutcome::AlreadyExists => {
            println!("Config file already exists: {}", path.display());
            println!("Use 'hazardwatch config init --force' to replace it with defaults.");
        }
    }
    Ok(())
}

fn run_path() -> Result<(), CliError> {
    let path = config_file_path();
    println!("{}", path.display());
    if !path.exists() {
        println!("(not created yet; run 'hazardwatch config init')");
    }
    Ok(())
}

fn run_show() -> Result<(), CliError> {
    let config = ConfigFile::load()?;
    print!("{}", config.to_ini_string());
    Ok(())
}
