//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use std::fmt;
use std::path::PathBuf;
use std::process;

use hazardwatch::aggregator::AssessmentError;
use hazardwatch::config::ConfigFileError;
use hazardwatch::feed::FetchError;
use hazardwatch::geocode::GeocodeError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Configuration error
    Config(String),
    /// Failed to read or write the configuration file
    ConfigFile(ConfigFileError),
    /// Failed to create the HTTP client
    HttpClient(FetchError),
    /// Assessment could not start
    Assessment(AssessmentError),
    /// Earthquake feed failed
    Quakes(FetchError),
    /// Failed to serialize the export
    Export(serde_json::Error),
    /// Failed to write output file
    FileWrite { path: PathBuf, error: std::io::Error },
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        // Print additional help for specific errors
        match self {
            CliError::Assessment(AssessmentError::Geocode(GeocodeError::NotFound(_))) => {
                eprintln!();
                eprintln!("The location could not be found. Try:");
                eprintln!("  1. A more specific name, e.g. \"Springfield, Illinois\"");
                eprintln!("  2. Coordinates in decimal degrees, e.g. \"13.0827,80.2707\"");
            }
            CliError::Assessment(AssessmentError::Geocode(GeocodeError::OutOfRange(_))) => {
                eprintln!();
                eprintln!("Latitude must be within -90..90 and longitude within -180..180.");
            }
            CliError::Assessment(AssessmentError::Geocode(GeocodeError::ServiceUnavailable(_)))
            | CliError::Quakes(_) => {
                eprintln!();
                eprintln!("Common issues:");
                eprintln!("  1. No network connection");
                eprintln!("  2. The service is rate limiting requests; wait a minute and retry");
                eprintln!("  3. A custom endpoint in the config file is unreachable");
                eprintln!("     (see 'hazardwatch config path')");
            }
            CliError::ConfigFile(ConfigFileError::InvalidValue { .. }) => {
                eprintln!();
                eprintln!("Fix the value in the config file or regenerate it with:");
                eprintln!("  hazardwatch config init --force");
            }
            _ => {}
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::ConfigFile(e) => write!(f, "{}", e),
            CliError::HttpClient(e) => write!(f, "Failed to create HTTP client: {}", e),
            CliError::Assessment(e) => write!(f, "Assessment failed: {}", e),
            CliError::Quakes(e) => write!(f, "Failed to fetch earthquakes: {}", e),
            CliError::Export(e) => write!(f, "Failed to serialize export: {}", e),
            CliError::FileWrite { path, error } => {
                write!(f, "Failed to write file '{}': {}", path.display(), error)
            }
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::ConfigFile(e) => Some(e),
            CliError::HttpClient(e) => Some(e),
            CliError::Assessment(e) => Some(e),
            CliError::Quakes(e) => Some(e),
            CliError::Export(e) => Some(e),
            CliError::FileWrite { error, .. } => Some(error),
            _ => None,
        }
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::ConfigFile(e)
    }
}

impl From<AssessmentError> for CliError {
    fn from(e: AssessmentError) -> Self {
        CliError::Assessment(e)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Export(e)
    }
}
