//! User configuration.
//!
//! Settings are read from `~/.hazardwatch/config.ini`. Missing files and
//! missing keys fall back to the library defaults, so an empty or absent
//! file yields the same behaviour as [`AssessmentConfig::default()`].
//!
//! # Example
//!
//! ```no_run
//! use hazardwatch::config::ConfigFile;
//!
//! let config = ConfigFile::load()?;
//! let runtime = config.to_assessment_config();
//! assert!(runtime.max_concurrent_requests >= 1);
//! # Ok::<(), hazardwatch::config::ConfigFileError>(())
//! ```
//!
//! [`AssessmentConfig::default()`]: crate::aggregator::AssessmentConfig

mod defaults;
mod file;
mod parser;
mod settings;
mod writer;

pub use defaults::{DEFAULT_LOG_FILE_NAME, DEFAULT_SUMMARY_TIMEOUT_SECS, MAX_CONCURRENT_REQUESTS};
pub use file::{config_directory, config_file_path, ConfigFileError};
pub use settings::{
    AssessmentSettings, ConfigFile, EndpointSettings, LoggingSettings, SummarySettings,
    TimeoutSettings,
};
