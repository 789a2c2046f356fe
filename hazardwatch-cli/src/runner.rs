//! CLI runner for common setup and operations.
//!
//! Encapsulates logging initialization, client creation, and file operations
//! to reduce duplication across command handlers.

use std::path::Path;
use std::sync::Arc;

use tracing::info;

use hazardwatch::aggregator::{AssessmentConfig, Assessor};
use hazardwatch::config::ConfigFile;
use hazardwatch::feed::AsyncReqwestClient;
use hazardwatch::logging::{init_logging, ConsoleOutput, LoggingGuard};
use hazardwatch::summary::GeminiSummarizer;

use crate::error::CliError;

/// Runner that manages CLI lifecycle and common operations.
pub struct CliRunner {
    /// Logging guard - keeps logging active while runner exists
    #[allow(dead_code)]
    logging_guard: LoggingGuard,
    /// Loaded configuration file
    config: ConfigFile,
}

impl CliRunner {
    /// Create a new CLI runner with optional debug logging.
    ///
    /// Logs always go to the configured file. With `debug_mode` they are
    /// also mirrored to stderr, so stdout stays clean for reports and JSON.
    pub fn with_debug(debug_mode: bool) -> Result<Self, CliError> {
        let config = ConfigFile::load()?;

        let console = match (debug_mode, atty::is(atty::Stream::Stderr)) {
            (false, _) => ConsoleOutput::Off,
            (true, true) => ConsoleOutput::Color,
            (true, false) => ConsoleOutput::Plain,
        };

        let logging_guard = init_logging(&config.logging.file, console, debug_mode)
            .map_err(|e| CliError::LoggingInit(e.to_string()))?;

        Ok(Self {
            logging_guard,
            config,
        })
    }

    /// Get the loaded configuration.
    pub fn config(&self) -> &ConfigFile {
        &self.config
    }

    /// Log startup information for a command.
    pub fn log_startup(&self, command: &str) {
        info!("HazardWatch v{}", hazardwatch::VERSION);
        info!(
            log_file = %self.config.logging.file.display(),
            "HazardWatch CLI: {} command",
            command
        );
    }

    /// Create an assessor backed by the network.
    pub fn create_assessor(
        &self,
        config: AssessmentConfig,
    ) -> Result<Assessor<AsyncReqwestClient>, CliError> {
        Assessor::with_reqwest(config).map_err(CliError::HttpClient)
    }

    /// Create a summarizer when summaries are enabled and a key is available.
    ///
    /// `env_key` comes from `GEMINI_API_KEY` and wins over the config file.
    pub fn create_summarizer(
        &self,
        env_key: Option<String>,
    ) -> Result<Option<GeminiSummarizer<AsyncReqwestClient>>, CliError> {
        let Some(api_key) = self.config.summary_api_key(env_key) else {
            info!("Summary disabled or no API key configured");
            return Ok(None);
        };

        let http = AsyncReqwestClient::new(&self.config.endpoints.user_agent)
            .map_err(CliError::HttpClient)?;
        Ok(Some(GeminiSummarizer::new(
            Arc::new(http),
            api_key,
            self.config.summary.model.clone(),
            self.config.summary_timeout(),
        )))
    }

    /// Write an exported assessment to disk.
    pub fn write_export(&self, path: &Path, json: &str) -> Result<(), CliError> {
        std::fs::write(path, json).map_err(|error| CliError::FileWrite {
            path: path.to_path_buf(),
            error,
        })?;

        info!(path = %path.display(), bytes = json.len(), "Assessment exported");
        Ok(())
    }
}
