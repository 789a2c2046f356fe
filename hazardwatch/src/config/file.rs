//! Configuration file handling for ~/.hazardwatch/config.ini.
//!
//! Loads and saves user configuration with sensible defaults.
//! Settings structs live in [`super::settings`], constants in [`super::defaults`],
//! parsing in [`super::parser`], and serialization in [`super::writer`].

use std::path::{Path, PathBuf};
use std::time::Duration;

use ini::Ini;
use thiserror::Error;

use super::settings::ConfigFile;
use crate::aggregator::AssessmentConfig;
use crate::feed::{FeedEndpoints, SourceTimeouts};
use crate::hazard::TsunamiParams;

/// Configuration file errors.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] ini::Error),

    /// Failed to write config file
    #[error("Failed to write config file: {0}")]
    WriteError(String),

    /// Invalid configuration value
    #[error("Invalid configuration: {section}.{key} = '{value}' - {reason}")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
        reason: String,
    },

    /// Failed to create config directory
    #[error("Failed to create config directory: {0}")]
    DirectoryError(std::io::Error),
}

impl ConfigFile {
    /// Load configuration from the default path (~/.hazardwatch/config.ini).
    ///
    /// If the file doesn't exist, returns defaults.
    pub fn load() -> Result<Self, ConfigFileError> {
        let path = config_file_path();
        Self::load_from(&path)
    }

    /// Load configuration from a specific path.
    ///
    /// If the file doesn't exist, returns defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigFileError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path)?;
        super::parser::parse_ini(&ini)
    }

    /// Save configuration to the default path (~/.hazardwatch/config.ini).
    pub fn save(&self) -> Result<(), ConfigFileError> {
        let path = config_file_path();
        self.save_to(&path)
    }

    /// Save configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigFileError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigFileError::DirectoryError)?;
        }

        let content = super::writer::to_config_string(self);
        std::fs::write(path, content).map_err(|e| ConfigFileError::WriteError(e.to_string()))
    }

    /// Create the default config file if it doesn't exist.
    ///
    /// Returns the path to the config file.
    pub fn ensure_exists() -> Result<PathBuf, ConfigFileError> {
        let path = config_file_path();
        if !path.exists() {
            Self::default().save_to(&path)?;
        }
        Ok(path)
    }

    /// The commented INI text [`save_to`](Self::save_to) would write.
    pub fn to_ini_string(&self) -> String {
        super::writer::to_config_string(self)
    }

    /// Runtime configuration for the assessment library.
    pub fn to_assessment_config(&self) -> AssessmentConfig {
        let endpoints = &self.endpoints;
        let timeouts = &self.timeouts;
        let assessment = &self.assessment;

        AssessmentConfig {
            endpoints: FeedEndpoints {
                geocoder_url: endpoints.geocoder_url.clone(),
                seismic_url: endpoints.seismic_url.clone(),
                forecast_url: endpoints.forecast_url.clone(),
                archive_url: endpoints.archive_url.clone(),
                overpass_url: endpoints.overpass_url.clone(),
                user_agent: endpoints.user_agent.clone(),
            },
            timeouts: SourceTimeouts {
                geocode: Duration::from_secs(timeouts.geocode),
                seismic: Duration::from_secs(timeouts.seismic),
                current_weather: Duration::from_secs(timeouts.current_weather),
                forecast: Duration::from_secs(timeouts.forecast),
                archive: Duration::from_secs(timeouts.archive),
                overpass: Duration::from_secs(timeouts.overpass),
            },
            earthquake_radius_km: assessment.earthquake_radius_km,
            tsunami: TsunamiParams {
                quake_radius_km: assessment.tsunami_radius_km,
                magnitude_threshold: assessment.tsunami_magnitude_threshold,
                coastline_radius_km: assessment.coastline_radius_km,
            },
            hospital_radius_km: assessment.hospital_radius_km,
            hospital_max_results: assessment.hospital_max_results,
            shelter_radius_km: assessment.shelter_radius_km,
            shelter_max_results: assessment.shelter_max_results,
            max_concurrent_requests: assessment.max_concurrent_requests,
        }
    }

    /// API key for summaries, if summaries are enabled.
    ///
    /// `env_key` (typically `GEMINI_API_KEY`) takes precedence over the file.
    pub fn summary_api_key(&self, env_key: Option<String>) -> Option<String> {
        if !self.summary.enabled {
            return None;
        }
        env_key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .or_else(|| self.summary.api_key.clone())
    }

    pub fn summary_timeout(&self) -> Duration {
        Duration::from_secs(self.summary.timeout)
    }
}

/// Get the path to the config directory (~/.hazardwatch).
pub fn config_directory() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".hazardwatch")
}

/// Get the path to the config file (~/.hazardwatch/config.ini).
pub fn config_file_path() -> PathBuf {
    config_directory().join("config.ini")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_matches_library_defaults() {
        let config = ConfigFile::default();
        assert_eq!(config.to_assessment_config(), AssessmentConfig::default());
        assert!(config.summary.enabled);
        assert!(config.summary.api_key.is_none());
        assert!(config.logging.file.ends_with("hazardwatch.log"));
    }

    #[test]
    fn test_load_nonexistent_returns_defaults() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nonexistent.ini");

        let config = ConfigFile::load_from(&config_path).unwrap();
        assert_eq!(config, ConfigFile::default());
    }

    #[test]
    fn test_to_assessment_config_carries_overrides() {
        let mut config = ConfigFile::default();
        config.timeouts.seismic = 2;
        config.assessment.tsunami_radius_km = 450.0;
        config.assessment.max_concurrent_requests = 3;
        config.endpoints.overpass_url = "http://localhost:9000/api/interpreter".to_string();

        let runtime = config.to_assessment_config();
        assert_eq!(runtime.timeouts.seismic, Duration::from_secs(2));
        assert_eq!(runtime.tsunami.quake_radius_km, 450.0);
        assert_eq!(runtime.max_concurrent_requests, 3);
        assert_eq!(runtime.endpoints.overpass_url, "http://localhost:9000/api/interpreter");
    }

    #[test]
    fn test_summary_api_key_precedence() {
        let mut config = ConfigFile::default();
        assert_eq!(config.summary_api_key(None), None);

        config.summary.api_key = Some("file-key".to_string());
        assert_eq!(config.summary_api_key(None).as_deref(), Some("file-key"));
        assert_eq!(
            config.summary_api_key(Some("env-key".to_string())).as_deref(),
            Some("env-key")
        );
        assert_eq!(
            config.summary_api_key(Some("  ".to_string())).as_deref(),
            Some("file-key")
        );

        config.summary.enabled = false;
        assert_eq!(config.summary_api_key(Some("env-key".to_string())), None);
    }

    #[test]
    fn test_config_paths() {
        assert!(config_directory().ends_with(".hazardwatch"));
        assert!(config_file_path().ends_with(".hazardwatch/config.ini"));
    }
}
