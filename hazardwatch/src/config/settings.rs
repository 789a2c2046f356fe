//! Settings structs for all configuration sections.
//!
//! Each struct represents one `[section]` of the INI config file.
//! These are pure data types with no parsing or serialization logic.

use std::path::PathBuf;

/// Complete application configuration loaded from config.ini.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigFile {
    /// Upstream service endpoints
    pub endpoints: EndpointSettings,
    /// Per-source time budgets
    pub timeouts: TimeoutSettings,
    /// Search radii, result caps and concurrency
    pub assessment: AssessmentSettings,
    /// Optional plan summarization
    pub summary: SummarySettings,
    /// Logging settings
    pub logging: LoggingSettings,
}

/// Base URLs of the upstream feeds.
#[derive(Debug, Clone, PartialEq)]
pub struct EndpointSettings {
    pub geocoder_url: String,
    pub seismic_url: String,
    pub forecast_url: String,
    pub archive_url: String,
    pub overpass_url: String,
    pub user_agent: String,
}

/// Timeouts in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeoutSettings {
    pub geocode: u64,
    pub seismic: u64,
    pub current_weather: u64,
    pub forecast: u64,
    pub archive: u64,
    pub overpass: u64,
}

/// Assessment tuning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AssessmentSettings {
    pub earthquake_radius_km: f64,
    pub tsunami_radius_km: f64,
    pub tsunami_magnitude_threshold: f64,
    pub coastline_radius_km: f64,
    pub hospital_radius_km: f64,
    pub hospital_max_results: usize,
    pub shelter_radius_km: f64,
    pub shelter_max_results: usize,
    pub max_concurrent_requests: usize,
}

/// Summary generation settings.
#[derive(Debug, Clone, PartialEq)]
pub struct SummarySettings {
    /// Summaries are requested only when enabled and a key is present
    pub enabled: bool,
    pub api_key: Option<String>,
    pub model: String,
    /// Timeout in seconds
    pub timeout: u64,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingSettings {
    /// Log file path
    pub file: PathBuf,
}
