//! Default values for configuration settings not owned by the library
//! modules, and the `Default` implementations of each section.

use super::file::config_directory;
use super::settings::*;
use crate::aggregator::DEFAULT_MAX_CONCURRENT_REQUESTS;
use crate::feed::config::*;
use crate::hazard::{
    DEFAULT_COASTLINE_RADIUS_KM, DEFAULT_EARTHQUAKE_RADIUS_KM, DEFAULT_TSUNAMI_RADIUS_KM,
};
use crate::hazard::classify::TSUNAMI_DEFAULT_MAGNITUDE;
use crate::proximity::{
    DEFAULT_HOSPITAL_MAX_RESULTS, DEFAULT_HOSPITAL_RADIUS_KM, DEFAULT_SHELTER_MAX_RESULTS,
    DEFAULT_SHELTER_RADIUS_KM,
};
use crate::summary::DEFAULT_GEMINI_MODEL;

/// Default summary request timeout in seconds.
pub const DEFAULT_SUMMARY_TIMEOUT_SECS: u64 = 20;

/// Default log file name, placed in the config directory.
pub const DEFAULT_LOG_FILE_NAME: &str = "hazardwatch.log";

/// Upper bound on `max_concurrent_requests`.
pub const MAX_CONCURRENT_REQUESTS: usize = 64;

impl Default for EndpointSettings {
    fn default() -> Self {
        Self {
            geocoder_url: DEFAULT_GEOCODER_URL.to_string(),
            seismic_url: DEFAULT_SEISMIC_URL.to_string(),
            forecast_url: DEFAULT_FORECAST_URL.to_string(),
            archive_url: DEFAULT_ARCHIVE_URL.to_string(),
            overpass_url: DEFAULT_OVERPASS_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl Default for TimeoutSettings {
    fn default() -> Self {
        Self {
            geocode: DEFAULT_GEOCODE_TIMEOUT_SECS,
            seismic: DEFAULT_SEISMIC_TIMEOUT_SECS,
            current_weather: DEFAULT_CURRENT_WEATHER_TIMEOUT_SECS,
            forecast: DEFAULT_FORECAST_TIMEOUT_SECS,
            archive: DEFAULT_ARCHIVE_TIMEOUT_SECS,
            overpass: DEFAULT_OVERPASS_TIMEOUT_SECS,
        }
    }
}

impl Default for AssessmentSettings {
    fn default() -> Self {
        Self {
            earthquake_radius_km: DEFAULT_EARTHQUAKE_RADIUS_KM,
            tsunami_radius_km: DEFAULT_TSUNAMI_RADIUS_KM,
            tsunami_magnitude_threshold: TSUNAMI_DEFAULT_MAGNITUDE,
            coastline_radius_km: DEFAULT_COASTLINE_RADIUS_KM,
            hospital_radius_km: DEFAULT_HOSPITAL_RADIUS_KM,
            hospital_max_results: DEFAULT_HOSPITAL_MAX_RESULTS,
            shelter_radius_km: DEFAULT_SHELTER_RADIUS_KM,
            shelter_max_results: DEFAULT_SHELTER_MAX_RESULTS,
            max_concurrent_requests: DEFAULT_MAX_CONCURRENT_REQUESTS,
        }
    }
}

impl Default for SummarySettings {
    fn default() -> Self {
        Self {
            enabled: true,
            api_key: None,
            model: DEFAULT_GEMINI_MODEL.to_string(),
            timeout: DEFAULT_SUMMARY_TIMEOUT_SECS,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            file: config_directory().join(DEFAULT_LOG_FILE_NAME),
        }
    }
}
