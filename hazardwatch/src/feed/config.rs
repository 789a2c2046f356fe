//! Endpoint and timeout configuration for the upstream feeds.

use std::time::Duration;

/// Default Nominatim search endpoint.
pub const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org/search";

/// Default USGS FDSN event query endpoint.
pub const DEFAULT_SEISMIC_URL: &str = "https://earthquake.usgs.gov/fdsnws/event/1/query";

/// Default Open-Meteo forecast endpoint.
pub const DEFAULT_FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";

/// Default Open-Meteo ERA5 archive endpoint.
pub const DEFAULT_ARCHIVE_URL: &str = "https://archive-api.open-meteo.com/v1/era5";

/// Default Overpass interpreter endpoint.
pub const DEFAULT_OVERPASS_URL: &str = "https://overpass-api.de/api/interpreter";

/// Default User-Agent sent with every request.
pub const DEFAULT_USER_AGENT: &str = concat!(
    "hazardwatch/",
    env!("CARGO_PKG_VERSION"),
    " (location hazard assessment)"
);

/// Default per-source timeouts, in seconds.
pub const DEFAULT_GEOCODE_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_SEISMIC_TIMEOUT_SECS: u64 = 8;
pub const DEFAULT_CURRENT_WEATHER_TIMEOUT_SECS: u64 = 6;
pub const DEFAULT_FORECAST_TIMEOUT_SECS: u64 = 8;
pub const DEFAULT_ARCHIVE_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_OVERPASS_TIMEOUT_SECS: u64 = 25;

/// Base URLs of the upstream services.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedEndpoints {
    pub geocoder_url: String,
    pub seismic_url: String,
    pub forecast_url: String,
    pub archive_url: String,
    pub overpass_url: String,
    pub user_agent: String,
}

impl Default for FeedEndpoints {
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

/// Time budget for each kind of upstream query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SourceTimeouts {
    pub geocode: Duration,
    pub seismic: Duration,
    pub current_weather: Duration,
    pub forecast: Duration,
    pub archive: Duration,
    pub overpass: Duration,
}

impl SourceTimeouts {
    /// Applies the same budget to every source.
    pub fn uniform(timeout: Duration) -> Self {
        Self {
            geocode: timeout,
            seismic: timeout,
            current_weather: timeout,
            forecast: timeout,
            archive: timeout,
            overpass: timeout,
        }
    }
}

impl Default for SourceTimeouts {
    fn default() -> Self {
        Self {
            geocode: Duration::from_secs(DEFAULT_GEOCODE_TIMEOUT_SECS),
            seismic: Duration::from_secs(DEFAULT_SEISMIC_TIMEOUT_SECS),
            current_weather: Duration::from_secs(DEFAULT_CURRENT_WEATHER_TIMEOUT_SECS),
            forecast: Duration::from_secs(DEFAULT_FORECAST_TIMEOUT_SECS),
            archive: Duration::from_secs(DEFAULT_ARCHIVE_TIMEOUT_SECS),
            overpass: Duration::from_secs(DEFAULT_OVERPASS_TIMEOUT_SECS),
        }
    }
}
