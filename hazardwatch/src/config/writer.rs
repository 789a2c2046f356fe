//! INI serialization logic for converting `ConfigFile` → INI string.
//!
//! This module contains the `to_config_string()` function that produces
//! the commented INI representation written to `config.ini`.

use std::path::Path;

use super::settings::ConfigFile;

/// Convert a `ConfigFile` to a commented INI string for saving.
pub(super) fn to_config_string(config: &ConfigFile) -> String {
    let endpoints = &config.endpoints;
    let timeouts = &config.timeouts;
    let assessment = &config.assessment;
    let api_key = config.summary.api_key.as_deref().unwrap_or("");

    format!(
        r#"[endpoints]
; Nominatim-compatible geocoding search endpoint
geocoder_url = {}
; USGS FDSN event query endpoint (GeoJSON)
seismic_url = {}
; Open-Meteo forecast endpoint
forecast_url = {}
; Open-Meteo ERA5 archive endpoint
archive_url = {}
; Overpass API interpreter endpoint
overpass_url = {}
; User-Agent sent with every request (Nominatim requires an identifying agent)
user_agent = {}

[timeouts]
; Per-source time budgets in seconds. A source that exceeds its budget is
; reported as failed; the rest of the assessment continues.
geocode = {}
seismic = {}
current_weather = {}
forecast = {}
archive = {}
overpass = {}

[assessment]
; Radius searched for the earthquake hazard (km)
earthquake_radius_km = {}
; Radius searched for tsunami-capable earthquakes (km)
tsunami_radius_km = {}
; Minimum magnitude considered tsunami-capable
tsunami_magnitude_threshold = {}
; Coastlines within this distance count as nearby (km)
coastline_radius_km = {}
; Hospital search radius (km) and number of results kept
hospital_radius_km = {}
hospital_max_results = {}
; Shelter search radius (km) and number of results kept
shelter_radius_km = {}
shelter_max_results = {}
; Maximum outbound requests in flight (1-64)
max_concurrent_requests = {}

[summary]
; Request a short summary of the action plan from Gemini.
; Requires an API key here or in the GEMINI_API_KEY environment variable.
enabled = {}
api_key = {}
model = {}
; Timeout in seconds
timeout = {}

[logging]
; Log file, cleared at the start of each session
file = {}
"#,
        endpoints.geocoder_url,
        endpoints.seismic_url,
        endpoints.forecast_url,
        endpoints.archive_url,
        endpoints.overpass_url,
        endpoints.user_agent,
        timeouts.geocode,
        timeouts.seismic,
        timeouts.current_weather,
        timeouts.forecast,
        timeouts.archive,
        timeouts.overpass,
        assessment.earthquake_radius_km,
        assessment.tsunami_radius_km,
        assessment.tsunami_magnitude_threshold,
        assessment.coastline_radius_km,
        assessment.hospital_radius_km,
        assessment.hospital_max_results,
        assessment.shelter_radius_km,
        assessment.shelter_max_results,
        assessment.max_concurrent_requests,
        config.summary.enabled,
        api_key,
        config.summary.model,
        config.summary.timeout,
        path_to_string(&config.logging.file),
    )
}

fn path_to_string(path: &Path) -> String {
    if let Some(home) = dirs::home_dir() {
        if let Ok(stripped) = path.strip_prefix(&home) {
            return format!("~/{}", stripped.display());
        }
    }
    path.display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_output_has_every_section() {
        let text = to_config_string(&ConfigFile::default());
        for section in ["[endpoints]", "[timeouts]", "[assessment]", "[summary]", "[logging]"] {
            assert!(text.contains(section), "missing {section}");
        }
        assert!(text.contains("max_concurrent_requests = 8"));
        assert!(text.contains("earthquake_radius_km = 100"));
    }

    #[test]
    fn test_save_and_reload() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nested").join("config.ini");

        let mut config = ConfigFile::default();
        config.assessment.tsunami_magnitude_threshold = 6.8;
        config.assessment.hospital_max_results = 4;
        config.timeouts.overpass = 40;
        config.summary.enabled = false;
        config.summary.api_key = Some("key-1".to_string());
        config.logging.file = temp_dir.path().join("hw.log");

        config.save_to(&config_path).unwrap();
        let loaded = ConfigFile::load_from(&config_path).unwrap();

        assert_eq!(loaded, config);
    }
}
