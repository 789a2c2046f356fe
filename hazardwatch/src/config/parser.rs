//! INI parsing logic for converting `Ini` → `ConfigFile`.
//!
//! This module contains the `parse_ini()` function and its helpers.
//! It is the single place where INI key names are mapped to struct fields.

use std::path::PathBuf;

use ini::{Ini, Properties};
use reqwest::Url;

use super::defaults::MAX_CONCURRENT_REQUESTS;
use super::file::ConfigFileError;
use super::settings::ConfigFile;

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found in the INI.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [endpoints] section
    if let Some(section) = ini.section(Some("endpoints")) {
        let endpoints = &mut config.endpoints;
        for (key, target) in [
            ("geocoder_url", &mut endpoints.geocoder_url),
            ("seismic_url", &mut endpoints.seismic_url),
            ("forecast_url", &mut endpoints.forecast_url),
            ("archive_url", &mut endpoints.archive_url),
            ("overpass_url", &mut endpoints.overpass_url),
        ] {
            if let Some(v) = non_empty(section, key) {
                *target = parse_url("endpoints", key, v)?;
            }
        }
        if let Some(v) = non_empty(section, "user_agent") {
            endpoints.user_agent = v.to_string();
        }
    }

    // [timeouts] section
    if let Some(section) = ini.section(Some("timeouts")) {
        let timeouts = &mut config.timeouts;
        for (key, target) in [
            ("geocode", &mut timeouts.geocode),
            ("seismic", &mut timeouts.seismic),
            ("current_weather", &mut timeouts.current_weather),
            ("forecast", &mut timeouts.forecast),
            ("archive", &mut timeouts.archive),
            ("overpass", &mut timeouts.overpass),
        ] {
            if let Some(v) = non_empty(section, key) {
                *target = parse_seconds("timeouts", key, v)?;
            }
        }
    }

    // [assessment] section
    if let Some(section) = ini.section(Some("assessment")) {
        let assessment = &mut config.assessment;
        for (key, target) in [
            ("earthquake_radius_km", &mut assessment.earthquake_radius_km),
            ("tsunami_radius_km", &mut assessment.tsunami_radius_km),
            ("coastline_radius_km", &mut assessment.coastline_radius_km),
            ("hospital_radius_km", &mut assessment.hospital_radius_km),
            ("shelter_radius_km", &mut assessment.shelter_radius_km),
        ] {
            if let Some(v) = non_empty(section, key) {
                *target = parse_positive("assessment", key, v)?;
            }
        }
        if let Some(v) = non_empty(section, "tsunami_magnitude_threshold") {
            assessment.tsunami_magnitude_threshold =
                parse_positive("assessment", "tsunami_magnitude_threshold", v)?;
        }
        for (key, target) in [
            ("hospital_max_results", &mut assessment.hospital_max_results),
            ("shelter_max_results", &mut assessment.shelter_max_results),
        ] {
            if let Some(v) = non_empty(section, key) {
                *target = parse_count("assessment", key, v)?;
            }
        }
        if let Some(v) = non_empty(section, "max_concurrent_requests") {
            let n = parse_count("assessment", "max_concurrent_requests", v)?;
            if n > MAX_CONCURRENT_REQUESTS {
                return Err(invalid(
                    "assessment",
                    "max_concurrent_requests",
                    v,
                    &format!("must be between 1 and {}", MAX_CONCURRENT_REQUESTS),
                ));
            }
            assessment.max_concurrent_requests = n;
        }
    }

    // [summary] section
    if let Some(section) = ini.section(Some("summary")) {
        if let Some(v) = non_empty(section, "enabled") {
            config.summary.enabled = parse_bool("summary", "enabled", v)?;
        }
        if let Some(v) = non_empty(section, "api_key") {
            config.summary.api_key = Some(v.to_string());
        }
        if let Some(v) = non_empty(section, "model") {
            config.summary.model = v.to_string();
        }
        if let Some(v) = non_empty(section, "timeout") {
            config.summary.timeout = parse_seconds("summary", "timeout", v)?;
        }
    }

    // [logging] section
    if let Some(section) = ini.section(Some("logging")) {
        if let Some(v) = non_empty(section, "file") {
            config.logging.file = expand_tilde(v);
        }
    }

    Ok(config)
}

/// Trimmed value of `key`, or `None` when absent or blank.
fn non_empty<'a>(section: &'a Properties, key: &str) -> Option<&'a str> {
    section
        .get(key)
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

fn invalid(section: &str, key: &str, value: &str, reason: &str) -> ConfigFileError {
    ConfigFileError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn parse_url(section: &str, key: &str, v: &str) -> Result<String, ConfigFileError> {
    match Url::parse(v) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(v.to_string()),
        _ => Err(invalid(section, key, v, "must be an http(s) URL")),
    }
}

fn parse_seconds(section: &str, key: &str, v: &str) -> Result<u64, ConfigFileError> {
    match v.parse::<u64>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(invalid(
            section,
            key,
            v,
            "must be a positive integer (seconds)",
        )),
    }
}

fn parse_count(section: &str, key: &str, v: &str) -> Result<usize, ConfigFileError> {
    match v.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(invalid(section, key, v, "must be a positive integer")),
    }
}

fn parse_positive(section: &str, key: &str, v: &str) -> Result<f64, ConfigFileError> {
    match v.parse::<f64>() {
        Ok(n) if n.is_finite() && n > 0.0 => Ok(n),
        _ => Err(invalid(section, key, v, "must be a positive number")),
    }
}

fn parse_bool(section: &str, key: &str, v: &str) -> Result<bool, ConfigFileError> {
    match v.to_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => Ok(true),
        "false" | "no" | "0" | "off" => Ok(false),
        _ => Err(invalid(section, key, v, "must be 'true' or 'false'")),
    }
}

pub(super) fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}
