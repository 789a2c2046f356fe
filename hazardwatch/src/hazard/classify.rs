//! Severity classifiers.
//!
//! One pure function per hazard, mapping raw evidence to a
//! [`Classification`]. Thresholds are inclusive at their lower bound.

use super::types::{Classification, SeverityLevel};

/// Magnitude at which an earthquake counts as possible and moderate.
pub const QUAKE_MODERATE_MAGNITUDE: f64 = 4.5;
/// Magnitude at which an earthquake counts as high severity.
pub const QUAKE_HIGH_MAGNITUDE: f64 = 6.5;

pub const SNOW_HIGH_CM: f64 = 10.0;
pub const SNOW_MODERATE_CM: f64 = 2.0;
/// Temperature at or below which snow is possible when no forecast exists.
pub const SNOW_FREEZING_C: f64 = 0.0;
pub const SNOW_COLD_MODERATE_C: f64 = -5.0;

pub const WIND_HIGH_KPH: f64 = 100.0;
pub const WIND_MODERATE_KPH: f64 = 75.0;
pub const WIND_POSSIBLE_KPH: f64 = 50.0;

/// Default magnitude above which a nearby quake may cause a tsunami.
pub const TSUNAMI_DEFAULT_MAGNITUDE: f64 = 6.5;
pub const TSUNAMI_HIGH_MAGNITUDE: f64 = 7.0;
/// A location within this distance of a coastline counts as coastal.
pub const TSUNAMI_COASTAL_KM: f64 = 100.0;

pub const FIRE_HIGH_MAX_PRECIP_MM: f64 = 5.0;
pub const FIRE_HIGH_MIN_TEMP_C: f64 = 30.0;
pub const FIRE_HIGH_MIN_WIND_KPH: f64 = 30.0;
pub const FIRE_MODERATE_MAX_PRECIP_MM: f64 = 10.0;
pub const FIRE_MODERATE_MIN_WIND_KPH: f64 = 20.0;

pub const FLOOD_HIGH_24H_MM: f64 = 50.0;
pub const FLOOD_MODERATE_24H_MM: f64 = 20.0;
pub const FLOOD_MODERATE_7D_MM: f64 = 100.0;

/// Severity for the strongest nearby earthquake.
pub fn earthquake_severity(max_magnitude: f64) -> SeverityLevel {
    if max_magnitude >= QUAKE_HIGH_MAGNITUDE {
        SeverityLevel::High
    } else if max_magnitude >= QUAKE_MODERATE_MAGNITUDE {
        SeverityLevel::Moderate
    } else {
        SeverityLevel::Low
    }
}

pub fn classify_earthquake(max_magnitude: f64) -> Classification {
    Classification::new(
        earthquake_severity(max_magnitude),
        max_magnitude >= QUAKE_MODERATE_MAGNITUDE,
    )
}

/// Classifies the largest daily snowfall in the forecast.
pub fn classify_snowfall_forecast(max_snowfall_cm: f64) -> Classification {
    let severity = if max_snowfall_cm >= SNOW_HIGH_CM {
        SeverityLevel::High
    } else if max_snowfall_cm >= SNOW_MODERATE_CM {
        SeverityLevel::Moderate
    } else {
        SeverityLevel::Low
    };
    Classification::new(severity, max_snowfall_cm > 0.0)
}

/// Fallback when no snowfall forecast exists: classify by current temperature.
pub fn classify_snowfall_temperature(temperature_c: f64) -> Classification {
    let severity = if temperature_c <= SNOW_COLD_MODERATE_C {
        SeverityLevel::Moderate
    } else {
        SeverityLevel::Low
    };
    Classification::new(severity, temperature_c <= SNOW_FREEZING_C)
}

pub fn classify_hurricane(max_wind_kph: f64) -> Classification {
    let severity = if max_wind_kph >= WIND_HIGH_KPH {
        SeverityLevel::High
    } else if max_wind_kph >= WIND_MODERATE_KPH {
        SeverityLevel::Moderate
    } else {
        SeverityLevel::Low
    };
    Classification::new(severity, max_wind_kph >= WIND_POSSIBLE_KPH)
}

/// Classifies tsunami risk from nearby seismicity and coastline distance.
///
/// An unknown coastline distance is treated as coastal.
pub fn classify_tsunami(
    max_quake_magnitude: f64,
    min_coast_distance_km: Option<f64>,
    magnitude_threshold: f64,
) -> Classification {
    if max_quake_magnitude < magnitude_threshold {
        return Classification::new(SeverityLevel::Low, false);
    }

    let coastal = min_coast_distance_km.map_or(true, |d| d <= TSUNAMI_COASTAL_KM);
    let severity = if coastal && max_quake_magnitude >= TSUNAMI_HIGH_MAGNITUDE {
        SeverityLevel::High
    } else {
        SeverityLevel::Moderate
    };
    Classification::new(severity, true)
}

/// Classifies fire weather. `possible` mirrors a non-low severity.
pub fn classify_wildfire(
    precip_last7_mm: f64,
    max_temp_last7_c: Option<f64>,
    wind_kph_now: f64,
) -> Classification {
    let hot = max_temp_last7_c.is_some_and(|t| t >= FIRE_HIGH_MIN_TEMP_C);
    let severity = if precip_last7_mm < FIRE_HIGH_MAX_PRECIP_MM
        && hot
        && wind_kph_now >= FIRE_HIGH_MIN_WIND_KPH
    {
        SeverityLevel::High
    } else if precip_last7_mm < FIRE_MODERATE_MAX_PRECIP_MM
        && wind_kph_now >= FIRE_MODERATE_MIN_WIND_KPH
    {
        SeverityLevel::Moderate
    } else {
        SeverityLevel::Low
    };
    Classification::new(severity, severity != SeverityLevel::Low)
}

/// Classifies flood risk from short-term rain and the trailing week.
pub fn classify_flood(
    forecast_24h_mm: f64,
    recent_24h_mm: f64,
    precip_last7_mm: Option<f64>,
) -> Classification {
    let severity = if forecast_24h_mm >= FLOOD_HIGH_24H_MM || recent_24h_mm >= FLOOD_HIGH_24H_MM {
        SeverityLevel::High
    } else if forecast_24h_mm >= FLOOD_MODERATE_24H_MM
        || recent_24h_mm >= FLOOD_MODERATE_24H_MM
        || precip_last7_mm.is_some_and(|p| p >= FLOOD_MODERATE_7D_MM)
    {
        SeverityLevel::Moderate
    } else {
        SeverityLevel::Low
    };
    Classification::new(severity, severity != SeverityLevel::Low)
}
