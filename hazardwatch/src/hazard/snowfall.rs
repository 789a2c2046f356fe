//! Snowfall hazard source.

use std::sync::Arc;

use tracing::warn;

use super::classify::{classify_snowfall_forecast, classify_snowfall_temperature};
use super::types::{
    HazardError, HazardEvidence, HazardKind, HazardResult, SnowfallBasis, SnowfallEvidence,
};
use super::HazardSource;
use crate::coord::Coordinate;
use crate::feed::{series_max, AsyncHttpClient, SnowfallForecast, WeatherFeed};

/// Snowfall check over the five-day daily forecast.
pub struct SnowfallSource<C> {
    weather: Arc<WeatherFeed<C>>,
}

impl<C: AsyncHttpClient> SnowfallSource<C> {
    pub fn new(weather: Arc<WeatherFeed<C>>) -> Self {
        Self { weather }
    }
}

/// Classifies a snowfall forecast, falling back to the live temperature
/// when the forecast has no snowfall values.
pub fn evaluate_snowfall(forecast: &SnowfallForecast) -> HazardResult {
    if let Some(series) = forecast.snowfall_cm.as_deref().filter(|s| !s.is_empty()) {
        let max_snowfall_cm = series_max(series);
        return HazardResult::assessed(
            classify_snowfall_forecast(max_snowfall_cm),
            HazardEvidence::Snowfall(SnowfallEvidence {
                basis: SnowfallBasis::Forecast,
                max_snowfall_cm,
                current_temperature_c: None,
            }),
        );
    }

    match forecast.current_temperature_c {
        Some(temperature) => HazardResult::assessed(
            classify_snowfall_temperature(temperature),
            HazardEvidence::Snowfall(SnowfallEvidence {
                basis: SnowfallBasis::Temperature,
                max_snowfall_cm: 0.0,
                current_temperature_c: Some(temperature),
            }),
        ),
        None => HazardResult::failed(
            HazardKind::Snowfall,
            HazardError::EvidenceUnavailable(
                "no snowfall forecast or current temperature".to_string(),
            ),
        ),
    }
}

impl<C: AsyncHttpClient> HazardSource for SnowfallSource<C> {
    fn kind(&self) -> HazardKind {
        HazardKind::Snowfall
    }

    async fn fetch(&self, coord: Coordinate) -> HazardResult {
        match self.weather.daily_snowfall(coord).await {
            Ok(forecast) => evaluate_snowfall(&forecast),
            Err(e) => {
                warn!(hazard = %HazardKind::Snowfall, error = %e, "Snowfall forecast failed");
                HazardResult::failed(HazardKind::Snowfall, e)
            }
        }
    }
}
