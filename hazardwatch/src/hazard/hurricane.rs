//! Hurricane / high wind hazard source.

use std::sync::Arc;

use tracing::warn;

use super::classify::classify_hurricane;
use super::types::{HazardError, HazardEvidence, HazardKind, HazardResult, HurricaneEvidence};
use super::HazardSource;
use crate::coord::Coordinate;
use crate::feed::{series_max, AsyncHttpClient, WeatherFeed};

/// Wind check over the two-day hourly forecast.
pub struct HurricaneSource<C> {
    weather: Arc<WeatherFeed<C>>,
}

impl<C: AsyncHttpClient> HurricaneSource<C> {
    pub fn new(weather: Arc<WeatherFeed<C>>) -> Self {
        Self { weather }
    }
}

impl<C: AsyncHttpClient> HazardSource for HurricaneSource<C> {
    fn kind(&self) -> HazardKind {
        HazardKind::Hurricane
    }

    async fn fetch(&self, coord: Coordinate) -> HazardResult {
        let series = match self.weather.hourly_wind(coord).await {
            Ok(Some(series)) => series,
            Ok(None) => {
                return HazardResult::failed(
                    HazardKind::Hurricane,
                    HazardError::EvidenceUnavailable("no hourly wind speed series".to_string()),
                )
            }
            Err(e) => {
                warn!(hazard = %HazardKind::Hurricane, error = %e, "Wind forecast failed");
                return HazardResult::failed(HazardKind::Hurricane, e);
            }
        };

        let max_wind_kph = series_max(&series);
        HazardResult::assessed(
            classify_hurricane(max_wind_kph),
            HazardEvidence::Hurricane(HurricaneEvidence { max_wind_kph }),
        )
    }
}
