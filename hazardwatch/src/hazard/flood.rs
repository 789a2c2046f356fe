//! Flood hazard source.

use std::future::Future;
use std::sync::Arc;

use tracing::{debug, warn};

use super::classify::classify_flood;
use super::types::{FloodEvidence, HazardError, HazardEvidence, HazardKind, HazardResult};
use super::wildfire::archive_window;
use super::HazardSource;
use crate::coord::Coordinate;
use crate::feed::{series_sum, AsyncHttpClient, DailyArchive, FetchError, WeatherFeed};

/// Hours summed for the short-term windows.
const WINDOW_HOURS: usize = 24;

/// Flood check over short-term forecast rain and the trailing week.
pub struct FloodSource<C> {
    weather: Arc<WeatherFeed<C>>,
}

impl<C: AsyncHttpClient> FloodSource<C> {
    pub fn new(weather: Arc<WeatherFeed<C>>) -> Self {
        Self { weather }
    }

    /// Assesses the hazard against an already-scheduled archive query,
    /// which the wildfire check may share.
    pub async fn fetch_with<A>(&self, coord: Coordinate, archive: A) -> HazardResult
    where
        A: Future<Output = Result<DailyArchive, FetchError>> + Send,
    {
        let (forecast, archive) = tokio::join!(self.weather.hourly_precipitation(coord), archive);

        let hourly = match forecast {
            Ok(Some(hourly)) => hourly,
            Ok(None) => {
                return HazardResult::failed(
                    HazardKind::Flood,
                    HazardError::EvidenceUnavailable(
                        "no hourly precipitation series".to_string(),
                    ),
                )
            }
            Err(e) => {
                warn!(hazard = %HazardKind::Flood, error = %e, "Precipitation forecast failed");
                return HazardResult::failed(HazardKind::Flood, e);
            }
        };

        let precip_last7_mm = match archive {
            Ok(archive) => archive.precipitation_mm.as_deref().map(series_sum),
            Err(e) => {
                debug!(error = %e, "Archive query failed, weekly total unknown");
                None
            }
        };

        let (forecast_24h_mm, recent_24h_mm) = rain_windows(&hourly);
        HazardResult::assessed(
            classify_flood(forecast_24h_mm, recent_24h_mm, precip_last7_mm),
            HazardEvidence::Flood(FloodEvidence {
                forecast_24h_mm,
                recent_24h_mm,
                precip_last7_mm,
            }),
        )
    }
}

/// Splits a two-day hourly series into the leading and trailing 24 hours.
///
/// The trailing window stands in for "recent" rain; the feed carries no
/// observed history at hourly resolution.
pub fn rain_windows(hourly: &[Option<f64>]) -> (f64, f64) {
    let head = &hourly[..hourly.len().min(WINDOW_HOURS)];
    let tail = &hourly[hourly.len().saturating_sub(WINDOW_HOURS)..];
    (series_sum(head), series_sum(tail))
}

impl<C: AsyncHttpClient> HazardSource for FloodSource<C> {
    fn kind(&self) -> HazardKind {
        HazardKind::Flood
    }

    async fn fetch(&self, coord: Coordinate) -> HazardResult {
        let (start, end) = archive_window();
        self.fetch_with(coord, self.weather.daily_archive(coord, start, end)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::{MockAsyncHttpClient, MockReply, WeatherTimeouts};
    use crate::hazard::types::SeverityLevel;
    use std::time::Duration;

    fn source(mock: &MockAsyncHttpClient) -> FloodSource<MockAsyncHttpClient> {
        let timeout = Duration::from_millis(50);
        FloodSource::new(Arc::new(WeatherFeed::new(
            Arc::new(mock.clone()),
            "https://api.open-meteo.com/v1/forecast",
            "https://archive-api.open-meteo.com/v1/era5",
            WeatherTimeouts {
                current: timeout,
                forecast: timeout,
                archive: timeout,
            },
        )))
    }

    fn coord() -> Coordinate {
        Coordinate::new(13.08, 80.27).unwrap()
    }

    fn hourly(first_day: f64, second_day: f64) -> String {
        let mut values = vec![first_day / 24.0; 24];
        values.extend(vec![second_day / 24.0; 24]);
        serde_json::json!({"hourly": {"precipitation": values}}).to_string()
    }

    #[test]
    fn test_rain_windows() {
        let mut series = vec![Some(1.0); 24];
        series.extend(vec![Some(2.0); 24]);
        assert_eq!(rain_windows(&series), (24.0, 48.0));

        let short = vec![Some(1.0), None, Some(3.0)];
        assert_eq!(rain_windows(&short), (4.0, 4.0));

        assert_eq!(rain_windows(&[]), (0.0, 0.0));
    }

    #[tokio::test]
    async fn test_heavy_forecast_is_high() {
        let mock = MockAsyncHttpClient::new()
            .route("hourly=precipitation", MockReply::json(&hourly(60.0, 0.0)))
            .route(
                "era5",
                MockReply::json(r#"{"daily": {"precipitation_sum": [0.0, 0.0]}}"#),
            );

        let result = source(&mock).fetch(coord()).await;
        assert_eq!(result.severity(), Some(SeverityLevel::High));
        assert_eq!(result.is_possible(), Some(true));
    }

    #[tokio::test]
    async fn test_archive_failure_leaves_week_unknown() {
        let mock = MockAsyncHttpClient::new()
            .route("hourly=precipitation", MockReply::json(&hourly(2.4, 2.4)))
            .route("era5", MockReply::Error(FetchError::unavailable("HTTP 503")));

        let result = source(&mock).fetch(coord()).await;
        assert_eq!(result.severity(), Some(SeverityLevel::Low));
        let Some(HazardEvidence::Flood(evidence)) = result.evidence() else {
            panic!("expected flood evidence");
        };
        assert_eq!(evidence.precip_last7_mm, None);
    }

    #[tokio::test]
    async fn test_wet_week_is_moderate() {
        let mock = MockAsyncHttpClient::new()
            .route("hourly=precipitation", MockReply::json(&hourly(0.0, 0.0)))
            .route(
                "era5",
                MockReply::json(r#"{"daily": {"precipitation_sum": [40.0, 35.0, 30.0]}}"#),
            );

        let result = source(&mock).fetch(coord()).await;
        assert_eq!(result.severity(), Some(SeverityLevel::Moderate));
    }

    #[tokio::test]
    async fn test_forecast_failure_fails_hazard() {
        let mock = MockAsyncHttpClient::new()
            .route("hourly=precipitation", MockReply::Hang)
            .route("era5", MockReply::json(r#"{"daily": {"precipitation_sum": []}}"#));

        let result = source(&mock).fetch(coord()).await;
        assert!(matches!(
            result.error(),
            Some(HazardError::Fetch(FetchError::Timeout { .. }))
        ));
    }

    #[tokio::test]
    async fn test_fetch_with_uses_supplied_archive() {
        let mock = MockAsyncHttpClient::new()
            .route("hourly=precipitation", MockReply::json(&hourly(0.0, 0.0)));
        let archive = DailyArchive {
            precipitation_mm: Some(vec![Some(40.0), Some(35.0), None, Some(30.0)]),
            temperature_max_c: None,
        };

        let result = source(&mock)
            .fetch_with(coord(), std::future::ready(Ok(archive)))
            .await;
        assert_eq!(result.severity(), Some(SeverityLevel::Moderate));
        assert!(mock.requests().iter().all(|u| !u.contains("era5")));
    }
}
