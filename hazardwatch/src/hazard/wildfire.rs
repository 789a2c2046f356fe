//! Wildfire hazard source.

use std::future::Future;
use std::sync::Arc;

use chrono::{Days, NaiveDate, Utc};
use tracing::warn;

use super::classify::classify_wildfire;
use super::types::{HazardError, HazardEvidence, HazardKind, HazardResult, WildfireEvidence};
use super::HazardSource;
use crate::coord::Coordinate;
use crate::feed::{
    series_max_present, series_sum, AsyncHttpClient, CurrentWeather, DailyArchive, FetchError,
    WeatherFeed,
};

/// Length of the trailing archive window, in days.
pub const ARCHIVE_WINDOW_DAYS: u64 = 7;

/// Trailing archive window ending today (UTC).
pub fn archive_window() -> (NaiveDate, NaiveDate) {
    let end = Utc::now().date_naive();
    let start = end
        .checked_sub_days(Days::new(ARCHIVE_WINDOW_DAYS))
        .unwrap_or(end);
    (start, end)
}

/// Fire weather check: dry week, recent heat, and current wind.
pub struct WildfireSource<C> {
    weather: Arc<WeatherFeed<C>>,
}

impl<C: AsyncHttpClient> WildfireSource<C> {
    pub fn new(weather: Arc<WeatherFeed<C>>) -> Self {
        Self { weather }
    }

    /// Assesses the hazard from already-scheduled current-weather and
    /// archive queries, which other checks may share.
    pub async fn fetch_with<F, A>(&self, current: F, archive: A) -> HazardResult
    where
        F: Future<Output = Result<CurrentWeather, FetchError>> + Send,
        A: Future<Output = Result<DailyArchive, FetchError>> + Send,
    {
        let (current, archive) = tokio::join!(current, archive);

        let current = match current {
            Ok(current) => current,
            Err(cause) => {
                warn!(
                    hazard = %HazardKind::Wildfire,
                    error = %cause,
                    "Current weather prerequisite failed"
                );
                return HazardResult::failed(
                    HazardKind::Wildfire,
                    HazardError::DependencyUnavailable {
                        prerequisite: "current weather".to_string(),
                        cause,
                    },
                );
            }
        };

        match archive {
            Ok(archive) => evaluate_wildfire(&archive, &current),
            Err(e) => {
                warn!(hazard = %HazardKind::Wildfire, error = %e, "Archive query failed");
                HazardResult::failed(HazardKind::Wildfire, e)
            }
        }
    }
}

/// Classifies fire weather from the trailing week and current conditions.
pub fn evaluate_wildfire(archive: &DailyArchive, current: &CurrentWeather) -> HazardResult {
    let Some(precip) = archive.precipitation_mm.as_deref() else {
        return HazardResult::failed(
            HazardKind::Wildfire,
            HazardError::EvidenceUnavailable("no daily precipitation series".to_string()),
        );
    };
    let Some(wind_kph_now) = current.wind_kph else {
        return HazardResult::failed(
            HazardKind::Wildfire,
            HazardError::EvidenceUnavailable("no current wind speed".to_string()),
        );
    };

    let precip_last7_mm = series_sum(precip);
    let max_temp_last7_c = archive
        .temperature_max_c
        .as_deref()
        .and_then(series_max_present);

    HazardResult::assessed(
        classify_wildfire(precip_last7_mm, max_temp_last7_c, wind_kph_now),
        HazardEvidence::Wildfire(WildfireEvidence {
            precip_last7_mm,
            max_temp_last7_c,
            wind_kph_now,
            temp_now_c: current.temperature_c,
        }),
    )
}

impl<C: AsyncHttpClient> HazardSource for WildfireSource<C> {
    fn kind(&self) -> HazardKind {
        HazardKind::Wildfire
    }

    async fn fetch(&self, coord: Coordinate) -> HazardResult {
        let (start, end) = archive_window();
        self.fetch_with(
            self.weather.current(coord),
            self.weather.daily_archive(coord, start, end),
        )
        .await
    }
}
