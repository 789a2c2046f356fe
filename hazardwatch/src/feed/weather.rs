//! Open-Meteo forecast and ERA5 archive client.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::http::{build_url, get_json, AsyncHttpClient};
use super::types::{FetchError, Series};
use crate::coord::Coordinate;

/// Live conditions at a location.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CurrentWeather {
    pub temperature_c: Option<f64>,
    pub wind_kph: Option<f64>,
}

/// Five-day snowfall forecast plus the live temperature used as fallback.
#[derive(Debug, Clone, PartialEq)]
pub struct SnowfallForecast {
    /// `None` when the feed returned no snowfall series.
    pub snowfall_cm: Option<Series>,
    pub current_temperature_c: Option<f64>,
}

/// Daily reanalysis values over a date range.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DailyArchive {
    pub precipitation_mm: Option<Series>,
    pub temperature_max_c: Option<Series>,
}

#[derive(Deserialize)]
struct CurrentWeatherBlock {
    temperature: Option<f64>,
    windspeed: Option<f64>,
}

/// A `daily` or `hourly` block: named arrays keyed by variable.
#[derive(Deserialize, Default)]
struct SeriesBlock(HashMap<String, serde_json::Value>);

impl SeriesBlock {
    fn series(&self, name: &str) -> Result<Option<Series>, FetchError> {
        match self.0.get(name) {
            None | Some(serde_json::Value::Null) => Ok(None),
            Some(value) => serde_json::from_value(value.clone())
                .map(Some)
                .map_err(|e| FetchError::parse(format!("series '{}': {}", name, e))),
        }
    }
}

#[derive(Deserialize)]
struct WeatherResponse {
    current_weather: Option<CurrentWeatherBlock>,
    #[serde(default)]
    hourly: Option<SeriesBlock>,
    #[serde(default)]
    daily: Option<SeriesBlock>,
}

impl WeatherResponse {
    fn hourly(&self, name: &str) -> Result<Option<Series>, FetchError> {
        match &self.hourly {
            Some(block) => block.series(name),
            None => Ok(None),
        }
    }

    fn daily(&self, name: &str) -> Result<Option<Series>, FetchError> {
        match &self.daily {
            Some(block) => block.series(name),
            None => Ok(None),
        }
    }
}

/// Per-query budgets for the weather feed.
#[derive(Debug, Clone, Copy)]
pub struct WeatherTimeouts {
    pub current: Duration,
    pub forecast: Duration,
    pub archive: Duration,
}

/// Client for the forecast and archive weather endpoints.
pub struct WeatherFeed<C> {
    http: Arc<C>,
    forecast_url: String,
    archive_url: String,
    timeouts: WeatherTimeouts,
}

impl<C: AsyncHttpClient> WeatherFeed<C> {
    pub fn new(
        http: Arc<C>,
        forecast_url: impl Into<String>,
        archive_url: impl Into<String>,
        timeouts: WeatherTimeouts,
    ) -> Self {
        Self {
            http,
            forecast_url: forecast_url.into(),
            archive_url: archive_url.into(),
            timeouts,
        }
    }

    async fn forecast(
        &self,
        coord: Coordinate,
        extra: &[(&'static str, String)],
        timeout: Duration,
    ) -> Result<WeatherResponse, FetchError> {
        let mut params = vec![
            ("latitude", coord.latitude().to_string()),
            ("longitude", coord.longitude().to_string()),
        ];
        params.extend_from_slice(extra);
        let url = build_url(&self.forecast_url, &params)?;
        get_json(&*self.http, &url, timeout).await
    }

    /// Current temperature and wind speed.
    pub async fn current(&self, coord: Coordinate) -> Result<CurrentWeather, FetchError> {
        let response = self
            .forecast(
                coord,
                &[
                    ("current_weather", "true".to_string()),
                    ("timezone", "auto".to_string()),
                ],
                self.timeouts.current,
            )
            .await?;

        let block = response
            .current_weather
            .ok_or_else(|| FetchError::parse("response has no current_weather block"))?;

        debug!(
            coord = %coord,
            temperature_c = ?block.temperature,
            wind_kph = ?block.windspeed,
            "Current weather fetched"
        );
        Ok(CurrentWeather {
            temperature_c: block.temperature,
            wind_kph: block.windspeed,
        })
    }

    /// Daily snowfall sums for the next five days.
    pub async fn daily_snowfall(&self, coord: Coordinate) -> Result<SnowfallForecast, FetchError> {
        let response = self
            .forecast(
                coord,
                &[
                    (
                        "daily",
                        "snowfall_sum,temperature_2m_max,temperature_2m_min".to_string(),
                    ),
                    ("current_weather", "true".to_string()),
                    ("timezone", "auto".to_string()),
                    ("forecast_days", "5".to_string()),
                ],
                self.timeouts.forecast,
            )
            .await?;

        Ok(SnowfallForecast {
            snowfall_cm: response.daily("snowfall_sum")?,
            current_temperature_c: response.current_weather.and_then(|c| c.temperature),
        })
    }

    /// Hourly 10 m wind speed over the next two days.
    pub async fn hourly_wind(&self, coord: Coordinate) -> Result<Option<Series>, FetchError> {
        let response = self
            .forecast(
                coord,
                &[
                    ("hourly", "windspeed_10m,winddirection_10m".to_string()),
                    ("forecast_days", "2".to_string()),
                    ("timezone", "auto".to_string()),
                ],
                self.timeouts.forecast,
            )
            .await?;
        response.hourly("windspeed_10m")
    }

    /// Hourly precipitation over a two-day UTC window.
    pub async fn hourly_precipitation(
        &self,
        coord: Coordinate,
    ) -> Result<Option<Series>, FetchError> {
        let response = self
            .forecast(
                coord,
                &[
                    ("hourly", "precipitation".to_string()),
                    ("forecast_days", "2".to_string()),
                    ("timezone", "UTC".to_string()),
                ],
                self.timeouts.forecast,
            )
            .await?;
        response.hourly("precipitation")
    }

    /// Daily precipitation sums and maximum temperatures between two dates.
    pub async fn daily_archive(
        &self,
        coord: Coordinate,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<DailyArchive, FetchError> {
        let params = [
            ("latitude", coord.latitude().to_string()),
            ("longitude", coord.longitude().to_string()),
            ("start_date", start.to_string()),
            ("end_date", end.to_string()),
            ("daily", "precipitation_sum,temperature_2m_max".to_string()),
            ("timezone", "UTC".to_string()),
        ];
        let url = build_url(&self.archive_url, &params)?;
        let response: WeatherResponse = get_json(&*self.http, &url, self.timeouts.archive).await?;

        Ok(DailyArchive {
            precipitation_mm: response.daily("precipitation_sum")?,
            temperature_max_c: response.daily("temperature_2m_max")?,
        })
    }
}
