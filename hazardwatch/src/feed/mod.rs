//! Upstream data feeds.
//!
//! Thin typed clients over the public services an assessment draws on:
//!
//! - [`SeismicFeed`]: USGS FDSN event query (GeoJSON)
//! - [`WeatherFeed`]: Open-Meteo forecast and ERA5 archive
//! - [`OverpassFeed`]: OpenStreetMap points of interest
//!
//! All of them issue requests through [`AsyncHttpClient`], enforce their own
//! time budget, and report failures as [`FetchError`].

pub mod config;
pub mod http;
pub mod overpass;
pub mod seismic;
pub mod types;
pub mod weather;

pub use config::{FeedEndpoints, SourceTimeouts};
pub use http::{AsyncHttpClient, AsyncReqwestClient, LimitedHttpClient};
pub use overpass::{ElementKind, OverpassFeed, PoiElement};
pub use seismic::{SeismicEvent, SeismicFeed, SeismicQuery};
pub use types::{series_max, series_max_present, series_sum, FetchError, Series};
pub use weather::{CurrentWeather, DailyArchive, SnowfallForecast, WeatherFeed, WeatherTimeouts};

#[cfg(test)]
pub use http::tests::{MockAsyncHttpClient, MockReply};
