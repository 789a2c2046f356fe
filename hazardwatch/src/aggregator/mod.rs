//! Assessment orchestration.
//!
//! The [`Assessor`] resolves a location, then fans out every hazard check and
//! both proximity lookups concurrently and folds the settled results into a
//! [`UnifiedReport`].
//!
//! # Task graph
//!
//! ```text
//! location ─► coord ─┬─ earthquake ──────────────────────────┐
//!                    ├─ snowfall ────────────────────────────┤
//!                    ├─ hurricane ───────────────────────────┤
//!                    ├─ seismic (300 km) ─► tsunami ◄─ coast ─┤
//!                    ├─ current weather ─┬─► conditions ─────┤
//!                    │                   └─► wildfire ───────┼─► UnifiedReport
//!                    ├─ archive (7 days) ─┬─┘                 │
//!                    │                    └─► flood ◄─ rain ──┤
//!                    ├─ hospitals ───────────────────────────┤
//!                    └─ shelters ────────────────────────────┘
//! ```
//!
//! The current-weather and archive nodes are shared futures: wildfire and the
//! report's current conditions consume a single current-weather request, and
//! wildfire and flood consume a single archive request. All requests pass through one
//! [`LimitedHttpClient`], bounding how many are in flight at once.

mod config;
mod report;

pub use config::{AssessmentConfig, DEFAULT_MAX_CONCURRENT_REQUESTS};
pub use report::{final_severity, CurrentConditions, UnifiedReport};

use std::sync::Arc;
use std::time::Instant;

use futures::FutureExt;
use thiserror::Error;
use tracing::{debug, info};

use crate::coord::Coordinate;
use crate::feed::{
    AsyncHttpClient, AsyncReqwestClient, FetchError, LimitedHttpClient, OverpassFeed,
    SeismicEvent, SeismicFeed, WeatherFeed, WeatherTimeouts,
};
use crate::geocode::{resolve_location, GeocodeError, NominatimGeocoder, ResolvedLocation};
use crate::hazard::{
    archive_window, recent_earthquakes, EarthquakeSource, FloodSource, HazardSource,
    HurricaneSource, RecentQuakeFilter, SnowfallSource, TsunamiSource, WildfireSource,
};
use crate::proximity::{ProximityClient, ResourceCategory};

/// The only error an assessment can return. Once a location resolves, a
/// report is always produced.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AssessmentError {
    #[error(transparent)]
    Geocode(#[from] GeocodeError),
}

type Http<C> = LimitedHttpClient<C>;

/// Runs hazard assessments against a set of upstream feeds.
pub struct Assessor<C> {
    config: AssessmentConfig,
    geocoder: NominatimGeocoder<Http<C>>,
    seismic: Arc<SeismicFeed<Http<C>>>,
    weather: Arc<WeatherFeed<Http<C>>>,
    earthquake: EarthquakeSource<Http<C>>,
    snowfall: SnowfallSource<Http<C>>,
    hurricane: HurricaneSource<Http<C>>,
    tsunami: TsunamiSource<Http<C>>,
    wildfire: WildfireSource<Http<C>>,
    flood: FloodSource<Http<C>>,
    proximity: ProximityClient<Http<C>>,
}

impl Assessor<AsyncReqwestClient> {
    /// Creates an assessor backed by a real HTTP client.
    pub fn with_reqwest(config: AssessmentConfig) -> Result<Self, FetchError> {
        let http = AsyncReqwestClient::new(&config.endpoints.user_agent)?;
        Ok(Self::new(http, config))
    }
}

impl<C: AsyncHttpClient> Assessor<C> {
    /// Wires every feed and source to `http`, behind a shared request limit.
    pub fn new(http: C, config: AssessmentConfig) -> Self {
        let http = Arc::new(LimitedHttpClient::new(http, config.max_concurrent_requests));
        let endpoints = &config.endpoints;
        let timeouts = config.timeouts;

        let seismic = Arc::new(SeismicFeed::new(
            Arc::clone(&http),
            endpoints.seismic_url.clone(),
            timeouts.seismic,
        ));
        let weather = Arc::new(WeatherFeed::new(
            Arc::clone(&http),
            endpoints.forecast_url.clone(),
            endpoints.archive_url.clone(),
            WeatherTimeouts {
                current: timeouts.current_weather,
                forecast: timeouts.forecast,
                archive: timeouts.archive,
            },
        ));
        let overpass = Arc::new(OverpassFeed::new(
            Arc::clone(&http),
            endpoints.overpass_url.clone(),
            timeouts.overpass,
        ));
        let geocoder = NominatimGeocoder::new(
            Arc::clone(&http),
            endpoints.geocoder_url.clone(),
            timeouts.geocode,
        );

        Self {
            geocoder,
            earthquake: EarthquakeSource::new(Arc::clone(&seismic), config.earthquake_radius_km),
            snowfall: SnowfallSource::new(Arc::clone(&weather)),
            hurricane: HurricaneSource::new(Arc::clone(&weather)),
            tsunami: TsunamiSource::new(
                Arc::clone(&seismic),
                Arc::clone(&overpass),
                config.tsunami,
            ),
            wildfire: WildfireSource::new(Arc::clone(&weather)),
            flood: FloodSource::new(Arc::clone(&weather)),
            proximity: ProximityClient::new(overpass),
            seismic,
            weather,
            config,
        }
    }

    pub fn config(&self) -> &AssessmentConfig {
        &self.config
    }

    /// Resolves free text or a literal `lat,lon` pair.
    pub async fn resolve(&self, input: &str) -> Result<ResolvedLocation, GeocodeError> {
        resolve_location(&self.geocoder, input).await
    }

    /// Resolves `input` and assesses the resulting coordinate.
    pub async fn assess(&self, input: &str) -> Result<UnifiedReport, AssessmentError> {
        let location = self.resolve(input).await?;
        Ok(self.assess_location(location).await)
    }

    /// Assesses a coordinate that needs no geocoding.
    pub async fn assess_coordinate(&self, coordinate: Coordinate) -> UnifiedReport {
        self.assess_location(ResolvedLocation {
            query: coordinate.to_string(),
            coordinate,
            display_name: None,
        })
        .await
    }

    /// Runs every check for an already-resolved location.
    pub async fn assess_location(&self, location: ResolvedLocation) -> UnifiedReport {
        let coord = location.coordinate;
        let started = Instant::now();
        info!(location = %location.query, coord = %coord, "Assessment started");

        let current = self.weather.current(coord).shared();
        let (start, end) = archive_window();
        let archive = self.weather.daily_archive(coord, start, end).shared();
        let tsunami_seismic = self.tsunami.seismic_evidence(coord);

        let (
            earthquake,
            snowfall,
            hurricane,
            tsunami,
            wildfire,
            flood,
            hospitals,
            shelters,
            current,
        ) = tokio::join!(
            self.earthquake.fetch(coord),
            self.snowfall.fetch(coord),
            self.hurricane.fetch(coord),
            self.tsunami.fetch_with(coord, tsunami_seismic),
            self.wildfire.fetch_with(current.clone(), archive.clone()),
            self.flood.fetch_with(coord, archive),
            self.proximity.find_nearby(
                coord,
                ResourceCategory::Hospitals,
                self.config.hospital_radius_km,
                self.config.hospital_max_results,
            ),
            self.proximity.find_nearby(
                coord,
                ResourceCategory::Shelters,
                self.config.shelter_radius_km,
                self.config.shelter_max_results,
            ),
            current,
        );

        let results = [earthquake, snowfall, hurricane, tsunami, wildfire, flood];
        for result in &results {
            debug!(
                hazard = %result.kind(),
                severity = ?result.severity(),
                failed = result.is_failed(),
                "Hazard settled"
            );
        }

        let report = UnifiedReport::assemble(
            location,
            CurrentConditions::from(current),
            results,
            hospitals,
            shelters,
        );

        info!(
            coord = %coord,
            overall = %report.overall_severity(),
            failed = report.failed_hazards().count(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Assessment completed"
        );
        report
    }

    /// Lists recent earthquakes around a coordinate, strongest first.
    pub async fn recent_earthquakes(
        &self,
        coord: Coordinate,
        filter: RecentQuakeFilter,
    ) -> Result<Vec<SeismicEvent>, FetchError> {
        recent_earthquakes(&self.seismic, coord, filter).await
    }
}
