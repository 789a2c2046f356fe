//! Tsunami hazard source.
//!
//! Combines two inputs: recent strong seismicity within a wide radius, and the
//! distance to the nearest mapped coastline. The seismic input is a
//! prerequisite; without it the hazard cannot be assessed. The coastline
//! lookup is best effort, and an unknown distance is treated as coastal.

use std::future::Future;
use std::sync::Arc;

use tracing::{debug, warn};

use super::classify::classify_tsunami;
use super::earthquake::{hazard_query, max_magnitude};
use super::types::{HazardError, HazardEvidence, HazardKind, HazardResult, TsunamiEvidence};
use super::HazardSource;
use crate::coord::{distance_km, Coordinate};
use crate::feed::overpass::around_query;
use crate::feed::{AsyncHttpClient, FetchError, OverpassFeed, SeismicEvent, SeismicFeed};

/// Default radius for the seismic prerequisite.
pub const DEFAULT_TSUNAMI_RADIUS_KM: f64 = 300.0;

/// Default radius of the coastline search.
pub const DEFAULT_COASTLINE_RADIUS_KM: f64 = 100.0;

/// Coastline segments requested per lookup.
const COASTLINE_LIMIT: usize = 10;

const COASTLINE_FILTER: &str = r#"["natural"="coastline"]"#;

/// Tunable parameters for the tsunami check.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TsunamiParams {
    pub quake_radius_km: f64,
    pub magnitude_threshold: f64,
    pub coastline_radius_km: f64,
}

impl Default for TsunamiParams {
    fn default() -> Self {
        Self {
            quake_radius_km: DEFAULT_TSUNAMI_RADIUS_KM,
            magnitude_threshold: super::classify::TSUNAMI_DEFAULT_MAGNITUDE,
            coastline_radius_km: DEFAULT_COASTLINE_RADIUS_KM,
        }
    }
}

/// Tsunami check over seismic evidence and coastline proximity.
pub struct TsunamiSource<C> {
    seismic: Arc<SeismicFeed<C>>,
    overpass: Arc<OverpassFeed<C>>,
    params: TsunamiParams,
}

impl<C: AsyncHttpClient> TsunamiSource<C> {
    pub fn new(
        seismic: Arc<SeismicFeed<C>>,
        overpass: Arc<OverpassFeed<C>>,
        params: TsunamiParams,
    ) -> Self {
        Self {
            seismic,
            overpass,
            params,
        }
    }

    /// The seismic prerequisite: events within the tsunami radius.
    pub async fn seismic_evidence(
        &self,
        coord: Coordinate,
    ) -> Result<Vec<SeismicEvent>, FetchError> {
        self.seismic
            .query(&hazard_query(coord, self.params.quake_radius_km))
            .await
    }

    /// Distance to the nearest coastline centre, if any coastline is found.
    pub async fn coast_distance_km(&self, coord: Coordinate) -> Result<Option<f64>, FetchError> {
        let radius_m = (self.params.coastline_radius_km * 1000.0) as u64;
        let ql = around_query(
            coord,
            radius_m,
            &[("way", COASTLINE_FILTER), ("relation", COASTLINE_FILTER)],
            self.overpass.server_timeout_secs(),
            COASTLINE_LIMIT,
        );

        let elements = self.overpass.query(&ql).await?;
        Ok(elements
            .iter()
            .map(|e| distance_km(coord, e.coordinate))
            .reduce(f64::min))
    }

    /// Assesses the hazard given an already-scheduled seismic prerequisite.
    ///
    /// The coastline lookup runs concurrently with the prerequisite.
    pub async fn fetch_with<F>(&self, coord: Coordinate, seismic: F) -> HazardResult
    where
        F: Future<Output = Result<Vec<SeismicEvent>, FetchError>> + Send,
    {
        let (events, coast) = tokio::join!(seismic, self.coast_distance_km(coord));

        let events = match events {
            Ok(events) => events,
            Err(cause) => {
                warn!(hazard = %HazardKind::Tsunami, error = %cause, "Seismic prerequisite failed");
                return HazardResult::failed(
                    HazardKind::Tsunami,
                    HazardError::DependencyUnavailable {
                        prerequisite: "seismic feed".to_string(),
                        cause,
                    },
                );
            }
        };

        let min_coast_distance_km = match coast {
            Ok(distance) => distance,
            Err(e) => {
                debug!(error = %e, "Coastline lookup failed, assuming coastal");
                None
            }
        };

        evaluate_tsunami(&events, min_coast_distance_km, self.params.magnitude_threshold)
    }
}

/// Classifies tsunami risk from seismic events and coastline distance.
pub fn evaluate_tsunami(
    events: &[SeismicEvent],
    min_coast_distance_km: Option<f64>,
    magnitude_threshold: f64,
) -> HazardResult {
    let max_quake_magnitude = max_magnitude(events);
    HazardResult::assessed(
        classify_tsunami(max_quake_magnitude, min_coast_distance_km, magnitude_threshold),
        HazardEvidence::Tsunami(TsunamiEvidence {
            max_quake_magnitude,
            quake_count: events.len(),
            min_coast_distance_km,
        }),
    )
}

impl<C: AsyncHttpClient> HazardSource for TsunamiSource<C> {
    fn kind(&self) -> HazardKind {
        HazardKind::Tsunami
    }

    async fn fetch(&self, coord: Coordinate) -> HazardResult {
        self.fetch_with(coord, self.seismic_evidence(coord)).await
    }
}
