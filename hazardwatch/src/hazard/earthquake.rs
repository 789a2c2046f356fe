//! Earthquake hazard source and the recent-quake listing.

use std::sync::Arc;

use chrono::{Duration as ChronoDuration, Utc};
use tracing::{debug, warn};

use super::classify::classify_earthquake;
use super::types::{EarthquakeEvidence, HazardEvidence, HazardKind, HazardResult, QuakeSummary};
use super::HazardSource;
use crate::coord::Coordinate;
use crate::feed::{AsyncHttpClient, FetchError, SeismicEvent, SeismicFeed, SeismicQuery};

/// Number of events requested for hazard checks.
pub const HAZARD_EVENT_LIMIT: u32 = 10;

/// How far back hazard checks look for events.
pub const HAZARD_LOOKBACK_DAYS: i64 = 30;

/// Default search radius for the earthquake hazard.
pub const DEFAULT_EARTHQUAKE_RADIUS_KM: f64 = 100.0;

/// Largest magnitude among `events`, with missing magnitudes counted as zero.
pub fn max_magnitude(events: &[SeismicEvent]) -> f64 {
    events
        .iter()
        .map(SeismicEvent::magnitude_or_zero)
        .fold(0.0_f64, f64::max)
}

/// Builds the bounded event query used by hazard checks.
pub fn hazard_query(center: Coordinate, radius_km: f64) -> SeismicQuery {
    let end = Utc::now();
    SeismicQuery::around(center, radius_km, HAZARD_EVENT_LIMIT)
        .between(end - ChronoDuration::days(HAZARD_LOOKBACK_DAYS), end)
}

/// Earthquake check: strongest recent event within a radius.
pub struct EarthquakeSource<C> {
    feed: Arc<SeismicFeed<C>>,
    radius_km: f64,
}

impl<C: AsyncHttpClient> EarthquakeSource<C> {
    pub fn new(feed: Arc<SeismicFeed<C>>, radius_km: f64) -> Self {
        Self { feed, radius_km }
    }

    fn evaluate(events: &[SeismicEvent]) -> HazardResult {
        let max_magnitude = max_magnitude(events);
        let recent = events
            .iter()
            .map(|e| QuakeSummary {
                magnitude: e.magnitude_or_zero(),
                place: e.place.clone(),
                time: e.time,
            })
            .collect();

        HazardResult::assessed(
            classify_earthquake(max_magnitude),
            HazardEvidence::Earthquake(EarthquakeEvidence {
                max_magnitude,
                event_count: events.len(),
                recent,
            }),
        )
    }
}

impl<C: AsyncHttpClient> HazardSource for EarthquakeSource<C> {
    fn kind(&self) -> HazardKind {
        HazardKind::Earthquake
    }

    async fn fetch(&self, coord: Coordinate) -> HazardResult {
        match self.feed.query(&hazard_query(coord, self.radius_km)).await {
            Ok(events) => Self::evaluate(&events),
            Err(e) => {
                warn!(hazard = %HazardKind::Earthquake, error = %e, "Seismic query failed");
                HazardResult::failed(HazardKind::Earthquake, e)
            }
        }
    }
}

/// Filters for the recent-earthquake listing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecentQuakeFilter {
    pub radius_km: f64,
    pub days: u32,
    pub min_magnitude: f64,
}

impl Default for RecentQuakeFilter {
    fn default() -> Self {
        Self {
            radius_km: 500.0,
            days: 7,
            min_magnitude: 2.5,
        }
    }
}

/// Feed limit for the listing.
pub const RECENT_QUAKE_FEED_LIMIT: u32 = 500;

/// Lists recent events around `center`, strongest first.
pub async fn recent_earthquakes<C: AsyncHttpClient>(
    feed: &SeismicFeed<C>,
    center: Coordinate,
    filter: RecentQuakeFilter,
) -> Result<Vec<SeismicEvent>, FetchError> {
    let end = Utc::now();
    let start = end - ChronoDuration::days(i64::from(filter.days));
    let query = SeismicQuery::around(center, filter.radius_km, RECENT_QUAKE_FEED_LIMIT)
        .between(start, end)
        .min_magnitude(filter.min_magnitude);

    let mut events = feed.query(&query).await?;
    events.sort_by(|a, b| b.magnitude_or_zero().total_cmp(&a.magnitude_or_zero()));

    debug!(count = events.len(), days = filter.days, "Recent earthquakes listed");
    Ok(events)
}
