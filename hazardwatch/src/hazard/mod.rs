//! Hazard sources and severity classification.
//!
//! Each hazard has a source that queries the feeds it needs, reduces the
//! response to [`HazardEvidence`] and applies the matching pure classifier
//! from [`classify`]. A source never returns an error: failures become a
//! failed [`HazardResult`] for that hazard only.
//!
//! # Dependencies
//!
//! ```text
//! seismic feed (300 km) ──► TsunamiSource  ◄── coastline lookup
//! current weather ───────► WildfireSource ◄── ERA5 archive
//! hourly rain forecast ──► FloodSource    ◄── ERA5 archive
//! ```
//!
//! Sources with a prerequisite expose `fetch_with`, which accepts the
//! prerequisite as a future so the caller can share one request between
//! several consumers.

pub mod classify;
mod earthquake;
mod flood;
mod hurricane;
mod snowfall;
mod tsunami;
mod types;
mod wildfire;

use std::future::Future;

use crate::coord::Coordinate;

pub use earthquake::{
    hazard_query, max_magnitude, recent_earthquakes, EarthquakeSource, RecentQuakeFilter,
    DEFAULT_EARTHQUAKE_RADIUS_KM, HAZARD_EVENT_LIMIT, RECENT_QUAKE_FEED_LIMIT,
};
pub use flood::{rain_windows, FloodSource};
pub use hurricane::HurricaneSource;
pub use snowfall::{evaluate_snowfall, SnowfallSource};
pub use tsunami::{
    evaluate_tsunami, TsunamiParams, TsunamiSource, DEFAULT_COASTLINE_RADIUS_KM,
    DEFAULT_TSUNAMI_RADIUS_KM,
};
pub use types::{
    Classification, EarthquakeEvidence, FloodEvidence, HazardError, HazardEvidence, HazardKind,
    HazardOutcome, HazardResult, HurricaneEvidence, QuakeSummary, SeverityLevel, SnowfallBasis,
    SnowfallEvidence, TsunamiEvidence, WildfireEvidence,
};
pub use wildfire::{archive_window, evaluate_wildfire, WildfireSource};

/// A single hazard check.
pub trait HazardSource: Send + Sync {
    /// The hazard this source assesses.
    fn kind(&self) -> HazardKind;

    /// Fetch evidence for `coord` and classify it.
    ///
    /// Always settles with a result for [`Self::kind`], failed or not.
    fn fetch(&self, coord: Coordinate) -> impl Future<Output = HazardResult> + Send;
}
