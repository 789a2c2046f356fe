//! Nearby emergency resources.
//!
//! Finds hospitals and shelters around a coordinate through the Overpass
//! points-of-interest feed and ranks them by great-circle distance.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use crate::coord::{distance_km, round_km, Coordinate};
use crate::feed::overpass::around_query;
use crate::feed::{AsyncHttpClient, FetchError, OverpassFeed, PoiElement};

/// Default shelter search radius and result count.
pub const DEFAULT_SHELTER_RADIUS_KM: f64 = 5.0;
pub const DEFAULT_SHELTER_MAX_RESULTS: usize = 5;

/// Default hospital search radius and result count.
pub const DEFAULT_HOSPITAL_RADIUS_KM: f64 = 10.0;
pub const DEFAULT_HOSPITAL_MAX_RESULTS: usize = 8;

/// Candidates requested from the server before local ranking.
const CANDIDATE_LIMIT: usize = 100;

/// Name used when an element has no `name` tag.
pub const UNKNOWN_NAME: &str = "Unknown";

const HEALTH_AMENITY: &str = r#"["amenity"~"hospital|clinic|doctors|health_post"]"#;
const SCHOOL_AMENITY: &str = r#"["amenity"~"school|college|university"]"#;

/// Kind of resource to look for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceCategory {
    Hospitals,
    /// Schools, colleges and universities used as relief shelters.
    Shelters,
}

impl ResourceCategory {
    fn selectors(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            ResourceCategory::Hospitals => &[
                ("node", "[healthcare]"),
                ("node", HEALTH_AMENITY),
                ("way", HEALTH_AMENITY),
                ("relation", HEALTH_AMENITY),
            ],
            ResourceCategory::Shelters => &[
                ("node", SCHOOL_AMENITY),
                ("way", SCHOOL_AMENITY),
                ("relation", SCHOOL_AMENITY),
            ],
        }
    }

    /// Resource type label for an element of this category.
    fn resource_type(&self, element: &PoiElement) -> String {
        let label = match self {
            ResourceCategory::Hospitals => element
                .tag("amenity")
                .or_else(|| element.tag("healthcare"))
                .unwrap_or("healthcare"),
            ResourceCategory::Shelters => element.tag("amenity").unwrap_or("school"),
        };
        label.to_string()
    }

    /// Whether results carry a driving directions link.
    fn with_directions(&self) -> bool {
        matches!(self, ResourceCategory::Hospitals)
    }
}

impl fmt::Display for ResourceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceCategory::Hospitals => f.write_str("hospitals"),
            ResourceCategory::Shelters => f.write_str("shelters"),
        }
    }
}

/// A nearby resource with its distance from the assessed location.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProximityResource {
    pub name: String,
    pub coordinate: Coordinate,
    /// Rounded to two decimals.
    pub distance_km: f64,
    pub resource_type: String,
    pub navigation_link: Option<String>,
}

/// Result of one lookup. A failed lookup has no resources and an error.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ProximityLookup {
    pub resources: Vec<ProximityResource>,
    pub error: Option<FetchError>,
}

impl ProximityLookup {
    pub fn failed(error: FetchError) -> Self {
        Self {
            resources: Vec::new(),
            error: Some(error),
        }
    }
}

/// Builds a driving directions link between two points.
pub fn directions_url(origin: Coordinate, destination: Coordinate) -> String {
    format!(
        "https://www.google.com/maps/dir/?api=1&origin={},{}&destination={},{}&travelmode=driving",
        origin.latitude(),
        origin.longitude(),
        destination.latitude(),
        destination.longitude()
    )
}

/// Drops resources beyond `radius_km`, sorts by distance and truncates.
///
/// The sort is stable, so equidistant resources keep their input order.
pub fn rank(
    mut resources: Vec<ProximityResource>,
    radius_km: f64,
    max_results: usize,
) -> Vec<ProximityResource> {
    resources.retain(|r| r.distance_km <= radius_km);
    resources.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    resources.truncate(max_results);
    resources
}

/// Client for nearby-resource lookups.
pub struct ProximityClient<C> {
    overpass: Arc<OverpassFeed<C>>,
}

impl<C: AsyncHttpClient> ProximityClient<C> {
    pub fn new(overpass: Arc<OverpassFeed<C>>) -> Self {
        Self { overpass }
    }

    /// Finds up to `max_results` resources of `category` within `radius_km`.
    ///
    /// Never fails; a feed error yields an empty lookup carrying the error.
    pub async fn find_nearby(
        &self,
        coord: Coordinate,
        category: ResourceCategory,
        radius_km: f64,
        max_results: usize,
    ) -> ProximityLookup {
        let radius_m = (radius_km * 1000.0) as u64;
        let ql = around_query(
            coord,
            radius_m,
            category.selectors(),
            self.overpass.server_timeout_secs(),
            CANDIDATE_LIMIT.max(max_results),
        );

        let elements = match self.overpass.query(&ql).await {
            Ok(elements) => elements,
            Err(e) => {
                warn!(category = %category, error = %e, "Proximity lookup failed");
                return ProximityLookup::failed(e);
            }
        };

        let candidates = elements
            .iter()
            .map(|element| ProximityResource {
                name: element.tag("name").unwrap_or(UNKNOWN_NAME).to_string(),
                coordinate: element.coordinate,
                distance_km: round_km(distance_km(coord, element.coordinate)),
                resource_type: category.resource_type(element),
                navigation_link: category
                    .with_directions()
                    .then(|| directions_url(coord, element.coordinate)),
            })
            .collect();

        let resources = rank(candidates, radius_km, max_results);
        debug!(
            category = %category,
            candidates = elements.len(),
            kept = resources.len(),
            "Proximity lookup ranked"
        );
        ProximityLookup {
            resources,
            error: None,
        }
    }
}
