//! Runtime configuration for an assessment.

use crate::feed::{FeedEndpoints, SourceTimeouts};
use crate::hazard::{TsunamiParams, DEFAULT_EARTHQUAKE_RADIUS_KM};
use crate::proximity::{
    DEFAULT_HOSPITAL_MAX_RESULTS, DEFAULT_HOSPITAL_RADIUS_KM, DEFAULT_SHELTER_MAX_RESULTS,
    DEFAULT_SHELTER_RADIUS_KM,
};

/// Default bound on concurrent outbound requests.
pub const DEFAULT_MAX_CONCURRENT_REQUESTS: usize = 8;

/// Everything the [`Assessor`](super::Assessor) needs besides an HTTP client.
#[derive(Debug, Clone, PartialEq)]
pub struct AssessmentConfig {
    pub endpoints: FeedEndpoints,
    pub timeouts: SourceTimeouts,
    /// Search radius of the earthquake hazard.
    pub earthquake_radius_km: f64,
    pub tsunami: TsunamiParams,
    pub hospital_radius_km: f64,
    pub hospital_max_results: usize,
    pub shelter_radius_km: f64,
    pub shelter_max_results: usize,
    /// Upper bound on requests in flight across all feeds.
    pub max_concurrent_requests: usize,
}

impl Default for AssessmentConfig {
    fn default() -> Self {
        Self {
            endpoints: FeedEndpoints::default(),
            timeouts: SourceTimeouts::default(),
            earthquake_radius_km: DEFAULT_EARTHQUAKE_RADIUS_KM,
            tsunami: TsunamiParams::default(),
            hospital_radius_km: DEFAULT_HOSPITAL_RADIUS_KM,
            hospital_max_results: DEFAULT_HOSPITAL_MAX_RESULTS,
            shelter_radius_km: DEFAULT_SHELTER_RADIUS_KM,
            shelter_max_results: DEFAULT_SHELTER_MAX_RESULTS,
            max_concurrent_requests: DEFAULT_MAX_CONCURRENT_REQUESTS,
        }
    }
}
