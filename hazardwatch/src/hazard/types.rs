//! Hazard result types.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::feed::FetchError;

/// The hazards an assessment covers.
///
/// Declaration order is the action plan priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HazardKind {
    Earthquake,
    Snowfall,
    Hurricane,
    Tsunami,
    Wildfire,
    Flood,
}

impl HazardKind {
    /// Every hazard, in priority order.
    pub const ALL: [HazardKind; 6] = [
        HazardKind::Earthquake,
        HazardKind::Snowfall,
        HazardKind::Hurricane,
        HazardKind::Tsunami,
        HazardKind::Wildfire,
        HazardKind::Flood,
    ];

    /// Hazards that receive action plan blocks. Flood is reported on its own.
    pub const PLAN_ORDER: [HazardKind; 5] = [
        HazardKind::Earthquake,
        HazardKind::Snowfall,
        HazardKind::Hurricane,
        HazardKind::Tsunami,
        HazardKind::Wildfire,
    ];

    /// Lowercase identifier used in logs and exports.
    pub fn name(&self) -> &'static str {
        match self {
            HazardKind::Earthquake => "earthquake",
            HazardKind::Snowfall => "snowfall",
            HazardKind::Hurricane => "hurricane",
            HazardKind::Tsunami => "tsunami",
            HazardKind::Wildfire => "wildfire",
            HazardKind::Flood => "flood",
        }
    }
}

impl fmt::Display for HazardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Ordered severity scale.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum SeverityLevel {
    #[default]
    Low,
    Moderate,
    High,
}

impl SeverityLevel {
    /// Uppercase label for display badges.
    pub fn display_label(&self) -> &'static str {
        match self {
            SeverityLevel::Low => "LOW",
            SeverityLevel::Moderate => "MODERATE",
            SeverityLevel::High => "HIGH",
        }
    }
}

impl fmt::Display for SeverityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SeverityLevel::Low => "low",
            SeverityLevel::Moderate => "moderate",
            SeverityLevel::High => "high",
        };
        f.write_str(s)
    }
}

/// Output of a severity classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub severity: SeverityLevel,
    pub possible: bool,
}

impl Classification {
    pub fn new(severity: SeverityLevel, possible: bool) -> Self {
        Self { severity, possible }
    }
}

/// Condensed view of one seismic event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuakeSummary {
    pub magnitude: f64,
    pub place: Option<String>,
    pub time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EarthquakeEvidence {
    pub max_magnitude: f64,
    pub event_count: usize,
    pub recent: Vec<QuakeSummary>,
}

/// Which input the snowfall severity was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SnowfallBasis {
    Forecast,
    Temperature,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnowfallEvidence {
    pub basis: SnowfallBasis,
    /// Zero on the temperature path.
    pub max_snowfall_cm: f64,
    /// Set on the temperature path only.
    pub current_temperature_c: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HurricaneEvidence {
    pub max_wind_kph: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TsunamiEvidence {
    pub max_quake_magnitude: f64,
    pub quake_count: usize,
    /// `None` when no coastline was found or the lookup failed.
    pub min_coast_distance_km: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WildfireEvidence {
    pub precip_last7_mm: f64,
    pub max_temp_last7_c: Option<f64>,
    pub wind_kph_now: f64,
    pub temp_now_c: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FloodEvidence {
    pub forecast_24h_mm: f64,
    pub recent_24h_mm: f64,
    /// `None` when the archive query failed.
    pub precip_last7_mm: Option<f64>,
}

/// Numeric facts behind a classification, one variant per hazard.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HazardEvidence {
    Earthquake(EarthquakeEvidence),
    Snowfall(SnowfallEvidence),
    Hurricane(HurricaneEvidence),
    Tsunami(TsunamiEvidence),
    Wildfire(WildfireEvidence),
    Flood(FloodEvidence),
}

impl HazardEvidence {
    pub fn kind(&self) -> HazardKind {
        match self {
            HazardEvidence::Earthquake(_) => HazardKind::Earthquake,
            HazardEvidence::Snowfall(_) => HazardKind::Snowfall,
            HazardEvidence::Hurricane(_) => HazardKind::Hurricane,
            HazardEvidence::Tsunami(_) => HazardKind::Tsunami,
            HazardEvidence::Wildfire(_) => HazardKind::Wildfire,
            HazardEvidence::Flood(_) => HazardKind::Flood,
        }
    }
}

/// Why a hazard could not be assessed.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(tag = "type", content = "detail", rename_all = "snake_case")]
pub enum HazardError {
    /// The hazard's own query failed.
    #[error(transparent)]
    Fetch(FetchError),

    /// An input this hazard depends on could not be obtained.
    #[error("{prerequisite} unavailable: {cause}")]
    DependencyUnavailable {
        prerequisite: String,
        cause: FetchError,
    },

    /// The feed answered but lacked the fields needed to classify.
    #[error("Evidence unavailable: {0}")]
    EvidenceUnavailable(String),
}

impl From<FetchError> for HazardError {
    fn from(e: FetchError) -> Self {
        HazardError::Fetch(e)
    }
}

/// Outcome of one hazard check.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum HazardOutcome {
    Assessed {
        severity: SeverityLevel,
        possible: bool,
        evidence: HazardEvidence,
    },
    Failed {
        error: HazardError,
    },
}

/// Tagged result of one hazard check. Failure is carried, never dropped.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HazardResult {
    kind: HazardKind,
    #[serde(flatten)]
    outcome: HazardOutcome,
}

impl HazardResult {
    /// A successful assessment; the kind is taken from the evidence.
    pub fn assessed(classification: Classification, evidence: HazardEvidence) -> Self {
        Self {
            kind: evidence.kind(),
            outcome: HazardOutcome::Assessed {
                severity: classification.severity,
                possible: classification.possible,
                evidence,
            },
        }
    }

    pub fn failed(kind: HazardKind, error: impl Into<HazardError>) -> Self {
        Self {
            kind,
            outcome: HazardOutcome::Failed {
                error: error.into(),
            },
        }
    }

    pub fn kind(&self) -> HazardKind {
        self.kind
    }

    pub fn outcome(&self) -> &HazardOutcome {
        &self.outcome
    }

    /// Severity, or `None` for a failed check.
    pub fn severity(&self) -> Option<SeverityLevel> {
        match &self.outcome {
            HazardOutcome::Assessed { severity, .. } => Some(*severity),
            HazardOutcome::Failed { .. } => None,
        }
    }

    pub fn is_possible(&self) -> Option<bool> {
        match &self.outcome {
            HazardOutcome::Assessed { possible, .. } => Some(*possible),
            HazardOutcome::Failed { .. } => None,
        }
    }

    pub fn evidence(&self) -> Option<&HazardEvidence> {
        match &self.outcome {
            HazardOutcome::Assessed { evidence, .. } => Some(evidence),
            HazardOutcome::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&HazardError> {
        match &self.outcome {
            HazardOutcome::Failed { error } => Some(error),
            HazardOutcome::Assessed { .. } => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.outcome, HazardOutcome::Failed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(SeverityLevel::Low < SeverityLevel::Moderate);
        assert!(SeverityLevel::Moderate < SeverityLevel::High);
        assert_eq!(
            [SeverityLevel::Moderate, SeverityLevel::High, SeverityLevel::Low]
                .iter()
                .max(),
            Some(&SeverityLevel::High)
        );
    }

    #[test]
    fn test_kind_order_is_priority_order() {
        let mut sorted = HazardKind::ALL;
        sorted.sort();
        assert_eq!(sorted, HazardKind::ALL);
        assert_eq!(&HazardKind::ALL[..5], &HazardKind::PLAN_ORDER[..]);
    }

    #[test]
    fn test_assessed_takes_kind_from_evidence() {
        let result = HazardResult::assessed(
            Classification::new(SeverityLevel::High, true),
            HazardEvidence::Hurricane(HurricaneEvidence {
                max_wind_kph: 120.0,
            }),
        );
        assert_eq!(result.kind(), HazardKind::Hurricane);
        assert_eq!(result.severity(), Some(SeverityLevel::High));
        assert_eq!(result.is_possible(), Some(true));
        assert!(result.error().is_none());
    }

    #[test]
    fn test_failed_result_keeps_error() {
        let result =
            HazardResult::failed(HazardKind::Flood, FetchError::Timeout { after_ms: 8000 });
        assert!(result.is_failed());
        assert_eq!(result.severity(), None);
        assert!(result.evidence().is_none());
        assert_eq!(
            result.error(),
            Some(&HazardError::Fetch(FetchError::Timeout { after_ms: 8000 }))
        );
    }

    #[test]
    fn test_result_serialization_shape() {
        let result = HazardResult::failed(
            HazardKind::Wildfire,
            HazardError::DependencyUnavailable {
                prerequisite: "current weather".to_string(),
                cause: FetchError::unavailable("HTTP 502"),
            },
        );
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["kind"], "wildfire");
        assert_eq!(json["status"], "failed");
        assert_eq!(json["error"]["type"], "dependency_unavailable");
        assert_eq!(
            json["error"]["detail"]["prerequisite"],
            "current weather"
        );
    }

    #[test]
    fn test_labels() {
        assert_eq!(SeverityLevel::Moderate.display_label(), "MODERATE");
        assert_eq!(SeverityLevel::Moderate.to_string(), "moderate");
        assert_eq!(HazardKind::Tsunami.to_string(), "tsunami");
    }
}
