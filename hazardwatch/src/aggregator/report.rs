//! The unified report produced by an assessment.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::coord::Coordinate;
use crate::feed::{CurrentWeather, FetchError};
use crate::geocode::ResolvedLocation;
use crate::hazard::classify::earthquake_severity;
use crate::hazard::{HazardError, HazardEvidence, HazardKind, HazardResult, SeverityLevel};
use crate::proximity::ProximityLookup;

/// Live conditions, or the reason they are missing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentConditions {
    pub weather: Option<CurrentWeather>,
    pub error: Option<FetchError>,
}

impl From<Result<CurrentWeather, FetchError>> for CurrentConditions {
    fn from(result: Result<CurrentWeather, FetchError>) -> Self {
        match result {
            Ok(weather) => Self {
                weather: Some(weather),
                error: None,
            },
            Err(error) => Self {
                weather: None,
                error: Some(error),
            },
        }
    }
}

/// Immutable result of one assessment.
///
/// Holds exactly one [`HazardResult`] per [`HazardKind`] and the final
/// severity derived from each.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnifiedReport {
    location: String,
    display_name: Option<String>,
    coordinate: Coordinate,
    current_conditions: CurrentConditions,
    hazards: BTreeMap<HazardKind, HazardResult>,
    final_severities: BTreeMap<HazardKind, SeverityLevel>,
    nearby_hospitals: ProximityLookup,
    nearby_shelters: ProximityLookup,
    generated_at: DateTime<Utc>,
}

/// Final severity of a single result.
///
/// Earthquake severity is re-derived from the maximum magnitude; a failed
/// check counts as low.
pub fn final_severity(result: &HazardResult) -> SeverityLevel {
    match (result.kind(), result.evidence()) {
        (HazardKind::Earthquake, Some(HazardEvidence::Earthquake(evidence))) => {
            earthquake_severity(evidence.max_magnitude)
        }
        _ => result.severity().unwrap_or(SeverityLevel::Low),
    }
}

impl UnifiedReport {
    /// Assembles a report from settled results.
    ///
    /// Any hazard missing from `results` is recorded as failed so the report
    /// always covers every kind. If a kind appears twice the last one wins.
    pub fn assemble(
        location: ResolvedLocation,
        current_conditions: CurrentConditions,
        results: impl IntoIterator<Item = HazardResult>,
        nearby_hospitals: ProximityLookup,
        nearby_shelters: ProximityLookup,
    ) -> Self {
        let mut hazards: BTreeMap<HazardKind, HazardResult> = results
            .into_iter()
            .map(|result| (result.kind(), result))
            .collect();
        for kind in HazardKind::ALL {
            hazards.entry(kind).or_insert_with(|| {
                HazardResult::failed(
                    kind,
                    HazardError::EvidenceUnavailable("hazard was not assessed".to_string()),
                )
            });
        }

        let final_severities = hazards
            .iter()
            .map(|(kind, result)| (*kind, final_severity(result)))
            .collect();

        Self {
            location: location.query,
            display_name: location.display_name,
            coordinate: location.coordinate,
            current_conditions,
            hazards,
            final_severities,
            nearby_hospitals,
            nearby_shelters,
            generated_at: Utc::now(),
        }
    }

    /// Location as entered.
    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    pub fn coordinate(&self) -> Coordinate {
        self.coordinate
    }

    pub fn current_conditions(&self) -> &CurrentConditions {
        &self.current_conditions
    }

    pub fn hazards(&self) -> &BTreeMap<HazardKind, HazardResult> {
        &self.hazards
    }

    pub fn hazard(&self, kind: HazardKind) -> Option<&HazardResult> {
        self.hazards.get(&kind)
    }

    pub fn final_severities(&self) -> &BTreeMap<HazardKind, SeverityLevel> {
        &self.final_severities
    }

    pub fn final_severity(&self, kind: HazardKind) -> SeverityLevel {
        self.final_severities
            .get(&kind)
            .copied()
            .unwrap_or_default()
    }

    pub fn nearby_hospitals(&self) -> &ProximityLookup {
        &self.nearby_hospitals
    }

    pub fn nearby_shelters(&self) -> &ProximityLookup {
        &self.nearby_shelters
    }

    pub fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }

    /// Hazards whose check failed, in priority order.
    pub fn failed_hazards(&self) -> impl Iterator<Item = &HazardResult> {
        self.hazards.values().filter(|r| r.is_failed())
    }

    /// Highest final severity across all hazards.
    pub fn overall_severity(&self) -> SeverityLevel {
        self.final_severities
            .values()
            .copied()
            .max()
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hazard::{
        Classification, EarthquakeEvidence, HurricaneEvidence, TsunamiEvidence,
    };

    fn location() -> ResolvedLocation {
        ResolvedLocation {
            query: "13.0,80.0".to_string(),
            coordinate: Coordinate::new(13.0, 80.0).unwrap(),
            display_name: None,
        }
    }

    fn earthquake(max_magnitude: f64, label: SeverityLevel) -> HazardResult {
        HazardResult::assessed(
            Classification::new(label, max_magnitude >= 4.5),
            HazardEvidence::Earthquake(EarthquakeEvidence {
                max_magnitude,
                event_count: 1,
                recent: vec![],
            }),
        )
    }

    #[test]
    fn test_every_kind_is_present() {
        let report = UnifiedReport::assemble(
            location(),
            CurrentConditions::from(Err(FetchError::Timeout { after_ms: 6000 })),
            vec![earthquake(3.0, SeverityLevel::Low)],
            ProximityLookup::default(),
            ProximityLookup::default(),
        );

        assert_eq!(report.hazards().len(), HazardKind::ALL.len());
        assert_eq!(report.final_severities().len(), HazardKind::ALL.len());
        assert!(report.hazard(HazardKind::Flood).unwrap().is_failed());
        assert_eq!(report.failed_hazards().count(), 5);
        assert!(report.current_conditions().error.is_some());
    }

    #[test]
    fn test_earthquake_severity_is_rederived() {
        let report = UnifiedReport::assemble(
            location(),
            CurrentConditions::from(Err(FetchError::unavailable("down"))),
            vec![earthquake(6.7, SeverityLevel::Low)],
            ProximityLookup::default(),
            ProximityLookup::default(),
        );
        assert_eq!(report.final_severity(HazardKind::Earthquake), SeverityLevel::High);
    }

    #[test]
    fn test_failed_hazard_degrades_to_low() {
        let report = UnifiedReport::assemble(
            location(),
            CurrentConditions::from(Err(FetchError::unavailable("down"))),
            vec![
                HazardResult::failed(HazardKind::Hurricane, FetchError::Timeout { after_ms: 8000 }),
                HazardResult::assessed(
                    Classification::new(SeverityLevel::Moderate, true),
                    HazardEvidence::Tsunami(TsunamiEvidence {
                        max_quake_magnitude: 6.8,
                        quake_count: 1,
                        min_coast_distance_km: None,
                    }),
                ),
            ],
            ProximityLookup::default(),
            ProximityLookup::default(),
        );

        assert_eq!(report.final_severity(HazardKind::Hurricane), SeverityLevel::Low);
        assert!(report.hazard(HazardKind::Hurricane).unwrap().error().is_some());
        assert_eq!(report.final_severity(HazardKind::Tsunami), SeverityLevel::Moderate);
        assert_eq!(report.overall_severity(), SeverityLevel::Moderate);
    }

    #[test]
    fn test_report_serializes_with_kind_keys() {
        let report = UnifiedReport::assemble(
            location(),
            CurrentConditions::from(Ok(CurrentWeather {
                temperature_c: Some(30.0),
                wind_kph: Some(12.0),
            })),
            vec![HazardResult::assessed(
                Classification::new(SeverityLevel::Low, false),
                HazardEvidence::Hurricane(HurricaneEvidence { max_wind_kph: 10.0 }),
            )],
            ProximityLookup::default(),
            ProximityLookup::default(),
        );

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["final_severities"]["hurricane"], "low");
        assert_eq!(json["hazards"]["hurricane"]["status"], "assessed");
        assert_eq!(json["current_conditions"]["weather"]["wind_kph"], 12.0);
        assert_eq!(json["coordinate"]["latitude"], 13.0);
    }
}
