//! Action plan generation.
//!
//! Turns a [`UnifiedReport`] into ordered, plain-language directives: one
//! block per non-low hazard in priority order, each naming the nearest
//! hospitals and shelters.

use serde::Serialize;

use crate::aggregator::UnifiedReport;
use crate::hazard::{HazardKind, SeverityLevel};
use crate::proximity::ProximityResource;

/// Resources of each category referenced per block.
pub const RESOURCES_PER_BLOCK: usize = 3;

/// Shown instead of a plan when every hazard is low.
pub const NO_ACTION_MESSAGE: &str =
    "No immediate action required based on current signals.";

/// Appended to the earthquake block when tsunami risk is elevated.
pub const TSUNAMI_WARNING: &str =
    "Earthquake may generate tsunami risk. Move inland to higher ground immediately if instructed.";

/// Plan block for one hazard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionPlanEntry {
    pub hazard: HazardKind,
    pub severity: SeverityLevel,
    pub header: String,
    pub directives: Vec<String>,
}

/// Ordered action plan.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ActionPlan {
    entries: Vec<ActionPlanEntry>,
}

struct HazardGuidance {
    safety: &'static [&'static str],
    hospitals_label: &'static str,
    shelters_label: &'static str,
}

fn guidance(kind: HazardKind) -> Option<HazardGuidance> {
    let guidance = match kind {
        HazardKind::Earthquake => HazardGuidance {
            safety: &[
                "Drop, cover, and hold on. Stay away from windows and heavy furniture.",
                "After shaking stops, move to open areas; avoid damaged structures.",
            ],
            hospitals_label: "Nearby hospitals (top)",
            shelters_label: "Nearby relief shelters (top)",
        },
        HazardKind::Snowfall => HazardGuidance {
            safety: &[
                "Avoid travel during heavy snowfall; if you must travel, carry warm clothing and emergency supplies.",
                "Check roof loads and clear snow safely if necessary.",
            ],
            hospitals_label: "Hospitals (in case of emergencies)",
            shelters_label: "Shelters",
        },
        HazardKind::Hurricane => HazardGuidance {
            safety: &[
                "Secure loose outdoor items, close shutters, and move to a central interior room on the lowest safe floor.",
                "Have an emergency kit ready (water, medication, flashlight, radio).",
            ],
            hospitals_label: "Hospitals",
            shelters_label: "Shelters",
        },
        HazardKind::Tsunami => HazardGuidance {
            safety: &[
                "If near the coast, move to higher ground immediately; follow local evacuation routes.",
                "Stay away from beaches and river mouths until authorities give the all-clear.",
            ],
            hospitals_label: "Hospitals to consider",
            shelters_label: "Shelters",
        },
        HazardKind::Wildfire => HazardGuidance {
            safety: &[
                "If smoke or fire is nearby, evacuate immediately following local authorities' instructions.",
                "Close windows and vents; prepare to evacuate early with important documents and medications.",
            ],
            hospitals_label: "Hospitals (for smoke/trauma)",
            shelters_label: "Shelters",
        },
        HazardKind::Flood => return None,
    };
    Some(guidance)
}

fn resource_list(resources: &[ProximityResource]) -> Option<String> {
    if resources.is_empty() {
        return None;
    }
    let items: Vec<String> = resources
        .iter()
        .take(RESOURCES_PER_BLOCK)
        .map(|r| format!("{} ({} km)", r.name, r.distance_km))
        .collect();
    Some(items.join(", "))
}

impl ActionPlan {
    /// Builds the plan for a report.
    ///
    /// Flood is excluded; it is reported separately.
    pub fn generate(report: &UnifiedReport) -> Self {
        let hospitals = resource_list(&report.nearby_hospitals().resources);
        let shelters = resource_list(&report.nearby_shelters().resources);
        let tsunami_elevated =
            report.final_severity(HazardKind::Tsunami) >= SeverityLevel::Moderate;

        let entries = HazardKind::PLAN_ORDER
            .iter()
            .filter_map(|&kind| {
                let severity = report.final_severity(kind);
                if severity == SeverityLevel::Low {
                    return None;
                }
                let guidance = guidance(kind)?;

                let mut directives: Vec<String> =
                    guidance.safety.iter().map(|s| s.to_string()).collect();
                if let Some(list) = &hospitals {
                    directives.push(format!("{}: {}.", guidance.hospitals_label, list));
                }
                if let Some(list) = &shelters {
                    directives.push(format!("{}: {}.", guidance.shelters_label, list));
                }
                if kind == HazardKind::Earthquake && tsunami_elevated {
                    directives.push(TSUNAMI_WARNING.to_string());
                }

                Some(ActionPlanEntry {
                    hazard: kind,
                    severity,
                    header: format!(
                        "{} - severity: {}",
                        kind.name().to_uppercase(),
                        severity.display_label()
                    ),
                    directives,
                })
            })
            .collect();

        Self { entries }
    }

    pub fn entries(&self) -> &[ActionPlanEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Flat text rendering: each header followed by `- ` directives.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        for entry in &self.entries {
            lines.push(entry.header.clone());
            lines.extend(entry.directives.iter().map(|d| format!("- {}", d)));
        }
        lines
    }

    /// The plan as one newline-joined string, or [`NO_ACTION_MESSAGE`].
    pub fn to_text(&self) -> String {
        if self.is_empty() {
            NO_ACTION_MESSAGE.to_string()
        } else {
            self.lines().join("\n")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::CurrentConditions;
    use crate::coord::Coordinate;
    use crate::feed::FetchError;
    use crate::geocode::ResolvedLocation;
    use crate::hazard::{
        Classification, EarthquakeEvidence, HazardEvidence, HazardResult, HurricaneEvidence,
        TsunamiEvidence,
    };
    use crate::proximity::ProximityLookup;

    fn resources(prefix: &str, n: usize) -> ProximityLookup {
        ProximityLookup {
            resources: (0..n)
                .map(|i| ProximityResource {
                    name: format!("{} {}", prefix, i),
                    coordinate: Coordinate::new(0.0, 0.0).unwrap(),
                    distance_km: i as f64 + 0.5,
                    resource_type: "x".to_string(),
                    navigation_link: None,
                })
                .collect(),
            error: None,
        }
    }

    fn quake(max_magnitude: f64) -> HazardResult {
        HazardResult::assessed(
            crate::hazard::classify::classify_earthquake(max_magnitude),
            HazardEvidence::Earthquake(EarthquakeEvidence {
                max_magnitude,
                event_count: 1,
                recent: vec![],
            }),
        )
    }

    fn tsunami(severity: SeverityLevel) -> HazardResult {
        HazardResult::assessed(
            Classification::new(severity, severity != SeverityLevel::Low),
            HazardEvidence::Tsunami(TsunamiEvidence {
                max_quake_magnitude: 7.0,
                quake_count: 1,
                min_coast_distance_km: None,
            }),
        )
    }

    fn hurricane(severity: SeverityLevel) -> HazardResult {
        HazardResult::assessed(
            Classification::new(severity, true),
            HazardEvidence::Hurricane(HurricaneEvidence { max_wind_kph: 90.0 }),
        )
    }

    fn report(results: Vec<HazardResult>, hospitals: usize, shelters: usize) -> UnifiedReport {
        UnifiedReport::assemble(
            ResolvedLocation {
                query: "test".to_string(),
                coordinate: Coordinate::new(0.0, 0.0).unwrap(),
                display_name: None,
            },
            CurrentConditions::from(Err(FetchError::unavailable("down"))),
            results,
            resources("Hospital", hospitals),
            resources("School", shelters),
        )
    }

    #[test]
    fn test_all_low_is_empty() {
        let plan = ActionPlan::generate(&report(vec![quake(2.0)], 5, 5));
        assert!(plan.is_empty());
        assert_eq!(plan.to_text(), NO_ACTION_MESSAGE);
    }

    #[test]
    fn test_blocks_follow_priority_order() {
        let plan = ActionPlan::generate(&report(
            vec![
                tsunami(SeverityLevel::Moderate),
                hurricane(SeverityLevel::High),
                quake(5.0),
            ],
            0,
            0,
        ));
        let kinds: Vec<HazardKind> = plan.entries().iter().map(|e| e.hazard).collect();
        assert_eq!(
            kinds,
            vec![HazardKind::Earthquake, HazardKind::Hurricane, HazardKind::Tsunami]
        );
        assert_eq!(plan.entries()[1].header, "HURRICANE - severity: HIGH");
    }

    #[test]
    fn test_resources_capped_at_three() {
        let plan = ActionPlan::generate(&report(vec![hurricane(SeverityLevel::Moderate)], 8, 5));
        let entry = &plan.entries()[0];

        let hospital_line = entry
            .directives
            .iter()
            .find(|d| d.starts_with("Hospitals:"))
            .unwrap();
        assert_eq!(hospital_line.matches("Hospital ").count(), 3);
        assert!(hospital_line.contains("Hospital 0 (0.5 km)"));
        assert!(!hospital_line.contains("Hospital 3"));

        let shelter_line = entry
            .directives
            .iter()
            .find(|d| d.starts_with("Shelters:"))
            .unwrap();
        assert_eq!(shelter_line.matches("School ").count(), 3);
    }

    #[test]
    fn test_no_resources_omits_resource_lines() {
        let plan = ActionPlan::generate(&report(vec![hurricane(SeverityLevel::Moderate)], 0, 0));
        assert_eq!(plan.entries()[0].directives.len(), 2);
    }

    #[test]
    fn test_earthquake_block_warns_of_tsunami() {
        let plan = ActionPlan::generate(&report(
            vec![quake(7.2), tsunami(SeverityLevel::High)],
            0,
            0,
        ));
        let quake_entry = &plan.entries()[0];
        assert_eq!(quake_entry.hazard, HazardKind::Earthquake);
        assert_eq!(quake_entry.directives.last().unwrap(), TSUNAMI_WARNING);
    }

    #[test]
    fn test_earthquake_block_without_tsunami_has_no_warning() {
        let plan = ActionPlan::generate(&report(vec![quake(5.0)], 0, 0));
        assert!(!plan.entries()[0]
            .directives
            .contains(&TSUNAMI_WARNING.to_string()));
    }

    #[test]
    fn test_lines_prefix_directives() {
        let plan = ActionPlan::generate(&report(vec![quake(5.0)], 1, 0));
        let lines = plan.lines();
        assert_eq!(lines[0], "EARTHQUAKE - severity: MODERATE");
        assert!(lines[1..].iter().all(|l| l.starts_with("- ")));
        assert_eq!(lines.len(), 4);
    }
}
