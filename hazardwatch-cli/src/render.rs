//! Plain-text rendering of reports, plans and earthquake listings.
//!
//! Renderers only read the library types and return strings, so commands
//! decide where output goes.

use std::fmt::Write;

use hazardwatch::aggregator::UnifiedReport;
use hazardwatch::coord::{distance_km, round_km, Coordinate};
use hazardwatch::feed::SeismicEvent;
use hazardwatch::hazard::{HazardEvidence, HazardKind, HazardResult, SnowfallBasis};
use hazardwatch::plan::ActionPlan;
use hazardwatch::proximity::{directions_url, ProximityLookup};

const RULE: &str = "------------------------------------------------------------";

fn optional(value: Option<f64>, unit: &str) -> String {
    value
        .map(|v| format!("{:.1} {}", v, unit))
        .unwrap_or_else(|| "n/a".to_string())
}

/// One-line description of the evidence behind a severity.
fn evidence_detail(evidence: &HazardEvidence) -> String {
    match evidence {
        HazardEvidence::Earthquake(e) => format!(
            "max magnitude {:.1} across {} event(s)",
            e.max_magnitude, e.event_count
        ),
        HazardEvidence::Snowfall(e) => match e.basis {
            SnowfallBasis::Forecast => format!("max daily snowfall {:.1} cm", e.max_snowfall_cm),
            SnowfallBasis::Temperature => format!(
                "no forecast; current temperature {}",
                optional(e.current_temperature_c, "C")
            ),
        },
        HazardEvidence::Hurricane(e) => format!("max wind {:.1} km/h (48 h)", e.max_wind_kph),
        HazardEvidence::Tsunami(e) => format!(
            "max magnitude {:.1} ({} event(s)), coast {}",
            e.max_quake_magnitude,
            e.quake_count,
            e.min_coast_distance_km
                .map(|d| format!("{:.1} km", d))
                .unwrap_or_else(|| "unknown".to_string())
        ),
        HazardEvidence::Wildfire(e) => format!(
            "7-day rain {:.1} mm, max temp {}, wind {:.1} km/h",
            e.precip_last7_mm,
            optional(e.max_temp_last7_c, "C"),
            e.wind_kph_now
        ),
        HazardEvidence::Flood(e) => format!(
            "next 24 h {:.1} mm, last 24 h {:.1} mm, 7-day {}",
            e.forecast_24h_mm,
            e.recent_24h_mm,
            optional(e.precip_last7_mm, "mm")
        ),
    }
}

fn hazard_line(report: &UnifiedReport, kind: HazardKind, result: Option<&HazardResult>) -> String {
    let label = report.final_severity(kind).display_label();
    let detail = match result {
        Some(result) => match (result.evidence(), result.error()) {
            (Some(evidence), _) => evidence_detail(evidence),
            (None, Some(error)) => format!("unavailable: {}", error),
            (None, None) => String::new(),
        },
        None => "not assessed".to_string(),
    };
    format!("  {:<11}{:<10}{}", kind.name(), label, detail)
}

fn resources_section(
    out: &mut String,
    title: &str,
    origin: Coordinate,
    lookup: &ProximityLookup,
) -> std::fmt::Result {
    writeln!(out, "{}:", title)?;
    if let Some(error) = &lookup.error {
        return writeln!(out, "  lookup failed: {}", error);
    }
    if lookup.resources.is_empty() {
        return writeln!(out, "  none found within search radius");
    }
    for resource in &lookup.resources {
        writeln!(
            out,
            "  - {} ({}, {} km)",
            resource.name, resource.resource_type, resource.distance_km
        )?;
        let link = resource
            .navigation_link
            .clone()
            .unwrap_or_else(|| directions_url(origin, resource.coordinate));
        writeln!(out, "    {}", link)?;
    }
    Ok(())
}

fn write_report(out: &mut String, report: &UnifiedReport) -> std::fmt::Result {
    writeln!(out, "Hazard assessment: {}", report.location())?;
    if let Some(name) = report.display_name() {
        writeln!(out, "Resolved to: {}", name)?;
    }
    writeln!(out, "Coordinates: {}", report.coordinate())?;
    writeln!(
        out,
        "Generated: {}",
        report.generated_at().format("%Y-%m-%d %H:%M:%S UTC")
    )?;
    writeln!(out, "{}", RULE)?;

    let current = report.current_conditions();
    match (&current.weather, &current.error) {
        (Some(weather), _) => writeln!(
            out,
            "Current conditions: temperature {}, wind {}",
            optional(weather.temperature_c, "C"),
            optional(weather.wind_kph, "km/h")
        )?,
        (None, Some(error)) => writeln!(out, "Current conditions: unavailable ({})", error)?,
        (None, None) => writeln!(out, "Current conditions: unavailable")?,
    }
    writeln!(out)?;

    writeln!(out, "Hazards (overall: {}):", report.overall_severity().display_label())?;
    for kind in HazardKind::ALL {
        writeln!(out, "{}", hazard_line(report, kind, report.hazard(kind)))?;
    }
    writeln!(out)?;

    resources_section(
        out,
        "Nearby hospitals",
        report.coordinate(),
        report.nearby_hospitals(),
    )?;
    writeln!(out)?;
    resources_section(
        out,
        "Nearby shelters",
        report.coordinate(),
        report.nearby_shelters(),
    )
}

/// Renders the report header, hazard table and nearby resources.
pub fn report(report: &UnifiedReport) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = write_report(&mut out, report);
    out
}

/// Renders the action plan and the optional summary.
pub fn plan(plan: &ActionPlan, summary: Option<&str>) -> String {
    let mut out = String::new();
    out.push_str("Action plan\n");
    out.push_str(RULE);
    out.push('\n');
    out.push_str(&plan.to_text());
    out.push('\n');
    if let Some(summary) = summary {
        out.push('\n');
        out.push_str("Summary\n");
        out.push_str(RULE);
        out.push('\n');
        out.push_str(summary);
        out.push('\n');
    }
    out
}

/// Renders an earthquake listing, at most `limit` rows.
pub fn quakes(origin: Coordinate, events: &[SeismicEvent], limit: usize) -> String {
    if events.is_empty() {
        return "No earthquakes found for the given filters.\n".to_string();
    }

    let mut out = String::new();
    for event in events.iter().take(limit) {
        let magnitude = event
            .magnitude
            .map(|m| format!("M{:.1}", m))
            .unwrap_or_else(|| "M?".to_string());
        let distance = event
            .coordinate
            .map(|c| format!("{} km", round_km(distance_km(origin, c))))
            .unwrap_or_else(|| "? km".to_string());
        let _ = writeln!(
            out,
            "{:<6} {:<22} {:>10}  {}",
            magnitude,
            event.time_iso().unwrap_or_else(|| "unknown time".to_string()),
            distance,
            event.place.as_deref().unwrap_or("unknown place")
        );
        if let Some(url) = &event.url {
            let _ = writeln!(out, "       {}", url);
        }
    }
    if events.len() > limit {
        let _ = writeln!(out, "... {} more not shown", events.len() - limit);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use hazardwatch::aggregator::CurrentConditions;
    use hazardwatch::feed::{CurrentWeather, FetchError};
    use hazardwatch::geocode::ResolvedLocation;
    use hazardwatch::hazard::{Classification, FloodEvidence, SeverityLevel};
    use hazardwatch::proximity::ProximityResource;

    fn sample_report() -> UnifiedReport {
        let origin = Coordinate::new(13.08, 80.27).unwrap();
        UnifiedReport::assemble(
            ResolvedLocation {
                query: "Chennai".to_string(),
                coordinate: origin,
                display_name: Some("Chennai, Tamil Nadu, India".to_string()),
            },
            CurrentConditions::from(Ok(CurrentWeather {
                temperature_c: Some(31.0),
                wind_kph: Some(12.0),
            })),
            vec![HazardResult::assessed(
                Classification::new(SeverityLevel::Moderate, true),
                HazardEvidence::Flood(FloodEvidence {
                    forecast_24h_mm: 25.0,
                    recent_24h_mm: 3.0,
                    precip_last7_mm: None,
                }),
            )],
            ProximityLookup::failed(FetchError::Timeout { after_ms: 25000 }),
            ProximityLookup {
                resources: vec![ProximityResource {
                    name: "Govt School".to_string(),
                    coordinate: Coordinate::new(13.09, 80.27).unwrap(),
                    distance_km: 1.11,
                    resource_type: "school".to_string(),
                    navigation_link: None,
                }],
                error: None,
            },
        )
    }

    #[test]
    fn test_report_sections() {
        let text = report(&sample_report());

        assert!(text.contains("Hazard assessment: Chennai"));
        assert!(text.contains("Resolved to: Chennai, Tamil Nadu, India"));
        assert!(text.contains("temperature 31.0 C, wind 12.0 km/h"));
        assert!(text.contains("next 24 h 25.0 mm, last 24 h 3.0 mm, 7-day n/a"));
        assert!(text.contains("lookup failed"));
        assert!(text.contains("Govt School (school, 1.11 km)"));
    }

    #[test]
    fn test_report_lists_every_hazard() {
        let text = report(&sample_report());
        for kind in HazardKind::ALL {
            assert!(text.contains(kind.name()), "missing {}", kind);
        }
        assert!(text.contains("unavailable:"));
    }

    #[test]
    fn test_shelters_get_directions() {
        let text = report(&sample_report());
        assert!(text.contains(
            "https://www.google.com/maps/dir/?api=1&origin=13.08,80.27&destination=13.09,80.27"
        ));
    }

    #[test]
    fn test_plan_with_summary() {
        let text = plan(&ActionPlan::default(), Some("All clear."));
        assert!(text.contains(hazardwatch::plan::NO_ACTION_MESSAGE));
        assert!(text.ends_with("All clear.\n"));

        assert!(!plan(&ActionPlan::default(), None).contains("Summary"));
    }

    #[test]
    fn test_quakes_listing() {
        let origin = Coordinate::new(35.68, 139.69).unwrap();
        let events = vec![
            SeismicEvent {
                magnitude: Some(5.4),
                place: Some("Izu Islands".to_string()),
                time: None,
                coordinate: Some(Coordinate::new(34.0, 139.5).unwrap()),
                url: Some("https://earthquake.usgs.gov/earthquakes/eventpage/a".to_string()),
            },
            SeismicEvent {
                magnitude: None,
                place: None,
                time: None,
                coordinate: None,
                url: None,
            },
        ];

        let text = quakes(origin, &events, 1);
        assert!(text.contains("M5.4"));
        assert!(text.contains("Izu Islands"));
        assert!(text.contains("eventpage/a"));
        assert!(text.contains("1 more not shown"));

        assert!(quakes(origin, &[], 10).starts_with("No earthquakes"));
    }
}
