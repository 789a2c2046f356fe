//! HazardWatch - natural hazard assessment for a location
//!
//! This library resolves a place name or coordinate, checks it concurrently
//! against public seismic, weather and map feeds for six natural hazards
//! (earthquake, snowfall, hurricane, tsunami, wildfire, flood), finds nearby
//! hospitals and shelters, and turns the combined report into a prioritized
//! action plan.
//!
//! # High-Level API
//!
//! The [`aggregator`] module provides the entry point:
//!
//! ```ignore
//! use hazardwatch::aggregator::{AssessmentConfig, Assessor};
//! use hazardwatch::plan::ActionPlan;
//!
//! let assessor = Assessor::with_reqwest(AssessmentConfig::default())?;
//! let report = assessor.assess("Lisbon, Portugal").await?;
//! println!("{}", ActionPlan::generate(&report).to_text());
//! ```
//!
//! Every upstream query has its own time budget. A failing source marks
//! only its own hazard as failed; the report is always complete once the
//! location has been resolved.

pub mod aggregator;
pub mod config;
pub mod coord;
pub mod export;
pub mod feed;
pub mod geocode;
pub mod hazard;
pub mod logging;
pub mod plan;
pub mod proximity;
pub mod summary;

/// Version of the HazardWatch library and CLI.
///
/// This is synchronized across all components in the workspace.
/// The version is defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
