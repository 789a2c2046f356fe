//! JSON export of a completed assessment.

use serde::Serialize;

use crate::aggregator::UnifiedReport;
use crate::plan::ActionPlan;

/// Default file name for exported assessments.
pub const DEFAULT_EXPORT_FILE: &str = "disaster_analysis.json";

/// Schema version written into every export.
pub const EXPORT_SCHEMA_VERSION: u32 = 1;

/// Everything an assessment produced, ready for serialization.
#[derive(Debug, Clone, Serialize)]
pub struct AssessmentExport<'a> {
    pub schema_version: u32,
    pub generator: &'static str,
    pub version: &'static str,
    pub report: &'a UnifiedReport,
    pub action_plan: &'a ActionPlan,
    pub summary: Option<&'a str>,
}

impl<'a> AssessmentExport<'a> {
    pub fn new(
        report: &'a UnifiedReport,
        action_plan: &'a ActionPlan,
        summary: Option<&'a str>,
    ) -> Self {
        Self {
            schema_version: EXPORT_SCHEMA_VERSION,
            generator: env!("CARGO_PKG_NAME"),
            version: crate::VERSION,
            report,
            action_plan,
            summary,
        }
    }

    /// Pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
