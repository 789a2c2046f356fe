//! `hazardwatch assess` - full hazard assessment for one location.

use std::path::PathBuf;

use clap::Args;
use tracing::info;

use hazardwatch::export::{AssessmentExport, DEFAULT_EXPORT_FILE};
use hazardwatch::plan::ActionPlan;
use hazardwatch::summary::Summarizer;

use crate::error::CliError;
use crate::render;
use crate::runner::CliRunner;

/// Arguments for the assess command.
#[derive(Debug, Args)]
pub struct AssessArgs {
    /// Place name (e.g. "Lisbon, Portugal") or "lat,lon" in decimal degrees
    pub location: String,

    /// Earthquake search radius in km (overrides the config file)
    #[arg(long)]
    pub radius_km: Option<f64>,

    /// Print the full assessment as JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Write the JSON export to FILE (default: disaster_analysis.json)
    #[arg(
        long,
        value_name = "FILE",
        num_args = 0..=1,
        default_missing_value = DEFAULT_EXPORT_FILE
    )]
    pub output: Option<PathBuf>,

    /// Skip the generated plan summary
    #[arg(long)]
    pub no_summary: bool,

    /// Gemini API key used for the plan summary
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub gemini_api_key: Option<String>,
}

/// Run the assess command.
pub async fn run(args: AssessArgs, debug: bool) -> Result<(), CliError> {
    let runner = CliRunner::with_debug(debug)?;
    runner.log_startup("assess");

    let mut config = runner.config().to_assessment_config();
    if let Some(radius) = args.radius_km {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(CliError::Config(format!(
                "--radius-km must be a positive number, got {}",
                radius
            )));
        }
        config.earthquake_radius_km = radius;
    }

    let assessor = runner.create_assessor(config)?;
    if !args.json {
        println!("Assessing {}...", args.location);
        println!();
    }

    let report = assessor.assess(&args.location).await?;
    let plan = ActionPlan::generate(&report);

    let summary = if args.no_summary || plan.is_empty() {
        None
    } else {
        match runner.create_summarizer(args.gemini_api_key)? {
            Some(summarizer) => summarizer.summarize(&plan.to_text()).await,
            None => None,
        }
    };

    let export = AssessmentExport::new(&report, &plan, summary.as_deref());
    let json = export.to_json_pretty()?;

    if args.json {
        println!("{}", json);
    } else {
        print!("{}", render::report(&report));
        println!();
        print!("{}", render::plan(&plan, summary.as_deref()));
    }

    if let Some(path) = &args.output {
        runner.write_export(path, &json)?;
        if !args.json {
            println!();
            println!("Saved assessment to {}", path.display());
        }
    }

    info!(
        location = %args.location,
        overall = %report.overall_severity(),
        plan_entries = plan.entries().len(),
        summarized = summary.is_some(),
        "Assess command finished"
    );
    Ok(())
}
