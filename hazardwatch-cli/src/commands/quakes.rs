//! `hazardwatch quakes` - recent earthquakes around a location.

use clap::Args;
use tracing::info;

use hazardwatch::aggregator::AssessmentError;
use hazardwatch::hazard::RecentQuakeFilter;

use crate::error::CliError;
use crate::render;
use crate::runner::CliRunner;

/// Arguments for the quakes command.
#[derive(Debug, Args)]
pub struct QuakesArgs {
    /// Place name or "lat,lon" in decimal degrees
    pub location: String,

    /// Search radius in km
    #[arg(long, default_value_t = 500.0)]
    pub radius_km: f64,

    /// How many days back to search
    #[arg(long, default_value_t = 7)]
    pub days: u32,

    /// Smallest magnitude to include
    #[arg(long, default_value_t = 2.5)]
    pub min_magnitude: f64,

    /// Maximum number of events to print
    #[arg(long, default_value_t = 30)]
    pub limit: usize,
}

impl QuakesArgs {
    fn filter(&self) -> Result<RecentQuakeFilter, CliError> {
        if !(self.radius_km.is_finite() && self.radius_km > 0.0) {
            return Err(CliError::Config(format!(
                "--radius-km must be a positive number, got {}",
                self.radius_km
            )));
        }
        if self.days == 0 {
            return Err(CliError::Config("--days must be at least 1".to_string()));
        }
        Ok(RecentQuakeFilter {
            radius_km: self.radius_km,
            days: self.days,
            min_magnitude: self.min_magnitude,
        })
    }
}

/// Run the quakes command.
pub async fn run(args: QuakesArgs, debug: bool) -> Result<(), CliError> {
    let filter = args.filter()?;
    let runner = CliRunner::with_debug(debug)?;
    runner.log_startup("quakes");

    let assessor = runner.create_assessor(runner.config().to_assessment_config())?;
    let location = assessor
        .resolve(&args.location)
        .await
        .map_err(AssessmentError::from)?;

    println!(
        "Earthquakes within {} km of {} (last {} days, M{:.1}+)",
        filter.radius_km,
        location.display_name.as_deref().unwrap_or(&location.query),
        filter.days,
        filter.min_magnitude
    );
    println!();

    let events = assessor
        .recent_earthquakes(location.coordinate, filter)
        .await
        .map_err(CliError::Quakes)?;
    print!("{}", render::quakes(location.coordinate, &events, args.limit));

    info!(count = events.len(), "Quakes command finished");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(radius_km: f64, days: u32) -> QuakesArgs {
        QuakesArgs {
            location: "Tokyo".to_string(),
            radius_km,
            days,
            min_magnitude: 2.5,
            limit: 30,
        }
    }

    #[test]
    fn test_filter_from_args() {
        let filter = args(250.0, 3).filter().unwrap();
        assert_eq!(filter.radius_km, 250.0);
        assert_eq!(filter.days, 3);
        assert_eq!(filter.min_magnitude, 2.5);
    }

    #[test]
    fn test_filter_rejects_bad_values() {
        assert!(args(0.0, 7).filter().is_err());
        assert!(args(f64::NAN, 7).filter().is_err());
        assert!(args(100.0, 0).filter().is_err());
    }
}
