//! Shared feed types: the fetch error taxonomy and numeric series helpers.

use serde::Serialize;
use thiserror::Error;

/// Errors scoped to a single upstream query.
///
/// A `FetchError` never aborts an assessment; it is attached to the hazard
/// or proximity lookup that issued the query.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FetchError {
    /// The query did not settle within its time budget.
    #[error("Request timed out after {after_ms}ms")]
    Timeout { after_ms: u64 },

    /// Connection failure or non-success HTTP status.
    #[error("Service unavailable: {message}")]
    ServiceUnavailable { message: String },

    /// The response body could not be decoded.
    #[error("Failed to parse response: {message}")]
    ParseError { message: String },
}

impl FetchError {
    /// Shorthand for [`FetchError::ServiceUnavailable`].
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable {
            message: message.into(),
        }
    }

    /// Shorthand for [`FetchError::ParseError`].
    pub fn parse(message: impl Into<String>) -> Self {
        Self::ParseError {
            message: message.into(),
        }
    }

    /// Returns true for [`FetchError::Timeout`].
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

/// A numeric time series as delivered by the weather feed.
///
/// Individual samples may be null upstream.
pub type Series = Vec<Option<f64>>;

/// Sum of a series, counting null samples as zero.
pub fn series_sum(series: &[Option<f64>]) -> f64 {
    series.iter().map(|v| v.unwrap_or(0.0)).sum()
}

/// Maximum of a series, counting null samples as zero.
///
/// Returns 0.0 for an empty series.
pub fn series_max(series: &[Option<f64>]) -> f64 {
    series
        .iter()
        .map(|v| v.unwrap_or(0.0))
        .fold(0.0_f64, f64::max)
}

/// Maximum over the non-null samples, or `None` if there are none.
pub fn series_max_present(series: &[Option<f64>]) -> Option<f64> {
    series
        .iter()
        .flatten()
        .copied()
        .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |a| a.max(v))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_sum_treats_null_as_zero() {
        assert_eq!(series_sum(&[Some(1.5), None, Some(2.5)]), 4.0);
        assert_eq!(series_sum(&[]), 0.0);
    }

    #[test]
    fn test_series_max() {
        assert_eq!(series_max(&[Some(3.0), None, Some(7.5)]), 7.5);
        assert_eq!(series_max(&[None, None]), 0.0);
        assert_eq!(series_max(&[]), 0.0);
    }

    #[test]
    fn test_series_max_present() {
        assert_eq!(series_max_present(&[Some(-3.0), None, Some(-1.0)]), Some(-1.0));
        assert_eq!(series_max_present(&[None]), None);
    }

    #[test]
    fn test_fetch_error_display() {
        assert_eq!(
            FetchError::Timeout { after_ms: 8000 }.to_string(),
            "Request timed out after 8000ms"
        );
        assert!(FetchError::unavailable("HTTP 503")
            .to_string()
            .contains("HTTP 503"));
    }

    #[test]
    fn test_fetch_error_serializes_tagged() {
        let json = serde_json::to_value(FetchError::Timeout { after_ms: 50 }).unwrap();
        assert_eq!(json["type"], "timeout");
        assert_eq!(json["after_ms"], 50);
    }
}
