//! Location resolution.
//!
//! Turns user input into a [`Coordinate`]. A literal `lat,lon` pair is
//! accepted directly; anything else goes to a [`Geocoder`], normally
//! [`NominatimGeocoder`].

mod nominatim;

pub use nominatim::NominatimGeocoder;

use std::future::Future;

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::coord::{parse_lat_lon, CoordError, Coordinate};
use crate::feed::FetchError;

/// Errors that prevent a location from being resolved.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeocodeError {
    /// The service had no match for the query.
    #[error("No location found for '{0}'")]
    NotFound(String),

    /// Network failure, timeout or undecodable response.
    #[error("Geocoding service unavailable: {0}")]
    ServiceUnavailable(#[source] FetchError),

    /// A literal coordinate pair was outside the valid range.
    #[error("Coordinate out of range: {0}")]
    OutOfRange(#[source] CoordError),
}

/// A resolved location.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedLocation {
    /// Input as the user typed it, trimmed.
    pub query: String,
    pub coordinate: Coordinate,
    /// Full place name from the geocoder; `None` for literal coordinates.
    pub display_name: Option<String>,
}

/// Trait for free-text geocoding services.
pub trait Geocoder: Send + Sync {
    /// Look up the best match for a place name.
    fn geocode(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<ResolvedLocation, GeocodeError>> + Send;
}

/// Resolves input to a location, skipping the network for literal pairs.
pub async fn resolve_location<G: Geocoder>(
    geocoder: &G,
    input: &str,
) -> Result<ResolvedLocation, GeocodeError> {
    let query = input.trim();
    if query.is_empty() {
        return Err(GeocodeError::NotFound(String::new()));
    }

    match parse_lat_lon(query) {
        Ok(coordinate) => {
            debug!(coord = %coordinate, "Input is a literal coordinate");
            Ok(ResolvedLocation {
                query: query.to_string(),
                coordinate,
                display_name: None,
            })
        }
        Err(CoordError::Malformed(_)) => geocoder.geocode(query).await,
        Err(e) => Err(GeocodeError::OutOfRange(e)),
    }
}

/// Resolves input to a coordinate.
pub async fn resolve<G: Geocoder>(geocoder: &G, input: &str) -> Result<Coordinate, GeocodeError> {
    resolve_location(geocoder, input)
        .await
        .map(|location| location.coordinate)
}
