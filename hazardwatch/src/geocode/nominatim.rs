//! Nominatim search client.

use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, warn};

use super::{GeocodeError, Geocoder, ResolvedLocation};
use crate::coord::Coordinate;
use crate::feed::http::{build_url, get_json, AsyncHttpClient};
use crate::feed::FetchError;

/// One search hit. Nominatim encodes coordinates as strings.
#[derive(Deserialize)]
struct SearchHit {
    lat: String,
    lon: String,
    display_name: Option<String>,
}

/// Geocoder backed by the Nominatim search API.
pub struct NominatimGeocoder<C> {
    http: Arc<C>,
    endpoint: String,
    timeout: Duration,
}

impl<C: AsyncHttpClient> NominatimGeocoder<C> {
    pub fn new(http: Arc<C>, endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
            timeout,
        }
    }
}

impl<C: AsyncHttpClient> Geocoder for NominatimGeocoder<C> {
    async fn geocode(&self, query: &str) -> Result<ResolvedLocation, GeocodeError> {
        let url = build_url(
            &self.endpoint,
            &[
                ("q", query.to_string()),
                ("format", "json".to_string()),
                ("limit", "1".to_string()),
            ],
        )
        .map_err(GeocodeError::ServiceUnavailable)?;

        let hits: Vec<SearchHit> = get_json(&*self.http, &url, self.timeout)
            .await
            .map_err(|e| {
                warn!(query = query, error = %e, "Geocoding request failed");
                GeocodeError::ServiceUnavailable(e)
            })?;

        let hit = hits
            .into_iter()
            .next()
            .ok_or_else(|| GeocodeError::NotFound(query.to_string()))?;

        let lat: f64 = hit.lat.parse().map_err(|_| {
            GeocodeError::ServiceUnavailable(FetchError::parse(format!(
                "invalid latitude '{}'",
                hit.lat
            )))
        })?;
        let lon: f64 = hit.lon.parse().map_err(|_| {
            GeocodeError::ServiceUnavailable(FetchError::parse(format!(
                "invalid longitude '{}'",
                hit.lon
            )))
        })?;
        let coordinate = Coordinate::new(lat, lon)
            .map_err(|e| GeocodeError::ServiceUnavailable(FetchError::parse(e.to_string())))?;

        debug!(query = query, coord = %coordinate, "Location geocoded");
        Ok(ResolvedLocation {
            query: query.to_string(),
            coordinate,
            display_name: hit.display_name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::{MockAsyncHttpClient, MockReply};

    fn geocoder(mock: &MockAsyncHttpClient) -> NominatimGeocoder<MockAsyncHttpClient> {
        NominatimGeocoder::new(
            Arc::new(mock.clone()),
            "https://nominatim.openstreetmap.org/search",
            Duration::from_millis(50),
        )
    }

    #[tokio::test]
    async fn test_geocode_first_hit() {
        let mock = MockAsyncHttpClient::new().route(
            "nominatim",
            MockReply::json(r#"[{"lat": "13.0836939", "lon": "80.270186", "display_name": "Chennai, Tamil Nadu, India"}]"#),
        );

        let location = geocoder(&mock).geocode("Chennai").await.unwrap();
        assert_eq!(location.coordinate.latitude(), 13.0836939);
        assert_eq!(location.coordinate.longitude(), 80.270186);
        assert_eq!(
            location.display_name.as_deref(),
            Some("Chennai, Tamil Nadu, India")
        );

        let url = &mock.requests()[0];
        assert!(url.contains("q=Chennai"));
        assert!(url.contains("format=json"));
        assert!(url.contains("limit=1"));
    }

    #[tokio::test]
    async fn test_geocode_no_match() {
        let mock = MockAsyncHttpClient::new().route("nominatim", MockReply::json("[]"));

        assert_eq!(
            geocoder(&mock).geocode("Atlantis").await,
            Err(GeocodeError::NotFound("Atlantis".to_string()))
        );
    }

    #[tokio::test]
    async fn test_geocode_timeout_is_service_unavailable() {
        let mock = MockAsyncHttpClient::new().route("nominatim", MockReply::Hang);

        assert!(matches!(
            geocoder(&mock).geocode("Chennai").await,
            Err(GeocodeError::ServiceUnavailable(FetchError::Timeout { .. }))
        ));
    }

    #[tokio::test]
    async fn test_geocode_bad_coordinates() {
        let mock = MockAsyncHttpClient::new().route(
            "nominatim",
            MockReply::json(r#"[{"lat": "north", "lon": "80.0"}]"#),
        );

        assert!(matches!(
            geocoder(&mock).geocode("Chennai").await,
            Err(GeocodeError::ServiceUnavailable(FetchError::ParseError { .. }))
        ));
    }
}
