//! USGS FDSN event feed client.
//!
//! Queries the GeoJSON flavour of the FDSN event service and normalizes each
//! feature into a [`SeismicEvent`].

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::http::{build_url, get_json, AsyncHttpClient};
use super::types::FetchError;
use crate::coord::Coordinate;

/// A single event from the seismic feed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeismicEvent {
    /// Magnitude, absent for some automatic solutions.
    pub magnitude: Option<f64>,
    pub place: Option<String>,
    pub time: Option<DateTime<Utc>>,
    pub coordinate: Option<Coordinate>,
    /// Link to the event detail page.
    pub url: Option<String>,
}

impl SeismicEvent {
    /// Magnitude with a missing value counted as zero.
    pub fn magnitude_or_zero(&self) -> f64 {
        self.magnitude.unwrap_or(0.0)
    }

    /// Event time as an RFC 3339 string.
    pub fn time_iso(&self) -> Option<String> {
        self.time
            .map(|t| t.to_rfc3339_opts(SecondsFormat::Secs, true))
    }
}

/// Parameters for one event query.
#[derive(Debug, Clone, PartialEq)]
pub struct SeismicQuery {
    pub center: Coordinate,
    pub radius_km: f64,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub min_magnitude: Option<f64>,
    pub limit: u32,
}

impl SeismicQuery {
    /// A query around `center` with no time or magnitude filter.
    pub fn around(center: Coordinate, radius_km: f64, limit: u32) -> Self {
        Self {
            center,
            radius_km,
            start: None,
            end: None,
            min_magnitude: None,
            limit,
        }
    }

    pub fn between(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.start = Some(start);
        self.end = Some(end);
        self
    }

    pub fn min_magnitude(mut self, magnitude: f64) -> Self {
        self.min_magnitude = Some(magnitude);
        self
    }

    fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("format", "geojson".to_string())];
        if let Some(start) = self.start {
            params.push(("starttime", start.format("%Y-%m-%dT%H:%M:%S").to_string()));
        }
        if let Some(end) = self.end {
            params.push(("endtime", end.format("%Y-%m-%dT%H:%M:%S").to_string()));
        }
        params.push(("latitude", self.center.latitude().to_string()));
        params.push(("longitude", self.center.longitude().to_string()));
        params.push(("maxradiuskm", self.radius_km.to_string()));
        if let Some(mag) = self.min_magnitude {
            params.push(("minmagnitude", mag.to_string()));
        }
        params.push(("limit", self.limit.to_string()));
        params
    }
}

#[derive(Deserialize)]
struct FeatureCollection {
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Deserialize)]
struct Feature {
    #[serde(default)]
    properties: Properties,
    geometry: Option<Geometry>,
}

#[derive(Deserialize, Default)]
struct Properties {
    mag: Option<f64>,
    place: Option<String>,
    /// Milliseconds since the Unix epoch.
    time: Option<i64>,
    url: Option<String>,
}

#[derive(Deserialize)]
struct Geometry {
    #[serde(default)]
    coordinates: Vec<f64>,
}

impl From<Feature> for SeismicEvent {
    fn from(feature: Feature) -> Self {
        // GeoJSON order is [lon, lat, depth]
        let coordinate = feature.geometry.and_then(|g| match g.coordinates[..] {
            [lon, lat, ..] => Coordinate::new(lat, lon).ok(),
            _ => None,
        });
        let props = feature.properties;

        Self {
            magnitude: props.mag,
            place: props.place,
            time: props.time.and_then(DateTime::<Utc>::from_timestamp_millis),
            coordinate,
            url: props.url,
        }
    }
}

/// Client for the seismic event feed.
pub struct SeismicFeed<C> {
    http: Arc<C>,
    endpoint: String,
    timeout: Duration,
}

impl<C: AsyncHttpClient> SeismicFeed<C> {
    pub fn new(http: Arc<C>, endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
            timeout,
        }
    }

    /// Runs an event query and returns the events in feed order.
    pub async fn query(&self, query: &SeismicQuery) -> Result<Vec<SeismicEvent>, FetchError> {
        let url = build_url(&self.endpoint, &query.params())?;
        let collection: FeatureCollection = get_json(&*self.http, &url, self.timeout).await?;

        let events: Vec<SeismicEvent> = collection
            .features
            .into_iter()
            .map(SeismicEvent::from)
            .collect();

        debug!(
            center = %query.center,
            radius_km = query.radius_km,
            count = events.len(),
            "Seismic feed queried"
        );
        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::http::tests::{MockAsyncHttpClient, MockReply};

    const SAMPLE: &str = r#"{
        "type": "FeatureCollection",
        "metadata": {"count": 2},
        "features": [
            {
                "type": "Feature",
                "properties": {"mag": 4.7, "place": "12 km S of Somewhere", "time": 1700000000000, "url": "https://earthquake.usgs.gov/earthquakes/eventpage/us1"},
                "geometry": {"type": "Point", "coordinates": [80.1, 13.2, 10.0]}
            },
            {
                "type": "Feature",
                "properties": {"mag": null, "place": null, "time": null},
                "geometry": null
            }
        ]
    }"#;

    fn center() -> Coordinate {
        Coordinate::new(13.0, 80.0).unwrap()
    }

    #[tokio::test]
    async fn test_query_parses_features() {
        let mock = MockAsyncHttpClient::new().route("fdsnws", MockReply::json(SAMPLE));
        let feed = SeismicFeed::new(
            Arc::new(mock.clone()),
            "https://earthquake.usgs.gov/fdsnws/event/1/query",
            Duration::from_secs(1),
        );

        let events = feed
            .query(&SeismicQuery::around(center(), 100.0, 10))
            .await
            .unwrap();

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].magnitude, Some(4.7));
        assert_eq!(events[0].place.as_deref(), Some("12 km S of Somewhere"));
        let c = events[0].coordinate.unwrap();
        assert_eq!(c.latitude(), 13.2);
        assert_eq!(c.longitude(), 80.1);
        assert_eq!(events[0].time_iso().as_deref(), Some("2023-11-14T22:13:20Z"));

        assert_eq!(events[1].magnitude_or_zero(), 0.0);
        assert!(events[1].coordinate.is_none());

        let url = &mock.requests()[0];
        assert!(url.contains("format=geojson"));
        assert!(url.contains("maxradiuskm=100"));
        assert!(url.contains("limit=10"));
        assert!(!url.contains("minmagnitude"));
    }

    #[tokio::test]
    async fn test_query_missing_features_is_empty() {
        let mock = MockAsyncHttpClient::new().route("fdsnws", MockReply::json("{}"));
        let feed = SeismicFeed::new(
            Arc::new(mock),
            "https://earthquake.usgs.gov/fdsnws/event/1/query",
            Duration::from_secs(1),
        );

        let events = feed
            .query(&SeismicQuery::around(center(), 100.0, 10))
            .await
            .unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn test_query_params_with_filters() {
        let start = DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap();
        let end = DateTime::<Utc>::from_timestamp(1_700_604_800, 0).unwrap();
        let query = SeismicQuery::around(center(), 500.0, 500)
            .between(start, end)
            .min_magnitude(2.5);

        let params = query.params();
        assert!(params.contains(&("starttime", "2023-11-14T22:13:20".to_string())));
        assert!(params.contains(&("minmagnitude", "2.5".to_string())));
        assert!(params.contains(&("limit", "500".to_string())));
    }
}
