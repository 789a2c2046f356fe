//! Overpass API client for points of interest.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use super::http::{build_url, get_json, AsyncHttpClient};
use super::types::FetchError;
use crate::coord::Coordinate;

/// OSM element type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Node,
    Way,
    Relation,
}

/// An OSM element reduced to a single point.
///
/// Nodes use their own position; ways and relations use the centre that
/// `out center` asks the server to compute.
#[derive(Debug, Clone, PartialEq)]
pub struct PoiElement {
    pub kind: ElementKind,
    pub coordinate: Coordinate,
    pub tags: HashMap<String, String>,
}

impl PoiElement {
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }
}

#[derive(Deserialize)]
struct OverpassResponse {
    #[serde(default)]
    elements: Vec<RawElement>,
}

#[derive(Deserialize)]
struct RawElement {
    #[serde(rename = "type")]
    kind: ElementKind,
    lat: Option<f64>,
    lon: Option<f64>,
    center: Option<RawCenter>,
    #[serde(default)]
    tags: HashMap<String, String>,
}

#[derive(Deserialize)]
struct RawCenter {
    lat: f64,
    lon: f64,
}

impl RawElement {
    fn into_poi(self) -> Option<PoiElement> {
        let (lat, lon) = match (self.lat, self.lon, self.center) {
            (Some(lat), Some(lon), _) => (lat, lon),
            (_, _, Some(center)) => (center.lat, center.lon),
            _ => return None,
        };
        let coordinate = Coordinate::new(lat, lon).ok()?;
        Some(PoiElement {
            kind: self.kind,
            coordinate,
            tags: self.tags,
        })
    }
}

/// Builds an Overpass QL union over `selectors`, each applied around a point.
///
/// Each selector is an element type followed by its tag filter, for example
/// `node["amenity"="hospital"]`.
pub fn around_query(
    center: Coordinate,
    radius_m: u64,
    selectors: &[(&str, &str)],
    server_timeout_secs: u64,
    limit: usize,
) -> String {
    let mut ql = format!("[out:json][timeout:{}];\n(\n", server_timeout_secs);
    for (element, filter) in selectors {
        ql.push_str(&format!(
            "  {}(around:{},{},{}){};\n",
            element,
            radius_m,
            center.latitude(),
            center.longitude(),
            filter
        ));
    }
    ql.push_str(&format!(");\nout center {};\n", limit));
    ql
}

/// Client for the Overpass interpreter endpoint.
pub struct OverpassFeed<C> {
    http: Arc<C>,
    endpoint: String,
    timeout: Duration,
}

impl<C: AsyncHttpClient> OverpassFeed<C> {
    pub fn new(http: Arc<C>, endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
            timeout,
        }
    }

    /// Server-side timeout to embed in queries, matching the client budget.
    pub fn server_timeout_secs(&self) -> u64 {
        self.timeout.as_secs().max(1)
    }

    /// Runs an Overpass QL query.
    ///
    /// Elements without a usable position are skipped.
    pub async fn query(&self, ql: &str) -> Result<Vec<PoiElement>, FetchError> {
        let url = build_url(&self.endpoint, &[("data", ql.to_string())])?;
        let response: OverpassResponse = get_json(&*self.http, &url, self.timeout).await?;

        let total = response.elements.len();
        let elements: Vec<PoiElement> = response
            .elements
            .into_iter()
            .filter_map(RawElement::into_poi)
            .collect();

        debug!(total, usable = elements.len(), "Overpass query completed");
        Ok(elements)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::http::tests::{MockAsyncHttpClient, MockReply};

    #[test]
    fn test_around_query_shape() {
        let center = Coordinate::new(13.0, 80.0).unwrap();
        let ql = around_query(
            center,
            5000,
            &[("node", r#"["amenity"="school"]"#), ("way", r#"["amenity"="school"]"#)],
            25,
            100,
        );

        assert!(ql.starts_with("[out:json][timeout:25];"));
        assert!(ql.contains(r#"node(around:5000,13,80)["amenity"="school"];"#));
        assert!(ql.contains(r#"way(around:5000,13,80)["amenity"="school"];"#));
        assert!(ql.ends_with("out center 100;\n"));
    }

    #[tokio::test]
    async fn test_query_reduces_elements_to_points() {
        let body = r#"{"elements": [
            {"type": "node", "id": 1, "lat": 13.01, "lon": 80.02, "tags": {"name": "Clinic A", "amenity": "clinic"}},
            {"type": "way", "id": 2, "center": {"lat": 13.05, "lon": 80.05}, "tags": {"amenity": "school"}},
            {"type": "relation", "id": 3},
            {"type": "node", "id": 4, "lat": 91.0, "lon": 0.0}
        ]}"#;
        let mock = MockAsyncHttpClient::new().route("interpreter", MockReply::json(body));
        let feed = OverpassFeed::new(
            Arc::new(mock.clone()),
            "https://overpass-api.de/api/interpreter",
            Duration::from_secs(1),
        );

        let elements = feed.query("[out:json];node;out;").await.unwrap();
        assert_eq!(elements.len(), 2);
        assert_eq!(elements[0].kind, ElementKind::Node);
        assert_eq!(elements[0].tag("name"), Some("Clinic A"));
        assert_eq!(elements[1].kind, ElementKind::Way);
        assert_eq!(elements[1].coordinate.latitude(), 13.05);
        assert_eq!(elements[1].tag("name"), None);

        assert!(mock.requests()[0].contains("data="));
    }

    #[tokio::test]
    async fn test_query_propagates_fetch_error() {
        let mock = MockAsyncHttpClient::new().route(
            "interpreter",
            MockReply::Error(FetchError::unavailable("HTTP 429")),
        );
        let feed = OverpassFeed::new(
            Arc::new(mock),
            "https://overpass-api.de/api/interpreter",
            Duration::from_secs(1),
        );

        assert!(matches!(
            feed.query("x").await,
            Err(FetchError::ServiceUnavailable { .. })
        ));
    }
}
