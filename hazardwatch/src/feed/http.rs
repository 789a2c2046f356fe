//! HTTP client abstraction for testability

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::de::DeserializeOwned;
use tokio::sync::Semaphore;
use tracing::{debug, trace, warn};

use super::types::FetchError;

/// Upper bound applied by the underlying reqwest client.
///
/// Per-source budgets are enforced above this with [`get_with_timeout`].
const CLIENT_CEILING: Duration = Duration::from_secs(60);

/// Trait for asynchronous HTTP client operations.
///
/// Every upstream feed goes through this trait so tests can substitute a
/// canned-response client for the network.
pub trait AsyncHttpClient: Send + Sync {
    /// Performs an async HTTP GET request.
    ///
    /// # Returns
    ///
    /// The response body as bytes or an error.
    fn get(&self, url: &str) -> impl Future<Output = Result<Vec<u8>, FetchError>> + Send;

    /// Performs an async HTTP POST request with JSON body.
    ///
    /// # Arguments
    ///
    /// * `url` - The URL to request
    /// * `headers` - Slice of (header_name, header_value) tuples
    /// * `json_body` - JSON body as a string
    fn post_json(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        json_body: &str,
    ) -> impl Future<Output = Result<Vec<u8>, FetchError>> + Send;

    /// Performs a GET that must settle within `timeout`.
    ///
    /// The budget covers the request itself. Wrappers that queue requests
    /// override this so that waiting for a slot is not charged to it.
    fn get_within(
        &self,
        url: &str,
        timeout: Duration,
    ) -> impl Future<Output = Result<Vec<u8>, FetchError>> + Send {
        async move {
            tokio::time::timeout(timeout, self.get(url))
                .await
                .unwrap_or_else(|_| {
                    Err(FetchError::Timeout {
                        after_ms: timeout.as_millis() as u64,
                    })
                })
        }
    }
}

/// Async HTTP client implementation using reqwest.
#[derive(Clone)]
pub struct AsyncReqwestClient {
    client: reqwest::Client,
}

impl AsyncReqwestClient {
    /// Creates a client that identifies itself with `user_agent`.
    ///
    /// Nominatim and Overpass both reject anonymous clients, so the agent
    /// should name the application and a contact.
    pub fn new(user_agent: &str) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(CLIENT_CEILING)
            .user_agent(user_agent)
            .pool_idle_timeout(Duration::from_secs(30))
            .tcp_nodelay(true)
            .build()
            .map_err(|e| FetchError::unavailable(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    async fn read_response(
        url: &str,
        result: Result<reqwest::Response, reqwest::Error>,
    ) -> Result<Vec<u8>, FetchError> {
        let response = match result {
            Ok(resp) => {
                debug!(
                    url = url,
                    status = resp.status().as_u16(),
                    "HTTP response received"
                );
                resp
            }
            Err(e) => {
                warn!(
                    url = url,
                    error = %e,
                    is_connect = e.is_connect(),
                    is_timeout = e.is_timeout(),
                    "HTTP request failed"
                );
                return Err(map_reqwest_error(e));
            }
        };

        if !response.status().is_success() {
            warn!(
                url = url,
                status = response.status().as_u16(),
                "HTTP error status"
            );
            return Err(FetchError::unavailable(format!(
                "HTTP {} from {}",
                response.status(),
                url
            )));
        }

        match response.bytes().await {
            Ok(bytes) => {
                trace!(url = url, bytes = bytes.len(), "HTTP response body read");
                Ok(bytes.to_vec())
            }
            Err(e) => {
                warn!(url = url, error = %e, "Failed to read response body");
                Err(map_reqwest_error(e))
            }
        }
    }
}

fn map_reqwest_error(e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout {
            after_ms: CLIENT_CEILING.as_millis() as u64,
        }
    } else {
        FetchError::unavailable(format!("Request failed: {}", e))
    }
}

impl AsyncHttpClient for AsyncReqwestClient {
    async fn get(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        trace!(url = url, "HTTP GET request starting");
        let result = self.client.get(url).send().await;
        Self::read_response(url, result).await
    }

    async fn post_json(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        json_body: &str,
    ) -> Result<Vec<u8>, FetchError> {
        trace!(url = url, "HTTP POST request starting");
        let mut request = self
            .client
            .post(url)
            .header("Content-Type", "application/json");
        for (name, value) in headers {
            request = request.header(*name, *value);
        }
        let result = request.body(json_body.to_string()).send().await;
        Self::read_response(url, result).await
    }
}

/// Wraps a client so that at most N requests are in flight at once.
///
/// All feeds of one assessment share a single limiter; cloning shares the
/// same permit pool.
pub struct LimitedHttpClient<C> {
    inner: C,
    permits: Arc<Semaphore>,
}

impl<C> LimitedHttpClient<C> {
    /// Creates a limiter allowing `max_in_flight` concurrent requests.
    ///
    /// A limit of zero is treated as one.
    pub fn new(inner: C, max_in_flight: usize) -> Self {
        Self {
            inner,
            permits: Arc::new(Semaphore::new(max_in_flight.max(1))),
        }
    }

    /// Number of requests that could start right now without waiting.
    pub fn available_permits(&self) -> usize {
        self.permits.available_permits()
    }

    /// Returns the wrapped client.
    pub fn inner(&self) -> &C {
        &self.inner
    }
}

impl<C: AsyncHttpClient> AsyncHttpClient for LimitedHttpClient<C> {
    async fn get(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|_| FetchError::unavailable("request limiter closed"))?;
        self.inner.get(url).await
    }

    async fn get_within(&self, url: &str, timeout: Duration) -> Result<Vec<u8>, FetchError> {
        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|_| FetchError::unavailable("request limiter closed"))?;
        self.inner.get_within(url, timeout).await
    }

    async fn post_json(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        json_body: &str,
    ) -> Result<Vec<u8>, FetchError> {
        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|_| FetchError::unavailable("request limiter closed"))?;
        self.inner.post_json(url, headers, json_body).await
    }
}

/// Issues a GET that must settle within `timeout`.
///
/// The clock starts once the client actually issues the request, so time
/// spent queued behind a [`LimitedHttpClient`] does not count.
pub async fn get_with_timeout<C: AsyncHttpClient>(
    http: &C,
    url: &str,
    timeout: Duration,
) -> Result<Vec<u8>, FetchError> {
    let started = Instant::now();
    let result = http.get_within(url, timeout).await;
    let elapsed_ms = started.elapsed().as_millis() as u64;

    match &result {
        Err(FetchError::Timeout { after_ms }) => {
            warn!(url = url, elapsed_ms, budget_ms = *after_ms, "Feed request timed out");
        }
        _ => {
            trace!(url = url, elapsed_ms, ok = result.is_ok(), "Feed request settled");
        }
    }
    result
}

/// Issues a GET with a time budget and decodes the JSON body.
pub async fn get_json<C, T>(http: &C, url: &str, timeout: Duration) -> Result<T, FetchError>
where
    C: AsyncHttpClient,
    T: DeserializeOwned,
{
    let body = get_with_timeout(http, url, timeout).await?;
    serde_json::from_slice(&body).map_err(|e| FetchError::parse(e.to_string()))
}

/// Builds a URL from a base and query parameters.
pub fn build_url(base: &str, params: &[(&str, String)]) -> Result<String, FetchError> {
    reqwest::Url::parse_with_params(base, params)
        .map(|url| url.to_string())
        .map_err(|e| FetchError::unavailable(format!("Invalid endpoint URL '{}': {}", base, e)))
}
