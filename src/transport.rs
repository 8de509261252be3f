//! HTTP transport abstraction.
//!
//! The relay issues exactly one POST per send. The transport is a trait so
//! hosts can route through their own HTTP stack; the default implementation
//! uses reqwest.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::error::{RelayError, RelayResult};

/// Pluggable HTTP POST transport.
///
/// Implementations return the response body for any HTTP status; the
/// query API delivers its structured errors inside 4xx bodies, and the
/// response dispatcher needs to see them. Only failures to obtain a
/// response at all (connect errors, timeouts, broken streams) are errors.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// POST `body` to `url` with the given headers and return the response
    /// body.
    async fn post(
        &self,
        url: &str,
        headers: &[(String, String)],
        body: String,
    ) -> RelayResult<String>;
}

/// Default reqwest-based transport.
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Create a transport with default timeouts (30s request, 10s connect).
    pub fn new() -> RelayResult<Self> {
        Self::with_timeouts(Duration::from_secs(30), Duration::from_secs(10))
    }

    /// Create a transport with custom timeouts.
    pub fn with_timeouts(timeout: Duration, connect_timeout: Duration) -> RelayResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .build()
            .map_err(|e| RelayError::Transport {
                message: format!("Failed to create HTTP client: {}", e),
                source: Some(Box::new(e)),
            })?;

        Ok(Self { client })
    }

    /// Create a transport around an existing reqwest client.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn post(
        &self,
        url: &str,
        headers: &[(String, String)],
        body: String,
    ) -> RelayResult<String> {
        let mut request = self.client.post(url);
        for (name, value) in headers {
            request = request.header(name, value);
        }

        let response = request.body(body).send().await?;
        Ok(response.text().await?)
    }
}
