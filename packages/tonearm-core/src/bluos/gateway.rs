//! Low-level HTTP exchange with a single BluOS player.
//!
//! This module performs exactly one request/response round trip per call and
//! hands back the raw XML body. Parsing lives in `parser.rs`; typed commands
//! live in `client.rs`. Nothing here retries or caches.

use std::time::{Duration, Instant};

use reqwest::{Client, Url};
use thiserror::Error;

use super::endpoints::BluosEndpoint;
use crate::protocol_constants::{BLUOS_DEFAULT_PORT, REQUEST_TIMEOUT_SECS};

// ─────────────────────────────────────────────────────────────────────────────
// Error Types
// ─────────────────────────────────────────────────────────────────────────────

/// Errors that can occur while talking to a BluOS player.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// HTTP request to the player failed (unreachable, refused, timed out).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Player answered with a non-success HTTP status.
    #[error("HTTP error {0}: {1}")]
    HttpStatus(u16, String),

    /// Request URL could not be built from the host and parameters.
    #[error("Invalid request URL: {0}")]
    InvalidUrl(String),

    /// Response body was not the expected XML document.
    #[error("Failed to parse response: {0}")]
    Parse(String),
}

/// Convenient Result alias for gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;

impl GatewayError {
    /// Returns true if the player could not be reached or refused the request.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Http(_) | Self::HttpStatus(_, _) | Self::InvalidUrl(_)
        )
    }

    /// Returns true if the player answered but the body was malformed.
    #[must_use]
    pub fn is_protocol(&self) -> bool {
        matches!(self, Self::Parse(_))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Request/Response
// ─────────────────────────────────────────────────────────────────────────────

/// Builds the full request URL for a BluOS endpoint.
///
/// Parameter values are percent-encoded; callers pass them decoded.
pub fn build_bluos_url(
    host: &str,
    port: u16,
    endpoint: BluosEndpoint,
    params: &[(&str, &str)],
) -> GatewayResult<Url> {
    let base = format!("http://{}:{}/{}", host, port, endpoint.path());
    let url = if params.is_empty() {
        Url::parse(&base)
    } else {
        Url::parse_with_params(&base, params)
    };
    url.map_err(|e| GatewayError::InvalidUrl(format!("{}: {}", base, e)))
}

/// Sends a GET request to a BluOS player and returns the response body.
///
/// # Arguments
/// * `client` - The shared HTTP client
/// * `host` - Address of the player
/// * `port` - Control API port (normally 11000)
/// * `endpoint` - The BluOS endpoint to call
/// * `params` - Query parameters (order is preserved)
/// * `timeout` - Upper bound for the whole exchange
pub async fn send_request(
    client: &Client,
    host: &str,
    port: u16,
    endpoint: BluosEndpoint,
    params: &[(&str, &str)],
    timeout: Duration,
) -> GatewayResult<String> {
    let url = build_bluos_url(host, port, endpoint, params)?;

    log::info!("[Gateway] {} -> {}", endpoint.path(), url);

    let start = Instant::now();
    let res = client.get(url).timeout(timeout).send().await;

    log::info!(
        "[Gateway] {} on {} completed in {:?}: {:?}",
        endpoint.path(),
        host,
        start.elapsed(),
        res.as_ref().map(|r| r.status())
    );

    let res = res?;
    let status = res.status();
    let body = res.text().await?;

    if !status.is_success() {
        return Err(GatewayError::HttpStatus(status.as_u16(), body));
    }

    log::debug!("[Gateway] {} response body: {}", endpoint.path(), body);

    Ok(body)
}

// ─────────────────────────────────────────────────────────────────────────────
// Request Builder
// ─────────────────────────────────────────────────────────────────────────────

/// Builder for constructing and sending requests to a BluOS player.
///
/// # Example
/// ```ignore
/// let body = BluosRequestBuilder::new(&client, "192.168.1.50")
///     .endpoint(BluosEndpoint::RemoveSlave)
///     .param("slave", "192.168.1.51")
///     .param("port", "11000")
///     .send()
///     .await?;
/// ```
pub struct BluosRequestBuilder<'a> {
    client: &'a Client,
    host: &'a str,
    port: u16,
    timeout: Duration,
    endpoint: Option<BluosEndpoint>,
    params: Vec<(&'a str, String)>,
}

impl<'a> BluosRequestBuilder<'a> {
    /// Creates a new request builder with the default port and timeout.
    #[must_use]
    pub fn new(client: &'a Client, host: &'a str) -> Self {
        Self {
            client,
            host,
            port: BLUOS_DEFAULT_PORT,
            timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
            endpoint: None,
            params: Vec::new(),
        }
    }

    /// Sets the endpoint for this request.
    #[must_use]
    pub fn endpoint(mut self, endpoint: BluosEndpoint) -> Self {
        self.endpoint = Some(endpoint);
        self
    }

    /// Overrides the control API port.
    #[must_use]
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Overrides the request timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Adds a query parameter. Parameters are sent in insertion order.
    #[must_use]
    pub fn param(mut self, key: &'a str, value: impl Into<String>) -> Self {
        self.params.push((key, value.into()));
        self
    }

    /// Sends the request and returns the response body.
    ///
    /// # Errors
    /// Returns `GatewayError::InvalidUrl` if no endpoint was set, otherwise
    /// whatever the exchange itself produced.
    pub async fn send(self) -> GatewayResult<String> {
        let endpoint = self
            .endpoint
            .ok_or_else(|| GatewayError::InvalidUrl("BluosRequestBuilder: endpoint not set".into()))?;

        let params: Vec<(&str, &str)> = self.params.iter().map(|(k, v)| (*k, v.as_str())).collect();

        send_request(
            self.client,
            self.host,
            self.port,
            endpoint,
            &params,
            self.timeout,
        )
        .await
    }

    /// Returns the request parts without sending (for testing).
    #[cfg(test)]
    pub fn into_parts(self) -> Option<(BluosEndpoint, u16, Vec<(&'a str, String)>)> {
        Some((self.endpoint?, self.port, self.params))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_without_params_has_no_query() {
        let url = build_bluos_url("192.168.1.50", 11000, BluosEndpoint::SyncStatus, &[]).unwrap();
        assert_eq!(url.as_str(), "http://192.168.1.50:11000/SyncStatus");
    }

    #[test]
    fn url_keeps_param_order() {
        let url = build_bluos_url(
            "192.168.1.50",
            11000,
            BluosEndpoint::AddSlave,
            &[("slave", "192.168.1.51"), ("port", "11000")],
        )
        .unwrap();
        assert_eq!(
            url.as_str(),
            "http://192.168.1.50:11000/AddSlave?slave=192.168.1.51&port=11000"
        );
    }

    #[test]
    fn url_encodes_capture_urls() {
        let url = build_bluos_url(
            "192.168.1.50",
            11000,
            BluosEndpoint::Play,
            &[("url", "Capture:hw:1,0/1/25/2")],
        )
        .unwrap();
        assert_eq!(url.query(), Some("url=Capture%3Ahw%3A1%2C0%2F1%2F25%2F2"));
    }

    #[test]
    fn garbage_host_is_invalid_url() {
        let err = build_bluos_url("bad host", 11000, BluosEndpoint::Status, &[]).unwrap_err();
        assert!(matches!(err, GatewayError::InvalidUrl(_)));
        assert!(err.is_transport());
        assert!(!err.is_protocol());
    }

    #[test]
    fn builder_captures_endpoint_and_params_in_order() {
        let client = Client::new();
        let (endpoint, port, params) = BluosRequestBuilder::new(&client, "192.168.1.50")
            .endpoint(BluosEndpoint::RemoveSlave)
            .port(11001)
            .param("slave", "192.168.1.51")
            .param("port", "11000")
            .into_parts()
            .expect("should have parts");

        assert_eq!(endpoint, BluosEndpoint::RemoveSlave);
        assert_eq!(port, 11001);
        assert_eq!(
            params,
            vec![
                ("slave", "192.168.1.51".to_string()),
                ("port", "11000".to_string())
            ]
        );
    }

    #[test]
    fn builder_without_endpoint_has_no_parts() {
        let client = Client::new();
        assert!(BluosRequestBuilder::new(&client, "192.168.1.50")
            .into_parts()
            .is_none());
    }

    #[tokio::test]
    async fn unreachable_player_is_transport_error() {
        // Port 9 on loopback is discard; nothing listens there in CI.
        let client = Client::new();
        let err = BluosRequestBuilder::new(&client, "127.0.0.1")
            .port(9)
            .timeout(Duration::from_millis(500))
            .endpoint(BluosEndpoint::SyncStatus)
            .send()
            .await
            .unwrap_err();
        assert!(err.is_transport());
    }
}
