//! High-level BluOS client commands.
//!
//! `BluosClientImpl` is the concrete implementation of the BluOS traits. Each
//! method is one gateway exchange followed, for queries, by parsing.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::bluos::endpoints::BluosEndpoint;
use crate::bluos::gateway::{BluosRequestBuilder, GatewayResult};
use crate::bluos::parser::{parse_capture_inputs, parse_status, parse_sync_status};
use crate::bluos::traits::{BluosGrouping, BluosPlayback};
use crate::bluos::types::{CaptureInput, PlaybackStatus, SyncState};
use crate::protocol_constants::{BLUOS_DEFAULT_PORT, CAPTURE_SERVICE, REQUEST_TIMEOUT_SECS};

/// Concrete BluOS client backed by a shared `reqwest::Client`.
///
/// Holds no per-operation state; clone it freely.
#[derive(Clone)]
pub struct BluosClientImpl {
    client: Client,
    port: u16,
    timeout: Duration,
}

impl BluosClientImpl {
    /// Creates a client using the default port and timeout.
    pub fn new(client: Client) -> Self {
        Self {
            client,
            port: BLUOS_DEFAULT_PORT,
            timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
        }
    }

    /// Overrides the control API port used for every player.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Overrides the per-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn request<'a>(&'a self, host: &'a str, endpoint: BluosEndpoint) -> BluosRequestBuilder<'a> {
        BluosRequestBuilder::new(&self.client, host)
            .port(self.port)
            .timeout(self.timeout)
            .endpoint(endpoint)
    }

    async fn slave_request(
        &self,
        endpoint: BluosEndpoint,
        master: &str,
        slave: &str,
    ) -> GatewayResult<()> {
        self.request(master, endpoint)
            .param("slave", slave)
            .param("port", self.port.to_string())
            .send()
            .await?;
        Ok(())
    }
}

#[async_trait]
impl BluosGrouping for BluosClientImpl {
    async fn sync_status(&self, host: &str) -> GatewayResult<SyncState> {
        let body = self.request(host, BluosEndpoint::SyncStatus).send().await?;
        parse_sync_status(&body)
    }

    async fn add_slave(&self, master: &str, slave: &str) -> GatewayResult<()> {
        log::info!("[BluOS] Adding follower {} to {}", slave, master);
        self.slave_request(BluosEndpoint::AddSlave, master, slave)
            .await
    }

    async fn remove_slave(&self, master: &str, slave: &str) -> GatewayResult<()> {
        log::info!("[BluOS] Releasing follower {} from {}", slave, master);
        self.slave_request(BluosEndpoint::RemoveSlave, master, slave)
            .await
    }
}

#[async_trait]
impl BluosPlayback for BluosClientImpl {
    async fn status(&self, host: &str) -> GatewayResult<PlaybackStatus> {
        let body = self.request(host, BluosEndpoint::Status).send().await?;
        parse_status(&body)
    }

    async fn browse_inputs(&self, host: &str) -> GatewayResult<Vec<CaptureInput>> {
        let body = self
            .request(host, BluosEndpoint::RadioBrowse)
            .param("service", CAPTURE_SERVICE)
            .send()
            .await?;
        parse_capture_inputs(&body)
    }

    async fn play_url(&self, host: &str, url: &str) -> GatewayResult<()> {
        log::info!("[BluOS] Playing {} on {}", url, host);
        self.request(host, BluosEndpoint::Play)
            .param("url", url)
            .send()
            .await?;
        Ok(())
    }
}
