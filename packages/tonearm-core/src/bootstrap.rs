//! Application bootstrap and dependency wiring.
//!
//! This module contains the composition root - the single place where the
//! BluOS client and the coordinator are instantiated and wired together.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;

use crate::bluos::{BluosClient, BluosClientImpl};
use crate::config::ZoneConfig;
use crate::error::{TonearmError, TonearmResult};
use crate::services::TopologyCoordinator;

/// Container for all bootstrapped services.
#[derive(Clone)]
pub struct BootstrappedServices {
    /// Coordinates grouping across the zone.
    pub coordinator: Arc<TopologyCoordinator>,
    /// Speaker grouped under when a request names none.
    pub default_speaker: String,
}

/// Creates the shared HTTP client for all BluOS communication.
///
/// Per-request timeouts are applied by the gateway; this one only bounds
/// connection setup.
fn create_http_client(timeout: Duration) -> TonearmResult<Client> {
    Client::builder()
        .connect_timeout(timeout)
        .build()
        .map_err(|e| TonearmError::Internal(format!("Failed to create HTTP client: {}", e)))
}

/// Bootstraps all application services with their dependencies.
///
/// 1. Validate the zone and build the device registry
/// 2. Shared HTTP client
/// 3. BluOS client (depends on HTTP client)
/// 4. Topology coordinator (depends on BluOS client and registry)
///
/// # Errors
///
/// Returns `Configuration` if the zone is invalid, or `Internal` if the HTTP
/// client cannot be created.
pub fn bootstrap_services(config: &ZoneConfig) -> TonearmResult<BootstrappedServices> {
    let registry = config.registry().map_err(TonearmError::Configuration)?;
    let timeout = Duration::from_secs(config.request_timeout_secs);

    let http_client = create_http_client(timeout)?;

    let bluos: Arc<dyn BluosClient> = Arc::new(
        BluosClientImpl::new(http_client)
            .with_port(config.device_port)
            .with_timeout(timeout),
    );

    log::info!(
        "[Bootstrap] Zone of {} speakers on port {} (default: {})",
        registry.len(),
        config.device_port,
        config.default_speaker
    );

    let coordinator = Arc::new(TopologyCoordinator::new(
        bluos,
        registry,
        config.input.clone(),
    )?);

    Ok(BootstrappedServices {
        coordinator,
        default_speaker: config.default_speaker.clone(),
    })
}
