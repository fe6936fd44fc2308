//! Tonearm Core - BluOS zone grouping for a turntable setup.
//!
//! This crate groups a fixed set of BluOS players so that one of them plays
//! and every other one follows, or breaks them all back apart. When the
//! player the turntable is wired into leads the group, its capture input is
//! selected as well.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`bluos`]: BluOS control API client (HTTP + XML)
//! - [`services`]: Topology planning and the zone coordinator
//! - [`api`]: Axum router and server startup
//! - [`config`]: Zone configuration and the device registry
//! - [`bootstrap`]: Composition root
//! - [`error`]: Centralized error types
//!
//! # Abstraction Traits
//!
//! Player access goes through [`BluosGrouping`](bluos::BluosGrouping) and
//! [`BluosPlayback`](bluos::BluosPlayback), so the coordinator can be driven
//! by an in-memory fleet in tests.

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod api;
pub mod bluos;
pub mod bootstrap;
pub mod config;
pub mod error;
pub mod protocol_constants;
pub mod services;

// Re-export commonly used types at the crate root
pub use config::{DeviceRegistry, InputSelection, ZoneConfig};
pub use error::{TonearmError, TonearmResult};

// Re-export BluOS types
pub use bluos::{
    BluosClient, BluosClientImpl, BluosEndpoint, BluosGrouping, BluosPlayback, CaptureInput,
    GatewayError, PlaybackStatus, SyncState,
};

// Re-export service types
pub use services::{DeviceFailure, GroupResult, TopologyCoordinator, UngroupResult, UngroupStatus};

// Re-export bootstrap types
pub use bootstrap::{bootstrap_services, BootstrappedServices};

// Re-export API types
pub use api::{start_server, AppState, ServerError};
