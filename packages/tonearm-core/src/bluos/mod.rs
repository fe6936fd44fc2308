//! BluOS player control.
//!
//! This module talks to BluOS players over their HTTP control API
//! (port 11000, XML responses).
//!
//! # Module Structure
//!
//! - `endpoints` - Control endpoint definitions (paths)
//! - `gateway` - Single request/response exchange with one player
//! - `parser` - XML parsing for SyncStatus, Status and RadioBrowse
//! - `types` - Domain types for player state
//! - `traits` - Trait abstractions for testability
//! - `client` - `BluosClientImpl` concrete trait implementation

pub mod client;
pub mod endpoints;
pub mod gateway;
pub mod parser;
pub mod traits;
pub mod types;

#[cfg(test)]
pub(crate) mod test_fixtures;

// Re-export domain types
pub use endpoints::BluosEndpoint;
pub use gateway::{GatewayError, GatewayResult};
pub use types::{CaptureInput, PlaybackStatus, SyncState};

// Re-export trait abstractions
pub use traits::{BluosClient, BluosGrouping, BluosPlayback};

// Re-export concrete implementation
pub use client::BluosClientImpl;
