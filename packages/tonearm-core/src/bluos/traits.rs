//! Trait abstractions for BluOS operations.
//!
//! These traits enable dependency injection for testability and modularity.
//! Services depend on traits rather than concrete implementations.

use async_trait::async_trait;

use crate::bluos::gateway::GatewayResult;
use crate::bluos::types::{CaptureInput, PlaybackStatus, SyncState};

/// Trait for BluOS grouping operations.
///
/// Used by `TopologyCoordinator` to read and rewrite master/follower edges.
#[async_trait]
pub trait BluosGrouping: Send + Sync {
    /// Fetches a player's current grouping relationships.
    ///
    /// # Arguments
    /// * `host` - Address of the player to query
    async fn sync_status(&self, host: &str) -> GatewayResult<SyncState>;

    /// Asks `master` to take `slave` on as a follower.
    ///
    /// # Arguments
    /// * `master` - Address of the player that will lead
    /// * `slave` - Address of the player that will follow
    async fn add_slave(&self, master: &str, slave: &str) -> GatewayResult<()>;

    /// Asks `master` to release `slave`.
    ///
    /// The master owns the relation, so this is always sent to the master even
    /// when it is the follower that reported the edge. Releasing a player the
    /// master no longer leads succeeds without changing anything.
    ///
    /// # Arguments
    /// * `master` - Address of the player that leads (or led) the follower
    /// * `slave` - Address of the follower to release
    async fn remove_slave(&self, master: &str, slave: &str) -> GatewayResult<()>;
}

/// Trait for BluOS playback and input operations.
#[async_trait]
pub trait BluosPlayback: Send + Sync {
    /// Fetches a player's playback status.
    async fn status(&self, host: &str) -> GatewayResult<PlaybackStatus>;

    /// Lists the physical inputs a player exposes under the `Capture` service.
    async fn browse_inputs(&self, host: &str) -> GatewayResult<Vec<CaptureInput>>;

    /// Starts playback of `url` on a player; selects an input when given a capture URL.
    async fn play_url(&self, host: &str, url: &str) -> GatewayResult<()>;
}

// ─────────────────────────────────────────────────────────────────────────────
// Combined Traits (for trait objects)
// ─────────────────────────────────────────────────────────────────────────────

/// Combined trait for all BluOS operations.
///
/// Used by `TopologyCoordinator` and `AppState` to hold a single client.
#[async_trait]
pub trait BluosClient: BluosGrouping + BluosPlayback {}

/// Blanket implementation for any type implementing both traits.
impl<T: BluosGrouping + BluosPlayback> BluosClient for T {}
