//! BluOS control endpoint definitions.
//!
//! Single source of truth for the request paths used against a player.

/// BluOS HTTP endpoints used for grouping and input selection.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum BluosEndpoint {
    /// Current master/follower relationship of a player.
    SyncStatus,
    /// Asks a master to take on a follower.
    AddSlave,
    /// Asks a master to release a follower.
    RemoveSlave,
    /// Lists browseable items of a music service (inputs live under `Capture`).
    RadioBrowse,
    /// Starts playback of a URL (selects an input when given a capture URL).
    Play,
    /// Playback status.
    Status,
}

impl BluosEndpoint {
    /// Returns the request path, relative to the player's base URL.
    #[must_use]
    pub fn path(&self) -> &'static str {
        match self {
            Self::SyncStatus => "SyncStatus",
            Self::AddSlave => "AddSlave",
            Self::RemoveSlave => "RemoveSlave",
            Self::RadioBrowse => "RadioBrowse",
            Self::Play => "Play",
            Self::Status => "Status",
        }
    }
}
