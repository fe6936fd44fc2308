//! Domain types for BluOS player state.

/// A player's view of its own grouping relationships, as reported by `/SyncStatus`.
///
/// Both sides of an edge report it independently and may disagree: a follower
/// can still name a master that has already dropped it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncState {
    /// Address of the master this player follows, if any.
    pub master: Option<String>,
    /// Addresses of the followers this player leads.
    pub slaves: Vec<String>,
    /// Group name (e.g. "Dining Room+Kitchen"); absent on some firmware when standalone.
    pub group: Option<String>,
    /// Player name.
    pub name: Option<String>,
}

impl SyncState {
    /// Returns true if the player neither follows nor leads anyone.
    #[must_use]
    pub fn is_standalone(&self) -> bool {
        self.master.is_none() && self.slaves.is_empty()
    }
}

/// Playback status reported by `/Status`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaybackStatus {
    /// Transport state text (`play`, `pause`, `stop`, `stream`, ...).
    pub state: Option<String>,
}

/// A physical input listed under the `Capture` browse service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureInput {
    /// Label shown in the BluOS app (e.g. "Record Player").
    pub label: String,
    /// Decoded capture URL to pass to `/Play`.
    pub url: String,
}
