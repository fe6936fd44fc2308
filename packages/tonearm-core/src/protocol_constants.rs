//! Fixed protocol constants that should NOT be changed.
//!
//! These values are defined by the BluOS control API and changing them
//! would break compatibility with the players.

// ─────────────────────────────────────────────────────────────────────────────
// BluOS HTTP API
// ─────────────────────────────────────────────────────────────────────────────

/// Port the BluOS control API listens on.
///
/// Also sent as the `port` parameter of `AddSlave`/`RemoveSlave`, which
/// tells the master where to reach the follower.
pub const BLUOS_DEFAULT_PORT: u16 = 11000;

/// Timeout for a single BluOS HTTP exchange (seconds).
///
/// Grouping calls return quickly on a LAN; anything slower is a dead player.
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Browse service that lists a player's physical inputs.
pub const CAPTURE_SERVICE: &str = "Capture";

// ─────────────────────────────────────────────────────────────────────────────
// Application Identity
// ─────────────────────────────────────────────────────────────────────────────

/// Service identifier reported by the health endpoint.
pub const SERVICE_ID: &str = "tonearm";
