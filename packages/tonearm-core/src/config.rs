//! Zone configuration: the known players and what to do with them.
//!
//! The player table is fixed at startup and never mutated; the coordinator
//! receives it at construction instead of reading global state.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::protocol_constants::{BLUOS_DEFAULT_PORT, REQUEST_TIMEOUT_SECS};

/// Immutable name → address table of the players in the zone.
///
/// Names are the user-facing identifiers accepted by the API; addresses are
/// what the players report in their sync state. Both are unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DeviceRegistry {
    speakers: BTreeMap<String, String>,
}

impl DeviceRegistry {
    /// Builds a registry, rejecting empty tables and shared addresses.
    pub fn new(speakers: BTreeMap<String, String>) -> Result<Self, String> {
        if speakers.is_empty() {
            return Err("at least one speaker must be configured".to_string());
        }

        let mut seen: BTreeMap<&str, &str> = BTreeMap::new();
        for (name, host) in &speakers {
            let host = host.trim();
            if host.is_empty() {
                return Err(format!("speaker '{}' has an empty address", name));
            }
            if let Some(other) = seen.insert(host, name) {
                return Err(format!(
                    "speakers '{}' and '{}' share address {}",
                    other, name, host
                ));
            }
        }

        let speakers = speakers
            .into_iter()
            .map(|(name, host)| (name, host.trim().to_string()))
            .collect();
        Ok(Self { speakers })
    }

    /// Looks up a player's address by name.
    pub fn host(&self, name: &str) -> Option<&str> {
        self.speakers.get(name).map(String::as_str)
    }

    /// Returns the configured names, sorted.
    pub fn names(&self) -> Vec<String> {
        self.speakers.keys().cloned().collect()
    }

    /// Iterates over all player addresses in name order.
    pub fn hosts(&self) -> impl Iterator<Item = &str> {
        self.speakers.values().map(String::as_str)
    }

    /// Number of configured players.
    pub fn len(&self) -> usize {
        self.speakers.len()
    }

    /// Always false for a validated registry; provided for API completeness.
    pub fn is_empty(&self) -> bool {
        self.speakers.is_empty()
    }
}

/// The player with the physical input, and the label of that input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputSelection {
    /// Name of the player the turntable is wired into.
    pub speaker: String,
    /// Label of the input as listed by the Capture browse service.
    pub label: String,
}

impl Default for InputSelection {
    fn default() -> Self {
        Self {
            speaker: "dining-room".to_string(),
            label: "Record Player".to_string(),
        }
    }
}

/// Configuration for the zone.
///
/// All fields have sensible defaults matching a four-room house.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoneConfig {
    /// Player name → address.
    pub speakers: BTreeMap<String, String>,

    /// Player grouped under when a request names none.
    pub default_speaker: String,

    /// Input to select after grouping under the input player. `None` disables it.
    pub input: Option<InputSelection>,

    /// Control API port of every player.
    pub device_port: u16,

    /// Timeout for each player request (seconds).
    pub request_timeout_secs: u64,
}

impl Default for ZoneConfig {
    fn default() -> Self {
        let speakers = [
            ("dining-room", "192.168.68.53"),
            ("living-room", "192.168.68.64"),
            ("kitchen", "192.168.68.60"),
            ("office", "192.168.68.56"),
        ]
        .into_iter()
        .map(|(name, host)| (name.to_string(), host.to_string()))
        .collect();

        Self {
            speakers,
            default_speaker: "dining-room".to_string(),
            input: Some(InputSelection::default()),
            device_port: BLUOS_DEFAULT_PORT,
            request_timeout_secs: REQUEST_TIMEOUT_SECS,
        }
    }
}

impl ZoneConfig {
    /// Validates the configuration and builds the player registry.
    ///
    /// # Errors
    ///
    /// Returns an error if the speaker table is invalid or the default/input
    /// speaker is not part of it.
    pub fn registry(&self) -> Result<DeviceRegistry, String> {
        let registry = DeviceRegistry::new(self.speakers.clone())?;

        if registry.host(&self.default_speaker).is_none() {
            return Err(format!(
                "default_speaker '{}' is not a configured speaker",
                self.default_speaker
            ));
        }
        if let Some(ref input) = self.input {
            if registry.host(&input.speaker).is_none() {
                return Err(format!(
                    "input speaker '{}' is not a configured speaker",
                    input.speaker
                ));
            }
            if input.label.trim().is_empty() {
                return Err("input label must not be empty".to_string());
            }
        }
        if self.device_port == 0 {
            return Err("device_port must be >= 1".to_string());
        }
        if self.request_timeout_secs == 0 {
            return Err("request_timeout_secs must be >= 1".to_string());
        }

        Ok(registry)
    }
}
