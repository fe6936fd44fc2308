//! Server configuration.
//!
//! Supports loading from YAML files with environment variable overrides.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use tonearm_core::{InputSelection, ZoneConfig};

/// Server configuration loaded from YAML with environment overrides.
///
/// ```yaml
/// bind_port: 8080
/// speakers:
///   dining-room: 192.168.68.53
///   kitchen: 192.168.68.60
/// default_speaker: dining-room
/// input:
///   speaker: dining-room
///   label: Record Player
/// ```
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Port to bind the HTTP server to.
    /// Override: `PORT`, `TONEARM_BIND_PORT`
    pub bind_port: u16,

    /// Speaker name → player address.
    pub speakers: BTreeMap<String, String>,

    /// Speaker grouped under when `/group` names none.
    pub default_speaker: String,

    /// Turntable input to select when grouping under its speaker.
    /// Set to `null` to never touch inputs.
    pub input: Option<InputSelection>,

    /// BluOS control API port.
    /// Override: `TONEARM_DEVICE_PORT`
    pub device_port: u16,

    /// Per-request timeout in seconds.
    /// Override: `TONEARM_REQUEST_TIMEOUT`
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        let zone = ZoneConfig::default();
        Self {
            bind_port: 8080,
            speakers: zone.speakers,
            default_speaker: zone.default_speaker,
            input: zone.input,
            device_port: zone.device_port,
            request_timeout_secs: zone.request_timeout_secs,
        }
    }
}

impl ServerConfig {
    /// Loads configuration from a YAML file, then applies environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = if let Some(path) = path {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Applies environment variable overrides to the configuration.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from `lookup`; unparsable values are ignored.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        // TONEARM_BIND_PORT wins over the generic PORT.
        for key in ["PORT", "TONEARM_BIND_PORT"] {
            if let Some(port) = lookup(key).and_then(|v| v.parse().ok()) {
                self.bind_port = port;
            }
        }

        if let Some(port) = lookup("TONEARM_DEVICE_PORT").and_then(|v| v.parse().ok()) {
            self.device_port = port;
        }

        if let Some(secs) = lookup("TONEARM_REQUEST_TIMEOUT").and_then(|v| v.parse().ok()) {
            self.request_timeout_secs = secs;
        }
    }

    /// Converts to tonearm-core's `ZoneConfig`, validating it on the way.
    pub fn to_core_config(&self) -> Result<ZoneConfig> {
        let zone = ZoneConfig {
            speakers: self.speakers.clone(),
            default_speaker: self.default_speaker.clone(),
            input: self.input.clone(),
            device_port: self.device_port,
            request_timeout_secs: self.request_timeout_secs,
        };
        zone.registry()
            .map_err(|e| anyhow!("Invalid zone configuration: {}", e))?;
        Ok(zone)
    }
}
