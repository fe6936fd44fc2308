//! Zone topology coordinator.
//!
//! Drives the configured players between two shapes:
//! - every player standalone (`ungroup_all`)
//! - one main player with every other player following it (`group_under`)
//!
//! Players report their own view of the topology and the two ends of an
//! edge can disagree, so each operation starts by asking every player and
//! removing whatever either side still reports.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use futures::future::join_all;
use serde::Serialize;
use tokio::sync::Mutex;

use crate::bluos::traits::BluosClient;
use crate::config::{DeviceRegistry, InputSelection};
use crate::error::{TonearmError, TonearmResult};
use crate::services::topology_plan::{plan_removals, DeviceFailure, UnlinkOutcome};

// ─────────────────────────────────────────────────────────────────────────────
// Result Types
// ─────────────────────────────────────────────────────────────────────────────

/// Outcome of grouping the zone under one player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupResult {
    /// Playback state of the main player after grouping (e.g. "play").
    pub state: Option<String>,
    /// Group name as reported by the main player.
    pub group: Option<String>,
    /// Followers that could not be added.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<DeviceFailure>,
}

impl GroupResult {
    /// Returns true if at least one follower failed to join.
    pub fn is_partial(&self) -> bool {
        !self.failures.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UngroupStatus {
    Ungrouped,
    Partial,
}

/// Outcome of making every player standalone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UngroupResult {
    pub status: UngroupStatus,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<DeviceFailure>,
}

/// What one ungroup pass observed and did.
#[derive(Debug, Default)]
struct UngroupReport {
    outcomes: BTreeMap<String, UnlinkOutcome>,
    removed: usize,
    failures: Vec<DeviceFailure>,
}

impl From<UngroupReport> for UngroupResult {
    fn from(report: UngroupReport) -> Self {
        let status = if report.failures.is_empty() {
            UngroupStatus::Ungrouped
        } else {
            UngroupStatus::Partial
        };
        Self {
            status,
            failures: report.failures,
        }
    }
}

/// Input player resolved to its address.
#[derive(Debug, Clone)]
struct ResolvedInput {
    host: String,
    label: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Coordinator
// ─────────────────────────────────────────────────────────────────────────────

/// Coordinates grouping across the players of one zone.
///
/// Operations are serialized: a second `group_under` or `ungroup_all` waits
/// until the one in flight has finished, so their requests never interleave.
pub struct TopologyCoordinator {
    bluos: Arc<dyn BluosClient>,
    registry: DeviceRegistry,
    input: Option<ResolvedInput>,
    operation_lock: Mutex<()>,
}

impl TopologyCoordinator {
    /// Creates a coordinator over `registry`.
    ///
    /// # Errors
    ///
    /// Returns `Configuration` if the input speaker is not in the registry.
    pub fn new(
        bluos: Arc<dyn BluosClient>,
        registry: DeviceRegistry,
        input: Option<InputSelection>,
    ) -> TonearmResult<Self> {
        let input = match input {
            Some(selection) => {
                let host = registry.host(&selection.speaker).ok_or_else(|| {
                    TonearmError::Configuration(format!(
                        "input speaker '{}' is not a configured speaker",
                        selection.speaker
                    ))
                })?;
                Some(ResolvedInput {
                    host: host.to_string(),
                    label: selection.label,
                })
            }
            None => None,
        };

        Ok(Self {
            bluos,
            registry,
            input,
            operation_lock: Mutex::new(()),
        })
    }

    pub fn registry(&self) -> &DeviceRegistry {
        &self.registry
    }

    /// Makes every configured player standalone.
    ///
    /// Never fails as a whole: players that could not be queried or released
    /// are listed in the result and the rest of the zone is still ungrouped.
    pub async fn ungroup_all(&self) -> UngroupResult {
        let _guard = self.operation_lock.lock().await;
        log::info!("[Topology] Ungrouping {} players", self.registry.len());

        let report = self.ungroup_pass().await;
        if report.failures.is_empty() {
            log::info!("[Topology] Ungrouped ({} links removed)", report.removed);
        } else {
            log::warn!(
                "[Topology] Ungroup incomplete: {} links removed, {} failures",
                report.removed,
                report.failures.len()
            );
        }
        report.into()
    }

    /// Groups every configured player under `speaker`.
    ///
    /// The zone is ungrouped first so stale chains cannot survive. Followers
    /// that refuse to join are reported but do not fail the call.
    ///
    /// # Errors
    ///
    /// - `UnknownDevice` if `speaker` is not configured (no request is sent)
    /// - `UngroupFailed` if the preceding ungroup did not complete
    /// - `Transport`/`Protocol` if the main player cannot be read back
    pub async fn group_under(&self, speaker: &str) -> TonearmResult<GroupResult> {
        let main = self
            .registry
            .host(speaker)
            .ok_or_else(|| TonearmError::UnknownDevice {
                name: speaker.to_string(),
                valid: self.registry.names(),
            })?
            .to_string();

        let _guard = self.operation_lock.lock().await;
        log::info!("[Topology] Grouping under {} ({})", speaker, main);

        let report = self.ungroup_pass().await;
        if !report.failures.is_empty() {
            log::warn!(
                "[Topology] Not grouping under {}: ungroup left {} failures",
                speaker,
                report.failures.len()
            );
            return Err(TonearmError::UngroupFailed(report.failures));
        }
        log::debug!(
            "[Topology] Cleared {} links across {} players",
            report.removed,
            report.outcomes.len()
        );

        let failures = self.add_followers(&main).await;
        self.select_input(&main).await;

        // Same player, so read back one after the other.
        let status = self.bluos.status(&main).await?;
        let sync = self.bluos.sync_status(&main).await?;

        let result = GroupResult {
            state: status.state,
            group: sync.group,
            failures,
        };
        if result.is_partial() {
            log::warn!(
                "[Topology] Grouped under {} with {} followers missing",
                speaker,
                result.failures.len()
            );
        } else {
            log::info!(
                "[Topology] Grouped under {}: {}",
                speaker,
                result.group.as_deref().unwrap_or("-")
            );
        }
        Ok(result)
    }

    /// Queries every player, then removes every edge any of them reports.
    ///
    /// Queries run concurrently. Removals run concurrently across masters and
    /// serially against any one master.
    async fn ungroup_pass(&self) -> UngroupReport {
        let queries = self
            .registry
            .hosts()
            .map(|host| async move { (host, self.bluos.sync_status(host).await) });

        let mut report = UngroupReport::default();
        // Masters that did not answer SyncStatus get no removals.
        let mut unreachable = BTreeSet::new();
        for (host, result) in join_all(queries).await {
            match result {
                Ok(sync) => {
                    let outcome = UnlinkOutcome::evaluate(host, &sync);
                    log::debug!("[Topology] {}: {:?}", host, outcome);
                    report.outcomes.insert(host.to_string(), outcome);
                }
                Err(e) => {
                    log::warn!("[Topology] SyncStatus failed for {}: {}", host, e);
                    if e.is_transport() {
                        unreachable.insert(host);
                    }
                    report.failures.push(DeviceFailure::new(host, e));
                }
            }
        }

        let mut plan = plan_removals(report.outcomes.iter().map(|(h, o)| (h.as_str(), o)));
        plan.retain(|master, followers| {
            let skip = unreachable.contains(master.as_str());
            if skip {
                log::debug!(
                    "[Topology] Skipping {} removal(s) on unreachable {}",
                    followers.len(),
                    master
                );
            }
            !skip
        });

        let removals = plan.iter().map(|(master, followers)| async move {
            let mut removed = 0;
            let mut failures = Vec::new();
            for follower in followers {
                match self.bluos.remove_slave(master, follower).await {
                    Ok(()) => {
                        log::debug!("[Topology] {} released {}", master, follower);
                        removed += 1;
                    }
                    Err(e) => {
                        log::warn!(
                            "[Topology] {} failed to release {}: {}",
                            master,
                            follower,
                            e
                        );
                        let lost = e.is_transport();
                        failures.push(DeviceFailure::new(
                            master.as_str(),
                            format!("release {}: {}", follower, e),
                        ));
                        if lost {
                            break;
                        }
                    }
                }
            }
            (removed, failures)
        });

        for (removed, failures) in join_all(removals).await {
            report.removed += removed;
            report.failures.extend(failures);
        }
        report
    }

    /// Adds every other player to `main`, one at a time.
    async fn add_followers(&self, main: &str) -> Vec<DeviceFailure> {
        let mut failures = Vec::new();
        for follower in self.registry.hosts().filter(|h| *h != main) {
            match self.bluos.add_slave(main, follower).await {
                Ok(()) => log::debug!("[Topology] {} joined {}", follower, main),
                Err(e) => {
                    log::warn!("[Topology] {} failed to join {}: {}", follower, main, e);
                    failures.push(DeviceFailure::new(follower, e));
                }
            }
        }
        failures
    }

    /// Switches `main` to the configured capture input, if it is the input player.
    ///
    /// Best effort: a missing input or a failed request is logged and skipped.
    async fn select_input(&self, main: &str) {
        let Some(input) = self.input.as_ref().filter(|i| i.host == main) else {
            return;
        };

        let inputs = match self.bluos.browse_inputs(main).await {
            Ok(inputs) => inputs,
            Err(e) => {
                log::warn!("[Topology] Capture browse failed on {}: {}", main, e);
                return;
            }
        };

        let Some(found) = inputs.into_iter().find(|i| i.label == input.label) else {
            log::info!(
                "[Topology] No '{}' input on {}, leaving playback alone",
                input.label,
                main
            );
            return;
        };

        match self.bluos.play_url(main, &found.url).await {
            Ok(()) => log::info!("[Topology] Selected '{}' on {}", input.label, main),
            Err(e) => log::warn!(
                "[Topology] Failed to select '{}' on {}: {}",
                input.label,
                main,
                e
            ),
        }
    }
}
