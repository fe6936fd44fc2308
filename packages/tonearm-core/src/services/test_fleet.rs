//! In-memory BluOS fleet for exercising the coordinator without a network.
//!
//! Each simulated player keeps its own `SyncState`, so the two ends of an
//! edge can be made to disagree the way real players occasionally do.
//! Every call is recorded in order.

use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::bluos::gateway::{GatewayError, GatewayResult};
use crate::bluos::traits::{BluosGrouping, BluosPlayback};
use crate::bluos::types::{CaptureInput, PlaybackStatus, SyncState};

/// A request the fleet received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    SyncStatus(String),
    AddSlave { master: String, slave: String },
    RemoveSlave { master: String, slave: String },
    Status(String),
    BrowseInputs(String),
    Play { host: String, url: String },
}

impl Call {
    pub(crate) fn is_mutation(&self) -> bool {
        matches!(
            self,
            Self::AddSlave { .. } | Self::RemoveSlave { .. } | Self::Play { .. }
        )
    }
}

#[derive(Default)]
pub(crate) struct SimulatedFleet {
    players: Mutex<BTreeMap<String, SyncState>>,
    playback: Mutex<BTreeMap<String, String>>,
    inputs: Mutex<BTreeMap<String, Vec<CaptureInput>>>,
    unreachable: Mutex<BTreeSet<String>>,
    failing_adds: Mutex<BTreeSet<String>>,
    failing_browse: Mutex<BTreeSet<String>>,
    calls: Mutex<Vec<Call>>,
    removals: Mutex<RemovalTracker>,
}

/// Counts `RemoveSlave` requests that are in flight at the same time.
#[derive(Default)]
struct RemovalTracker {
    in_flight: BTreeMap<String, usize>,
    peak_per_master: BTreeMap<String, usize>,
    total: usize,
    peak_total: usize,
}

impl RemovalTracker {
    fn enter(&mut self, master: &str) {
        let count = self.in_flight.entry(master.to_string()).or_default();
        *count += 1;
        let peak = self.peak_per_master.entry(master.to_string()).or_default();
        *peak = (*peak).max(*count);
        self.total += 1;
        self.peak_total = self.peak_total.max(self.total);
    }

    fn leave(&mut self, master: &str) {
        if let Some(count) = self.in_flight.get_mut(master) {
            *count -= 1;
        }
        self.total -= 1;
    }
}

fn unreachable(host: &str) -> GatewayError {
    GatewayError::HttpStatus(503, format!("{} is unreachable", host))
}

fn group_name(master: &str, slaves: &[String]) -> Option<String> {
    if slaves.is_empty() {
        return None;
    }
    let mut members = vec![master.to_string()];
    members.extend(slaves.iter().cloned());
    Some(members.join("+"))
}

impl SimulatedFleet {
    /// Creates a fleet of standalone, stopped players.
    pub(crate) fn new(hosts: &[&str]) -> Self {
        let fleet = Self::default();
        {
            let mut players = fleet.players.lock();
            let mut playback = fleet.playback.lock();
            for host in hosts {
                players.insert(host.to_string(), SyncState::default());
                playback.insert(host.to_string(), "stop".to_string());
            }
        }
        fleet
    }

    /// Records a consistent edge on both players.
    pub(crate) fn link(&self, master: &str, follower: &str) {
        self.claim_master(follower, master);
        self.claim_follower(master, follower);
    }

    /// Makes `follower` believe it follows `master` without touching `master`.
    pub(crate) fn claim_master(&self, follower: &str, master: &str) {
        let mut players = self.players.lock();
        players.entry(follower.to_string()).or_default().master = Some(master.to_string());
    }

    /// Makes `master` list `follower` without touching `follower`.
    pub(crate) fn claim_follower(&self, master: &str, follower: &str) {
        let mut players = self.players.lock();
        let state = players.entry(master.to_string()).or_default();
        if !state.slaves.iter().any(|s| s == follower) {
            state.slaves.push(follower.to_string());
        }
        state.group = group_name(master, &state.slaves);
    }

    pub(crate) fn make_unreachable(&self, host: &str) {
        self.unreachable.lock().insert(host.to_string());
    }

    /// Makes `AddSlave` fail whenever `follower` is the player being added.
    pub(crate) fn fail_adds_of(&self, follower: &str) {
        self.failing_adds.lock().insert(follower.to_string());
    }

    pub(crate) fn fail_browse_on(&self, host: &str) {
        self.failing_browse.lock().insert(host.to_string());
    }

    pub(crate) fn set_inputs(&self, host: &str, labels: &[&str]) {
        let inputs = labels
            .iter()
            .enumerate()
            .map(|(i, label)| CaptureInput {
                label: label.to_string(),
                url: format!("Capture:hw:1,0/1/25/2?id=input{}", i),
            })
            .collect();
        self.inputs.lock().insert(host.to_string(), inputs);
    }

    pub(crate) fn state(&self, host: &str) -> SyncState {
        self.players.lock().get(host).cloned().unwrap_or_default()
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    pub(crate) fn mutations(&self) -> Vec<Call> {
        self.calls().into_iter().filter(Call::is_mutation).collect()
    }

    /// Most `RemoveSlave` requests ever in flight at once against `master`.
    pub(crate) fn peak_removals_on(&self, master: &str) -> usize {
        self.removals
            .lock()
            .peak_per_master
            .get(master)
            .copied()
            .unwrap_or_default()
    }

    /// Most `RemoveSlave` requests ever in flight at once across the fleet.
    pub(crate) fn peak_removals(&self) -> usize {
        self.removals.lock().peak_total
    }

    pub(crate) fn clear_calls(&self) {
        self.calls.lock().clear();
    }

    fn record(&self, call: Call) {
        self.calls.lock().push(call);
    }

    fn check_reachable(&self, host: &str) -> GatewayResult<()> {
        if self.unreachable.lock().contains(host) {
            return Err(unreachable(host));
        }
        Ok(())
    }
}

#[async_trait]
impl BluosGrouping for SimulatedFleet {
    async fn sync_status(&self, host: &str) -> GatewayResult<SyncState> {
        self.record(Call::SyncStatus(host.to_string()));
        self.check_reachable(host)?;
        Ok(self.state(host))
    }

    async fn add_slave(&self, master: &str, slave: &str) -> GatewayResult<()> {
        self.record(Call::AddSlave {
            master: master.to_string(),
            slave: slave.to_string(),
        });
        self.check_reachable(master)?;
        self.check_reachable(slave)?;
        if self.failing_adds.lock().contains(slave) {
            return Err(GatewayError::HttpStatus(500, format!("{} refused", slave)));
        }
        self.link(master, slave);
        Ok(())
    }

    async fn remove_slave(&self, master: &str, slave: &str) -> GatewayResult<()> {
        self.record(Call::RemoveSlave {
            master: master.to_string(),
            slave: slave.to_string(),
        });
        // Stay in flight across a yield so overlapping requests can be observed.
        self.removals.lock().enter(master);
        tokio::task::yield_now().await;
        self.removals.lock().leave(master);
        self.check_reachable(master)?;

        let mut players = self.players.lock();
        if let Some(state) = players.get_mut(master) {
            state.slaves.retain(|s| s != slave);
            state.group = group_name(master, &state.slaves);
        }
        // The master tells the follower to leave, whether or not it still listed it.
        if let Some(state) = players.get_mut(slave) {
            if state.master.as_deref() == Some(master) {
                state.master = None;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl BluosPlayback for SimulatedFleet {
    async fn status(&self, host: &str) -> GatewayResult<PlaybackStatus> {
        self.record(Call::Status(host.to_string()));
        self.check_reachable(host)?;
        Ok(PlaybackStatus {
            state: self.playback.lock().get(host).cloned(),
        })
    }

    async fn browse_inputs(&self, host: &str) -> GatewayResult<Vec<CaptureInput>> {
        self.record(Call::BrowseInputs(host.to_string()));
        self.check_reachable(host)?;
        if self.failing_browse.lock().contains(host) {
            return Err(GatewayError::Parse("RadioBrowse: truncated body".to_string()));
        }
        Ok(self.inputs.lock().get(host).cloned().unwrap_or_default())
    }

    async fn play_url(&self, host: &str, url: &str) -> GatewayResult<()> {
        self.record(Call::Play {
            host: host.to_string(),
            url: url.to_string(),
        });
        self.check_reachable(host)?;
        self.playback
            .lock()
            .insert(host.to_string(), "play".to_string());
        Ok(())
    }
}
