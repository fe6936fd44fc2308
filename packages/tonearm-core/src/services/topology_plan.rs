//! Pure planning for topology normalization.
//!
//! Turns the sync states reported by each player into the set of
//! master/follower edges that must be removed, without doing any I/O.
//! Either side of an edge may be the only one still reporting it, so edges
//! are collected from both sides and de-duplicated before anything is sent.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::bluos::types::SyncState;

/// A player that could not be queried or mutated, and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceFailure {
    /// Address of the failing player.
    pub host: String,
    /// Human-readable error.
    pub error: String,
}

impl DeviceFailure {
    pub fn new(host: impl Into<String>, error: impl ToString) -> Self {
        Self {
            host: host.into(),
            error: error.to_string(),
        }
    }
}

/// A follower → master relation, owned by the master.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Edge {
    pub master: String,
    pub follower: String,
}

impl Edge {
    fn new(master: &str, follower: &str) -> Self {
        Self {
            master: master.to_string(),
            follower: follower.to_string(),
        }
    }
}

/// What one player's sync state says has to be undone to make it standalone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnlinkOutcome {
    /// Already standalone.
    NoOp,
    /// Follows `master`; the master must release it.
    RemovedAsFollower { master: String },
    /// Leads `followers`; it must release each of them.
    RemovedAsMaster { followers: Vec<String> },
    /// Middle of a chain: follows `master` and leads `followers`.
    RemovedAsBoth {
        master: String,
        followers: Vec<String>,
    },
}

impl UnlinkOutcome {
    /// Evaluates a player's reported sync state.
    ///
    /// Self-references (a player naming itself as master or follower) are
    /// dropped; no request could undo them.
    pub fn evaluate(host: &str, sync: &SyncState) -> Self {
        let master = sync.master.clone().filter(|m| m != host);
        let followers: Vec<String> = sync
            .slaves
            .iter()
            .filter(|f| f.as_str() != host)
            .cloned()
            .collect();

        match (master, followers.is_empty()) {
            (None, true) => Self::NoOp,
            (Some(master), true) => Self::RemovedAsFollower { master },
            (None, false) => Self::RemovedAsMaster { followers },
            (Some(master), false) => Self::RemovedAsBoth { master, followers },
        }
    }

    /// Returns the edges this outcome asks to remove, seen from `host`.
    pub fn edges(&self, host: &str) -> Vec<Edge> {
        match self {
            Self::NoOp => Vec::new(),
            Self::RemovedAsFollower { master } => vec![Edge::new(master, host)],
            Self::RemovedAsMaster { followers } => {
                followers.iter().map(|f| Edge::new(host, f)).collect()
            }
            Self::RemovedAsBoth { master, followers } => {
                std::iter::once(Edge::new(master, host))
                    .chain(followers.iter().map(|f| Edge::new(host, f)))
                    .collect()
            }
        }
    }
}

/// Merges per-player outcomes into removals grouped by the owning master.
///
/// Every edge appears once even if both ends reported it. Masters and their
/// followers come out sorted so the request order is reproducible.
pub fn plan_removals<'a, I>(outcomes: I) -> BTreeMap<String, Vec<String>>
where
    I: IntoIterator<Item = (&'a str, &'a UnlinkOutcome)>,
{
    let edges: BTreeSet<Edge> = outcomes
        .into_iter()
        .flat_map(|(host, outcome)| outcome.edges(host))
        .collect();

    let mut by_master: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for edge in edges {
        by_master.entry(edge.master).or_default().push(edge.follower);
    }
    by_master
}
