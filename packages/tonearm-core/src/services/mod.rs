//! Application services layer.
//!
//! This module contains the business logic that orchestrates between the
//! API layer and the BluOS players (bluos/).

pub(crate) mod topology_coordinator;
pub mod topology_plan;

#[cfg(test)]
pub(crate) mod test_fleet;

pub use topology_coordinator::{GroupResult, TopologyCoordinator, UngroupResult, UngroupStatus};
pub use topology_plan::{DeviceFailure, Edge, UnlinkOutcome};
