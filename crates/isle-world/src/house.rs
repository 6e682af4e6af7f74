//! A stationary location with an owner and an occupancy set.

use std::collections::BTreeSet;

use isle_core::{AgentId, HouseId};

/// A house on the island.
///
/// Ownership starts with the same-numbered agent and may change through a
/// house exchange; the occupancy set mutates as trips start and finish.
/// Houses are never destroyed.
#[derive(Debug, Clone)]
pub struct House {
    pub id: HouseId,

    /// Color tag used for route weighting (see `ColorIndex`).
    pub color: String,

    /// The current owner.  Exchanges at this house require the owner to be
    /// physically present.
    pub owner: AgentId,

    /// Agents physically present, in ascending ID order.
    present: BTreeSet<AgentId>,
}

impl House {
    pub fn new(id: HouseId, color: impl Into<String>, owner: AgentId) -> Self {
        Self {
            id,
            color: color.into(),
            owner,
            present: BTreeSet::new(),
        }
    }

    /// Record `agent` as physically present.
    pub fn enter(&mut self, agent: AgentId) {
        self.present.insert(agent);
    }

    /// Remove `agent` from the present-set.  Absent agents are ignored.
    pub fn leave(&mut self, agent: AgentId) {
        self.present.remove(&agent);
    }

    pub fn set_owner(&mut self, owner: AgentId) {
        self.owner = owner;
    }

    /// `true` when the current owner is physically present — the gate for
    /// every knowledge or pet/house exchange at this house.
    #[inline]
    pub fn owner_present(&self) -> bool {
        self.present.contains(&self.owner)
    }

    #[inline]
    pub fn is_present(&self, agent: AgentId) -> bool {
        self.present.contains(&agent)
    }

    /// Present agents in ascending ID order.
    pub fn present(&self) -> impl Iterator<Item = AgentId> + '_ {
        self.present.iter().copied()
    }

    pub fn present_count(&self) -> usize {
        self.present.len()
    }
}
