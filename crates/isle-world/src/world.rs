//! The `World` container — all mutable island state in one owned value.

use std::collections::BTreeMap;

use isle_core::{AgentId, HouseId, IsleError, IsleResult, SimTime};

use crate::{Agent, ColorIndex, House, TravelMatrix};

/// Owns every agent, house, the travel matrix, and the color index.
///
/// Event execution mutates the world through `&mut World`; nothing here is
/// global or ambient.
pub struct World {
    pub agents: BTreeMap<AgentId, Agent>,
    pub houses: BTreeMap<HouseId, House>,
    pub matrix: TravelMatrix,
    pub colors: ColorIndex,
}

impl World {
    /// Assemble a world and place every house's owner inside it.
    ///
    /// Validates that each house's owner is a known agent and that the travel
    /// matrix covers every house ID.
    pub fn new(
        agents: BTreeMap<AgentId, Agent>,
        houses: BTreeMap<HouseId, House>,
        matrix: TravelMatrix,
    ) -> IsleResult<Self> {
        for house in houses.values() {
            if !agents.contains_key(&house.owner) {
                return Err(IsleError::Config(format!(
                    "house {} owned by unknown agent {}",
                    house.id, house.owner
                )));
            }
            if matrix.duration(house.id, house.id) != Some(0) {
                return Err(IsleError::Config(format!(
                    "travel matrix does not cover house {}",
                    house.id
                )));
            }
        }

        let colors = ColorIndex::build(&houses);
        let mut world = Self {
            agents,
            houses,
            matrix,
            colors,
        };

        // At simulation start every owner is present in its own house.
        let placements: Vec<(HouseId, AgentId)> = world
            .houses
            .values()
            .map(|h| (h.id, h.owner))
            .collect();
        for (house, owner) in placements {
            world.house_mut(house)?.enter(owner);
        }
        Ok(world)
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    pub fn agent(&self, id: AgentId) -> IsleResult<&Agent> {
        self.agents.get(&id).ok_or(IsleError::AgentNotFound(id))
    }

    pub fn agent_mut(&mut self, id: AgentId) -> IsleResult<&mut Agent> {
        self.agents.get_mut(&id).ok_or(IsleError::AgentNotFound(id))
    }

    pub fn house(&self, id: HouseId) -> IsleResult<&House> {
        self.houses.get(&id).ok_or(IsleError::HouseNotFound(id))
    }

    pub fn house_mut(&mut self, id: HouseId) -> IsleResult<&mut House> {
        self.houses.get_mut(&id).ok_or(IsleError::HouseNotFound(id))
    }

    pub fn agent_count(&self) -> usize {
        self.agents.len()
    }

    pub fn house_count(&self) -> usize {
        self.houses.len()
    }

    /// Agents present at `house`, ascending ID order.
    pub fn present_sorted(&self, house: HouseId) -> IsleResult<Vec<AgentId>> {
        Ok(self.house(house)?.present().collect())
    }

    // ── Knowledge propagation ─────────────────────────────────────────────

    /// Mutual observation: `a` and `b` each record the other's current
    /// attributes at `time`.  A no-op when `a == b`.
    pub fn observe_each_other(&mut self, a: AgentId, b: AgentId, time: SimTime) -> IsleResult<()> {
        if a == b {
            return Ok(());
        }
        let snap_a = self.agent(a)?.snapshot(time);
        let snap_b = self.agent(b)?.snapshot(time);
        self.agent_mut(a)?.knowledge.insert(b, snap_b);
        self.agent_mut(b)?.knowledge.insert(a, snap_a);
        Ok(())
    }

    /// One-way observation: `witness` records `subject`'s current attributes.
    pub fn witness(&mut self, witness: AgentId, subject: AgentId, time: SimTime) -> IsleResult<()> {
        if witness == subject {
            return Ok(());
        }
        let snap = self.agent(subject)?.snapshot(time);
        self.agent_mut(witness)?.knowledge.insert(subject, snap);
        Ok(())
    }
}
