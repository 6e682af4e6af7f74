//! Rotation exchanges of pets and houses among co-located agents.
//!
//! Both exchange kinds share the same shape: a participant list sorted
//! ascending and a parallel list of post-exchange values, where participant
//! *i* receives participant *(i+1) mod k*'s current value.  A rotation, not a
//! pairwise swap — it permutes values and generalizes to any group size ≥ 2.

use isle_core::{AgentId, HouseId, IsleResult, SimTime};
use isle_world::{AgentRngs, World};

use crate::EventError;

/// Rotate `values` left by one: participant *i* gets value *(i+1) mod k*.
fn rotate_left<T: Clone>(values: &[T]) -> Vec<T> {
    let mut rotated: Vec<T> = values[1..].to_vec();
    rotated.push(values[0].clone());
    rotated
}

fn validate(participants: usize, values: usize) -> Result<(), EventError> {
    if participants < 2 {
        return Err(EventError::TooFewParticipants { got: participants });
    }
    if participants != values {
        return Err(EventError::RotationMismatch {
            participants,
            values,
        });
    }
    Ok(())
}

// ── PetExchange ───────────────────────────────────────────────────────────────

/// Co-located agents rotate their pets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PetExchange {
    pub time: SimTime,
    /// Ascending agent IDs.
    pub participants: Vec<AgentId>,
    /// Post-exchange pet of each participant, same order.
    pub pets_after: Vec<String>,
}

impl PetExchange {
    pub fn new(
        time: SimTime,
        participants: Vec<AgentId>,
        pets_after: Vec<String>,
    ) -> Result<Self, EventError> {
        validate(participants.len(), pets_after.len())?;
        Ok(Self {
            time,
            participants,
            pets_after,
        })
    }

    /// Apply the rotation.
    ///
    /// A silent no-op (returns `false`) when the owner of the house the
    /// participants stand in is no longer present by execution time.
    pub fn run(&mut self, world: &mut World) -> IsleResult<bool> {
        let house_id = world.agent(self.participants[0])?.location;
        if !world.house(house_id)?.owner_present() {
            return Ok(false);
        }

        for (&agent_id, new_pet) in self.participants.iter().zip(&self.pets_after) {
            let agent = world.agent_mut(agent_id)?;
            agent.pet = new_pet.clone();
            agent.record_self(self.time);
        }

        // Everyone present, participant or not, witnesses the new state.
        let witnesses = world.present_sorted(house_id)?;
        for witness in witnesses {
            for &participant in &self.participants {
                world.witness(witness, participant, self.time)?;
            }
        }
        Ok(true)
    }

    /// Log fields: participant count, nationalities, post-exchange pets.
    pub fn log_fields(&self, world: &World) -> IsleResult<Vec<String>> {
        let mut fields = vec![self.participants.len().to_string()];
        for &id in &self.participants {
            fields.push(world.agent(id)?.nationality.clone());
        }
        fields.extend(self.pets_after.iter().cloned());
        Ok(fields)
    }
}

// ── HouseExchange ─────────────────────────────────────────────────────────────

/// Co-located agents rotate home-house ownership.
///
/// Executing this reassigns both each participant's `home` and each rotated
/// house's `owner`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HouseExchange {
    pub time: SimTime,
    /// Ascending agent IDs.
    pub participants: Vec<AgentId>,
    /// Post-exchange home of each participant, same order.
    pub homes_after: Vec<HouseId>,
}

impl HouseExchange {
    pub fn new(
        time: SimTime,
        participants: Vec<AgentId>,
        homes_after: Vec<HouseId>,
    ) -> Result<Self, EventError> {
        validate(participants.len(), homes_after.len())?;
        Ok(Self {
            time,
            participants,
            homes_after,
        })
    }

    /// Apply the rotation to agent homes and house owners.
    ///
    /// A silent no-op (returns `false`) when the hosting house's owner is no
    /// longer present by execution time.
    pub fn run(&mut self, world: &mut World) -> IsleResult<bool> {
        let house_id = world.agent(self.participants[0])?.location;
        if !world.house(house_id)?.owner_present() {
            return Ok(false);
        }

        for (&agent_id, &new_home) in self.participants.iter().zip(&self.homes_after) {
            let agent = world.agent_mut(agent_id)?;
            agent.home = new_home;
            agent.record_self(self.time);
        }
        for (&new_home, &new_owner) in self.homes_after.iter().zip(&self.participants) {
            world.house_mut(new_home)?.set_owner(new_owner);
        }

        let witnesses = world.present_sorted(house_id)?;
        for witness in witnesses {
            for &participant in &self.participants {
                world.witness(witness, participant, self.time)?;
            }
        }
        Ok(true)
    }

    /// Log fields: participant count, nationalities, post-exchange house IDs.
    pub fn log_fields(&self, world: &World) -> IsleResult<Vec<String>> {
        let mut fields = vec![self.participants.len().to_string()];
        for &id in &self.participants {
            fields.push(world.agent(id)?.nationality.clone());
        }
        fields.extend(self.homes_after.iter().map(|h| h.0.to_string()));
        Ok(fields)
    }
}

// ── Detection ─────────────────────────────────────────────────────────────────

/// One pass over every house, building pet-exchange events.
///
/// For each house whose owner is present, the agents there are sampled (in
/// ascending ID order, each against its own pet-exchange propensity); a
/// qualifying group of ≥ 2 forms one [`PetExchange`] with pets rotated among
/// them.  Houses are visited in ascending ID order, so the returned events
/// are deterministic for a given seed.
pub fn detect_pet_exchanges(
    world: &World,
    time: SimTime,
    rngs: &mut AgentRngs,
) -> IsleResult<Vec<PetExchange>> {
    let mut events = Vec::new();

    for house in world.houses.values() {
        if !house.owner_present() || house.present_count() < 2 {
            continue;
        }

        let mut participants = Vec::new();
        for agent_id in house.present() {
            let propensity = world.agent(agent_id)?.pet_exchange_pct;
            if rngs.get_mut(agent_id).roll_percent() <= propensity {
                participants.push(agent_id);
            }
        }
        if participants.len() < 2 {
            continue;
        }

        let pets: Vec<String> = participants
            .iter()
            .map(|&id| world.agent(id).map(|a| a.pet.clone()))
            .collect::<IsleResult<_>>()?;
        let pets_after = rotate_left(&pets);

        if let Ok(exchange) = PetExchange::new(time, participants, pets_after) {
            events.push(exchange);
        }
    }

    Ok(events)
}

// ── House-exchange detection ──────────────────────────────────────────────────

/// Sample the agents present at `house` against their house-exchange
/// propensities and build the resulting rotation event.
///
/// Runs on a successful arrival (owner present).  Each present agent rolls
/// its own RNG once; those whose roll lands within their propensity join,
/// and a group of ≥ 2 forms one event with homes rotated among them.
pub fn detect_house_exchange(
    world: &World,
    house: HouseId,
    time: SimTime,
    rngs: &mut AgentRngs,
) -> IsleResult<Option<HouseExchange>> {
    let present = world.present_sorted(house)?;
    if present.len() < 2 {
        return Ok(None);
    }

    let mut participants = Vec::new();
    for agent_id in present {
        let propensity = world.agent(agent_id)?.house_exchange_pct;
        if rngs.get_mut(agent_id).roll_percent() <= propensity {
            participants.push(agent_id);
        }
    }
    if participants.len() < 2 {
        return Ok(None);
    }

    let homes: Vec<HouseId> = participants
        .iter()
        .map(|&id| world.agent(id).map(|a| a.home))
        .collect::<IsleResult<_>>()?;
    let homes_after = rotate_left(&homes);

    match HouseExchange::new(time, participants, homes_after) {
        Ok(exchange) => Ok(Some(exchange)),
        Err(_) => Ok(None),
    }
}
