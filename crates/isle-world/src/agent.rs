//! Mobile islanders and what they know about each other.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;
use serde::Serialize;

use isle_core::{AgentId, AgentRng, HouseId, SimTime};

use crate::{ColorIndex, House, TravelMatrix};

// ── Knowledge ─────────────────────────────────────────────────────────────────

/// What one agent most recently observed about another.
///
/// Last-writer-wins: a newer observation overwrites the old record entirely;
/// no history is kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Knowledge {
    pub pet: String,
    pub house: HouseId,
    pub location: HouseId,
    #[serde(rename = "t")]
    pub time: SimTime,
}

// ── MobilityState ─────────────────────────────────────────────────────────────

/// Where an agent is in its travel cycle.  Derived from `location`, `home`,
/// and the travelling flag; never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MobilityState {
    /// At its home house, free to pick a new excursion.
    AtHome,
    /// En route; `location` still names the origin and a FinishTrip is queued.
    Travelling,
    /// At some house other than home; the next planned trip returns home.
    Visiting,
}

// ── Agent ─────────────────────────────────────────────────────────────────────

/// A mobile islander.
///
/// Identity attributes are fixed except `pet` (rotated by pet exchanges) and
/// `home` (rotated by house exchanges).  `location` names the house the agent
/// is physically in, or the origin while a trip is in flight.
#[derive(Debug, Clone)]
pub struct Agent {
    pub id: AgentId,
    pub nationality: String,
    pub drink: String,
    pub cigarette: String,
    pub pet: String,

    /// The house the agent currently calls home.  Starts equal to `id`'s
    /// house; reassigned by house exchanges.
    pub home: HouseId,
    pub location: HouseId,
    pub travelling: bool,

    /// Route weight per color index (see [`ColorIndex`]); absent = 0.
    pub route_weights: FxHashMap<u32, u32>,
    /// Percentage propensity to join a house exchange, 0–100.
    pub house_exchange_pct: u32,
    /// Percentage propensity to join a pet exchange, 0–100.
    pub pet_exchange_pct: u32,

    /// Most recent observation per other agent.  Always contains `self.id`.
    pub knowledge: FxHashMap<AgentId, Knowledge>,
}

impl Agent {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: AgentId,
        nationality: impl Into<String>,
        drink: impl Into<String>,
        cigarette: impl Into<String>,
        pet: impl Into<String>,
        home: HouseId,
        route_weights: FxHashMap<u32, u32>,
        house_exchange_pct: u32,
        pet_exchange_pct: u32,
    ) -> Self {
        let mut agent = Self {
            id,
            nationality: nationality.into(),
            drink: drink.into(),
            cigarette: cigarette.into(),
            pet: pet.into(),
            home,
            location: home,
            travelling: false,
            route_weights,
            house_exchange_pct,
            pet_exchange_pct,
            knowledge: FxHashMap::default(),
        };
        // Every agent knows itself from the start.
        agent.record_self(SimTime::ZERO);
        agent
    }

    /// The agent's exchangeable attributes as seen at `time`.
    pub fn snapshot(&self, time: SimTime) -> Knowledge {
        Knowledge {
            pet: self.pet.clone(),
            house: self.home,
            location: self.location,
            time,
        }
    }

    /// Overwrite this agent's record of `other` with a fresh observation.
    pub fn observe(&mut self, other: &Agent, time: SimTime) {
        self.knowledge.insert(other.id, other.snapshot(time));
    }

    /// Refresh the agent's record of itself (after its own attributes change).
    pub fn record_self(&mut self, time: SimTime) {
        let snapshot = self.snapshot(time);
        self.knowledge.insert(self.id, snapshot);
    }

    #[inline]
    pub fn state(&self) -> MobilityState {
        if self.travelling {
            MobilityState::Travelling
        } else if self.location == self.home {
            MobilityState::AtHome
        } else {
            MobilityState::Visiting
        }
    }

    // ── Destination choice ────────────────────────────────────────────────

    /// Pick the next trip destination by weighted random choice.
    ///
    /// Candidates are every reachable house other than the current location.
    /// Each candidate is weighted by the agent's route weight for the
    /// destination's color; a zero-total weight set degrades to a uniform
    /// pick.  Otherwise a cumulative-weight roulette runs: a continuous
    /// uniform pointer over the weight sum selects the first candidate whose
    /// cumulative weight reaches it, so a boundary hit favors the earlier
    /// candidate.
    ///
    /// Returns `None` when no house is reachable from the current location.
    pub fn choose_destination(
        &self,
        matrix: &TravelMatrix,
        houses: &BTreeMap<HouseId, House>,
        colors: &ColorIndex,
        rng: &mut AgentRng,
    ) -> Option<HouseId> {
        let candidates: Vec<HouseId> = matrix
            .houses()
            .filter(|&h| h != self.location && matrix.duration(self.location, h).is_some())
            .collect();
        if candidates.is_empty() {
            return None;
        }

        let weights: Vec<u32> = candidates
            .iter()
            .map(|h| {
                let index = houses
                    .get(h)
                    .map(|house| colors.index_of(&house.color))
                    .unwrap_or(0);
                self.route_weights.get(&index).copied().unwrap_or(0)
            })
            .collect();

        let total: u32 = weights.iter().sum();
        if total == 0 {
            return rng.choose(&candidates).copied();
        }

        let pointer = rng.roulette(total as f64);
        let mut cumulative = 0.0;
        for (house, weight) in candidates.iter().zip(&weights) {
            cumulative += *weight as f64;
            if pointer <= cumulative {
                return Some(*house);
            }
        }
        // Rounding can push the pointer past the last cumulative sum.
        candidates.last().copied()
    }
}
