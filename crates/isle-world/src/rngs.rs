//! Per-agent deterministic RNG collection.
//!
//! Kept separate from [`World`][crate::World] so the event-execution code can
//! hold `&mut AgentRngs` and `&mut World` simultaneously without fighting the
//! borrow checker.

use rustc_hash::FxHashMap;

use isle_core::{AgentId, AgentRng};

/// One [`AgentRng`] per agent, seeded from the run's global seed.
///
/// Each agent's draws come from its own stream, so the result of one agent's
/// destination choice never shifts another agent's propensity rolls.
pub struct AgentRngs {
    global_seed: u64,
    inner: FxHashMap<AgentId, AgentRng>,
}

impl AgentRngs {
    /// Seed one RNG per agent ID.
    pub fn new(global_seed: u64, agents: impl IntoIterator<Item = AgentId>) -> Self {
        let inner = agents
            .into_iter()
            .map(|id| (id, AgentRng::new(global_seed, id)))
            .collect();
        Self { global_seed, inner }
    }

    /// Mutable reference to one agent's RNG.
    ///
    /// An ID not seen at construction gets a fresh deterministic stream, so
    /// this is total and never re-orders existing agents' draws.
    pub fn get_mut(&mut self, agent: AgentId) -> &mut AgentRng {
        self.inner
            .entry(agent)
            .or_insert_with(|| AgentRng::new(self.global_seed, agent))
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
