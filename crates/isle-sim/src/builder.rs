//! Fluent construction of an [`Environment`].

use isle_core::{AgentId, SimConfig, SimTime};
use isle_event::StartTrip;
use isle_world::{AgentRngs, World};

use crate::env::Environment;
use crate::error::{SimError, SimResult};
use crate::queue::EventQueue;

/// Builds an [`Environment`] from a config and a populated world.
///
/// By default every agent gets an initial departure queued at time zero;
/// tests that want to stage the queue by hand turn that off with
/// [`seed_initial_trips(false)`][EnvironmentBuilder::seed_initial_trips].
pub struct EnvironmentBuilder {
    config: SimConfig,
    world: Option<World>,
    seed_initial_trips: bool,
}

impl EnvironmentBuilder {
    pub fn new(config: SimConfig) -> Self {
        Self {
            config,
            world: None,
            seed_initial_trips: true,
        }
    }

    pub fn world(mut self, world: World) -> Self {
        self.world = Some(world);
        self
    }

    pub fn seed_initial_trips(mut self, seed: bool) -> Self {
        self.seed_initial_trips = seed;
        self
    }

    /// Validate and assemble the environment.
    pub fn build(self) -> SimResult<Environment> {
        let world = self
            .world
            .ok_or_else(|| SimError::Setup("no world supplied".into()))?;
        if world.agent_count() == 0 {
            return Err(SimError::Setup("world has no agents".into()));
        }

        let rngs = AgentRngs::new(self.config.seed, world.agents.keys().copied());
        let mut env = Environment {
            config: self.config,
            world,
            rngs,
            queue: EventQueue::new(),
            time: SimTime::ZERO,
            log: Vec::new(),
            seq: 0,
        };

        if self.seed_initial_trips {
            let ids: Vec<AgentId> = env.world.agents.keys().copied().collect();
            for id in ids {
                let agent = env.world.agent(id)?;
                let choice = agent.choose_destination(
                    &env.world.matrix,
                    &env.world.houses,
                    &env.world.colors,
                    env.rngs.get_mut(id),
                );
                if let Some(target) = choice {
                    env.queue.push(StartTrip::new(SimTime::ZERO, id, target).into());
                }
            }
        }
        Ok(env)
    }
}
