//! Trip events: departure and arrival.

use isle_core::{AgentId, HouseId, IsleResult, SimTime};
use isle_world::{AgentRngs, World};

use crate::exchange::{HouseExchange, detect_house_exchange};

// ── StartTrip ─────────────────────────────────────────────────────────────────

/// An agent departs its current house toward `target`.
///
/// A start fails silently — no state change, no follow-up event — when the
/// agent is already travelling, the target equals or is unreachable from the
/// current location, or the arrival would land past the horizon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartTrip {
    pub time: SimTime,
    pub agent: AgentId,
    pub target: HouseId,

    /// The house departed from, recorded when the event runs (for logging).
    pub origin: Option<HouseId>,
}

impl StartTrip {
    pub fn new(time: SimTime, agent: AgentId, target: HouseId) -> Self {
        Self {
            time,
            agent,
            target,
            origin: None,
        }
    }

    /// Execute the departure.
    ///
    /// On success the agent leaves its house, is marked travelling, and the
    /// matching [`FinishTrip`] is returned for the scheduler to enqueue.
    pub fn run(&mut self, world: &mut World, max_time: SimTime) -> IsleResult<Option<FinishTrip>> {
        let agent = world.agent(self.agent)?;
        if agent.travelling {
            return Ok(None);
        }
        let origin = agent.location;
        if self.target == origin {
            return Ok(None);
        }

        let Some(duration) = world.matrix.duration(origin, self.target) else {
            tracing::debug!(
                agent = self.agent.0,
                target = self.target.0,
                "trip target unreachable, staying put"
            );
            return Ok(None);
        };

        let arrival = self.time + duration as u64;
        if arrival > max_time {
            tracing::debug!(
                agent = self.agent.0,
                target = self.target.0,
                arrival = arrival.0,
                "arrival past horizon, trip not started"
            );
            return Ok(None);
        }

        // All checks passed: now, and only now, mutate.
        world.house_mut(origin)?.leave(self.agent);
        world.agent_mut(self.agent)?.travelling = true;
        self.origin = Some(origin);

        Ok(Some(FinishTrip::new(arrival, self.agent, self.target)))
    }

    /// Log fields: nationality, origin house, destination house.
    pub fn log_fields(&self, world: &World) -> IsleResult<Vec<String>> {
        let agent = world.agent(self.agent)?;
        let origin = self.origin.unwrap_or(agent.location);
        Ok(vec![
            agent.nationality.clone(),
            origin.0.to_string(),
            self.target.0.to_string(),
        ])
    }
}

// ── FinishTrip ────────────────────────────────────────────────────────────────

/// An agent arrives at `target`.
///
/// Arrival always succeeds in the mobility sense; the `success` flag records
/// whether the house owner was present — the gate for knowledge exchange and
/// a possible house exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinishTrip {
    pub time: SimTime,
    pub agent: AgentId,
    pub target: HouseId,

    /// Derived at execution: owner was present at arrival.
    pub success: bool,
}

/// Everything a [`FinishTrip`] produced, for the scheduler to log and for
/// observers to report.
#[derive(Debug)]
pub struct Arrival {
    pub success: bool,
    /// Other present agents the arriver exchanged knowledge with.
    pub met: Vec<AgentId>,
    /// A house exchange that fired (and already ran) on this arrival.
    pub house_exchange: Option<HouseExchange>,
}

impl FinishTrip {
    pub fn new(time: SimTime, agent: AgentId, target: HouseId) -> Self {
        Self {
            time,
            agent,
            target,
            success: false,
        }
    }

    /// `true` when this arrival brings the agent back to its current home.
    /// Same-timestamp arrivals are ordered on this flag.
    pub fn is_return_home(&self, world: &World) -> bool {
        world
            .agent(self.agent)
            .map(|a| a.home == self.target)
            .unwrap_or(false)
    }

    /// Execute the arrival.
    ///
    /// The agent enters the target house.  If the owner is present, the
    /// arriver and every other present agent exchange knowledge records, and
    /// house-exchange detection runs (executing its event immediately so the
    /// scheduler only has to log it).
    pub fn run(&mut self, world: &mut World, rngs: &mut AgentRngs) -> IsleResult<Arrival> {
        {
            let agent = world.agent_mut(self.agent)?;
            agent.travelling = false;
            agent.location = self.target;
        }
        world.house_mut(self.target)?.enter(self.agent);

        self.success = world.house(self.target)?.owner_present();
        let mut met = Vec::new();
        let mut house_exchange = None;

        if self.success {
            let present = world.present_sorted(self.target)?;
            for other in present.into_iter().filter(|&o| o != self.agent) {
                world.observe_each_other(self.agent, other, self.time)?;
                met.push(other);
            }

            if let Some(mut exchange) = detect_house_exchange(world, self.target, self.time, rngs)?
            {
                exchange.run(world)?;
                house_exchange = Some(exchange);
            }
        }

        Ok(Arrival {
            success: self.success,
            met,
            house_exchange,
        })
    }

    /// Log fields: nationality and destination, with the success flag
    /// prepended only when the destination is not the agent's home.
    pub fn log_fields(&self, world: &World) -> IsleResult<Vec<String>> {
        let agent = world.agent(self.agent)?;
        if self.target == agent.home {
            Ok(vec![agent.nationality.clone(), self.target.0.to_string()])
        } else {
            Ok(vec![
                (self.success as u8).to_string(),
                agent.nationality.clone(),
                self.target.0.to_string(),
            ])
        }
    }
}
