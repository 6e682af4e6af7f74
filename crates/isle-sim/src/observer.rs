//! Observation hooks into a running simulation.

use isle_core::SimTime;
use isle_event::{EventKind, LogRecord};
use isle_world::Agent;

/// Callbacks the environment invokes as the run progresses.
///
/// All methods default to no-ops, so an observer only implements the hooks it
/// cares about.  Hooks fire synchronously inside the run loop; an observer
/// that blocks stalls the simulation.
pub trait SimObserver {
    /// The clock moved to a new timestamp.
    fn on_time_advance(&mut self, _time: SimTime) {}

    /// A log record was appended, in final sequence order.
    fn on_record(&mut self, _record: &LogRecord) {}

    /// An agent's knowledge map changed.  Fired once per updated party, with
    /// the agent's state *after* the update.
    fn on_knowledge_change(&mut self, _time: SimTime, _kind: EventKind, _agent: &Agent) {}

    /// The run loop finished, at the last timestamp processed.
    fn on_sim_end(&mut self, _final_time: SimTime) {}
}

/// Observer that ignores everything.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
