//! Plain log rows produced by the scheduler for external writers.

use std::fmt;

use isle_core::SimTime;

/// The wire tag of each event kind.
///
/// `ChangeHouse` renders as `changeHouse` — the casing downstream log
/// consumers key on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    StartTrip,
    FinishTrip,
    ChangePet,
    ChangeHouse,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            EventKind::StartTrip => "StartTrip",
            EventKind::FinishTrip => "FinishTrip",
            EventKind::ChangePet => "ChangePet",
            EventKind::ChangeHouse => "changeHouse",
        };
        f.write_str(tag)
    }
}

/// One ordered entry of the simulation log.
///
/// `seq` increases monotonically across the whole run; `fields` are the
/// kind-specific payload already rendered to strings, in wire order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub seq: u64,
    pub time: SimTime,
    pub kind: EventKind,
    pub fields: Vec<String>,
}
