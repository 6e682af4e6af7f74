//! The `Event` sum type.

use isle_core::SimTime;

use crate::{FinishTrip, HouseExchange, PetExchange, StartTrip};
use crate::record::EventKind;

/// A queued, time-stamped unit of work.
///
/// The queue orders events by [`time`][Event::time] only; same-time ordering
/// is the batch protocol's job, so no further comparison is defined here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    StartTrip(StartTrip),
    FinishTrip(FinishTrip),
    ChangePet(PetExchange),
    ChangeHouse(HouseExchange),
}

impl Event {
    #[inline]
    pub fn time(&self) -> SimTime {
        match self {
            Event::StartTrip(e) => e.time,
            Event::FinishTrip(e) => e.time,
            Event::ChangePet(e) => e.time,
            Event::ChangeHouse(e) => e.time,
        }
    }

    #[inline]
    pub fn kind(&self) -> EventKind {
        match self {
            Event::StartTrip(_) => EventKind::StartTrip,
            Event::FinishTrip(_) => EventKind::FinishTrip,
            Event::ChangePet(_) => EventKind::ChangePet,
            Event::ChangeHouse(_) => EventKind::ChangeHouse,
        }
    }
}

impl From<StartTrip> for Event {
    fn from(e: StartTrip) -> Self {
        Event::StartTrip(e)
    }
}

impl From<FinishTrip> for Event {
    fn from(e: FinishTrip) -> Self {
        Event::FinishTrip(e)
    }
}

impl From<PetExchange> for Event {
    fn from(e: PetExchange) -> Self {
        Event::ChangePet(e)
    }
}

impl From<HouseExchange> for Event {
    fn from(e: HouseExchange) -> Self {
        Event::ChangeHouse(e)
    }
}
