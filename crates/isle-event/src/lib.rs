//! `isle-event` — the time-stamped units of work that drive the simulation.
//!
//! # Design
//!
//! Events are a tagged sum type with a shared `time` field and a per-variant
//! `run` method, not a trait-object hierarchy.  Execution mutates the
//! [`World`][isle_world::World] it is handed and *returns* any follow-up work
//! (a `FinishTrip` to enqueue, a `HouseExchange` that fired mid-batch) rather
//! than reaching back into the scheduler — the scheduler stays the only
//! component that touches the queue.
//!
//! | Module       | Contents                                          |
//! |--------------|---------------------------------------------------|
//! | [`event`]    | `Event` sum type                                  |
//! | [`trip`]     | `StartTrip`, `FinishTrip`, `Arrival`              |
//! | [`exchange`] | `PetExchange`, `HouseExchange`, house detection   |
//! | [`record`]   | `EventKind`, `LogRecord`                          |
//! | [`error`]    | `EventError`                                      |

pub mod error;
pub mod event;
pub mod exchange;
pub mod record;
pub mod trip;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::EventError;
pub use event::Event;
pub use exchange::{HouseExchange, PetExchange, detect_house_exchange, detect_pet_exchanges};
pub use record::{EventKind, LogRecord};
pub use trip::{Arrival, FinishTrip, StartTrip};
