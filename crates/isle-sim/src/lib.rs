//! `isle-sim` — the discrete-event scheduler for islander-sim.
//!
//! # Design
//!
//! The [`Environment`] owns everything a run needs: the
//! [`World`][isle_world::World], per-agent RNG streams, the time-indexed
//! [`EventQueue`], and the growing log.  Its `run` loop jumps the clock from
//! one occupied timestamp to the next and executes each same-time batch under
//! a fixed phase order (see [`env`]), which is what makes runs byte-for-byte
//! reproducible for a given seed.
//!
//! | Module       | Contents                                 |
//! |--------------|------------------------------------------|
//! | [`env`]      | `Environment`, the batch protocol        |
//! | [`builder`]  | `EnvironmentBuilder`                     |
//! | [`queue`]    | `EventQueue`                             |
//! | [`observer`] | `SimObserver`, `NoopObserver`            |
//! | [`error`]    | `SimError`                               |

pub mod builder;
pub mod env;
pub mod error;
pub mod observer;
pub mod queue;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use builder::EnvironmentBuilder;
pub use env::Environment;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use queue::EventQueue;
