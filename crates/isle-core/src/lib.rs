//! `isle-core` — foundational types for the islander-sim workspace.
//!
//! This crate is a dependency of every other `isle-*` crate.  It intentionally
//! has no `isle-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module    | Contents                                       |
//! |-----------|------------------------------------------------|
//! | [`ids`]   | `AgentId`, `HouseId`                           |
//! | [`time`]  | `SimTime`, `SimConfig`                         |
//! | [`rng`]   | `AgentRng` (per-agent)                         |
//! | [`error`] | `IsleError`, `IsleResult`                      |

pub mod error;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{IsleError, IsleResult};
pub use ids::{AgentId, HouseId};
pub use rng::AgentRng;
pub use time::{SimConfig, SimTime};
