//! `isle-world` — the mutable island state: houses, agents, and geography.
//!
//! # What lives here
//!
//! | Module     | Contents                                              |
//! |------------|-------------------------------------------------------|
//! | [`house`]  | `House` — color, owner, present-set                   |
//! | [`agent`]  | `Agent`, `Knowledge`, `MobilityState`                 |
//! | [`matrix`] | `TravelMatrix` — immutable 1-indexed duration table   |
//! | [`colors`] | `ColorIndex` — house color → route-weight index       |
//! | [`rngs`]   | `AgentRngs` — per-agent deterministic RNG collection  |
//! | [`world`]  | `World` — owns all of the above except the RNGs       |
//!
//! Agents and houses live in `BTreeMap`s: the exchange-detection pass and
//! every present-set sampling step are specified over ascending IDs, so
//! deterministic iteration order is load-bearing, not cosmetic.

pub mod agent;
pub mod colors;
pub mod house;
pub mod matrix;
pub mod rngs;
pub mod world;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use agent::{Agent, Knowledge, MobilityState};
pub use colors::ColorIndex;
pub use house::House;
pub use matrix::TravelMatrix;
pub use rngs::AgentRngs;
pub use world::World;
