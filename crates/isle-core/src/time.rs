//! Simulation time model.
//!
//! # Design
//!
//! Time is a monotonically increasing `SimTime` counter in abstract travel
//! units — the same units the geography matrix expresses travel durations in.
//! Using an integer as the canonical time unit keeps all event arithmetic
//! exact (no floating-point drift) and comparisons O(1).
//!
//! There is no tick loop: the clock jumps from one occupied timestamp to the
//! next, driven by the event queue.

use std::fmt;

// ── SimTime ───────────────────────────────────────────────────────────────────

/// An absolute simulation timestamp.
///
/// Stored as `u64`; travel durations from the geography matrix are added to
/// it to produce arrival times.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimTime(pub u64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0);

    /// Return the timestamp `n` units after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> SimTime {
        SimTime(self.0 + n)
    }

    /// Units elapsed from `earlier` to `self`.
    ///
    /// # Panics
    /// Panics in debug mode if `earlier > self`.
    #[inline]
    pub fn since(self, earlier: SimTime) -> u64 {
        self.0 - earlier.0
    }
}

impl std::ops::Add<u64> for SimTime {
    type Output = SimTime;
    #[inline]
    fn add(self, rhs: u64) -> SimTime {
        SimTime(self.0 + rhs)
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Simulation horizon.  No trip whose arrival would land past this time
    /// is ever started, and the run stops once the queue holds nothing due
    /// at or before it.
    pub max_time: SimTime,
}

impl SimConfig {
    pub fn new(seed: u64, max_time: u64) -> Self {
        Self {
            seed,
            max_time: SimTime(max_time),
        }
    }
}
