//! Strongly typed, zero-cost identifier wrappers.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as map keys and sorted
//! collection elements without ceremony.  Input files number houses from 1,
//! and an agent's ID equals its original home house ID, so both wrappers share
//! the same numbering space at simulation start.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID" — equivalent to `u32::MAX`.
            pub const INVALID: $name = $name(<$inner>::MAX);
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$inner> for $name {
            #[inline(always)]
            fn from(n: $inner) -> $name {
                $name(n)
            }
        }
    };
}

typed_id! {
    /// Identifier of a mobile islander.  Equal to its original home house ID.
    pub struct AgentId(u32);
}

typed_id! {
    /// Identifier of a house (1-based, as numbered in the input files).
    pub struct HouseId(u32);
}

impl AgentId {
    /// The house an agent originally owned shares its number.
    #[inline]
    pub fn original_house(self) -> HouseId {
        HouseId(self.0)
    }
}

impl HouseId {
    /// The agent that originally owned this house shares its number.
    #[inline]
    pub fn original_owner(self) -> AgentId {
        AgentId(self.0)
    }
}
