//! Mapping from house colors to route-weight indices.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;

use isle_core::HouseId;

use crate::House;

/// Maps each house color to the 1-based position of a house with that color
/// in ascending house-ID order.  A duplicated color keeps the *last*
/// position's index.
///
/// Agents' route-weight tables are keyed by these indices: an agent's weight
/// for a destination is `route_weights[color_index(dest.color)]`.
#[derive(Debug, Clone, Default)]
pub struct ColorIndex {
    map: FxHashMap<String, u32>,
}

impl ColorIndex {
    /// Build the index from the full house map.
    pub fn build(houses: &BTreeMap<HouseId, House>) -> Self {
        let mut map = FxHashMap::default();
        for (pos, house) in houses.values().enumerate() {
            map.insert(house.color.clone(), pos as u32 + 1);
        }
        Self { map }
    }

    /// Index for `color`, or `0` for colors no house carries.  Weight tables
    /// have no entry at index 0, so unknown colors weigh nothing.
    #[inline]
    pub fn index_of(&self, color: &str) -> u32 {
        self.map.get(color).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
