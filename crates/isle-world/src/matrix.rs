//! The island travel-time matrix.

use isle_core::{HouseId, IsleError, IsleResult};

/// Immutable N×N table of travel durations between houses, 1-indexed to
/// match the input numbering.
///
/// `duration(a, b)` is `None` (unreachable), `0` (only on the diagonal), or a
/// positive duration in abstract time units.  Symmetry is not assumed.
#[derive(Debug, Clone)]
pub struct TravelMatrix {
    n: u32,
    cells: Vec<Option<u32>>,
}

impl TravelMatrix {
    /// Create an `n`×`n` matrix with every off-diagonal pair unreachable and
    /// the diagonal zero.
    pub fn new(n: u32) -> Self {
        let mut cells = vec![None; (n as usize) * (n as usize)];
        for i in 0..n as usize {
            cells[i * n as usize + i] = Some(0);
        }
        Self { n, cells }
    }

    fn idx(&self, from: HouseId, to: HouseId) -> Option<usize> {
        if from.0 == 0 || from.0 > self.n || to.0 == 0 || to.0 > self.n {
            return None;
        }
        Some(((from.0 - 1) as usize) * (self.n as usize) + (to.0 - 1) as usize)
    }

    /// Set the travel duration from `from` to `to` (one direction only).
    pub fn set(&mut self, from: HouseId, to: HouseId, duration: Option<u32>) -> IsleResult<()> {
        let i = self
            .idx(from, to)
            .ok_or(IsleError::HouseNotFound(if from.0 == 0 || from.0 > self.n {
                from
            } else {
                to
            }))?;
        self.cells[i] = duration;
        Ok(())
    }

    /// Travel duration from `from` to `to`; `None` when unreachable or when
    /// either ID is out of range.
    #[inline]
    pub fn duration(&self, from: HouseId, to: HouseId) -> Option<u32> {
        self.cells[self.idx(from, to)?]
    }

    #[inline]
    pub fn house_count(&self) -> u32 {
        self.n
    }

    /// All house IDs covered by the matrix, ascending.
    pub fn houses(&self) -> impl Iterator<Item = HouseId> {
        (1..=self.n).map(HouseId)
    }
}
