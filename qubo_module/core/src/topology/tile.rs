//! Fully-connected rectangular tile
//!
//! Every slot of the tile is connected to every other slot, so the coupling
//! list is all pairs of slot indices.

use serde::{Deserialize, Serialize};

/// Dense index of a tile slot
pub type Slot = usize;

/// A rectangular patch of fully-connected variable slots
///
/// Slots are allocated as: one `left` then one `right` per row, one `top`
/// then one `bottom` per column, then the `internal` slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FullyConnectedTile {
    pub width: usize,
    pub height: usize,
    pub internal_bit_count: usize,
    pub left: Vec<Slot>,
    pub right: Vec<Slot>,
    pub top: Vec<Slot>,
    pub bottom: Vec<Slot>,
    pub internal: Vec<Slot>,
    pub var_count: usize,

    /// Every pair `(a, b)` with `a < b`, ordered by `a` then `b`
    pub coefficients: Vec<(Slot, Slot)>,
}

impl FullyConnectedTile {
    pub fn new(width: usize, height: usize, internal_bit_count: usize) -> Self {
        let mut next: Slot = 0;
        let mut alloc = || {
            let slot = next;
            next += 1;
            slot
        };

        let mut left = Vec::with_capacity(width);
        let mut right = Vec::with_capacity(width);
        for _ in 0..width {
            left.push(alloc());
            right.push(alloc());
        }

        let mut top = Vec::with_capacity(height);
        let mut bottom = Vec::with_capacity(height);
        for _ in 0..height {
            top.push(alloc());
            bottom.push(alloc());
        }

        let internal: Vec<Slot> = (0..internal_bit_count).map(|_| alloc()).collect();

        let var_count = 2 * width + 2 * height + internal_bit_count;
        let coefficients = (0..var_count)
            .flat_map(|a| (a + 1..var_count).map(move |b| (a, b)))
            .collect();

        Self {
            width,
            height,
            internal_bit_count,
            left,
            right,
            top,
            bottom,
            internal,
            var_count,
            coefficients,
        }
    }

    /// Slots on the tile boundary, in allocation order
    pub fn boundary(&self) -> impl Iterator<Item = Slot> + '_ {
        self.left
            .iter()
            .zip(&self.right)
            .flat_map(|(&l, &r)| [l, r])
            .chain(self.top.iter().zip(&self.bottom).flat_map(|(&t, &b)| [t, b]))
    }

    /// Whether two slots are coupled
    pub fn is_coupled(&self, a: Slot, b: Slot) -> bool {
        a != b && a < self.var_count && b < self.var_count
    }
}
