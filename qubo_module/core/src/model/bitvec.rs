//! Fixed-width boolean vectors
//!
//! A [`BitVector`] is the value type behind every set element and every
//! indicator variable. Positions are addressed from the left of the textual
//! form, and the integer encoding treats position 0 as the least significant
//! bit.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Widest vector whose encoding fits in a `u64`
pub const MAX_WIDTH: usize = 64;

/// Ordered tuple of 0/1 values
///
/// Ordering is lexicographic over positions, which matches the ordering of
/// the textual form (`"01" < "10"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct BitVector(Vec<u8>);

impl BitVector {
    /// Build a vector from booleans
    pub fn from_bools(bits: &[bool]) -> Self {
        Self(bits.iter().map(|&b| u8::from(b)).collect())
    }

    /// The all-zero vector of the given width
    pub fn zeros(width: usize) -> Self {
        Self(vec![0; width])
    }

    /// Build a vector from raw values, rejecting anything other than 0 or 1
    pub fn from_bits(bits: Vec<u8>) -> Option<Self> {
        if bits.iter().all(|&b| b <= 1) {
            Some(Self(bits))
        } else {
            None
        }
    }

    /// Number of positions
    pub fn width(&self) -> usize {
        self.0.len()
    }

    /// Value at position `i` (0 or 1)
    pub fn get(&self, i: usize) -> Option<u8> {
        self.0.get(i).copied()
    }

    /// Whether position `i` is set
    pub fn is_set(&self, i: usize) -> bool {
        self.0.get(i).copied() == Some(1)
    }

    /// The values as a slice
    pub fn bits(&self) -> &[u8] {
        &self.0
    }

    /// Number of positions holding a 1
    pub fn ones_count(&self) -> usize {
        self.0.iter().filter(|&&b| b == 1).count()
    }

    /// Number of positions holding a 0
    pub fn zeros_count(&self) -> usize {
        self.width() - self.ones_count()
    }

    /// True for the all-zero vector
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&b| b == 0)
    }

    /// Integer encoding with position 0 as the least significant bit
    ///
    /// Callers guarantee `width() <= MAX_WIDTH`; the set parser enforces it.
    pub fn encode(&self) -> u64 {
        self.0
            .iter()
            .enumerate()
            .filter(|&(_, &b)| b == 1)
            .fold(0u64, |acc, (i, _)| acc | (1u64 << i))
    }

    /// Inverse of [`BitVector::encode`] for a known width
    pub fn decode(encoding: u64, width: usize) -> Self {
        Self((0..width).map(|i| ((encoding >> i) & 1) as u8).collect())
    }

    /// True when every position where `other` holds a 1 also holds a 1 here
    ///
    /// Widths are assumed equal.
    pub fn covers(&self, other: &BitVector) -> bool {
        self.0
            .iter()
            .zip(other.0.iter())
            .all(|(&mine, &theirs)| theirs == 0 || mine == 1)
    }
}

impl fmt::Display for BitVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in &self.0 {
            write!(f, "{}", bit)?;
        }
        Ok(())
    }
}

impl TryFrom<Vec<u8>> for BitVector {
    type Error = String;

    fn try_from(bits: Vec<u8>) -> Result<Self, Self::Error> {
        Self::from_bits(bits).ok_or_else(|| "bit vector values must be 0 or 1".to_string())
    }
}

impl From<BitVector> for Vec<u8> {
    fn from(v: BitVector) -> Self {
        v.0
    }
}
