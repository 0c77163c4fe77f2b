//! Variable identities for embedded models
//!
//! Two disjoint namespaces: external bit positions and indicator variables.
//! An indicator is identified by the set element it selects, so the linear
//! table, the quadratic table and the decoder all join on the same value.

use super::bitvec::BitVector;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::Hash;

/// Anything usable as a variable label in a QUBO model
///
/// `Ord` gives unordered pairs an orientation-free identity; `Send + Sync`
/// lets the solver enumerate in parallel.
pub trait Label: Clone + Eq + Hash + Ord + fmt::Debug + Send + Sync {}

impl<T> Label for T where T: Clone + Eq + Hash + Ord + fmt::Debug + Send + Sync {}

/// Variable of an embedded set-membership model
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variable {
    /// External variable `bit_i`
    Bit(usize),

    /// Auxiliary variable selecting one non-zero set element
    Indicator(BitVector),
}

impl Variable {
    /// True for `bit_i` variables
    pub fn is_external(&self) -> bool {
        matches!(self, Variable::Bit(_))
    }

    /// True for indicator variables
    pub fn is_indicator(&self) -> bool {
        matches!(self, Variable::Indicator(_))
    }

    /// Position of an external variable
    pub fn bit_index(&self) -> Option<usize> {
        match self {
            Variable::Bit(i) => Some(*i),
            Variable::Indicator(_) => None,
        }
    }

    /// Element selected by an indicator variable
    pub fn indicator_element(&self) -> Option<&BitVector> {
        match self {
            Variable::Bit(_) => None,
            Variable::Indicator(x) => Some(x),
        }
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variable::Bit(i) => write!(f, "bit_{}", i),
            Variable::Indicator(x) => write!(f, "ind_{}", x),
        }
    }
}
