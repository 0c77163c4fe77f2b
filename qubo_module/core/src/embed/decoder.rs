//! Maps full assignments of an embedded model back to set elements

use crate::model::{BitVector, Valuation, Variable};
use crate::set::SetSpec;
use std::sync::Arc;
use thiserror::Error;

/// Reasons an assignment does not decode to a set element
///
/// Both indicate a non-optimal or malformed assignment rather than a fault.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error(
        "{} indicator variables are active ({}), at most one may be",
        .active.len(),
        .active.join(", ")
    )]
    MultipleIndicatorsActive { active: Vec<String> },

    #[error("bit_{position} is {found} but element {element} requires {expected}")]
    BitIndicatorMismatch {
        element: String,
        position: usize,
        expected: u8,
        found: u8,
    },

    #[error("no indicator is active and the all-zero vector is not a set element")]
    NoIndicatorActive,
}

/// Result type for decoding
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Successfully decoded assignment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    /// The set element the assignment represents
    pub element: BitVector,

    /// Human-readable confirmation
    pub message: String,
}

/// Decoder bound to a set's element list
#[derive(Debug, Clone)]
pub struct Decoder {
    width: usize,
    elements: Arc<[BitVector]>,
    indicators: Vec<Variable>,
    contains_zero: bool,
}

impl Decoder {
    pub(crate) fn new(spec: &SetSpec) -> Self {
        let indicators = spec
            .nonzero_elements()
            .into_iter()
            .map(|x| Variable::Indicator(x.clone()))
            .collect();

        Self {
            width: spec.width(),
            elements: spec.elements().into(),
            indicators,
            contains_zero: spec.contains_zero(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Set elements in input order
    pub fn elements(&self) -> &[BitVector] {
        &self.elements
    }

    /// Indicator variables, one per distinct non-zero element
    pub fn indicator_variables(&self) -> &[Variable] {
        &self.indicators
    }

    /// Decode a full assignment over every `bit_i` and every indicator
    ///
    /// With no indicator active the assignment stands for the all-zero
    /// vector; with one active it stands for that indicator's element. In
    /// both cases every bit must match the element.
    pub fn decode<A: Valuation<Variable>>(&self, assignment: &A) -> DecodeResult<Decoded> {
        let active: Vec<&BitVector> = self
            .indicators
            .iter()
            .filter(|var| assignment.value(var) == 1)
            .filter_map(Variable::indicator_element)
            .collect();

        let element = match active.as_slice() {
            [] if self.contains_zero => BitVector::zeros(self.width),
            [] => return Err(DecodeError::NoIndicatorActive),
            [only] => (*only).clone(),
            many => {
                return Err(DecodeError::MultipleIndicatorsActive {
                    active: many
                        .iter()
                        .map(|x| Variable::Indicator((*x).clone()).to_string())
                        .collect(),
                })
            }
        };

        for position in 0..self.width {
            let found = assignment.value(&Variable::Bit(position));
            let expected = element.get(position).unwrap_or(0);
            if found != expected {
                return Err(DecodeError::BitIndicatorMismatch {
                    element: element.to_string(),
                    position,
                    expected,
                    found,
                });
            }
        }

        let message = format!("assignment decodes to set element {}", element);
        Ok(Decoded { element, message })
    }
}
