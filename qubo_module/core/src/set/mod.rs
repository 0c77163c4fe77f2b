//! Boolean set specifications
//!
//! Parses `|`-separated bit strings such as `"00|10|11"` into a validated,
//! immutable set of equal-width bit vectors.

mod parse;

pub use parse::{parse_str, parse_value};

use crate::model::BitVector;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Set specification errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SetError {
    #[error("boolean set input cannot be empty")]
    EmptySet,

    #[error(
        "boolean set requires all elements have the same number of bits: \
         element '{element}' doesn't match first element '{first}'"
    )]
    WidthMismatch { element: String, first: String },

    #[error("boolean set element contains invalid character '{0}'")]
    InvalidCharacter(char),

    #[error("boolean set currently does not support input type {0}")]
    UnsupportedInputType(String),

    #[error("boolean set width {width} exceeds the maximum of {max} bits")]
    WidthTooLarge { width: usize, max: usize },
}

/// Result type for set parsing
pub type SetResult<T> = Result<T, SetError>;

/// A finite set of equal-width bit vectors
///
/// `elements` keeps input order and duplicates; `encodings` is the
/// deduplicated lookup set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetSpec {
    width: usize,
    elements: Vec<BitVector>,
    encodings: BTreeSet<u64>,
    contains_zero: bool,
}

impl SetSpec {
    /// Parse a `|`-separated set description
    pub fn parse(input: &str) -> SetResult<Self> {
        parse_str(input)
    }

    /// Build from already-validated elements
    pub(crate) fn from_elements(width: usize, elements: Vec<BitVector>) -> Self {
        let encodings = elements.iter().map(BitVector::encode).collect();
        let contains_zero = elements.iter().any(BitVector::is_zero);

        Self {
            width,
            elements,
            encodings,
            contains_zero,
        }
    }

    /// Number of bits per element
    pub fn width(&self) -> usize {
        self.width
    }

    /// Elements in input order, duplicates included
    pub fn elements(&self) -> &[BitVector] {
        &self.elements
    }

    /// Deduplicated integer encodings, ascending
    pub fn encodings(&self) -> &BTreeSet<u64> {
        &self.encodings
    }

    /// Whether the all-zero vector is a member
    pub fn contains_zero(&self) -> bool {
        self.contains_zero
    }

    /// Membership test via the encoding set
    pub fn contains(&self, element: &BitVector) -> bool {
        element.width() == self.width && self.encodings.contains(&element.encode())
    }

    /// Number of elements as given (duplicates counted)
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Number of distinct elements
    pub fn num_distinct(&self) -> usize {
        self.encodings.len()
    }

    /// Distinct elements in first-occurrence order
    pub fn distinct_elements(&self) -> Vec<&BitVector> {
        let mut seen = BTreeSet::new();
        self.elements
            .iter()
            .filter(|e| seen.insert(e.encode()))
            .collect()
    }

    /// Distinct non-zero elements in first-occurrence order
    pub fn nonzero_elements(&self) -> Vec<&BitVector> {
        self.distinct_elements()
            .into_iter()
            .filter(|e| !e.is_zero())
            .collect()
    }

    /// Distinct elements as strings, e.g. `{"00", "11"}`
    pub fn element_strings(&self) -> BTreeSet<String> {
        self.elements.iter().map(|e| e.to_string()).collect()
    }
}

impl FromStr for SetSpec {
    type Err = SetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_str(s)
    }
}

impl TryFrom<&serde_json::Value> for SetSpec {
    type Error = SetError;

    fn try_from(value: &serde_json::Value) -> Result<Self, Self::Error> {
        parse_value(value)
    }
}

impl fmt::Display for SetSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, element) in self.elements.iter().enumerate() {
            if i > 0 {
                write!(f, "|")?;
            }
            write!(f, "{}", element)?;
        }
        Ok(())
    }
}
