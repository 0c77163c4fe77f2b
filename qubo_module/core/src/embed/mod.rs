//! Set-membership embedding
//!
//! Turns a [`SetSpec`](crate::set::SetSpec) into a QUBO model whose optimal
//! assignments are exactly the set's elements, plus a [`Decoder`] that maps
//! assignments back to elements.

mod decoder;
mod engine;

pub use decoder::{DecodeError, DecodeResult, Decoded, Decoder};
pub use engine::{embed, EmbeddingConfig, EmbeddingEngine};

use crate::model::{QuboModel, Valuation, Variable};
use thiserror::Error;

/// Embedding errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EmbedError {
    #[error(
        "embedding is only implemented for sets containing the all-zero vector, '{0}' does not"
    )]
    UnsupportedSetShape(String),

    #[error("base penalty must be positive and finite, got {0}")]
    InvalidPenalty(f64),
}

/// Result type for embedding
pub type EmbedResult<T> = Result<T, EmbedError>;

/// An embedded set: the QUBO model and its decoder
#[derive(Debug, Clone)]
pub struct Embedding {
    model: QuboModel<Variable>,
    decoder: Decoder,
}

impl Embedding {
    pub(crate) fn new(model: QuboModel<Variable>, decoder: Decoder) -> Self {
        Self { model, decoder }
    }

    pub fn model(&self) -> &QuboModel<Variable> {
        &self.model
    }

    pub fn decoder(&self) -> &Decoder {
        &self.decoder
    }

    /// Decode an assignment of this embedding's variables
    pub fn decode<A: Valuation<Variable>>(&self, assignment: &A) -> DecodeResult<Decoded> {
        self.decoder.decode(assignment)
    }

    /// The model with variables renamed to their display form (`bit_0`,
    /// `ind_101`, ...)
    pub fn named_model(&self) -> QuboModel<String> {
        self.model.map_labels(|v| v.to_string())
    }

    pub fn into_parts(self) -> (QuboModel<Variable>, Decoder) {
        (self.model, self.decoder)
    }
}
