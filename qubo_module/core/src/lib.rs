//! QUBO Module Core
//!
//! Set-membership embeddings for QUBO models with an exhaustive solver as
//! ground truth

pub mod model;    // Bit vectors, variables, coefficient tables, QUBO models
pub mod set;      // Boolean set specifications
pub mod embed;    // Embedding engine and decoder
pub mod solver;   // Brute-force solver
pub mod topology; // Fully-connected tiles
pub mod verify;   // Embed + solve + decode cross-check

pub use model::*;
pub use set::{SetError, SetResult, SetSpec};
pub use embed::{
    embed, DecodeError, DecodeResult, Decoded, Decoder, EmbedError, EmbedResult, Embedding,
    EmbeddingConfig, EmbeddingEngine,
};
pub use solver::{Assignment, BruteForceSolver, SolveResult, SolverConfig, SolverError, SolverResult};
pub use topology::FullyConnectedTile;
pub use verify::{verify_set, verify_str, VerificationReport, VerifyError, VerifyResult, Violation};
