//! Brute-force QUBO solving
//!
//! Exhaustive enumeration is the reference oracle used to verify
//! embeddings; it is only practical for small models.

mod assignment;
mod brute_force;

pub use assignment::{Assignment, VariableIndex};
pub use brute_force::{BruteForceSolver, SolveResult, SolverConfig, ENCODING_LIMIT};

use thiserror::Error;

/// Solver errors
#[derive(Error, Debug)]
pub enum SolverError {
    #[error("too many variables: {found} variables found, max is {max}")]
    TooManyVariables { found: usize, max: usize },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for solving
pub type SolverResult<T> = Result<T, SolverError>;
