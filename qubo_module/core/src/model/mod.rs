//! Data model for set-membership embeddings
//!
//! - **bitvec**: fixed-width boolean vectors and their integer encoding
//! - **variable**: typed variable identities (external bits and indicators)
//! - **qubo**: coefficient tables, QUBO models and their JSON interchange form
//!
//! # Example
//!
//! ```rust
//! use qubo_module_core::model::*;
//! use rustc_hash::FxHashMap;
//!
//! let model: QuboModel<String> = QuboModel::new()
//!     .with_linear("A", 1.0)
//!     .with_linear("B", 1.0)
//!     .with_quadratic("A", "B", -3.0);
//!
//! let mut both_on: FxHashMap<String, u8> = FxHashMap::default();
//! both_on.insert("A".to_string(), 1);
//! both_on.insert("B".to_string(), 1);
//!
//! assert_eq!(model.energy(&both_on), -1.0);
//! assert_eq!(model.variables(), vec!["A", "B"]);
//! ```

mod bitvec;
mod qubo;
mod variable;

pub use bitvec::{BitVector, MAX_WIDTH};
pub use qubo::{CoefficientTable, ModelError, ModelResult, QuboModel, Valuation, VarPair};
pub use variable::{Label, Variable};
