//! End-to-end embedding verification
//!
//! Embeds a set, solves the model exhaustively and checks every assignment
//! against the decoder: an assignment must decode exactly when it is optimal,
//! and the decoded optimal assignments must recover each set element once.

use crate::embed::{EmbedError, EmbeddingConfig, EmbeddingEngine};
use crate::model::BitVector;
use crate::set::{SetError, SetSpec};
use crate::solver::{BruteForceSolver, SolverConfig, SolverError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;
use tracing::{debug, info};

/// Verification errors (the run could not be carried out)
#[derive(Error, Debug)]
pub enum VerifyError {
    #[error(transparent)]
    Set(#[from] SetError),

    #[error(transparent)]
    Embed(#[from] EmbedError),

    #[error(transparent)]
    Solver(#[from] SolverError),
}

/// Result type for verification
pub type VerifyResult<T> = Result<T, VerifyError>;

/// A broken round-trip or completeness law
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Violation {
    /// Optimal energy, but the decoder rejects the assignment
    OptimalNotDecoded {
        assignment: String,
        energy: f64,
        reason: String,
    },

    /// The decoder accepts a non-optimal assignment
    DecodedNotOptimal {
        assignment: String,
        energy: f64,
        element: String,
    },

    /// A set element no optimal assignment decodes to
    MissingElement { element: String },

    /// A set element more than one optimal assignment decodes to
    DuplicateElement { element: String, count: usize },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::OptimalNotDecoded {
                assignment,
                energy,
                reason,
            } => write!(
                f,
                "optimal assignment {} (energy {}) does not decode: {}",
                assignment, energy, reason
            ),
            Violation::DecodedNotOptimal {
                assignment,
                energy,
                element,
            } => write!(
                f,
                "assignment {} (energy {}) decodes to {} but is not optimal",
                assignment, energy, element
            ),
            Violation::MissingElement { element } => {
                write!(f, "element {} is not recovered by any optimal assignment", element)
            }
            Violation::DuplicateElement { element, count } => {
                write!(f, "element {} is recovered by {} optimal assignments", element, count)
            }
        }
    }
}

/// Outcome of a verification run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationReport {
    /// The verified set, `|`-joined
    pub set: String,

    pub embedding: EmbeddingConfig,
    pub solver: SolverConfig,

    /// Variables of the embedded model, in solver order
    pub variables: Vec<String>,

    pub best_obj: f64,
    pub second_best_obj: f64,
    pub gap: f64,
    pub assignments_checked: u64,

    /// Elements recovered from optimal assignments, ascending by encoding
    pub recovered: Vec<String>,

    pub violations: Vec<Violation>,
}

impl VerificationReport {
    pub fn passed(&self) -> bool {
        self.violations.is_empty()
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for VerificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "set:         {}", self.set)?;
        writeln!(f, "variables:   {}", self.variables.len())?;
        writeln!(f, "assignments: {}", self.assignments_checked)?;
        writeln!(
            f,
            "energies:    best {} / second {} (gap {})",
            self.best_obj, self.second_best_obj, self.gap
        )?;
        write!(f, "recovered:   {}", self.recovered.join("|"))?;
        for violation in &self.violations {
            write!(f, "\n  violation: {}", violation)?;
        }
        Ok(())
    }
}

/// Embed `spec`, solve exhaustively and check every assignment
pub fn verify_set(
    spec: &SetSpec,
    embedding_config: &EmbeddingConfig,
    solver_config: &SolverConfig,
) -> VerifyResult<VerificationReport> {
    let embedding = EmbeddingEngine::new(embedding_config.clone()).embed(spec)?;
    let solver = BruteForceSolver::new(embedding.model(), solver_config.clone())?;
    let result = solver.solve();

    let mut violations = Vec::new();
    let mut recovered: BTreeMap<u64, (BitVector, usize)> = BTreeMap::new();

    solver.for_each_solution(|assignment, energy| {
        let optimal = solver.config().is_close(energy, result.best_obj);
        match (embedding.decode(assignment), optimal) {
            (Ok(decoded), true) => {
                recovered
                    .entry(decoded.element.encode())
                    .or_insert_with(|| (decoded.element, 0))
                    .1 += 1;
            }
            (Ok(decoded), false) => violations.push(Violation::DecodedNotOptimal {
                assignment: assignment.to_string(),
                energy,
                element: decoded.element.to_string(),
            }),
            (Err(e), true) => violations.push(Violation::OptimalNotDecoded {
                assignment: assignment.to_string(),
                energy,
                reason: e.to_string(),
            }),
            (Err(_), false) => {}
        }
    });

    for &encoding in spec.encodings() {
        match recovered.get(&encoding) {
            None => violations.push(Violation::MissingElement {
                element: BitVector::decode(encoding, spec.width()).to_string(),
            }),
            Some((element, count)) if *count > 1 => {
                violations.push(Violation::DuplicateElement {
                    element: element.to_string(),
                    count: *count,
                })
            }
            Some(_) => {}
        }
    }

    debug!(
        set = %spec,
        recovered = recovered.len(),
        expected = spec.encodings().len(),
        "checked decoder against solver"
    );

    let report = VerificationReport {
        set: spec.to_string(),
        embedding: embedding_config.clone(),
        solver: solver_config.clone(),
        variables: solver.variables().iter().map(|v| v.to_string()).collect(),
        best_obj: result.best_obj,
        second_best_obj: result.second_best_obj,
        gap: result.gap,
        assignments_checked: result.assignments_evaluated,
        recovered: recovered.values().map(|(e, _)| e.to_string()).collect(),
        violations,
    };

    info!(
        set = %report.set,
        passed = report.passed(),
        violations = report.violations.len(),
        gap = report.gap,
        "verification finished"
    );

    Ok(report)
}

/// Parse `input` as a set and verify it
pub fn verify_str(
    input: &str,
    embedding_config: &EmbeddingConfig,
    solver_config: &SolverConfig,
) -> VerifyResult<VerificationReport> {
    let spec = SetSpec::parse(input)?;
    verify_set(&spec, embedding_config, solver_config)
}
