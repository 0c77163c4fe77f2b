//! Exhaustive QUBO solver
//!
//! Ground-truth oracle for small models: evaluates all 2^k assignments
//! directly. Not meant to be fast.

use super::assignment::{Assignment, VariableIndex};
use super::{SolverError, SolverResult};
use crate::model::{Label, QuboModel};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Hard ceiling imposed by the `u64` assignment encoding
pub const ENCODING_LIMIT: usize = 63;

/// Solver configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Maximum number of distinct variables (2^k assignments are enumerated)
    pub max_variables: usize,

    /// Relative tolerance for energy equality
    pub rel_tol: f64,

    /// Absolute tolerance used near zero, where a relative one breaks down
    pub abs_tol: f64,

    /// Enumerate with rayon; results are identical to the sequential path
    pub parallel: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_variables: 16,
            rel_tol: 1e-6,
            abs_tol: 1e-9,
            parallel: false,
        }
    }
}

impl SolverConfig {
    /// Whether two energies are equal within tolerance
    pub fn is_close(&self, a: f64, b: f64) -> bool {
        let scale = a.abs().max(b.abs());
        (a - b).abs() <= (self.rel_tol * scale).max(self.abs_tol)
    }
}

/// Outcome of [`BruteForceSolver::solve`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveResult {
    /// Optimal assignments (values in dense variable order), ascending by
    /// encoding
    pub solutions: Vec<Vec<u8>>,

    /// Optimal energy
    pub best_obj: f64,

    /// Lowest energy that is not optimal; equals `best_obj` when every
    /// assignment is optimal
    pub second_best_obj: f64,

    /// `second_best_obj - best_obj`
    pub gap: f64,

    /// Number of assignments enumerated
    pub assignments_evaluated: u64,
}

impl SolveResult {
    /// Optimal assignments as `|`-joined value strings, e.g. `"00|11"`
    pub fn solutions_string(&self) -> String {
        self.solutions
            .iter()
            .map(|s| s.iter().map(|b| b.to_string()).collect::<String>())
            .collect::<Vec<_>>()
            .join("|")
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> SolverResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the result as pretty JSON to `path`
    pub fn to_json_file<P: AsRef<Path>>(&self, path: P) -> SolverResult<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

/// `best/second_best solutions`, energies rounded to integers
impl fmt::Display for SolveResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.0}/{:.0} {}",
            self.best_obj,
            self.second_best_obj,
            self.solutions_string()
        )
    }
}

/// Brute-force solver over any labelled QUBO model
#[derive(Debug, Clone)]
pub struct BruteForceSolver<V: Label> {
    config: SolverConfig,
    variables: VariableIndex<V>,
    linear: Vec<(u64, f64)>,
    quadratic: Vec<(u64, f64)>,
}

impl<V: Label> BruteForceSolver<V> {
    /// Index the model's variables and prepare evaluation terms
    ///
    /// Variables are numbered in first-seen order, linear keys before
    /// quadratic keys. Fails before any enumeration when the model has more
    /// variables than the configuration allows.
    pub fn new(model: &QuboModel<V>, config: SolverConfig) -> SolverResult<Self> {
        let mut variables = VariableIndex::new();
        let mut linear_idx = Vec::with_capacity(model.linear.len());
        let mut quadratic_idx = Vec::with_capacity(model.quadratic.len());

        for (var, coeff) in model.linear.iter() {
            linear_idx.push((variables.get_or_insert(var), coeff));
        }

        for (pair, coeff) in model.quadratic.iter() {
            let a = variables.get_or_insert(pair.first());
            let b = variables.get_or_insert(pair.second());
            quadratic_idx.push((a, b, coeff));
        }

        let max = config.max_variables.min(ENCODING_LIMIT);
        if variables.len() > max {
            return Err(SolverError::TooManyVariables {
                found: variables.len(),
                max,
            });
        }

        let linear = linear_idx
            .into_iter()
            .map(|(idx, coeff)| (variables.mask(idx), coeff))
            .collect();
        let quadratic = quadratic_idx
            .into_iter()
            .map(|(a, b, coeff)| (variables.mask(a) | variables.mask(b), coeff))
            .collect();

        debug!(
            variables = variables.len(),
            linear_terms = model.linear.len(),
            quadratic_terms = model.quadratic.len(),
            "prepared brute-force solver"
        );

        Ok(Self {
            config,
            variables,
            linear,
            quadratic,
        })
    }

    /// Solver with the default configuration
    pub fn with_defaults(model: &QuboModel<V>) -> SolverResult<Self> {
        Self::new(model, SolverConfig::default())
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Variables in dense index order
    pub fn variables(&self) -> &[V] {
        self.variables.labels()
    }

    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    /// 2^k
    pub fn num_assignments(&self) -> u64 {
        1u64 << self.variables.len()
    }

    /// Energy of the assignment with the given encoding
    pub fn energy(&self, encoding: u64) -> f64 {
        let mut energy = 0.0;

        for &(mask, coeff) in &self.linear {
            if encoding & mask != 0 {
                energy += coeff;
            }
        }

        for &(mask, coeff) in &self.quadratic {
            if encoding & mask == mask {
                energy += coeff;
            }
        }

        energy
    }

    /// Optimal energy, optimal assignments and the gap to the next level
    pub fn solve(&self) -> SolveResult {
        let n = self.num_assignments();

        // Seeded from the first observed energy; n >= 1 so the fallback is
        // never taken.
        let best_obj = if self.config.parallel {
            (0..n)
                .into_par_iter()
                .map(|e| self.energy(e))
                .reduce_with(f64::min)
        } else {
            (0..n).map(|e| self.energy(e)).reduce(f64::min)
        }
        .unwrap_or(0.0);

        let (optimal, second_best) = if self.config.parallel {
            self.partition_parallel(n, best_obj)
        } else {
            self.partition_sequential(n, best_obj)
        };

        let second_best_obj = second_best.unwrap_or(best_obj);
        let solutions: Vec<Vec<u8>> = optimal
            .into_iter()
            .map(|e| Assignment::new(&self.variables, e).bits())
            .collect();

        debug!(
            best_obj,
            second_best_obj,
            optimal = solutions.len(),
            assignments = n,
            "brute-force solve finished"
        );

        SolveResult {
            solutions,
            best_obj,
            second_best_obj,
            gap: second_best_obj - best_obj,
            assignments_evaluated: n,
        }
    }

    fn partition_sequential(&self, n: u64, best_obj: f64) -> (Vec<u64>, Option<f64>) {
        let mut optimal = Vec::new();
        let mut second_best: Option<f64> = None;

        for e in 0..n {
            let energy = self.energy(e);
            if self.config.is_close(energy, best_obj) {
                optimal.push(e);
            } else {
                second_best = Some(second_best.map_or(energy, |s| s.min(energy)));
            }
        }

        (optimal, second_best)
    }

    fn partition_parallel(&self, n: u64, best_obj: f64) -> (Vec<u64>, Option<f64>) {
        let mut optimal: Vec<u64> = (0..n)
            .into_par_iter()
            .filter(|&e| self.config.is_close(self.energy(e), best_obj))
            .collect();
        optimal.sort_unstable();

        let second_best = (0..n)
            .into_par_iter()
            .map(|e| self.energy(e))
            .filter(|&energy| !self.config.is_close(energy, best_obj))
            .reduce_with(f64::min);

        (optimal, second_best)
    }

    /// Visit every assignment in ascending encoding order with its energy
    pub fn for_each_solution<F>(&self, mut callback: F)
    where
        F: FnMut(&Assignment<'_, V>, f64),
    {
        for e in 0..self.num_assignments() {
            let assignment = Assignment::new(&self.variables, e);
            callback(&assignment, self.energy(e));
        }
    }
}
