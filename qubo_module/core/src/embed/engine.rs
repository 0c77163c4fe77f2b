//! Compiles a boolean set into a QUBO model
//!
//! One indicator variable per distinct non-zero element; the zero element is
//! the ground state with every bit and every indicator off.

use super::decoder::Decoder;
use super::{EmbedError, EmbedResult, Embedding};
use crate::model::{QuboModel, Variable};
use crate::set::SetSpec;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Embedding configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    /// Linear penalty on every bit and indicator; scales all energies
    pub base_penalty: f64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self { base_penalty: 10.0 }
    }
}

/// Set-membership embedding engine
#[derive(Debug, Clone, Default)]
pub struct EmbeddingEngine {
    config: EmbeddingConfig,
}

impl EmbeddingEngine {
    /// Create an engine with the given configuration
    pub fn new(config: EmbeddingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EmbeddingConfig {
        &self.config
    }

    /// Embed a set that contains the all-zero vector
    ///
    /// For every distinct non-zero element `x` with `n` ones, with `P` the
    /// base penalty and `w` the width:
    /// - indicator(x) carries `+P`
    /// - `(bit_i, indicator(x))` is `-(n + 1)·P/n` where `x[i] = 1`, else
    ///   `w` times that reward as a penalty
    /// - `(indicator(x), indicator(y))` gains `w·(n + 1)·P/n` for every other
    ///   element `y` that `x` does not cover
    pub fn embed(&self, spec: &SetSpec) -> EmbedResult<Embedding> {
        let penalty = self.config.base_penalty;
        if !(penalty.is_finite() && penalty > 0.0) {
            return Err(EmbedError::InvalidPenalty(penalty));
        }

        if !spec.contains_zero() {
            return Err(EmbedError::UnsupportedSetShape(spec.to_string()));
        }

        let width = spec.width();
        let width_f = width as f64;
        let mut model = QuboModel::new();

        for i in 0..width {
            model.add_linear(Variable::Bit(i), penalty);
        }

        let nonzero = spec.nonzero_elements();

        for &x in &nonzero {
            let ones = x.ones_count() as f64;
            let ones_weight = (ones + 1.0) * penalty / ones;
            let zeros_weight = ones_weight * width_f;
            let indicator = Variable::Indicator(x.clone());

            model.add_linear(indicator.clone(), penalty);

            for i in 0..width {
                let coeff = if x.is_set(i) { -ones_weight } else { zeros_weight };
                model.set_quadratic(Variable::Bit(i), indicator.clone(), coeff);
            }

            // Guard against a second indicator becoming favorable on top of
            // bits that already match `x`.
            for &y in &nonzero {
                if y == x || x.covers(y) {
                    continue;
                }
                model.add_quadratic(
                    indicator.clone(),
                    Variable::Indicator(y.clone()),
                    ones_weight * width_f,
                );
            }
        }

        debug!(
            set = %spec,
            width,
            indicators = nonzero.len(),
            linear_terms = model.linear.len(),
            quadratic_terms = model.quadratic.len(),
            "embedded boolean set"
        );

        Ok(Embedding::new(model, Decoder::new(spec)))
    }
}

/// Embed with the default configuration
pub fn embed(spec: &SetSpec) -> EmbedResult<Embedding> {
    EmbeddingEngine::default().embed(spec)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BitVector;

    fn ind(bits: &[bool]) -> Variable {
        Variable::Indicator(BitVector::from_bools(bits))
    }

    #[test]
    fn test_single_zero_element() {
        let embedding = embed(&SetSpec::parse("0").unwrap()).unwrap();
        let model = embedding.model();

        assert_eq!(model.linear.len(), 1);
        assert_eq!(model.linear_coeff(&Variable::Bit(0)), 10.0);
        assert!(model.quadratic.is_empty());
    }

    #[test]
    fn test_weights_for_single_nonzero_element() {
        // x = 10: one 1, so ones_weight = 2·10/1 = 20, zeros_weight = 20·2 = 40
        let embedding = embed(&SetSpec::parse("00|10").unwrap()).unwrap();
        let model = embedding.model();
        let x = ind(&[true, false]);

        assert_eq!(model.linear_coeff(&x), 10.0);
        assert_eq!(model.quadratic_coeff(&Variable::Bit(0), &x), -20.0);
        assert_eq!(model.quadratic_coeff(&Variable::Bit(1), &x), 40.0);
    }

    #[test]
    fn test_ones_weight_fraction() {
        // x = 11: ones_weight = 3·10/2 = 15
        let embedding = embed(&SetSpec::parse("00|11").unwrap()).unwrap();
        let x = ind(&[true, true]);

        assert_eq!(embedding.model().quadratic_coeff(&Variable::Bit(0), &x), -15.0);
        assert_eq!(embedding.model().quadratic_coeff(&Variable::Bit(1), &x), -15.0);
    }

    #[test]
    fn test_cross_indicator_penalty_accumulates_per_direction() {
        // 10 and 01 do not cover each other: both directions contribute 20·2
        let embedding = embed(&SetSpec::parse("00|10|01").unwrap()).unwrap();
        let a = ind(&[true, false]);
        let b = ind(&[false, true]);

        assert_eq!(embedding.model().quadratic_coeff(&a, &b), 80.0);
    }

    #[test]
    fn test_cross_indicator_penalty_skips_covered_elements() {
        // 11 covers 10, so only 10 -> 11 contributes: ones_weight(10)·w = 20·2
        let embedding = embed(&SetSpec::parse("00|10|11").unwrap()).unwrap();
        let small = ind(&[true, false]);
        let big = ind(&[true, true]);

        assert_eq!(embedding.model().quadratic_coeff(&small, &big), 40.0);
    }

    #[test]
    fn test_duplicates_share_one_indicator() {
        let embedding = embed(&SetSpec::parse("00|11|11").unwrap()).unwrap();
        let x = ind(&[true, true]);

        assert_eq!(embedding.model().linear.len(), 3);
        assert_eq!(embedding.model().linear_coeff(&x), 10.0);
    }

    #[test]
    fn test_variable_order_bits_then_indicators() {
        let embedding = embed(&SetSpec::parse("000|110|001").unwrap()).unwrap();

        assert_eq!(
            embedding.model().variables(),
            vec![
                Variable::Bit(0),
                Variable::Bit(1),
                Variable::Bit(2),
                ind(&[true, true, false]),
                ind(&[false, false, true]),
            ]
        );
    }

    #[test]
    fn test_rejects_sets_without_zero() {
        let err = embed(&SetSpec::parse("01|10").unwrap()).unwrap_err();

        assert_eq!(err, EmbedError::UnsupportedSetShape("01|10".to_string()));
        assert_eq!(
            err.to_string(),
            "embedding is only implemented for sets containing the all-zero vector, '01|10' does not"
        );
    }

    #[test]
    fn test_base_penalty_scales_coefficients() {
        let engine = EmbeddingEngine::new(EmbeddingConfig { base_penalty: 1.0 });
        let embedding = engine.embed(&SetSpec::parse("0|1").unwrap()).unwrap();
        let x = ind(&[true]);

        assert_eq!(embedding.model().linear_coeff(&x), 1.0);
        assert_eq!(embedding.model().quadratic_coeff(&Variable::Bit(0), &x), -2.0);
    }

    #[test]
    fn test_rejects_non_positive_penalty() {
        let engine = EmbeddingEngine::new(EmbeddingConfig { base_penalty: 0.0 });
        let err = engine.embed(&SetSpec::parse("0").unwrap()).unwrap_err();

        assert_eq!(err, EmbedError::InvalidPenalty(0.0));
    }
}
