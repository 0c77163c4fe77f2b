//! Exhaustive embedding checks
//!
//! Every set containing the all-zero vector, up to width 3, must embed into a
//! model whose optimal assignments decode to exactly the set's elements.

use qubo_module_core::*;

fn all_vectors(width: usize) -> Vec<String> {
    (0..1u64 << width)
        .map(|enc| {
            // Lexicographic order of strings, first position most significant
            (0..width)
                .map(|i| if enc >> (width - 1 - i) & 1 == 1 { '1' } else { '0' })
                .collect()
        })
        .collect()
}

/// Every subset of `vectors` (as `|`-joined strings) that contains `zero`
fn zero_containing_subsets(vectors: &[String], zero: &str) -> Vec<String> {
    let others: Vec<&String> = vectors.iter().filter(|v| v.as_str() != zero).collect();

    (0..1u64 << others.len())
        .map(|mask| {
            let mut members = vec![zero.to_string()];
            for (i, v) in others.iter().enumerate() {
                if mask >> i & 1 == 1 {
                    members.push(v.to_string());
                }
            }
            members.join("|")
        })
        .collect()
}

fn assert_verifies(set: &str) {
    let report = verify_str(set, &EmbeddingConfig::default(), &SolverConfig::default())
        .unwrap_or_else(|e| panic!("verification of {} failed to run: {}", set, e));

    assert!(report.passed(), "embedding of {} is incorrect:\n{}", set, report);
    assert!(report.best_obj.abs() < 1e-9, "{}", set);
    assert!(report.gap > 0.0, "{}", set);

    let spec = SetSpec::parse(set).unwrap();
    assert_eq!(report.recovered.len(), spec.num_distinct(), "{}", set);
}

#[test]
fn test_embedding_one_variable_sets() {
    assert_verifies("0");
    assert_verifies("0|1");
}

#[test]
fn test_embedding_two_variable_sets() {
    for set in ["00", "00|11", "00|10", "00|01", "00|10|01", "00|10|11", "00|01|11", "00|01|10|11"] {
        assert_verifies(set);
    }
}

#[test]
fn test_embedding_three_variable_sets() {
    let subsets = zero_containing_subsets(&all_vectors(3), "000");
    assert_eq!(subsets.len(), 128);

    for set in &subsets {
        assert_verifies(set);
    }
}

#[test]
fn test_embedding_zero_only_scenario() {
    let spec = SetSpec::parse("0").unwrap();
    let embedding = embed(&spec).unwrap();
    let result = BruteForceSolver::with_defaults(embedding.model())
        .unwrap()
        .solve();

    assert_eq!(result.to_string(), "0/10 0");
}

#[test]
fn test_completeness_with_duplicates_and_reordering() {
    let report = verify_str("011|000|011|101", &EmbeddingConfig::default(), &SolverConfig::default())
        .unwrap();

    assert!(report.passed());
    assert_eq!(report.recovered, vec!["000", "101", "011"]);
}

#[test]
fn test_penalty_scales_the_gap() {
    let small = verify_str("00|11", &EmbeddingConfig { base_penalty: 1.0 }, &SolverConfig::default())
        .unwrap();
    let large = verify_str("00|11", &EmbeddingConfig { base_penalty: 100.0 }, &SolverConfig::default())
        .unwrap();

    assert!(small.passed() && large.passed());
    assert!((large.gap - 100.0 * small.gap).abs() < 1e-9);
}

#[test]
fn test_parallel_verification_matches_sequential() {
    let parallel = SolverConfig {
        parallel: true,
        ..SolverConfig::default()
    };
    let a = verify_str("000|110|001|111", &EmbeddingConfig::default(), &SolverConfig::default())
        .unwrap();
    let b = verify_str("000|110|001|111", &EmbeddingConfig::default(), &parallel).unwrap();

    assert_eq!(a.recovered, b.recovered);
    assert_eq!(a.best_obj, b.best_obj);
    assert_eq!(a.second_best_obj, b.second_best_obj);
    assert_eq!(a.violations, b.violations);
}
