//! Demonstration of embedding, solving and decoding a boolean set
//!
//! Run with: cargo run --example embed_demo

use qubo_module_core::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== QUBO Set Embedding Demo ===\n");

    // 1. Set Specification
    println!("1. Set Specification:");
    let spec = SetSpec::parse("000|110|101|011")?;
    println!("   Set: {}", spec);
    println!("   Width: {}", spec.width());
    println!("   Distinct elements: {}", spec.num_distinct());
    println!("   Contains zero: {}\n", spec.contains_zero());

    // 2. Embedding
    println!("2. Embedding:");
    let embedding = embed(&spec)?;
    let model = embedding.model();
    println!("   Variables: {}", model.variables().len());
    println!("   Linear terms: {}", model.linear.len());
    println!("   Quadratic terms: {}", model.quadratic.len());
    for (pair, coeff) in model.quadratic.iter().take(4) {
        println!("   ({}, {}) = {}", pair.first(), pair.second(), coeff);
    }
    println!();

    // 3. Brute-force solve
    println!("3. Brute-Force Solve:");
    let solver = BruteForceSolver::with_defaults(model)?;
    let result = solver.solve();
    println!("   Assignments: {}", result.assignments_evaluated);
    println!("   Best energy: {}", result.best_obj);
    println!("   Second best: {}", result.second_best_obj);
    println!("   Gap: {}", result.gap);
    println!("   Optimal assignments: {}\n", result.solutions.len());

    // 4. Decoding optimal assignments
    println!("4. Decoding:");
    solver.for_each_solution(|assignment, energy| {
        if solver.config().is_close(energy, result.best_obj) {
            match embedding.decode(assignment) {
                Ok(decoded) => println!("   {} -> {}", assignment, decoded.element),
                Err(e) => println!("   {} -> error: {}", assignment, e),
            }
        }
    });
    println!();

    // 5. Full verification
    println!("5. Verification:");
    let report = verify_set(&spec, &EmbeddingConfig::default(), &SolverConfig::default())?;
    println!("{}", report);
    println!("   Passed: {}", report.passed());

    Ok(())
}
