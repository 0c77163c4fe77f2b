//! QUBO Module CLI
//!
//! Embeds boolean sets, verifies embeddings against the brute-force solver
//! and solves small QUBO models read from JSON.

use clap::{Args, Parser, Subcommand};
use qubo_module_core::{
    BruteForceSolver, EmbedError, EmbeddingConfig, EmbeddingEngine, ModelError, QuboModel,
    SetError, SetSpec, SolverConfig, SolverError, VerifyError,
};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "qubo-verify")]
#[command(about = "Embed boolean sets as QUBO models and verify them by brute force")]
struct Cli {
    /// Log construction details (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the embedded model of a set as JSON
    Embed {
        /// Set description, e.g. "00|10|11"
        set: String,

        #[arg(long, default_value_t = 10.0)]
        base_penalty: f64,

        /// Single-line JSON
        #[arg(long)]
        compact: bool,
    },

    /// Embed a set, solve it and check every assignment against the decoder
    Verify {
        /// Set description, e.g. "00|10|11"
        set: String,

        #[arg(long, default_value_t = 10.0)]
        base_penalty: f64,

        #[command(flatten)]
        solver: SolverArgs,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Solve a string-keyed QUBO model from a JSON file
    Solve {
        /// Model file: {"linear": [[v, c], ...], "quadratic": [[[u, v], c], ...]}
        model: PathBuf,

        #[command(flatten)]
        solver: SolverArgs,
    },
}

#[derive(Args)]
struct SolverArgs {
    /// Maximum number of distinct variables
    #[arg(long, default_value_t = 16)]
    max_variables: usize,

    /// Enumerate assignments in parallel
    #[arg(long)]
    parallel: bool,
}

impl SolverArgs {
    fn config(&self) -> SolverConfig {
        SolverConfig {
            max_variables: self.max_variables,
            parallel: self.parallel,
            ..SolverConfig::default()
        }
    }
}

#[derive(Error, Debug)]
enum CliError {
    #[error(transparent)]
    Set(#[from] SetError),

    #[error(transparent)]
    Embed(#[from] EmbedError),

    #[error(transparent)]
    Solver(#[from] SolverError),

    #[error(transparent)]
    Verify(#[from] VerifyError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Run one subcommand; `Ok(false)` means verification found violations
fn run(command: Command) -> Result<bool, CliError> {
    match command {
        Command::Embed {
            set,
            base_penalty,
            compact,
        } => {
            let spec = SetSpec::parse(&set)?;
            let engine = EmbeddingEngine::new(EmbeddingConfig { base_penalty });
            let model = engine.embed(&spec)?.named_model();

            let json = if compact {
                model.to_json_compact()?
            } else {
                model.to_json()?
            };
            println!("{}", json);
            Ok(true)
        }

        Command::Verify {
            set,
            base_penalty,
            solver,
            json,
        } => {
            let spec = SetSpec::parse(&set)?;
            let report = qubo_module_core::verify_set(
                &spec,
                &EmbeddingConfig { base_penalty },
                &solver.config(),
            )?;

            if json {
                println!("{}", report.to_json()?);
            } else {
                println!("{}", report);
                println!();
                if report.passed() {
                    println!("PASSED: every optimal assignment decodes, every element recovered once");
                } else {
                    println!("FAILED: {} violation(s)", report.violations.len());
                }
            }

            if !report.passed() {
                warn!(set = %report.set, violations = report.violations.len(), "verification failed");
            }
            Ok(report.passed())
        }

        Command::Solve { model, solver } => {
            let text = fs::read_to_string(&model).map_err(|source| CliError::Read {
                path: model.clone(),
                source,
            })?;
            let qubo: QuboModel<String> = QuboModel::from_json(&text)?;
            debug!(path = %model.display(), "loaded model");

            let solver = BruteForceSolver::new(&qubo, solver.config())?;
            let result = solver.solve();

            println!("variables: {}", solver.variables().join(" "));
            println!("{}", result);
            println!("gap: {}", result.gap);
            Ok(true)
        }
    }
}

/// 0 on success, 1 when verification found violations, 2 on errors
fn exit_status(outcome: Result<bool, CliError>) -> u8 {
    match outcome {
        Ok(true) => 0,
        Ok(false) => 1,
        Err(e) => {
            warn!(error = %e, "command rejected");
            eprintln!("error: {}", e);
            2
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    ExitCode::from(exit_status(run(cli.command)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_solver_args_map_to_config() {
        let cli = Cli::parse_from(["qubo-verify", "verify", "00|11", "--max-variables", "4", "--parallel"]);
        match cli.command {
            Command::Verify { solver, .. } => {
                let config = solver.config();
                assert_eq!(config.max_variables, 4);
                assert!(config.parallel);
                assert_eq!(config.rel_tol, SolverConfig::default().rel_tol);
            }
            _ => panic!("expected verify subcommand"),
        }
    }

    #[test]
    fn test_embed_defaults() {
        let cli = Cli::parse_from(["qubo-verify", "embed", "0|1"]);
        match cli.command {
            Command::Embed {
                base_penalty,
                compact,
                ..
            } => {
                assert_eq!(base_penalty, 10.0);
                assert!(!compact);
            }
            _ => panic!("expected embed subcommand"),
        }
    }

    #[test]
    fn test_run_verify_passes() {
        let passed = run(Command::Verify {
            set: "00|11".to_string(),
            base_penalty: 10.0,
            solver: SolverArgs {
                max_variables: 16,
                parallel: false,
            },
            json: true,
        })
        .unwrap();
        assert!(passed);
    }

    #[test]
    fn test_run_reports_parse_errors() {
        let err = run(Command::Embed {
            set: "a".to_string(),
            base_penalty: 10.0,
            compact: true,
        })
        .unwrap_err();
        assert_eq!(err.to_string(), "boolean set element contains invalid character 'a'");
    }

    #[test]
    fn test_run_solve_reads_model_file() {
        let path = std::env::temp_dir().join("qubo_verify_cli_model.json");
        fs::write(
            &path,
            r#"{"linear":[["A",1.0],["B",-1.0]],"quadratic":[[["A","B"],-2.0]]}"#,
        )
        .unwrap();

        let passed = run(Command::Solve {
            model: path.clone(),
            solver: SolverArgs {
                max_variables: 16,
                parallel: true,
            },
        })
        .unwrap();
        assert!(passed);

        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_run_solve_missing_file() {
        let path = std::env::temp_dir().join("qubo_verify_cli_no_such_model.json");
        let err = run(Command::Solve {
            model: path,
            solver: SolverArgs {
                max_variables: 16,
                parallel: false,
            },
        })
        .unwrap_err();

        assert!(matches!(err, CliError::Read { .. }));
    }

    #[test]
    fn test_run_solve_respects_variable_cap() {
        let path = std::env::temp_dir().join("qubo_verify_cli_capped_model.json");
        fs::write(&path, r#"{"linear":[["A",1.0],["B",1.0],["C",1.0]],"quadratic":[]}"#).unwrap();

        let err = run(Command::Solve {
            model: path.clone(),
            solver: SolverArgs {
                max_variables: 2,
                parallel: false,
            },
        })
        .unwrap_err();
        assert_eq!(err.to_string(), "too many variables: 3 variables found, max is 2");

        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_exit_status() {
        assert_eq!(exit_status(Ok(true)), 0);
        assert_eq!(exit_status(Ok(false)), 1);

        let rejected = run(Command::Embed {
            set: "01|10".to_string(),
            base_penalty: 10.0,
            compact: false,
        });
        assert_eq!(exit_status(rejected), 2);
    }
}
