//! cuboid: Command-line interface for shortest surface paths on a box.
//!
//! Every command takes the same nine numbers: the box dimensions `L W H`, then the
//! lizard `X1 Y1 Z1`, then the bug `X2 Y2 Z2`.
//!
//! # Logging
//!
//! Set the `RUST_LOG` environment variable to control log output:
//! - `RUST_LOG=cuboid_path=info` - The chosen regime
//! - `RUST_LOG=cuboid_path=debug` - Candidate lengths and the bounds check
//! - `RUST_LOG=cuboid_path::timing=debug` - Performance timing
//! - `RUST_LOG=debug` - All debug output
//!
//! # Example
//!
//! ```bash
//! # Unit cube, opposite corners
//! cuboid solve 1 1 1 0 0 0 1 1 1
//!
//! # Every candidate, with debug logging appended to a file
//! cuboid -vv --log-file path.log solve --detailed 30 12 12 0 6 1 30 6 11
//! ```

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use cuboid_path::{Cuboid, PathResult, Problem, SolverParams, SurfacePoint};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod commands;
mod output;

use commands::{classify, solve, validate};

/// cuboid - Shortest paths on the surface of a rectangular box.
///
/// Finds how far a lizard has to walk over the faces of a box to reach a bug.
#[derive(Parser)]
#[command(name = "cuboid")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format for results
    #[arg(long, global = true, default_value = "text")]
    format: OutputFormat,

    /// Suppress all non-error output
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Increase output verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(long, short, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Relative tolerance for on-face and equality tests, in [0, 0.5)
    #[arg(long, global = true, conflicts_with = "exact", value_parser = parse_tolerance)]
    tolerance: Option<f64>,

    /// Compare coordinates exactly (tolerance 0)
    #[arg(long, global = true)]
    exact: bool,

    /// Append diagnostic log records to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
}

impl Cli {
    /// Solver parameters selected by `--tolerance` / `--exact`.
    fn params(&self) -> SolverParams {
        if self.exact {
            SolverParams::exact()
        } else {
            // Already range-checked by `parse_tolerance`
            self.tolerance
                .map(|tolerance| SolverParams {
                    tolerance,
                    ..Default::default()
                })
                .unwrap_or_default()
        }
    }
}

fn parse_tolerance(arg: &str) -> Result<f64, String> {
    let tolerance: f64 = arg.parse().map_err(|e| format!("{e}"))?;
    cuboid_path::validate_tolerance(tolerance).map_err(|e| e.to_string())
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    Text,
    /// JSON output for scripting
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the shortest surface distance
    Solve {
        #[command(flatten)]
        input: ProblemArgs,

        /// Show the regime, every candidate and the bounds
        #[arg(long)]
        detailed: bool,
    },

    /// Show which regime the two points fall into
    Classify {
        #[command(flatten)]
        input: ProblemArgs,
    },

    /// Check whether the nine numbers form a valid problem
    Validate {
        #[command(flatten)]
        input: ProblemArgs,
    },
}

/// The nine scalars describing a problem.
#[derive(Args, Clone, Copy, Debug)]
pub struct ProblemArgs {
    /// Box length (x)
    #[arg(allow_negative_numbers = true)]
    pub length: f64,
    /// Box width (y)
    #[arg(allow_negative_numbers = true)]
    pub width: f64,
    /// Box height (z)
    #[arg(allow_negative_numbers = true)]
    pub height: f64,
    /// Lizard x
    #[arg(allow_negative_numbers = true)]
    pub x1: f64,
    /// Lizard y
    #[arg(allow_negative_numbers = true)]
    pub y1: f64,
    /// Lizard z
    #[arg(allow_negative_numbers = true)]
    pub z1: f64,
    /// Bug x
    #[arg(allow_negative_numbers = true)]
    pub x2: f64,
    /// Bug y
    #[arg(allow_negative_numbers = true)]
    pub y2: f64,
    /// Bug z
    #[arg(allow_negative_numbers = true)]
    pub z2: f64,
}

impl ProblemArgs {
    pub fn cuboid(&self) -> Cuboid {
        Cuboid::new(self.length, self.width, self.height)
    }

    pub fn lizard(&self) -> SurfacePoint {
        SurfacePoint::new(self.x1, self.y1, self.z1)
    }

    pub fn bug(&self) -> SurfacePoint {
        SurfacePoint::new(self.x2, self.y2, self.z2)
    }

    /// Build the problem, validating with the same tolerance the solver will use.
    pub fn to_problem(&self, params: &SolverParams) -> PathResult<Problem> {
        Problem::try_new_within(self.cuboid(), self.lizard(), self.bug(), params.tolerance)
    }
}

/// Initialize the tracing subscriber based on verbosity level and log file.
fn init_tracing(verbose: u8, quiet: bool, log_file: Option<&Path>) -> Result<()> {
    // Check RUST_LOG first, then fall back to -v flags
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        let level = match verbose {
            0 => "warn",
            1 => "cuboid_path=info",
            2 => "cuboid_path=debug",
            _ => "trace",
        };
        EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    // Quiet silences the terminal, not a file the caller asked for
    let stderr_layer = (!quiet).then(|| fmt::layer().with_writer(std::io::stderr).compact());

    let file_layer = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {:?}", path))?;
            Some(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    // Install miette's panic hook for better error display
    #[cfg(debug_assertions)]
    miette::set_panic_hook();

    let cli = Cli::parse();

    let result = init_tracing(cli.verbose, cli.quiet, cli.log_file.as_deref()).and_then(|()| {
        match &cli.command {
            Commands::Solve { input, detailed } => solve::run(input, *detailed, &cli),
            Commands::Classify { input } => classify::run(input, &cli),
            Commands::Validate { input } => validate::run(input, &cli),
        }
    });

    if let Err(e) = &result {
        if !cli.quiet {
            if let Some(path_err) = e.downcast_ref::<cuboid_path::PathError>() {
                // Display error with code and help text
                eprintln!("{}: {}", "Error".red().bold(), path_err);
                eprintln!("  {}: {}", "Code".cyan(), path_err.code());
                eprintln!(
                    "  {}: {}",
                    "Suggestion".green(),
                    path_err.recovery_suggestion()
                );
            } else {
                eprintln!("{}: {}", "Error".red().bold(), e);
                for cause in e.chain().skip(1) {
                    eprintln!("  {}: {}", "Caused by".yellow(), cause);
                }
            }
        }
        std::process::exit(1);
    }

    Ok(())
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
    fn test_negative_coordinates_parse() {
        let cli = Cli::try_parse_from([
            "cuboid", "validate", "1", "2", "3", "1", "2", "3", "-1", "0", "0",
        ])
        .unwrap();
        let Commands::Validate { input } = &cli.command else {
            panic!("expected validate");
        };
        assert_eq!(input.x2, -1.0);
        assert!(input.to_problem(&cli.params()).is_err());
    }

    #[test]
    fn test_tolerance_flags() {
        let args = ["solve", "1", "1", "1", "0", "0", "0", "1", "1", "1"];

        let cli = Cli::try_parse_from(["cuboid", "--exact"].iter().chain(&args)).unwrap();
        assert_eq!(cli.params().tolerance, 0.0);

        let cli =
            Cli::try_parse_from(["cuboid", "--tolerance", "1e-6"].iter().chain(&args)).unwrap();
        assert_eq!(cli.params().tolerance, 1e-6);

        let cli = Cli::try_parse_from(["cuboid"].iter().chain(&args)).unwrap();
        assert_eq!(cli.params(), SolverParams::default());

        assert!(
            Cli::try_parse_from(["cuboid", "--exact", "--tolerance", "1e-6"].iter().chain(&args))
                .is_err()
        );
    }

    #[test]
    fn test_unusable_tolerance_is_rejected() {
        let args = ["solve", "1", "1", "1", "3", "3", "3", "0", "0", "0"];
        for bad in ["5", "0.5", "-1e-9", "NaN", "inf", "loose"] {
            let arg = format!("--tolerance={bad}");
            let err = Cli::try_parse_from(["cuboid", arg.as_str()].iter().chain(&args))
                .err()
                .unwrap_or_else(|| panic!("{bad} accepted"));
            assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation, "{bad}");
        }
        assert_eq!(parse_tolerance("0").unwrap(), 0.0);
        assert!(parse_tolerance("5").unwrap_err().starts_with("invalid tolerance"));
    }

    #[test]
    fn test_problem_args_build_problem() {
        let cli = Cli::try_parse_from([
            "cuboid", "solve", "--detailed", "2", "3", "4", "0", "1", "1", "2", "2", "3",
        ])
        .unwrap();
        let Commands::Solve { input, detailed } = &cli.command else {
            panic!("expected solve");
        };
        assert!(*detailed);
        let problem = input.to_problem(&cli.params()).unwrap();
        assert_eq!(problem.cuboid().dimensions(), (2.0, 3.0, 4.0));
        assert_eq!(problem.bug().coordinates(), (2.0, 2.0, 3.0));
    }
}
