//! cuboid solve command - shortest surface distance.

use anyhow::Result;
use colored::Colorize;
use cuboid_path::{Solved, Solver};
use serde::Serialize;

use crate::{Cli, OutputFormat, ProblemArgs, output};

#[derive(Serialize)]
struct SolveResult {
    distance: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<SolveDetails>,
}

#[derive(Serialize)]
struct SolveDetails {
    classification: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    opposed_axis: Option<String>,
    lower_bound: f64,
    upper_bound: f64,
    best_route: String,
    candidates: Vec<CandidateInfo>,
}

#[derive(Serialize)]
struct CandidateInfo {
    route: String,
    horizontal: f64,
    vertical: f64,
    length: f64,
}

impl SolveDetails {
    fn from_solved(solved: &Solved) -> Self {
        Self {
            classification: solved.classification.label().to_string(),
            opposed_axis: solved.classification.opposed_axis().map(|a| a.to_string()),
            lower_bound: solved.bounds.lower,
            upper_bound: solved.bounds.upper,
            best_route: solved.best.route.to_string(),
            candidates: solved
                .candidates
                .iter()
                .map(|c| CandidateInfo {
                    route: c.route.to_string(),
                    horizontal: c.horizontal,
                    vertical: c.vertical,
                    length: c.length(),
                })
                .collect(),
        }
    }
}

pub fn run(input: &ProblemArgs, detailed: bool, cli: &Cli) -> Result<()> {
    let params = cli.params();
    let problem = input.to_problem(&params)?;
    let solved = Solver::new(&problem).params(params).classify().solve()?;

    let result = SolveResult {
        distance: solved.distance,
        details: detailed.then(|| SolveDetails::from_solved(&solved)),
    };

    match cli.format {
        OutputFormat::Json => {
            output::print(&result, cli.format, cli.quiet);
        }
        OutputFormat::Text => {
            if cli.quiet {
                return Ok(());
            }
            let Some(details) = &result.details else {
                println!("{}", result.distance);
                return Ok(());
            };

            println!("{}", "Surface Path".bold().underline());
            println!("  {}: {}", "Regime".cyan(), solved.classification);
            println!(
                "  {}: [{:.6}, {:.6}]",
                "Bounds".cyan(),
                details.lower_bound,
                details.upper_bound
            );

            println!("\n{}", "Candidates:".bold());
            let best = solved.candidates.iter().position(|c| *c == solved.best);
            for (i, candidate) in details.candidates.iter().enumerate() {
                let marker = if Some(i) == best {
                    "*".green().bold()
                } else {
                    " ".normal()
                };
                println!(
                    "  {} {:<24} {:.6}",
                    marker, candidate.route, candidate.length
                );
            }
            println!();

            output::success(
                &format!("Distance: {} ({})", result.distance, details.best_route),
                cli.format,
                cli.quiet,
            );
        }
    }

    Ok(())
}
