//! cuboid classify command - show the regime of a problem.

use anyhow::Result;
use colored::Colorize;
use cuboid_path::{Solver, axis_relations};
use serde::Serialize;

use crate::{Cli, OutputFormat, ProblemArgs, output};

#[derive(Serialize)]
struct ClassifyResult {
    classification: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    opposed_axis: Option<String>,
    lizard_faces: Vec<String>,
    bug_faces: Vec<String>,
    shared_axes: Vec<String>,
    opposed_axes: Vec<String>,
}

pub fn run(input: &ProblemArgs, cli: &Cli) -> Result<()> {
    let params = cli.params();
    let problem = input.to_problem(&params)?;
    let classification = Solver::new(&problem).params(params).classify().classification();

    let cuboid = problem.cuboid();
    let faces = |point: &cuboid_path::SurfacePoint| -> Vec<String> {
        point
            .faces(cuboid, params.tolerance)
            .iter()
            .map(|f| f.to_string())
            .collect()
    };

    let relations = axis_relations(&problem, params.tolerance);
    let axes_where = |pick: fn(&cuboid_path::AxisRelation) -> bool| -> Vec<String> {
        cuboid_path::Axis::ALL
            .into_iter()
            .filter(|a| pick(&relations[a.index()]))
            .map(|a| a.to_string())
            .collect()
    };

    let result = ClassifyResult {
        classification: classification.label().to_string(),
        opposed_axis: classification.opposed_axis().map(|a| a.to_string()),
        lizard_faces: faces(problem.lizard()),
        bug_faces: faces(problem.bug()),
        shared_axes: axes_where(|r| r.same),
        opposed_axes: axes_where(|r| r.opposed),
    };

    match cli.format {
        OutputFormat::Json => {
            output::print(&result, cli.format, cli.quiet);
        }
        OutputFormat::Text => {
            if !cli.quiet {
                println!("{}", "Classification".bold().underline());
                println!("  {}: {}", "Regime".cyan(), classification.to_string().bold());
                println!(
                    "  {}: {}",
                    "Lizard faces".cyan(),
                    result.lizard_faces.join(", ")
                );
                println!("  {}: {}", "Bug faces".cyan(), result.bug_faces.join(", "));
                if !result.shared_axes.is_empty() {
                    println!(
                        "  {}: {}",
                        "Shared face axes".cyan(),
                        result.shared_axes.join(", ")
                    );
                }
                if !result.opposed_axes.is_empty() {
                    println!(
                        "  {}: {}",
                        "Opposed axes".cyan(),
                        result.opposed_axes.join(", ")
                    );
                }
            }
        }
    }

    Ok(())
}
