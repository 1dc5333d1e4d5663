//! cuboid validate command - check that the inputs form a problem.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use crate::{Cli, OutputFormat, ProblemArgs, output};

#[derive(Serialize)]
struct ValidationResult {
    valid: bool,
    tolerance: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    issue: Option<IssueInfo>,
}

#[derive(Serialize)]
struct IssueInfo {
    code: String,
    message: String,
    suggestion: String,
}

pub fn run(input: &ProblemArgs, cli: &Cli) -> Result<()> {
    let params = cli.params();
    let issue = input.to_problem(&params).err().map(|e| IssueInfo {
        code: e.code().to_string(),
        message: e.to_string(),
        suggestion: e.recovery_suggestion().to_string(),
    });

    let result = ValidationResult {
        valid: issue.is_none(),
        tolerance: params.tolerance,
        issue,
    };

    match cli.format {
        OutputFormat::Json => {
            output::print(&result, cli.format, cli.quiet);
        }
        OutputFormat::Text => {
            if !cli.quiet {
                println!("{}", "Validation Report".bold().underline());
                println!(
                    "  {}: {} x {} x {}",
                    "Box".cyan(),
                    input.length,
                    input.width,
                    input.height
                );
                println!(
                    "  {}: ({}, {}, {})",
                    "Lizard".cyan(),
                    input.x1,
                    input.y1,
                    input.z1
                );
                println!("  {}: ({}, {}, {})", "Bug".cyan(), input.x2, input.y2, input.z2);

                match &result.issue {
                    None => println!("  {}: {}", "Status".cyan(), "Valid".green().bold()),
                    Some(issue) => {
                        println!("  {}: {}", "Status".cyan(), "Invalid".red().bold());
                        println!("\n  {} [{}] {}", "✗".red(), issue.code, issue.message);
                        println!("  {}: {}", "Suggestion".green(), issue.suggestion);
                    }
                }
            }
        }
    }

    // Exit with error code if invalid
    if !result.valid {
        std::process::exit(1);
    }

    Ok(())
}
