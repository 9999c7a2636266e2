//! The `quizforge report` command.

use std::path::PathBuf;

use anyhow::Result;

use quizforge_core::report::PlayerReport;

pub fn execute(input: PathBuf, format: String) -> Result<()> {
    let report = PlayerReport::load_json(&input)?;

    match format.as_str() {
        "markdown" | "md" => {
            println!("{}", report.to_markdown());
        }
        "json" => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        _ => {
            // text format
            let Some(stats) = &report.stats else {
                println!("No attempts recorded for {}.", report.player_name);
                return Ok(());
            };
            println!(
                "Player {}: {} attempt(s), best {:.1}%, average {:.1}%",
                report.player_name,
                stats.attempts,
                stats.best_percentage,
                stats.average_percentage
            );
            for (i, a) in report.attempts.iter().enumerate() {
                println!(
                    "  Attempt {}: {}/{} ({:.1}%)",
                    i + 1,
                    a.score,
                    a.total_questions,
                    a.percentage()
                );
            }
        }
    }

    Ok(())
}
