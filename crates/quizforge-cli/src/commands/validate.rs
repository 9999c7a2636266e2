//! The `quizforge validate` command.

use std::path::PathBuf;

use anyhow::Result;

use quizforge_core::bank;

pub fn execute(bank_path: PathBuf) -> Result<()> {
    let banks = bank::load_banks(&bank_path)?;

    let mut total_warnings = 0;

    for b in &banks {
        println!("Question bank: {} ({} questions)", b.name, b.questions.len());

        let warnings = bank::validate_bank(b);
        for w in &warnings {
            let prefix = w
                .question
                .map(|n| format!("  [#{n}]"))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if banks.is_empty() {
        println!("No question banks found.");
    } else if total_warnings == 0 {
        println!("All question banks valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
