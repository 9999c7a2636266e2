//! The `quizforge list` command: the admin view of a bank.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use quizforge_core::{bank, Quiz};

pub fn execute(bank_path: PathBuf, tags: Vec<String>) -> Result<()> {
    let mut quiz = Quiz::new();
    for b in bank::load_banks(&bank_path)? {
        quiz.load_bank(&b.filter_tags(&tags));
    }

    let questions = quiz.get_all_questions();
    if questions.is_empty() {
        println!("No questions found.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["#", "Question", "Options", "Answer"]);

    for (i, q) in questions.iter().enumerate() {
        let options = q
            .options
            .iter()
            .enumerate()
            .map(|(n, opt)| format!("{}. {opt}", n + 1))
            .collect::<Vec<_>>()
            .join("\n");
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&q.question_text),
            Cell::new(options),
            Cell::new(format!(
                "{}. {}",
                q.correct_option_index + 1,
                q.options[q.correct_option_index]
            )),
        ]);
    }

    println!("{table}");
    println!("{} question(s)", questions.len());

    Ok(())
}
