//! The `quizforge init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create quizforge.toml
    if std::path::Path::new("quizforge.toml").exists() {
        println!("quizforge.toml already exists, skipping.");
    } else {
        std::fs::write("quizforge.toml", SAMPLE_CONFIG)?;
        println!("Created quizforge.toml");
    }

    // Create example question bank
    std::fs::create_dir_all("question-banks")?;
    let example_path = std::path::Path::new("question-banks/example.toml");
    if example_path.exists() {
        println!("question-banks/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_BANK)?;
        println!("Created question-banks/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit question-banks/example.toml or add your own banks");
    println!("  2. Run: quizforge validate --bank question-banks");
    println!("  3. Run: quizforge play");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# quizforge configuration

player_name = "${USER}"
bank_path = "./question-banks"
# num_questions = 5
# seed = 42
show_correct_answer = true
"#;

const EXAMPLE_BANK: &str = r#"[bank]
name = "Example Bank"
description = "A few general-knowledge questions to get started"

[[questions]]
text = "What is 2 + 2?"
options = ["3", "4", "5", "22"]
answer = 1
tags = ["math"]

[[questions]]
text = "Which planet is known as the Red Planet?"
options = ["Venus", "Jupiter", "Mars", "Mercury"]
answer = 2
tags = ["science"]

[[questions]]
text = "What is the capital of France?"
options = ["Berlin", "Paris", "Madrid", "Rome"]
answer = 1
tags = ["geography"]

[[questions]]
text = "How many sides does a hexagon have?"
options = ["5", "6", "7", "8"]
answer = 1
tags = ["math"]
"#;
