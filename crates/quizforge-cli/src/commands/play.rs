//! The `quizforge play` command: an interactive quiz over stdin/stdout.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};
use uuid::Uuid;

use quizforge_core::config::load_config_from;
use quizforge_core::report::PlayerReport;
use quizforge_core::{bank, AnswerRecord, AttemptSummary, Quiz};

/// Options for a play session, after CLI parsing.
pub struct PlayOptions {
    pub bank: Option<PathBuf>,
    pub player: Option<String>,
    pub num_questions: Option<usize>,
    pub tags: Vec<String>,
    pub seed: Option<u64>,
    pub output: Option<PathBuf>,
    pub config: Option<PathBuf>,
}

pub fn execute(opts: PlayOptions) -> Result<()> {
    let config = load_config_from(opts.config.as_deref())?;

    let bank_path = opts.bank.unwrap_or(config.bank_path);
    let player = opts.player.unwrap_or(config.player_name);
    let num_questions = opts.num_questions.or(config.num_questions);
    if num_questions == Some(0) {
        anyhow::bail!("number of questions must be at least 1");
    }

    let mut quiz = match opts.seed.or(config.seed) {
        Some(seed) => Quiz::with_seed(seed),
        None => Quiz::new(),
    };
    for b in bank::load_banks(&bank_path)? {
        quiz.load_bank(&b.filter_tags(&opts.tags));
    }
    if quiz.question_count() == 0 {
        anyhow::bail!("no questions found in {}", bank_path.display());
    }
    tracing::debug!(
        questions = quiz.question_count(),
        bank = %bank_path.display(),
        "question pool loaded"
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut input = stdin.lock();
    let mut out = stdout.lock();

    loop {
        run_session(
            &mut quiz,
            &player,
            num_questions,
            config.show_correct_answer,
            &mut input,
            &mut out,
        )?;

        write!(out, "\nPlay again? [y/N] ")?;
        out.flush()?;
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 || !line.trim().eq_ignore_ascii_case("y") {
            break;
        }
    }

    print_history(&quiz, &player, &mut out)?;

    if let Some(path) = opts.output {
        PlayerReport::from_quiz(&quiz, &player).save_json(&path)?;
        writeln!(out, "Report saved to: {}", path.display())?;
    }

    Ok(())
}

/// Play one attempt to completion (or until the player quits) and print
/// its summary. Returns the archived summary, if an attempt was started.
pub fn run_session<R: BufRead, W: Write>(
    quiz: &mut Quiz,
    player: &str,
    num_questions: Option<usize>,
    show_correct_answer: bool,
    input: &mut R,
    out: &mut W,
) -> Result<Option<AttemptSummary>> {
    let Some(mut current) = quiz.start_quiz(player, num_questions) else {
        if quiz.question_count() == 0 {
            writeln!(out, "Could not start quiz: no questions available.")?;
        } else {
            writeln!(out, "Could not start quiz: 0 questions requested.")?;
        }
        return Ok(None);
    };
    let attempt_id = current.attempt_id;

    writeln!(
        out,
        "Quiz started for {player}: {} question(s). Enter an option number, or 'q' to end early.",
        current.total
    )?;

    loop {
        writeln!(
            out,
            "\nQuestion {}/{}: {}",
            current.position, current.total, current.question.question_text
        )?;
        for (i, option) in current.question.options.iter().enumerate() {
            writeln!(out, "  {}. {option}", i + 1)?;
        }
        write!(out, "> ")?;
        out.flush()?;

        let mut line = String::new();
        let read = input.read_line(&mut line).context("failed to read answer")?;
        let answer = line.trim();

        if read == 0 || answer.eq_ignore_ascii_case("q") {
            let summary = quiz.end_quiz(player);
            if let Some(summary) = &summary {
                writeln!(out, "\nQuiz ended early.")?;
                print_summary(summary, out)?;
            }
            return Ok(summary);
        }

        let option_count = current.question.options.len();
        let chosen = match answer.parse::<usize>() {
            Ok(n) if n >= 1 => n - 1,
            _ => {
                writeln!(out, "Please enter a number between 1 and {option_count}.")?;
                continue;
            }
        };

        match quiz.submit_answer(player, current.question.id, chosen) {
            Ok(true) => writeln!(out, "Correct!")?,
            Ok(false) => {
                writeln!(out, "Incorrect.")?;
                if show_correct_answer {
                    if let Some(record) = last_record(quiz, player, attempt_id) {
                        writeln!(
                            out,
                            "The correct answer was {}. {}",
                            record.correct_index + 1,
                            record.options[record.correct_index]
                        )?;
                    }
                }
            }
            // The prompt no longer matches the engine: give up on this session.
            Err(e) if e.is_sequence_error() => {
                return Err(anyhow::Error::new(e).context("answer submitted out of turn"));
            }
            Err(e) => {
                tracing::debug!(error = %e, "answer rejected");
                writeln!(out, "Please enter a number between 1 and {option_count}.")?;
                continue;
            }
        }

        match quiz.get_next_question_for_player(player) {
            Some(next) => current = next,
            None => {
                let summary = quiz.get_player_last_attempt_details(player, attempt_id);
                if let Some(summary) = &summary {
                    writeln!(out, "\nQuiz completed!")?;
                    print_summary(summary, out)?;
                }
                return Ok(summary);
            }
        }
    }
}

/// The most recent answer of an attempt, whether still active or archived.
fn last_record(quiz: &Quiz, player: &str, attempt_id: Uuid) -> Option<AnswerRecord> {
    let summary = match quiz.active_attempt(player) {
        Some(attempt) if attempt.attempt_id() == attempt_id => attempt.summary(),
        _ => quiz.get_player_last_attempt_details(player, attempt_id)?,
    };
    summary.details.last().cloned()
}

fn print_summary<W: Write>(summary: &AttemptSummary, out: &mut W) -> Result<()> {
    writeln!(
        out,
        "Final score: {}/{} ({:.1}%)",
        summary.score,
        summary.total_questions,
        summary.percentage()
    )?;
    for (i, d) in summary.details.iter().enumerate() {
        let verdict = if d.is_correct { "correct" } else { "incorrect" };
        writeln!(
            out,
            "  {}. {} -- you answered {}. {} ({verdict})",
            i + 1,
            d.question_text,
            d.chosen_index + 1,
            d.options[d.chosen_index]
        )?;
    }
    let unanswered = summary.total_questions - summary.details.len();
    if unanswered > 0 {
        writeln!(out, "  {unanswered} question(s) not answered")?;
    }
    Ok(())
}

fn print_history<W: Write>(quiz: &Quiz, player: &str, out: &mut W) -> Result<()> {
    let history = quiz.get_player_score_history(player);
    if history.is_empty() {
        writeln!(out, "\nNo score history for {player} yet.")?;
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Attempt", "Score", "Percent", "Answered", "Finished at"]);
    for (i, h) in history.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(format!("{}/{}", h.score, h.total_questions)),
            Cell::new(format!("{:.1}%", h.percentage())),
            Cell::new(format!("{}/{}", h.answered, h.total_questions)),
            Cell::new(
                h.end_time
                    .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
                    .unwrap_or_else(|| "-".to_string()),
            ),
        ]);
    }

    writeln!(out, "\nScore history for {player}:\n{table}")?;
    Ok(())
}
