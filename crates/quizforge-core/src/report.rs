//! Player report export: a player's archived attempts as JSON or markdown.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::attempt::AttemptSummary;
use crate::quiz::Quiz;
use crate::statistics::{compute_player_stats, PlayerStats};

/// A snapshot of one player's history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    pub player_name: String,
    /// `None` when the player has no archived attempts.
    pub stats: Option<PlayerStats>,
    /// Archived attempts, oldest first.
    pub attempts: Vec<AttemptSummary>,
}

impl PlayerReport {
    /// Build a report from the engine's history for `player_name`.
    pub fn from_quiz(quiz: &Quiz, player_name: &str) -> Self {
        let history = quiz.get_player_score_history(player_name);
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            player_name: player_name.to_string(),
            stats: compute_player_stats(player_name, &history),
            attempts: quiz.get_player_attempt_summaries(player_name),
        }
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: PlayerReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }

    /// Format the report as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str(&format!("## Quiz history for {}\n\n", self.player_name));

        let Some(stats) = &self.stats else {
            md.push_str("No attempts yet.\n");
            return md;
        };

        md.push_str(&format!(
            "**Summary:** {} attempt(s), best {:.1}%, average {:.1}%, last {:.1}%\n\n",
            stats.attempts, stats.best_percentage, stats.average_percentage, stats.last_percentage
        ));

        md.push_str("| # | Attempt | Score | Percent | Completed |\n");
        md.push_str("|---|---------|-------|---------|-----------|\n");
        for (i, a) in self.attempts.iter().enumerate() {
            let finished = if a.details.len() == a.total_questions {
                "yes"
            } else {
                "ended early"
            };
            md.push_str(&format!(
                "| {} | {} | {}/{} | {:.1}% | {} |\n",
                i + 1,
                a.attempt_id,
                a.score,
                a.total_questions,
                a.percentage(),
                finished
            ));
        }

        md
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn played_quiz() -> Quiz {
        let mut quiz = Quiz::with_seed(3);
        quiz.add_question("q1", vec!["a".into(), "b".into()], 0).unwrap();
        quiz.add_question("q2", vec!["a".into(), "b".into()], 1).unwrap();

        // First attempt: answer everything with option 0.
        let mut current = quiz.start_quiz("alice", None);
        while let Some(q) = current {
            quiz.submit_answer("alice", q.question.id, 0).unwrap();
            current = quiz.get_next_question_for_player("alice");
        }

        // Second attempt: ended before answering.
        quiz.start_quiz("alice", None).unwrap();
        quiz.end_quiz("alice").unwrap();
        quiz
    }

    #[test]
    fn report_collects_history() {
        let quiz = played_quiz();
        let report = PlayerReport::from_quiz(&quiz, "alice");

        assert_eq!(report.attempts.len(), 2);
        let stats = report.stats.as_ref().unwrap();
        assert_eq!(stats.attempts, 2);
        assert_eq!(stats.total_correct, 1);
        assert_eq!(stats.finished_attempts, 1);
        assert!((stats.best_percentage - 50.0).abs() < 1e-9);
        assert_eq!(stats.last_percentage, 0.0);
    }

    #[test]
    fn empty_report_for_unknown_player() {
        let quiz = played_quiz();
        let report = PlayerReport::from_quiz(&quiz, "bob");
        assert!(report.stats.is_none());
        assert!(report.attempts.is_empty());
        assert!(report.to_markdown().contains("No attempts yet"));
    }

    #[test]
    fn json_save_and_load() {
        let quiz = played_quiz();
        let report = PlayerReport::from_quiz(&quiz, "alice");

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports").join("alice.json");
        report.save_json(&path).unwrap();

        let loaded = PlayerReport::load_json(&path).unwrap();
        assert_eq!(loaded.id, report.id);
        assert_eq!(loaded.attempts, report.attempts);
    }

    #[test]
    fn markdown_lists_attempts() {
        let quiz = played_quiz();
        let md = PlayerReport::from_quiz(&quiz, "alice").to_markdown();
        assert!(md.contains("2 attempt(s)"));
        assert!(md.contains("| 1/2 | 50.0% | yes |"));
        assert!(md.contains("| 0/2 | 0.0% | ended early |"));
    }
}
