//! Aggregate statistics over a player's score history.

use serde::{Deserialize, Serialize};

use crate::attempt::{percentage, HistoryEntry};

/// Summary statistics for one player across all archived attempts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub player_name: String,
    /// Number of archived attempts.
    pub attempts: usize,
    /// Attempts that ran to the last question rather than being ended early.
    pub finished_attempts: usize,
    pub total_correct: usize,
    pub total_questions: usize,
    pub best_percentage: f64,
    /// Mean of the per-attempt percentages.
    pub average_percentage: f64,
    pub last_percentage: f64,
    /// Correct answers over all questions offered, across every attempt.
    pub overall_percentage: f64,
}

/// Compute statistics from a player's history. `None` when there is none.
pub fn compute_player_stats(player_name: &str, history: &[HistoryEntry]) -> Option<PlayerStats> {
    let last = history.last()?;

    let percentages: Vec<f64> = history.iter().map(HistoryEntry::percentage).collect();
    let best_percentage = percentages.iter().copied().fold(0.0f64, f64::max);
    let average_percentage = percentages.iter().sum::<f64>() / percentages.len() as f64;

    let total_correct: usize = history.iter().map(|h| h.score).sum();
    let total_questions: usize = history.iter().map(|h| h.total_questions).sum();

    Some(PlayerStats {
        player_name: player_name.to_string(),
        attempts: history.len(),
        finished_attempts: history
            .iter()
            .filter(|h| h.answered == h.total_questions)
            .count(),
        total_correct,
        total_questions,
        best_percentage,
        average_percentage,
        last_percentage: last.percentage(),
        overall_percentage: percentage(total_correct, total_questions),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn entry(score: usize, total: usize) -> HistoryEntry {
        let t = Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap();
        HistoryEntry {
            attempt_id: Uuid::new_v4(),
            score,
            total_questions: total,
            answered: total,
            start_time: t,
            end_time: Some(t),
            completed: true,
        }
    }

    #[test]
    fn no_history_no_stats() {
        assert!(compute_player_stats("bob", &[]).is_none());
    }

    #[test]
    fn stats_over_several_attempts() {
        let history = vec![entry(1, 4), entry(3, 4), entry(1, 2)];
        let stats = compute_player_stats("alice", &history).unwrap();

        assert_eq!(stats.attempts, 3);
        assert_eq!(stats.finished_attempts, 3);
        assert_eq!(stats.total_correct, 5);
        assert_eq!(stats.total_questions, 10);
        assert!((stats.best_percentage - 75.0).abs() < 1e-9);
        assert!((stats.average_percentage - 50.0).abs() < 1e-9);
        assert!((stats.last_percentage - 50.0).abs() < 1e-9);
        assert!((stats.overall_percentage - 50.0).abs() < 1e-9);
    }

    #[test]
    fn zero_question_attempt_scores_zero() {
        let stats = compute_player_stats("carol", &[entry(0, 0)]).unwrap();
        assert_eq!(stats.best_percentage, 0.0);
        assert_eq!(stats.overall_percentage, 0.0);
    }
}
