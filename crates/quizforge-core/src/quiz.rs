//! The quiz aggregate: question pool, active attempts, and per-player history.
//!
//! A `Quiz` is an explicitly owned value. Callers hold it by `&mut` and are
//! expected to serialize access per player; nothing here locks.

use std::collections::HashMap;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use uuid::Uuid;

use crate::attempt::{AttemptQuestion, AttemptSummary, HistoryEntry, QuizAttempt};
use crate::bank::QuestionBank;
use crate::error::{QuizError, Result};
use crate::question::{Question, QuestionView};
use crate::traits::{Clock, SystemClock};

/// The quiz engine.
pub struct Quiz {
    /// Authoritative pool, keyed by question id.
    questions: HashMap<Uuid, Question>,
    /// Pool ids in insertion order, so listing and seeded shuffles are stable.
    order: Vec<Uuid>,
    /// At most one in-progress attempt per player.
    active_attempts: HashMap<String, QuizAttempt>,
    /// Completed attempts per player, oldest first. Append-only.
    history: HashMap<String, Vec<QuizAttempt>>,
    rng: StdRng,
    clock: Arc<dyn Clock>,
}

impl Default for Quiz {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Quiz {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Quiz")
            .field("questions", &self.order.len())
            .field("active_attempts", &self.active_attempts.len())
            .field("players_with_history", &self.history.len())
            .finish()
    }
}

impl Quiz {
    /// An empty engine with an entropy-seeded RNG and the system clock.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// An empty engine whose question selection is reproducible.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(rng: StdRng) -> Self {
        Self {
            questions: HashMap::new(),
            order: Vec::new(),
            active_attempts: HashMap::new(),
            history: HashMap::new(),
            rng,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the time source used to stamp attempts.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    // -----------------------------------------------------------------------
    // Admin surface
    // -----------------------------------------------------------------------

    /// Validate and add a question to the pool. Returns its id.
    pub fn add_question(
        &mut self,
        question_text: impl Into<String>,
        options: Vec<String>,
        correct_option_index: usize,
    ) -> Result<Uuid> {
        let question = Question::new(question_text, options, correct_option_index)?;
        Ok(self.add_existing(question))
    }

    /// Add an already-validated question to the pool.
    pub fn add_existing(&mut self, question: Question) -> Uuid {
        let id = question.id();
        if self.questions.insert(id, question).is_none() {
            self.order.push(id);
        }
        tracing::debug!(question_id = %id, "question added");
        id
    }

    /// Add every question of a bank. Returns how many were added.
    pub fn load_bank(&mut self, bank: &QuestionBank) -> usize {
        for entry in &bank.questions {
            self.add_existing(entry.question.clone());
        }
        tracing::info!(
            bank = %bank.name,
            count = bank.questions.len(),
            "loaded question bank"
        );
        bank.questions.len()
    }

    /// Remove a question from the pool. Attempts already holding it are
    /// unaffected. Returns whether the question existed.
    pub fn delete_question(&mut self, question_id: Uuid) -> bool {
        if self.questions.remove(&question_id).is_none() {
            return false;
        }
        self.order.retain(|id| *id != question_id);
        tracing::debug!(question_id = %question_id, "question deleted");
        true
    }

    /// Admin views of the whole pool, in insertion order.
    pub fn get_all_questions(&self) -> Vec<QuestionView> {
        self.order
            .iter()
            .filter_map(|id| self.questions.get(id))
            .map(Question::view)
            .collect()
    }

    pub fn question_count(&self) -> usize {
        self.order.len()
    }

    // -----------------------------------------------------------------------
    // Player surface
    // -----------------------------------------------------------------------

    /// Start a new attempt for `player_name` and return its first question.
    ///
    /// Draws `min(num_questions, pool size)` questions in random order, or
    /// the whole pool when `num_questions` is `None`. Returns `None` without
    /// touching any state when that selection would be empty. Any attempt the
    /// player already has in progress is discarded, not archived.
    pub fn start_quiz(
        &mut self,
        player_name: &str,
        num_questions: Option<usize>,
    ) -> Option<AttemptQuestion> {
        let pool_size = self.order.len();
        let take = num_questions.map_or(pool_size, |n| n.min(pool_size));
        if take == 0 {
            tracing::debug!(
                player = player_name,
                pool_size,
                "no questions to start a quiz with"
            );
            return None;
        }

        let mut ids = self.order.clone();
        ids.shuffle(&mut self.rng);
        let selected: Vec<Question> = ids
            .into_iter()
            .take(take)
            .filter_map(|id| self.questions.get(&id).cloned())
            .collect();

        let attempt = QuizAttempt::new_at(player_name, selected, self.clock.now()).ok()?;
        let first = attempt.current_question();

        if let Some(previous) = self.active_attempts.insert(player_name.to_string(), attempt) {
            tracing::warn!(
                player = player_name,
                attempt_id = %previous.attempt_id(),
                answered = previous.current_index(),
                "discarding unfinished attempt"
            );
        }
        tracing::info!(player = player_name, questions = take, "quiz started");

        first
    }

    /// Answer the current question of the player's active attempt.
    ///
    /// An answer that completes the attempt moves it into history, so a
    /// following [`Quiz::end_quiz`] finds nothing to end.
    pub fn submit_answer(
        &mut self,
        player_name: &str,
        question_id: Uuid,
        chosen_index: usize,
    ) -> Result<bool> {
        let now = self.clock.now();
        let attempt = self.active_attempts.get_mut(player_name).ok_or_else(|| {
            QuizError::NoActiveAttempt {
                player: player_name.to_string(),
            }
        })?;

        let is_correct = attempt.submit_answer_at(question_id, chosen_index, now)?;

        if attempt.is_completed() {
            if let Some(finished) = self.active_attempts.remove(player_name) {
                tracing::info!(
                    player = player_name,
                    score = finished.correct_count(),
                    total = finished.total_questions(),
                    "quiz completed"
                );
                self.archive(finished);
            }
        }

        Ok(is_correct)
    }

    /// The player's current question, or `None` with no attempt in progress.
    pub fn get_current_quiz_state(&self, player_name: &str) -> Option<AttemptQuestion> {
        self.active_attempts
            .get(player_name)
            .and_then(QuizAttempt::current_question)
    }

    /// Same lookup as [`Quiz::get_current_quiz_state`], named for the
    /// "what's next" step after an answer.
    pub fn get_next_question_for_player(&self, player_name: &str) -> Option<AttemptQuestion> {
        self.get_current_quiz_state(player_name)
    }

    /// Read access to a player's in-progress attempt.
    pub fn active_attempt(&self, player_name: &str) -> Option<&QuizAttempt> {
        self.active_attempts.get(player_name)
    }

    /// End the player's active attempt early, archive it, and return its
    /// summary. `None` if the player has nothing in progress.
    pub fn end_quiz(&mut self, player_name: &str) -> Option<AttemptSummary> {
        let mut attempt = self.active_attempts.remove(player_name)?;
        attempt.end_early_at(self.clock.now());
        let summary = attempt.summary();
        tracing::info!(
            player = player_name,
            score = summary.score,
            total = summary.total_questions,
            "quiz ended"
        );
        self.archive(attempt);
        Some(summary)
    }

    /// Score history for a player, oldest first. Empty for unknown players.
    pub fn get_player_score_history(&self, player_name: &str) -> Vec<HistoryEntry> {
        self.history
            .get(player_name)
            .map(|attempts| attempts.iter().map(QuizAttempt::history_entry).collect())
            .unwrap_or_default()
    }

    /// Full summary of one archived attempt.
    pub fn get_player_last_attempt_details(
        &self,
        player_name: &str,
        attempt_id: Uuid,
    ) -> Option<AttemptSummary> {
        self.history
            .get(player_name)?
            .iter()
            .find(|a| a.attempt_id() == attempt_id)
            .map(QuizAttempt::summary)
    }

    /// Full summaries of every archived attempt for a player, oldest first.
    pub fn get_player_attempt_summaries(&self, player_name: &str) -> Vec<AttemptSummary> {
        self.history
            .get(player_name)
            .map(|attempts| attempts.iter().map(QuizAttempt::summary).collect())
            .unwrap_or_default()
    }

    fn archive(&mut self, attempt: QuizAttempt) {
        self.history
            .entry(attempt.player_name().to_string())
            .or_default()
            .push(attempt);
    }
}
