//! A single player's run through an ordered set of questions.
//!
//! An attempt has two states. It starts in progress and moves to completed
//! either when the last question is answered or when it is ended early.
//! Completion is terminal: a completed attempt rejects further answers and
//! its timestamps never change again.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{QuizError, Result};
use crate::question::{PlayerQuestion, Question};

/// The outcome of one accepted answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub question_id: Uuid,
    pub question_text: String,
    pub options: Vec<String>,
    pub chosen_index: usize,
    pub correct_index: usize,
    pub is_correct: bool,
}

/// The question a player should answer next, tagged with its attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptQuestion {
    pub attempt_id: Uuid,
    pub question: PlayerQuestion,
    /// 1-based position of this question within the attempt.
    pub position: usize,
    pub total: usize,
}

/// Full summary of an attempt, including per-answer details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttemptSummary {
    pub attempt_id: Uuid,
    pub player_name: String,
    pub score: usize,
    pub total_questions: usize,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub completed: bool,
    pub details: Vec<AnswerRecord>,
}

/// Compact per-attempt line for a player's score history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub attempt_id: Uuid,
    pub score: usize,
    pub total_questions: usize,
    /// Questions answered before the attempt completed.
    pub answered: usize,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub completed: bool,
}

impl AttemptSummary {
    pub fn percentage(&self) -> f64 {
        percentage(self.score, self.total_questions)
    }
}

impl HistoryEntry {
    pub fn percentage(&self) -> f64 {
        percentage(self.score, self.total_questions)
    }
}

pub(crate) fn percentage(score: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    score as f64 / total as f64 * 100.0
}

/// One player's progress through a fixed, ordered list of questions.
#[derive(Debug, Clone)]
pub struct QuizAttempt {
    attempt_id: Uuid,
    player_name: String,
    questions: Vec<Question>,
    answers_given: Vec<Option<usize>>,
    results: Vec<AnswerRecord>,
    correct_count: usize,
    current_index: usize,
    completed: bool,
    start_time: DateTime<Utc>,
    end_time: Option<DateTime<Utc>>,
}

impl QuizAttempt {
    /// Start an attempt now.
    pub fn new(player_name: impl Into<String>, questions: Vec<Question>) -> Result<Self> {
        Self::new_at(player_name, questions, Utc::now())
    }

    /// Start an attempt with an explicit start time.
    ///
    /// The questions are a snapshot: later changes to the pool they were
    /// drawn from do not reach this attempt.
    pub fn new_at(
        player_name: impl Into<String>,
        questions: Vec<Question>,
        start_time: DateTime<Utc>,
    ) -> Result<Self> {
        if questions.is_empty() {
            return Err(QuizError::EmptyAttempt);
        }

        Ok(Self {
            attempt_id: Uuid::new_v4(),
            player_name: player_name.into(),
            answers_given: vec![None; questions.len()],
            results: Vec::with_capacity(questions.len()),
            questions,
            correct_count: 0,
            current_index: 0,
            completed: false,
            start_time,
            end_time: None,
        })
    }

    pub fn attempt_id(&self) -> Uuid {
        self.attempt_id
    }

    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// One slot per question: `None` until answered.
    pub fn answers_given(&self) -> &[Option<usize>] {
        &self.answers_given
    }

    pub fn correct_count(&self) -> usize {
        self.correct_count
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    pub fn end_time(&self) -> Option<DateTime<Utc>> {
        self.end_time
    }

    /// Score so far as a percentage of all questions in the attempt.
    pub fn percentage(&self) -> f64 {
        percentage(self.correct_count, self.questions.len())
    }

    /// The next question to answer, or `None` once the attempt is exhausted
    /// or ended.
    pub fn current_question(&self) -> Option<AttemptQuestion> {
        if self.completed {
            return None;
        }
        let question = self.questions.get(self.current_index)?;
        Some(AttemptQuestion {
            attempt_id: self.attempt_id,
            question: question.player_view(),
            position: self.current_index + 1,
            total: self.questions.len(),
        })
    }

    /// Answer the current question. Returns whether the answer was correct.
    pub fn submit_answer(&mut self, question_id: Uuid, chosen_index: usize) -> Result<bool> {
        self.submit_answer_at(question_id, chosen_index, Utc::now())
    }

    /// Answer the current question, stamping `now` as the end time if this
    /// answer completes the attempt.
    ///
    /// Every check runs before any field is touched, so a rejected answer
    /// leaves the attempt unchanged.
    pub fn submit_answer_at(
        &mut self,
        question_id: Uuid,
        chosen_index: usize,
        now: DateTime<Utc>,
    ) -> Result<bool> {
        if self.completed {
            return Err(QuizError::AttemptCompleted);
        }
        let question = self
            .questions
            .get(self.current_index)
            .ok_or(QuizError::NoCurrentQuestion)?;
        if question.id() != question_id {
            return Err(QuizError::QuestionMismatch {
                expected: question.id(),
                got: question_id,
            });
        }
        if chosen_index >= question.options().len() {
            return Err(QuizError::ChosenIndexOutOfBounds {
                index: chosen_index,
                len: question.options().len(),
            });
        }

        let is_correct = question.is_correct(chosen_index);
        self.results.push(AnswerRecord {
            question_id,
            question_text: question.question_text().to_string(),
            options: question.options().to_vec(),
            chosen_index,
            correct_index: question.correct_option_index(),
            is_correct,
        });
        self.answers_given[self.current_index] = Some(chosen_index);
        if is_correct {
            self.correct_count += 1;
        }

        self.current_index += 1;
        if self.current_index == self.questions.len() {
            self.completed = true;
            self.end_time = Some(now);
            tracing::debug!(
                attempt_id = %self.attempt_id,
                score = self.correct_count,
                "attempt completed"
            );
        }

        Ok(is_correct)
    }

    /// Force completion now. No-op if already completed.
    pub fn end_early(&mut self) {
        self.end_early_at(Utc::now());
    }

    pub fn end_early_at(&mut self, now: DateTime<Utc>) {
        if self.completed {
            return;
        }
        self.completed = true;
        self.end_time = Some(now);
        tracing::debug!(
            attempt_id = %self.attempt_id,
            answered = self.current_index,
            total = self.questions.len(),
            "attempt ended early"
        );
    }

    /// Full summary. Safe mid-attempt: the score reflects answers so far.
    pub fn summary(&self) -> AttemptSummary {
        AttemptSummary {
            attempt_id: self.attempt_id,
            player_name: self.player_name.clone(),
            score: self.correct_count,
            total_questions: self.questions.len(),
            start_time: self.start_time,
            end_time: self.end_time,
            completed: self.completed,
            details: self.results.clone(),
        }
    }

    pub fn history_entry(&self) -> HistoryEntry {
        HistoryEntry {
            attempt_id: self.attempt_id,
            score: self.correct_count,
            total_questions: self.questions.len(),
            answered: self.current_index,
            start_time: self.start_time,
            end_time: self.end_time,
            completed: self.completed,
        }
    }
}
