//! Question records and their admin/player views.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{QuizError, Result};

/// A multiple-choice question. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: Uuid,
    question_text: String,
    options: Vec<String>,
    correct_option_index: usize,
}

/// Admin view of a question, including the correct answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionView {
    pub id: Uuid,
    pub question_text: String,
    pub options: Vec<String>,
    pub correct_option_index: usize,
}

/// Player-facing view of a question. Never carries the answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerQuestion {
    pub id: Uuid,
    pub question_text: String,
    pub options: Vec<String>,
}

impl Question {
    /// Create a question with a fresh identifier.
    ///
    /// Fails with [`QuizError::CorrectIndexOutOfBounds`] unless
    /// `correct_option_index < options.len()`.
    pub fn new(
        question_text: impl Into<String>,
        options: Vec<String>,
        correct_option_index: usize,
    ) -> Result<Self> {
        if correct_option_index >= options.len() {
            return Err(QuizError::CorrectIndexOutOfBounds {
                index: correct_option_index,
                len: options.len(),
            });
        }

        Ok(Self {
            id: Uuid::new_v4(),
            question_text: question_text.into(),
            options,
            correct_option_index,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn question_text(&self) -> &str {
        &self.question_text
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn correct_option_index(&self) -> usize {
        self.correct_option_index
    }

    /// Pure comparison against the correct index. Out-of-range indices are
    /// simply wrong, not an error.
    pub fn is_correct(&self, chosen_index: usize) -> bool {
        chosen_index == self.correct_option_index
    }

    pub fn view(&self) -> QuestionView {
        QuestionView {
            id: self.id,
            question_text: self.question_text.clone(),
            options: self.options.clone(),
            correct_option_index: self.correct_option_index,
        }
    }

    pub fn player_view(&self) -> PlayerQuestion {
        PlayerQuestion {
            id: self.id,
            question_text: self.question_text.clone(),
            options: self.options.clone(),
        }
    }
}
