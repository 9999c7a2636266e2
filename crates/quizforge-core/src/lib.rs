//! quizforge-core: quiz engine, question banks, and scoring.
//!
//! This crate holds the question pool, the per-player attempt state machine,
//! and the history/statistics built on top of it. Everything is in memory
//! and single-threaded; the CLI crate drives it.

pub mod attempt;
pub mod bank;
pub mod config;
pub mod error;
pub mod question;
pub mod quiz;
pub mod report;
pub mod statistics;
pub mod traits;

pub use attempt::{AnswerRecord, AttemptQuestion, AttemptSummary, HistoryEntry, QuizAttempt};
pub use error::{QuizError, Result};
pub use question::{PlayerQuestion, Question, QuestionView};
pub use quiz::Quiz;
