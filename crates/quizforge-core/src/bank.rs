//! TOML question bank parser.
//!
//! Loads question banks from TOML files and directories, and validates them.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::question::Question;

/// Intermediate TOML structure for parsing bank files.
#[derive(Debug, Deserialize)]
struct TomlBankFile {
    bank: TomlBankHeader,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
}

#[derive(Debug, Deserialize)]
struct TomlBankHeader {
    name: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    text: String,
    options: Vec<String>,
    /// 0-based index into `options`.
    answer: usize,
    #[serde(default)]
    tags: Vec<String>,
}

/// A question loaded from a bank, with its tags.
#[derive(Debug, Clone)]
pub struct BankQuestion {
    pub question: Question,
    pub tags: Vec<String>,
}

/// A named collection of questions.
#[derive(Debug, Clone)]
pub struct QuestionBank {
    pub name: String,
    pub description: String,
    pub questions: Vec<BankQuestion>,
}

impl QuestionBank {
    /// Keep only questions carrying at least one of `tags`. An empty filter
    /// keeps everything.
    pub fn filter_tags(&self, tags: &[String]) -> QuestionBank {
        if tags.is_empty() {
            return self.clone();
        }
        QuestionBank {
            name: self.name.clone(),
            description: self.description.clone(),
            questions: self
                .questions
                .iter()
                .filter(|q| q.tags.iter().any(|t| tags.contains(t)))
                .cloned()
                .collect(),
        }
    }
}

/// Parse a single TOML file into a `QuestionBank`.
pub fn parse_bank(path: &Path) -> Result<QuestionBank> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read question bank: {}", path.display()))?;

    parse_bank_str(&content, path)
}

/// Parse a TOML string into a `QuestionBank` (useful for testing).
pub fn parse_bank_str(content: &str, source_path: &Path) -> Result<QuestionBank> {
    let parsed: TomlBankFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let questions = parsed
        .questions
        .into_iter()
        .enumerate()
        .map(|(i, q)| {
            let question = Question::new(q.text, q.options, q.answer).with_context(|| {
                format!("question #{} in {}", i + 1, source_path.display())
            })?;
            Ok(BankQuestion {
                question,
                tags: q.tags,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(QuestionBank {
        name: parsed.bank.name,
        description: parsed.bank.description,
        questions,
    })
}

/// Recursively load all `.toml` bank files from a directory.
pub fn load_bank_directory(dir: &Path) -> Result<Vec<QuestionBank>> {
    let mut banks = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(|e| e.path());

    for entry in entries {
        let path = entry.path();

        if path.is_dir() {
            banks.extend(load_bank_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_bank(&path) {
                Ok(bank) => banks.push(bank),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(banks)
}

/// Load a single bank file, or every bank under a directory.
pub fn load_banks(path: &Path) -> Result<Vec<QuestionBank>> {
    if path.is_dir() {
        load_bank_directory(path)
    } else {
        Ok(vec![parse_bank(path)?])
    }
}

/// A warning from bank validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// 1-based position of the question in its bank (if applicable).
    pub question: Option<usize>,
    /// Warning message.
    pub message: String,
}

/// Validate a bank for common authoring mistakes.
pub fn validate_bank(bank: &QuestionBank) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if bank.questions.is_empty() {
        warnings.push(ValidationWarning {
            question: None,
            message: "bank has no questions".into(),
        });
    }

    let mut seen_text = HashSet::new();
    for (i, entry) in bank.questions.iter().enumerate() {
        let q = &entry.question;
        let position = Some(i + 1);

        if q.question_text().trim().is_empty() {
            warnings.push(ValidationWarning {
                question: position,
                message: "question text is empty".into(),
            });
        } else if !seen_text.insert(q.question_text().trim().to_lowercase()) {
            warnings.push(ValidationWarning {
                question: position,
                message: format!("duplicate question: {}", q.question_text()),
            });
        }

        if q.options().len() < 2 {
            warnings.push(ValidationWarning {
                question: position,
                message: format!("only {} option(s); at least 2 expected", q.options().len()),
            });
        }

        let mut seen_options = HashSet::new();
        for option in q.options() {
            if !seen_options.insert(option.trim()) {
                warnings.push(ValidationWarning {
                    question: position,
                    message: format!("duplicate option: {option}"),
                });
            }
        }
    }

    warnings
}
