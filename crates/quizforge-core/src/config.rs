//! quizforge configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level quizforge configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizforgeConfig {
    /// Name attempts are recorded under.
    #[serde(default = "default_player_name")]
    pub player_name: String,
    /// Questions per quiz (None = the whole pool).
    #[serde(default)]
    pub num_questions: Option<usize>,
    /// Bank file or directory to load questions from.
    #[serde(default = "default_bank_path")]
    pub bank_path: PathBuf,
    /// Fixed RNG seed for reproducible question order.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Reveal the correct option after a wrong answer.
    #[serde(default = "default_true")]
    pub show_correct_answer: bool,
}

fn default_player_name() -> String {
    "player".to_string()
}
fn default_bank_path() -> PathBuf {
    PathBuf::from("./question-banks")
}
fn default_true() -> bool {
    true
}

impl Default for QuizforgeConfig {
    fn default() -> Self {
        Self {
            player_name: default_player_name(),
            num_questions: None,
            bank_path: default_bank_path(),
            seed: None,
            show_correct_answer: true,
        }
    }
}

/// Expand `${VAR_NAME}` references from the environment in a single pass.
///
/// Substituted values are copied as-is and never expanded again. Unset
/// variables become empty; an unterminated `${` is kept literally.
fn resolve_env_vars(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(len) = rest[start + 2..].find('}') else {
            break;
        };
        out.push_str(&rest[..start]);
        let var_name = &rest[start + 2..start + 2 + len];
        out.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + 2 + len + 1..];
    }
    out.push_str(rest);
    out
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `quizforge.toml` in the current directory
/// 2. `~/.config/quizforge/config.toml`
///
/// Environment variable override: `QUIZFORGE_PLAYER`.
pub fn load_config() -> Result<QuizforgeConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizforgeConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("quizforge.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => parse_config_file(&path)?,
        None => QuizforgeConfig::default(),
    };

    if let Ok(player) = std::env::var("QUIZFORGE_PLAYER") {
        if !player.trim().is_empty() {
            config.player_name = player;
        }
    }

    config.player_name = resolve_env_vars(&config.player_name);
    if config.player_name.trim().is_empty() {
        config.player_name = default_player_name();
    }
    config.bank_path = PathBuf::from(resolve_env_vars(&config.bank_path.to_string_lossy()));

    Ok(config)
}

fn parse_config_file(path: &Path) -> Result<QuizforgeConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    toml::from_str::<QuizforgeConfig>(&content)
        .with_context(|| format!("failed to parse config: {}", path.display()))
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("quizforge"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_QUIZFORGE_TEST_VAR", "hello");
        assert_eq!(resolve_env_vars("${_QUIZFORGE_TEST_VAR}"), "hello");
        assert_eq!(
            resolve_env_vars("prefix_${_QUIZFORGE_TEST_VAR}_suffix"),
            "prefix_hello_suffix"
        );
        assert_eq!(resolve_env_vars("no vars"), "no vars");
        assert_eq!(resolve_env_vars("${unterminated"), "${unterminated");
        std::env::remove_var("_QUIZFORGE_TEST_VAR");
    }

    #[test]
    fn substituted_values_are_not_expanded_again() {
        std::env::set_var("_QUIZFORGE_SELF_REF", "${_QUIZFORGE_SELF_REF}");
        std::env::set_var("_QUIZFORGE_CYCLE_A", "${_QUIZFORGE_CYCLE_B}");
        std::env::set_var("_QUIZFORGE_CYCLE_B", "${_QUIZFORGE_CYCLE_A}");

        assert_eq!(
            resolve_env_vars("${_QUIZFORGE_SELF_REF}"),
            "${_QUIZFORGE_SELF_REF}"
        );
        assert_eq!(
            resolve_env_vars("x-${_QUIZFORGE_CYCLE_A}-y"),
            "x-${_QUIZFORGE_CYCLE_B}-y"
        );

        std::env::remove_var("_QUIZFORGE_SELF_REF");
        std::env::remove_var("_QUIZFORGE_CYCLE_A");
        std::env::remove_var("_QUIZFORGE_CYCLE_B");
    }

    #[test]
    fn unset_variables_expand_to_empty() {
        assert_eq!(resolve_env_vars("a${_QUIZFORGE_NEVER_SET}b"), "ab");
    }

    #[test]
    fn blank_player_name_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quizforge.toml");
        std::fs::write(&path, "player_name = \"${_QUIZFORGE_NEVER_SET}\"\n").unwrap();

        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.player_name, "player");
    }

    #[test]
    fn default_config() {
        let config = QuizforgeConfig::default();
        assert_eq!(config.player_name, "player");
        assert!(config.num_questions.is_none());
        assert!(config.seed.is_none());
        assert!(config.show_correct_answer);
    }

    #[test]
    fn parse_partial_config() {
        let toml_str = r#"
player_name = "alice"
num_questions = 5
seed = 99
"#;
        let config: QuizforgeConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.player_name, "alice");
        assert_eq!(config.num_questions, Some(5));
        assert_eq!(config.seed, Some(99));
        assert_eq!(config.bank_path, PathBuf::from("./question-banks"));
    }

    #[test]
    fn load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "bank_path = \"banks/trivia.toml\"\nshow_correct_answer = false\n")
            .unwrap();

        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.bank_path, PathBuf::from("banks/trivia.toml"));
        assert!(!config.show_correct_answer);
    }

    #[test]
    fn missing_explicit_path_is_an_error() {
        let err = load_config_from(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }
}
