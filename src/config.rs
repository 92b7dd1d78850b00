use std::path::{Path, PathBuf};
use std::{fmt, fs, io};

use crate::quiz::{self, state, Question};

const DEFAULT_DATABASE: &str = "quiz.sqlite";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// SQLite file holding the attempt between runs.
    pub database: PathBuf,
    /// Keep answers in memory only, nothing is written to disk.
    pub ephemeral: bool,
    pub questions_file: Option<PathBuf>,
    pub attempt_key: String,
    pub finished_key: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: PathBuf::from(DEFAULT_DATABASE),
            ephemeral: false,
            questions_file: None,
            attempt_key: state::ATTEMPT_KEY.to_string(),
            finished_key: state::FINISHED_KEY.to_string(),
        }
    }
}

impl Config {
    /// Reads the `QUIZ_*` variables, falling back to the defaults for unset
    /// or blank ones.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        Self {
            database: non_empty("QUIZ_DATABASE")
                .map(PathBuf::from)
                .unwrap_or(defaults.database),
            ephemeral: non_empty("QUIZ_EPHEMERAL")
                .map(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(defaults.ephemeral),
            questions_file: non_empty("QUIZ_QUESTIONS").map(PathBuf::from),
            attempt_key: non_empty("QUIZ_ATTEMPT_KEY").unwrap_or(defaults.attempt_key),
            finished_key: non_empty("QUIZ_FINISHED_KEY").unwrap_or(defaults.finished_key),
        }
    }

    pub fn questions(&self) -> Result<Vec<Question>, ConfigError> {
        match &self.questions_file {
            Some(path) => load_questions(path),
            None => Ok(quiz::default_questions()),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(PathBuf, io::Error),
    Parse(PathBuf, serde_json::Error),
    NoQuestions(PathBuf),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(path, e) => {
                write!(f, "Failed to read '{}': {}", path.display(), e)
            }
            ConfigError::Parse(path, e) => {
                write!(f, "Invalid question file '{}': {}", path.display(), e)
            }
            ConfigError::NoQuestions(path) => {
                write!(f, "Question file '{}' has no questions", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(_, e) => Some(e),
            ConfigError::Parse(_, e) => Some(e),
            ConfigError::NoQuestions(_) => None,
        }
    }
}

/// The file is trusted to be consistent; only its shape is checked.
pub fn load_questions(path: &Path) -> Result<Vec<Question>, ConfigError> {
    let contents =
        fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
    let questions: Vec<Question> = serde_json::from_str(&contents)
        .map_err(|e| ConfigError::Parse(path.to_path_buf(), e))?;
    if questions.is_empty() {
        return Err(ConfigError::NoQuestions(path.to_path_buf()));
    }
    Ok(questions)
}
