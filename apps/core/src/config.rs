//! Runtime configuration read from the environment.
//!
//! A `.env` file in the working directory is honored. Every variable is
//! optional; unset variables fall back to the built-in Indonesian resources.

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use validator::Validate;

use crate::analysis::analyzer::DEFAULT_MIN_CLEAN_TOKENS;
use crate::error::AppError;

pub const ENV_MODEL_DIR: &str = "HOAXSCAN_MODEL_DIR";
pub const ENV_LEXICON: &str = "HOAXSCAN_LEXICON";
pub const ENV_THRESHOLDS: &str = "HOAXSCAN_THRESHOLDS";
pub const ENV_STOPWORDS: &str = "HOAXSCAN_STOPWORDS";
pub const ENV_ROOT_WORDS: &str = "HOAXSCAN_ROOT_WORDS";
pub const ENV_MIN_TOKENS: &str = "HOAXSCAN_MIN_TOKENS";
pub const ENV_LOG_FORMAT: &str = "HOAXSCAN_LOG_FORMAT";

const DEFAULT_MODEL_DIR: &str = "./models";

/// Output format of the tracing subscriber
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(AppError::Config(format!(
                "{} must be 'pretty' or 'json', got '{}'",
                ENV_LOG_FORMAT, other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct AppConfig {
    /// Directory holding the vectorizer and SVM artifacts
    pub model_dir: PathBuf,
    /// JSON lexicon replacing the built-in keyword lists
    pub lexicon_path: Option<PathBuf>,
    /// JSON insight thresholds
    pub thresholds_path: Option<PathBuf>,
    /// Newline-delimited stopwords
    pub stopwords_path: Option<PathBuf>,
    /// Newline-delimited root words for the stemmer
    pub root_words_path: Option<PathBuf>,
    #[validate(range(min = 1))]
    pub min_clean_tokens: usize,
    pub log_format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::from(DEFAULT_MODEL_DIR),
            lexicon_path: None,
            thresholds_path: None,
            stopwords_path: None,
            root_words_path: None,
            min_clean_tokens: DEFAULT_MIN_CLEAN_TOKENS,
            log_format: LogFormat::Pretty,
        }
    }
}

fn var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn path_var(name: &str) -> Option<PathBuf> {
    var(name).map(PathBuf::from)
}

impl AppConfig {
    /// Load `.env` (if any) and then read the process environment
    pub fn from_env() -> Result<Self, AppError> {
        dotenv::dotenv().ok();
        Self::from_process_env()
    }

    /// Read the process environment only
    pub fn from_process_env() -> Result<Self, AppError> {
        let defaults = Self::default();

        let min_clean_tokens = match var(ENV_MIN_TOKENS) {
            Some(raw) => raw.parse::<usize>().map_err(|e| {
                AppError::Config(format!("{} must be a positive integer, got '{}': {}", ENV_MIN_TOKENS, raw, e))
            })?,
            None => defaults.min_clean_tokens,
        };

        let log_format = match var(ENV_LOG_FORMAT) {
            Some(raw) => raw.parse()?,
            None => defaults.log_format,
        };

        let config = Self {
            model_dir: path_var(ENV_MODEL_DIR).unwrap_or(defaults.model_dir),
            lexicon_path: path_var(ENV_LEXICON),
            thresholds_path: path_var(ENV_THRESHOLDS),
            stopwords_path: path_var(ENV_STOPWORDS),
            root_words_path: path_var(ENV_ROOT_WORDS),
            min_clean_tokens,
            log_format,
        };

        config
            .validate()
            .map_err(|e| AppError::Config(format!("{} is invalid: {}", ENV_MIN_TOKENS, e)))?;

        Ok(config)
    }
}
