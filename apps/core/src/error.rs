use std::io;
use thiserror::Error;

/// Application-wide error type, consolidating every failure the pipeline can surface.
#[derive(Debug, Error)]
pub enum AppError {
    /// Model artifacts, lexicon or word lists could not be loaded. Fatal at startup.
    #[error("Resource load failure: {0}")]
    ResourceLoad(String),

    /// The submission was blank or whitespace-only.
    #[error("Empty input")]
    EmptyInput,

    /// The text survived normalization with too few meaningful tokens.
    #[error("Insufficient content: {tokens} meaningful tokens, at least {required} required")]
    InsufficientContent { tokens: usize, required: usize },

    /// The classifier failed internally while handling a request.
    #[error("Classification failure: {0}")]
    Classification(String),

    /// Represents configuration-related errors (e.g., malformed environment variables).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Represents data validation errors (e.g., an invalid lexicon or threshold file).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Represents standard input/output errors.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl AppError {
    /// Whether the user can fix this error by changing the submitted text.
    pub fn is_user_recoverable(&self) -> bool {
        matches!(self, AppError::EmptyInput | AppError::InsufficientContent { .. })
    }

    /// Guidance suitable for showing at the boundary instead of a raw error chain.
    pub fn user_message(&self) -> String {
        match self {
            AppError::EmptyInput => {
                "Please enter the news text before running the analysis.".to_string()
            }
            AppError::InsufficientContent { .. } => {
                "The text is too short or does not contain enough information to analyze."
                    .to_string()
            }
            AppError::Classification(_) => {
                "The classifier could not process this text. Please try again later.".to_string()
            }
            AppError::ResourceLoad(_) => {
                "The detection model is not available. Check that the model artifacts are installed."
                    .to_string()
            }
            other => other.to_string(),
        }
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        match self {
            AppError::ResourceLoad(s) => AppError::ResourceLoad(s.clone()),
            AppError::EmptyInput => AppError::EmptyInput,
            AppError::InsufficientContent { tokens, required } => AppError::InsufficientContent {
                tokens: *tokens,
                required: *required,
            },
            AppError::Classification(s) => AppError::Classification(s.clone()),
            AppError::Config(s) => AppError::Config(s.clone()),
            AppError::Validation(s) => AppError::Validation(s.clone()),
            AppError::Io(e) => AppError::Io(io::Error::new(e.kind(), e.to_string())),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Validation(format!("JSON error: {}", err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(format!("Validation errors: {}", err))
    }
}

impl From<regex::Error> for AppError {
    fn from(err: regex::Error) -> Self {
        AppError::Validation(format!("Invalid pattern: {}", err))
    }
}
