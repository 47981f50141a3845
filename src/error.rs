use thiserror::Error;

/// Application-level errors
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Cuisine not found: {0}")]
    CuisineNotFound(String),

    #[error("Malformed menu line {line}: {content:?}")]
    MenuFormat { line: usize, content: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type AppResult<T> = Result<T, AppError>;
