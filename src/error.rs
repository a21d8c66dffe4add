//! Error types shared by the store, the importers and the learning session.
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    /// A required field was empty after trimming. Raised before any write.
    #[error("{0}")]
    Validation(String),

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error("database error: {0}")]
    Persistence(#[from] rusqlite::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::Validation(message.into())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

/// Rejected transitions of a learning session.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    #[error("there are no words to learn")]
    EmptyDeck,

    #[error("this action is not available in the current mode")]
    WrongMode,

    #[error("the current word was already answered")]
    AlreadyEvaluated,

    #[error("the session is finished")]
    Finished,

    #[error("no such answer option")]
    NoSuchOption,
}
