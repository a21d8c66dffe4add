pub mod config;
pub mod database;
pub mod error;
pub mod export;
pub mod models;

pub use config::AppConfig;
pub use database::VocabStore;
pub use error::{AppError, SessionError};
pub use models::{LearningSession, ListId, SessionMode, VocabularyList, Word, WordId};
