use super::{ListId, SessionMode};
use chrono::{DateTime, Utc};

/// Score of one finished session, kept as a history row.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionResult {
    pub owner_id: String,
    pub list_id: ListId,
    pub mode: SessionMode,
    pub score: u32,
    pub total_words: u32,
    pub timestamp: DateTime<Utc>,
}
