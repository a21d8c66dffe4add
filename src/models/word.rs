//! A word and its meaning, with answer counters collected over sessions.
use super::ListId;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WordId(pub i64);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Word {
    pub id: WordId,
    pub owner_id: String,
    pub list_id: ListId,
    pub word: String,
    pub meaning: String,
    pub correct_count: u32,
    pub incorrect_count: u32,
}

impl Word {
    /// Never answered in any session.
    pub fn is_new(&self) -> bool {
        self.correct_count == 0 && self.incorrect_count == 0
    }
}

#[derive(Clone, Debug, Default)]
pub struct WordPatch {
    pub word: Option<String>,
    pub meaning: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_is_new_until_answered() {
        let mut word = Word {
            id: WordId(1),
            owner_id: "local".to_string(),
            list_id: ListId(1),
            word: "hello".to_string(),
            meaning: "xin chào".to_string(),
            correct_count: 0,
            incorrect_count: 0,
        };
        assert!(word.is_new());

        word.incorrect_count = 1;
        assert!(!word.is_new());
    }
}
