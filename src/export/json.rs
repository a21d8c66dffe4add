//! JSON import/export module for vocabulary lists.
//! Provides functionality to save and load a list and its words to/from JSON files.

use crate::error::Result;
use crate::models::{VocabularyList, Word};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordEntry {
    pub word: String,
    pub meaning: String,
}

/// Portable form of a list. Counters and review dates stay local.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListExport {
    pub name: String,
    pub words: Vec<WordEntry>,
}

impl ListExport {
    pub fn from_list(list: &VocabularyList, words: &[Word]) -> Self {
        Self {
            name: list.name.clone(),
            words: words
                .iter()
                .map(|w| WordEntry {
                    word: w.word.clone(),
                    meaning: w.meaning.clone(),
                })
                .collect(),
        }
    }

    pub fn pairs(&self) -> Vec<(String, String)> {
        self.words
            .iter()
            .map(|w| (w.word.clone(), w.meaning.clone()))
            .collect()
    }
}

/// Exports a list to a JSON file at the specified path.
/// Returns an error if file creation or writing fails.
pub fn export_list_to_path(export: &ListExport, path: &Path) -> Result<()> {
    let json_string = serde_json::to_string_pretty(export)?;
    fs::write(path, json_string)?;
    info!(list = %export.name, path = %path.display(), "list exported");
    Ok(())
}

/// Imports a list from a JSON file.
/// Returns an error if the file doesn't exist or contains invalid JSON.
pub fn import_list(path: &Path) -> Result<ListExport> {
    let contents = fs::read_to_string(path)?;
    let export: ListExport = serde_json::from_str(&contents)?;
    info!(list = %export.name, path = %path.display(), "list read from file");
    Ok(export)
}
