//! Database operations for the vocabulary trainer
//!
//! Handles SQLite initialization, CRUD operations for vocabulary lists and words,
//! answer counters, the session log and the simulated calendar date.

use crate::error::{AppError, Result};
use crate::export::bulk_text::parse_bulk;
use crate::models::{
    ListId, ListPatch, ReviewSchedule, SessionMode, SessionResult, VocabularyList, Word, WordId,
    WordPatch,
};
use chrono::{Days, Local, NaiveDate};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use rusqlite::{Connection, OptionalExtension, Row, params};
use std::path::Path;
use tracing::{debug, info};

const DATE_FORMAT: &str = "%Y-%m-%d";

impl ToSql for ListId {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.0))
    }
}

impl FromSql for ListId {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        i64::column_result(value).map(ListId)
    }
}

impl ToSql for WordId {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.0))
    }
}

impl FromSql for WordId {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        i64::column_result(value).map(WordId)
    }
}

impl ToSql for SessionMode {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for SessionMode {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let name = value.as_str()?;
        SessionMode::from_name(name)
            .ok_or_else(|| FromSqlError::Other(format!("unknown session mode '{name}'").into()))
    }
}

/// Opens (or creates) the database file and makes sure the schema exists
pub fn open_database(path: &Path) -> Result<Connection> {
    let conn = Connection::open(path)?;
    init_schema(&conn)?;
    info!(path = %path.display(), "database opened");
    Ok(conn)
}

/// Creates tables for lists, words, the session log and app state.
/// Sets the current date to today if not already initialized.
pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS vocabulary_lists (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            uid TEXT NOT NULL,
            name TEXT NOT NULL,
            date1 TEXT,
            date2 TEXT,
            date3 TEXT,
            date4 TEXT,
            date5 TEXT
        )",
        (),
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS words (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            uid TEXT NOT NULL,
            list_id INTEGER NOT NULL,
            word TEXT NOT NULL,
            meaning TEXT NOT NULL,
            correct_count INTEGER NOT NULL DEFAULT 0,
            incorrect_count INTEGER NOT NULL DEFAULT 0,
            FOREIGN KEY (list_id) REFERENCES vocabulary_lists(id)
        )",
        (),
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_words_list ON words (uid, list_id)",
        (),
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS learning_sessions (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            uid TEXT NOT NULL,
            list_id INTEGER NOT NULL,
            mode TEXT NOT NULL,
            score INTEGER NOT NULL,
            total_words INTEGER NOT NULL,
            timestamp TEXT NOT NULL
        )",
        (),
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS app_state (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        )",
        (),
    )?;

    let today = Local::now().date_naive().format(DATE_FORMAT).to_string();
    conn.execute(
        "INSERT OR IGNORE INTO app_state (key, value) VALUES ('current_date', ?1)",
        params![today],
    )?;

    Ok(())
}

/// Retrieves the date used for due checks
pub fn get_current_date(conn: &Connection) -> Result<NaiveDate> {
    let value: String = conn.query_row(
        "SELECT value FROM app_state WHERE key = 'current_date'",
        [],
        |row| row.get(0),
    )?;

    Ok(NaiveDate::parse_from_str(&value, DATE_FORMAT)
        .unwrap_or_else(|_| Local::now().date_naive()))
}

fn set_current_date(conn: &Connection, date: NaiveDate) -> Result<()> {
    conn.execute(
        "UPDATE app_state SET value = ?1 WHERE key = 'current_date'",
        params![date.format(DATE_FORMAT).to_string()],
    )?;
    Ok(())
}

/// Advances the current date by one day (for practising review cycles)
pub fn advance_day(conn: &Connection) -> Result<NaiveDate> {
    let next = get_current_date(conn)? + Days::new(1);
    set_current_date(conn, next)?;
    debug!(date = %next, "calendar advanced");
    Ok(next)
}

/// Puts the current date back to the real local date
pub fn reset_current_date(conn: &Connection) -> Result<NaiveDate> {
    let today = Local::now().date_naive();
    set_current_date(conn, today)?;
    Ok(today)
}

fn required(value: &str, field: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    Ok(trimmed.to_string())
}

fn list_from_row(row: &Row) -> rusqlite::Result<VocabularyList> {
    Ok(VocabularyList {
        id: row.get(0)?,
        owner_id: row.get(1)?,
        name: row.get(2)?,
        schedule: ReviewSchedule::from_slots([
            row.get(3)?,
            row.get(4)?,
            row.get(5)?,
            row.get(6)?,
            row.get(7)?,
        ]),
    })
}

fn word_from_row(row: &Row) -> rusqlite::Result<Word> {
    Ok(Word {
        id: row.get(0)?,
        owner_id: row.get(1)?,
        list_id: row.get(2)?,
        word: row.get(3)?,
        meaning: row.get(4)?,
        correct_count: row.get(5)?,
        incorrect_count: row.get(6)?,
    })
}

const LIST_COLUMNS: &str = "id, uid, name, date1, date2, date3, date4, date5";
const WORD_COLUMNS: &str = "id, uid, list_id, word, meaning, correct_count, incorrect_count";

fn insert_list(
    conn: &Connection,
    owner_id: &str,
    name: &str,
    anchor: Option<NaiveDate>,
) -> Result<VocabularyList> {
    let name = required(name, "List name")?;
    let schedule = ReviewSchedule::from_anchor(anchor);
    let [d1, d2, d3, d4, d5] = schedule.slots();

    conn.execute(
        "INSERT INTO vocabulary_lists (uid, name, date1, date2, date3, date4, date5)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![owner_id, name, d1, d2, d3, d4, d5],
    )?;

    Ok(VocabularyList {
        id: ListId(conn.last_insert_rowid()),
        owner_id: owner_id.to_string(),
        name,
        schedule,
    })
}

/// Creates a new list, with a review schedule when an anchor date is given
pub fn create_list(
    conn: &Connection,
    owner_id: &str,
    name: &str,
    anchor: Option<NaiveDate>,
) -> Result<VocabularyList> {
    let list = insert_list(conn, owner_id, name, anchor)?;
    info!(list_id = list.id.0, name = %list.name, "vocabulary list created");
    Ok(list)
}

/// Retrieves all lists of a user, oldest first
pub fn get_lists(conn: &Connection, owner_id: &str) -> Result<Vec<VocabularyList>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {LIST_COLUMNS} FROM vocabulary_lists WHERE uid = ?1 ORDER BY id"
    ))?;
    let lists = stmt
        .query_map(params![owner_id], list_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(lists)
}

pub fn get_list(conn: &Connection, id: ListId) -> Result<VocabularyList> {
    conn.query_row(
        &format!("SELECT {LIST_COLUMNS} FROM vocabulary_lists WHERE id = ?1"),
        params![id],
        list_from_row,
    )
    .optional()?
    .ok_or(AppError::NotFound {
        entity: "list",
        id: id.0,
    })
}

/// Merges the given fields into a list. A new schedule replaces all five dates.
pub fn update_list(conn: &Connection, id: ListId, patch: ListPatch) -> Result<VocabularyList> {
    let mut list = get_list(conn, id)?;

    if let Some(name) = patch.name {
        list.name = required(&name, "List name")?;
    }
    if let Some(schedule) = patch.schedule {
        list.schedule = schedule;
    }

    let [d1, d2, d3, d4, d5] = list.schedule.slots();
    conn.execute(
        "UPDATE vocabulary_lists
         SET name = ?1, date1 = ?2, date2 = ?3, date3 = ?4, date4 = ?5, date5 = ?6
         WHERE id = ?7",
        params![list.name, d1, d2, d3, d4, d5, id],
    )?;

    Ok(list)
}

/// Deletes a list together with all of its words.
///
/// Both deletions run in one transaction, so a failure leaves no orphaned words.
/// Returns the number of words removed.
pub fn delete_list(conn: &mut Connection, id: ListId) -> Result<usize> {
    let tx = conn.transaction()?;
    let removed_words = tx.execute("DELETE FROM words WHERE list_id = ?1", params![id])?;
    let removed_lists = tx.execute("DELETE FROM vocabulary_lists WHERE id = ?1", params![id])?;
    if removed_lists == 0 {
        return Err(AppError::NotFound {
            entity: "list",
            id: id.0,
        });
    }
    tx.commit()?;

    info!(list_id = id.0, words = removed_words, "vocabulary list deleted");
    Ok(removed_words)
}

fn insert_word(
    conn: &Connection,
    owner_id: &str,
    list_id: ListId,
    word: &str,
    meaning: &str,
) -> Result<Word> {
    let word = required(word, "Word")?;
    let meaning = required(meaning, "Meaning")?;

    conn.execute(
        "INSERT INTO words (uid, list_id, word, meaning, correct_count, incorrect_count)
         VALUES (?1, ?2, ?3, ?4, 0, 0)",
        params![owner_id, list_id, word, meaning],
    )?;

    Ok(Word {
        id: WordId(conn.last_insert_rowid()),
        owner_id: owner_id.to_string(),
        list_id,
        word,
        meaning,
        correct_count: 0,
        incorrect_count: 0,
    })
}

/// Adds a word to a live list
pub fn add_word(
    conn: &Connection,
    owner_id: &str,
    list_id: ListId,
    word: &str,
    meaning: &str,
) -> Result<Word> {
    get_list(conn, list_id)?;
    insert_word(conn, owner_id, list_id, word, meaning)
}

/// Adds every well-formed line of `text` as a word, all or nothing
pub fn add_words_bulk(
    conn: &mut Connection,
    owner_id: &str,
    list_id: ListId,
    text: &str,
) -> Result<Vec<Word>> {
    get_list(conn, list_id)?;
    let pairs = parse_bulk(text);

    let tx = conn.transaction()?;
    let mut words = Vec::with_capacity(pairs.len());
    for (word, meaning) in &pairs {
        words.push(insert_word(&tx, owner_id, list_id, word, meaning)?);
    }
    tx.commit()?;

    info!(list_id = list_id.0, added = words.len(), "words imported");
    Ok(words)
}

/// Creates a list and its words in one transaction
pub fn create_list_with_words(
    conn: &mut Connection,
    owner_id: &str,
    name: &str,
    pairs: &[(String, String)],
) -> Result<VocabularyList> {
    let tx = conn.transaction()?;
    let list = insert_list(&tx, owner_id, name, None)?;
    for (word, meaning) in pairs {
        insert_word(&tx, owner_id, list.id, word, meaning)?;
    }
    tx.commit()?;

    info!(list_id = list.id.0, words = pairs.len(), "vocabulary list imported");
    Ok(list)
}

/// Retrieves all words of a list in insertion order
pub fn get_words_for_list(conn: &Connection, owner_id: &str, list_id: ListId) -> Result<Vec<Word>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {WORD_COLUMNS} FROM words WHERE uid = ?1 AND list_id = ?2 ORDER BY id"
    ))?;
    let words = stmt
        .query_map(params![owner_id, list_id], word_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(words)
}

pub fn get_word(conn: &Connection, id: WordId) -> Result<Word> {
    conn.query_row(
        &format!("SELECT {WORD_COLUMNS} FROM words WHERE id = ?1"),
        params![id],
        word_from_row,
    )
    .optional()?
    .ok_or(AppError::NotFound {
        entity: "word",
        id: id.0,
    })
}

/// Merges new text into a word; counters are left alone
pub fn update_word(conn: &Connection, id: WordId, patch: WordPatch) -> Result<Word> {
    let mut word = get_word(conn, id)?;

    if let Some(text) = patch.word {
        word.word = required(&text, "Word")?;
    }
    if let Some(meaning) = patch.meaning {
        word.meaning = required(&meaning, "Meaning")?;
    }

    conn.execute(
        "UPDATE words SET word = ?1, meaning = ?2 WHERE id = ?3",
        params![word.word, word.meaning, id],
    )?;

    Ok(word)
}

/// Deletes the selected words in one batch. Returns how many were removed.
///
/// A missing id fails the whole batch and nothing is deleted.
pub fn delete_words(conn: &mut Connection, ids: &[WordId]) -> Result<usize> {
    let tx = conn.transaction()?;
    let mut removed = 0;
    {
        let mut stmt = tx.prepare("DELETE FROM words WHERE id = ?1")?;
        for id in ids {
            if stmt.execute(params![id])? == 0 {
                return Err(AppError::NotFound {
                    entity: "word",
                    id: id.0,
                });
            }
            removed += 1;
        }
    }
    tx.commit()?;

    debug!(requested = ids.len(), removed, "words deleted");
    Ok(removed)
}

/// Increments the correct or incorrect counter of a word by one
pub fn record_answer(conn: &Connection, id: WordId, correct: bool) -> Result<()> {
    let sql = if correct {
        "UPDATE words SET correct_count = correct_count + 1 WHERE id = ?1"
    } else {
        "UPDATE words SET incorrect_count = incorrect_count + 1 WHERE id = ?1"
    };
    if conn.execute(sql, params![id])? == 0 {
        return Err(AppError::NotFound {
            entity: "word",
            id: id.0,
        });
    }
    Ok(())
}

/// Appends a finished session to the session log
pub fn save_session_result(conn: &Connection, result: &SessionResult) -> Result<()> {
    conn.execute(
        "INSERT INTO learning_sessions (uid, list_id, mode, score, total_words, timestamp)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            result.owner_id,
            result.list_id,
            result.mode,
            result.score,
            result.total_words,
            result.timestamp
        ],
    )?;
    Ok(())
}

/// Retrieves logged sessions of a list, newest first
pub fn get_session_results(
    conn: &Connection,
    owner_id: &str,
    list_id: ListId,
) -> Result<Vec<SessionResult>> {
    let mut stmt = conn.prepare(
        "SELECT uid, list_id, mode, score, total_words, timestamp
         FROM learning_sessions
         WHERE uid = ?1 AND list_id = ?2
         ORDER BY id DESC",
    )?;
    let results = stmt
        .query_map(params![owner_id, list_id], |row| {
            Ok(SessionResult {
                owner_id: row.get(0)?,
                list_id: row.get(1)?,
                mode: row.get(2)?,
                score: row.get(3)?,
                total_words: row.get(4)?,
                timestamp: row.get(5)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(results)
}
