//! Store with live queries.
//!
//! Views subscribe to the lists of a user or to the words of one list. Every
//! subscriber receives the current snapshot right away and again after each
//! mutation made through this store that may change its result.

use super::db;
use crate::error::Result;
use crate::models::{
    AnswerRecorder, ListId, ListPatch, SessionResult, VocabularyList, Word, WordId, WordPatch,
};
use chrono::NaiveDate;
use rusqlite::Connection;
use tracing::{debug, warn};

type ListCallback = Box<dyn FnMut(&[VocabularyList])>;
type WordCallback = Box<dyn FnMut(&[Word])>;

/// Handle of a live query. Give it back to [`VocabStore::unsubscribe`] to stop
/// receiving snapshots; it cannot be used twice.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "dropping the handle leaves the subscription active"]
pub struct Subscription(u64);

struct ListWatcher {
    id: u64,
    owner_id: String,
    callback: ListCallback,
}

struct WordWatcher {
    id: u64,
    owner_id: String,
    list_id: ListId,
    callback: WordCallback,
}

pub struct VocabStore {
    conn: Connection,
    next_subscription: u64,
    list_watchers: Vec<ListWatcher>,
    word_watchers: Vec<WordWatcher>,
}

impl VocabStore {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn,
            next_subscription: 0,
            list_watchers: Vec::new(),
            word_watchers: Vec::new(),
        }
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    fn next_id(&mut self) -> u64 {
        self.next_subscription += 1;
        self.next_subscription
    }

    /// Watches all lists of `owner_id`.
    pub fn subscribe_lists(
        &mut self,
        owner_id: &str,
        mut callback: impl FnMut(&[VocabularyList]) + 'static,
    ) -> Result<Subscription> {
        let snapshot = db::get_lists(&self.conn, owner_id)?;
        callback(&snapshot);

        let id = self.next_id();
        self.list_watchers.push(ListWatcher {
            id,
            owner_id: owner_id.to_string(),
            callback: Box::new(callback),
        });
        debug!(subscription = id, "list subscription opened");
        Ok(Subscription(id))
    }

    /// Watches the words of one list.
    pub fn subscribe_words(
        &mut self,
        owner_id: &str,
        list_id: ListId,
        mut callback: impl FnMut(&[Word]) + 'static,
    ) -> Result<Subscription> {
        let snapshot = db::get_words_for_list(&self.conn, owner_id, list_id)?;
        callback(&snapshot);

        let id = self.next_id();
        self.word_watchers.push(WordWatcher {
            id,
            owner_id: owner_id.to_string(),
            list_id,
            callback: Box::new(callback),
        });
        debug!(subscription = id, list_id = list_id.0, "word subscription opened");
        Ok(Subscription(id))
    }

    /// Stops a live query. Returns false if it was already gone.
    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        let before = self.list_watchers.len() + self.word_watchers.len();
        self.list_watchers.retain(|w| w.id != subscription.0);
        self.word_watchers.retain(|w| w.id != subscription.0);
        let removed = before != self.list_watchers.len() + self.word_watchers.len();
        debug!(subscription = subscription.0, removed, "subscription closed");
        removed
    }

    pub fn subscriber_count(&self) -> usize {
        self.list_watchers.len() + self.word_watchers.len()
    }

    fn notify_lists(&mut self) {
        for watcher in &mut self.list_watchers {
            match db::get_lists(&self.conn, &watcher.owner_id) {
                Ok(lists) => (watcher.callback)(&lists),
                Err(err) => warn!(subscription = watcher.id, error = %err, "list refresh failed"),
            }
        }
    }

    fn notify_words(&mut self, list_id: Option<ListId>) {
        for watcher in &mut self.word_watchers {
            if list_id.is_some_and(|id| id != watcher.list_id) {
                continue;
            }
            match db::get_words_for_list(&self.conn, &watcher.owner_id, watcher.list_id) {
                Ok(words) => (watcher.callback)(&words),
                Err(err) => warn!(subscription = watcher.id, error = %err, "word refresh failed"),
            }
        }
    }

    pub fn current_date(&self) -> Result<NaiveDate> {
        db::get_current_date(&self.conn)
    }

    pub fn advance_day(&mut self) -> Result<NaiveDate> {
        db::advance_day(&self.conn)
    }

    pub fn reset_current_date(&mut self) -> Result<NaiveDate> {
        db::reset_current_date(&self.conn)
    }

    pub fn lists(&self, owner_id: &str) -> Result<Vec<VocabularyList>> {
        db::get_lists(&self.conn, owner_id)
    }

    pub fn list(&self, id: ListId) -> Result<VocabularyList> {
        db::get_list(&self.conn, id)
    }

    pub fn words(&self, owner_id: &str, list_id: ListId) -> Result<Vec<Word>> {
        db::get_words_for_list(&self.conn, owner_id, list_id)
    }

    pub fn create_list(
        &mut self,
        owner_id: &str,
        name: &str,
        anchor: Option<NaiveDate>,
    ) -> Result<VocabularyList> {
        let list = db::create_list(&self.conn, owner_id, name, anchor)?;
        self.notify_lists();
        Ok(list)
    }

    pub fn update_list(&mut self, id: ListId, patch: ListPatch) -> Result<VocabularyList> {
        let list = db::update_list(&self.conn, id, patch)?;
        self.notify_lists();
        Ok(list)
    }

    pub fn delete_list(&mut self, id: ListId) -> Result<usize> {
        let removed = db::delete_list(&mut self.conn, id)?;
        self.notify_lists();
        self.notify_words(Some(id));
        Ok(removed)
    }

    pub fn import_list(
        &mut self,
        owner_id: &str,
        name: &str,
        pairs: &[(String, String)],
    ) -> Result<VocabularyList> {
        let list = db::create_list_with_words(&mut self.conn, owner_id, name, pairs)?;
        self.notify_lists();
        Ok(list)
    }

    pub fn add_word(
        &mut self,
        owner_id: &str,
        list_id: ListId,
        word: &str,
        meaning: &str,
    ) -> Result<Word> {
        let word = db::add_word(&self.conn, owner_id, list_id, word, meaning)?;
        self.notify_words(Some(list_id));
        Ok(word)
    }

    pub fn add_words_bulk(
        &mut self,
        owner_id: &str,
        list_id: ListId,
        text: &str,
    ) -> Result<Vec<Word>> {
        let words = db::add_words_bulk(&mut self.conn, owner_id, list_id, text)?;
        if !words.is_empty() {
            self.notify_words(Some(list_id));
        }
        Ok(words)
    }

    pub fn update_word(&mut self, id: WordId, patch: WordPatch) -> Result<Word> {
        let word = db::update_word(&self.conn, id, patch)?;
        self.notify_words(Some(word.list_id));
        Ok(word)
    }

    pub fn delete_words(&mut self, ids: &[WordId]) -> Result<usize> {
        let removed = db::delete_words(&mut self.conn, ids)?;
        if removed > 0 {
            self.notify_words(None);
        }
        Ok(removed)
    }

    pub fn save_session_result(&mut self, result: &SessionResult) -> Result<()> {
        db::save_session_result(&self.conn, result)
    }

    pub fn session_results(&self, owner_id: &str, list_id: ListId) -> Result<Vec<SessionResult>> {
        db::get_session_results(&self.conn, owner_id, list_id)
    }
}

impl AnswerRecorder for VocabStore {
    fn record_answer(&mut self, word_id: WordId, correct: bool) -> Result<()> {
        db::record_answer(&self.conn, word_id, correct)?;
        let list_id = db::get_word(&self.conn, word_id)?.list_id;
        self.notify_words(Some(list_id));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use std::cell::RefCell;
    use std::rc::Rc;

    const OWNER: &str = "local";

    fn store() -> VocabStore {
        let conn = Connection::open_in_memory().unwrap();
        db::init_schema(&conn).unwrap();
        VocabStore::new(conn)
    }

    fn list_names(seen: &Rc<RefCell<Vec<Vec<String>>>>) -> Vec<Vec<String>> {
        seen.borrow().clone()
    }

    #[test]
    fn test_list_subscription_gets_initial_and_updates() {
        let mut store = store();
        store.create_list(OWNER, "first", None).unwrap();

        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let sub = store
            .subscribe_lists(OWNER, move |lists| {
                sink.borrow_mut()
                    .push(lists.iter().map(|l| l.name.clone()).collect());
            })
            .unwrap();

        store.create_list(OWNER, "second", None).unwrap();
        store.create_list("other", "not mine", None).unwrap();

        assert_eq!(
            list_names(&seen),
            vec![
                vec!["first".to_string()],
                vec!["first".to_string(), "second".to_string()],
                vec!["first".to_string(), "second".to_string()],
            ]
        );

        assert!(store.unsubscribe(sub));
        store.create_list(OWNER, "third", None).unwrap();
        assert_eq!(seen.borrow().len(), 3);
        assert_eq!(store.subscriber_count(), 0);
    }

    #[test]
    fn test_word_subscription_only_fires_for_its_list() {
        let mut store = store();
        let watched = store.create_list(OWNER, "watched", None).unwrap();
        let other = store.create_list(OWNER, "other", None).unwrap();

        let counts = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&counts);
        let sub = store
            .subscribe_words(OWNER, watched.id, move |words| {
                sink.borrow_mut().push(words.len());
            })
            .unwrap();

        store.add_word(OWNER, watched.id, "a", "1").unwrap();
        store.add_word(OWNER, other.id, "b", "2").unwrap();
        store
            .add_words_bulk(OWNER, watched.id, "c  3\nd\t4")
            .unwrap();

        assert_eq!(*counts.borrow(), vec![0, 1, 3]);
        assert!(store.unsubscribe(sub));
    }

    #[test]
    fn test_recorded_answers_refresh_word_views() {
        let mut store = store();
        let list = store.create_list(OWNER, "list", None).unwrap();
        let word = store.add_word(OWNER, list.id, "a", "1").unwrap();

        let latest = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&latest);
        let sub = store
            .subscribe_words(OWNER, list.id, move |words| {
                *sink.borrow_mut() = words.first().map(|w| w.incorrect_count);
            })
            .unwrap();

        store.record_answer(word.id, false).unwrap();
        assert_eq!(*latest.borrow(), Some(1));
        assert!(store.unsubscribe(sub));
    }

    #[test]
    fn test_deleting_list_empties_word_view() {
        let mut store = store();
        let list = store.create_list(OWNER, "list", None).unwrap();
        store.add_words_bulk(OWNER, list.id, "a  1\nb  2\nc  3").unwrap();

        let counts = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&counts);
        let sub = store
            .subscribe_words(OWNER, list.id, move |words| sink.borrow_mut().push(words.len()))
            .unwrap();

        assert_eq!(store.delete_list(list.id).unwrap(), 3);
        assert_eq!(*counts.borrow(), vec![3, 0]);
        assert!(store.unsubscribe(sub));
    }

    #[test]
    fn test_failed_write_does_not_notify() {
        let mut store = store();
        let calls = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&calls);
        let sub = store
            .subscribe_lists(OWNER, move |_| *sink.borrow_mut() += 1)
            .unwrap();

        assert!(store.create_list(OWNER, " ", None).is_err());
        assert!(store.update_list(ListId(42), ListPatch::rename("x")).is_err());
        assert_eq!(*calls.borrow(), 1);
        assert!(store.unsubscribe(sub));
    }

    #[test]
    fn test_deleting_missing_word_keeps_view_untouched() {
        let mut store = store();
        let list = store.create_list(OWNER, "list", None).unwrap();
        let word = store.add_word(OWNER, list.id, "a", "1").unwrap();

        let counts = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&counts);
        let sub = store
            .subscribe_words(OWNER, list.id, move |words| sink.borrow_mut().push(words.len()))
            .unwrap();

        assert!(matches!(
            store.delete_words(&[word.id, WordId(12345)]),
            Err(AppError::NotFound { entity: "word", id: 12345 })
        ));
        assert_eq!(*counts.borrow(), vec![1]);
        assert_eq!(store.words(OWNER, list.id).unwrap().len(), 1);
        assert!(store.unsubscribe(sub));
    }
}
