use chrono::NaiveDate;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rusqlite::Connection;
use std::time::{Duration, Instant};
use vocab_app::database::{VocabStore, db};
use vocab_app::models::{
    LearningSession, SessionMode, SessionOptions, SessionStatus, WordPatch,
};

const OWNER: &str = "local";

fn store() -> VocabStore {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    VocabStore::new(conn)
}

fn options() -> SessionOptions {
    SessionOptions {
        feedback_delay: Duration::from_millis(50),
        ..SessionOptions::default()
    }
}

#[test]
fn typing_session_updates_counters() {
    let mut store = store();
    let list = store
        .create_list(OWNER, "IELTS", NaiveDate::from_ymd_opt(2024, 1, 1))
        .unwrap();
    store
        .add_words_bulk(
            OWNER,
            list.id,
            "apple  quả táo\nbook  quyển sách\ncat  con mèo\ndog  con chó\negg  quả trứng",
        )
        .unwrap();
    let words = store.words(OWNER, list.id).unwrap();

    let mut session = LearningSession::start(
        list.id,
        list.name.clone(),
        words,
        SessionMode::Typing,
        options(),
        StdRng::seed_from_u64(2024),
    )
    .unwrap();

    let mut now = Instant::now();
    let mut missed = None;
    for i in 0..5 {
        let target = session.current_word().unwrap().clone();
        let answer = if i == 2 {
            missed = Some(target.id);
            "wrong".to_string()
        } else {
            target.word.to_uppercase()
        };
        session.submit_typing(&answer, now, &mut store).unwrap();
        now += Duration::from_millis(50);
        assert!(session.tick(now));
    }

    assert_eq!(session.status(), SessionStatus::Finished);
    assert_eq!(session.score(), 4);

    let stored = store.words(OWNER, list.id).unwrap();
    for word in stored {
        if Some(word.id) == missed {
            assert_eq!((word.correct_count, word.incorrect_count), (0, 1));
        } else {
            assert_eq!((word.correct_count, word.incorrect_count), (1, 0));
        }
    }
}

#[test]
fn running_session_keeps_its_snapshot() {
    let mut store = store();
    let list = store.create_list(OWNER, "snapshot", None).unwrap();
    store.add_words_bulk(OWNER, list.id, "one  một\ntwo  hai").unwrap();
    let words = store.words(OWNER, list.id).unwrap();

    let session = LearningSession::start(
        list.id,
        list.name.clone(),
        words.clone(),
        SessionMode::Flashcard,
        options(),
        StdRng::seed_from_u64(1),
    )
    .unwrap();

    store
        .update_word(
            words[0].id,
            WordPatch {
                word: Some("uno".to_string()),
                meaning: None,
            },
        )
        .unwrap();
    store.delete_words(&[words[1].id]).unwrap();

    assert_eq!(session.total(), 2);
    assert!(session.deck().iter().any(|w| w.word == "one"));
    assert!(session.deck().iter().any(|w| w.word == "two"));
}

#[test]
fn deleted_list_leaves_no_words_behind() {
    let mut store = store();
    let list = store.create_list(OWNER, "gone", None).unwrap();
    store
        .add_words_bulk(OWNER, list.id, "a  1\nb  2\nc  3\nd  4")
        .unwrap();

    assert_eq!(store.delete_list(list.id).unwrap(), 4);
    assert!(store.words(OWNER, list.id).unwrap().is_empty());
    assert!(store.lists(OWNER).unwrap().is_empty());
}
