//! Learning session over a snapshot of a vocabulary list.
//!
//! A session shuffles the words it was started with and presents them one at
//! a time. Scored modes (typing, multiple choice) show feedback for a fixed
//! observation delay before moving on; the owner drives that delay by calling
//! [`LearningSession::tick`] with the current time. The retype drill advances
//! as soon as a word was typed correctly enough times, and flashcards are
//! browsed freely without scoring.
//!
//! When there is no session the learner is idle; leaving a session simply
//! drops it.

use super::{ListId, MultipleChoiceQuestion, QuestionDirection, VocabularyList, Word, WordId};
use chrono::NaiveDate;
use crate::error::SessionError;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

pub const DEFAULT_FEEDBACK_DELAY: Duration = Duration::from_secs(2);
pub const DEFAULT_RETYPE_REPETITIONS: u8 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionMode {
    Typing,
    MultipleChoice,
    Flashcard,
    Retype,
}

impl SessionMode {
    pub const ALL: [SessionMode; 4] = [
        SessionMode::Typing,
        SessionMode::MultipleChoice,
        SessionMode::Flashcard,
        SessionMode::Retype,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SessionMode::Typing => "Typing",
            SessionMode::MultipleChoice => "Multiple choice",
            SessionMode::Flashcard => "Flashcards",
            SessionMode::Retype => "Retype",
        }
    }

    /// Stable name used in the session log table.
    pub fn as_str(self) -> &'static str {
        match self {
            SessionMode::Typing => "typing",
            SessionMode::MultipleChoice => "multiple_choice",
            SessionMode::Flashcard => "flashcard",
            SessionMode::Retype => "retype",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|mode| mode.as_str() == name)
    }

    pub fn is_scored(self) -> bool {
        self != SessionMode::Flashcard
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Feedback {
    None,
    Correct,
    Incorrect,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionStatus {
    InProgress,
    Finished,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionSummary {
    pub score: u32,
    pub total: usize,
}

/// Receives the verdict for every answered word.
///
/// Failures are logged by the session and never stop it.
pub trait AnswerRecorder {
    fn record_answer(&mut self, word_id: WordId, correct: bool) -> crate::error::Result<()>;
}

#[derive(Clone, Debug)]
pub struct SessionOptions {
    pub feedback_delay: Duration,
    pub question_direction: QuestionDirection,
    pub retype_repetitions: u8,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            feedback_delay: DEFAULT_FEEDBACK_DELAY,
            question_direction: QuestionDirection::default(),
            retype_repetitions: DEFAULT_RETYPE_REPETITIONS,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Verdict {
    pub word_id: WordId,
    pub correct: bool,
    pub expected: String,
}

/// Which words of a list a session starts with
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WordScope {
    All,
    /// Words never answered
    New,
    /// Every word of the list, when one of its review slots is `today`
    Due,
}

pub fn select_words(
    scope: WordScope,
    list: &VocabularyList,
    words: &[Word],
    today: NaiveDate,
) -> Vec<Word> {
    let in_list = words.iter().filter(|w| w.list_id == list.id);
    match scope {
        WordScope::All => in_list.cloned().collect(),
        WordScope::New => in_list.filter(|w| w.is_new()).cloned().collect(),
        WordScope::Due if list.is_due_on(today) => in_list.cloned().collect(),
        WordScope::Due => Vec::new(),
    }
}

/// Case and surrounding whitespace are ignored.
pub fn answers_match(answer: &str, target: &str) -> bool {
    answer.trim().to_lowercase() == target.trim().to_lowercase()
}

pub struct LearningSession {
    list_id: ListId,
    list_name: String,
    words: Vec<Word>,
    deck: Vec<Word>,
    mode: SessionMode,
    options: SessionOptions,
    index: usize,
    score: u32,
    feedback: Feedback,
    advance_at: Option<Instant>,
    question: Option<MultipleChoiceQuestion>,
    flipped: bool,
    repetitions: u8,
    stumbled: bool,
    rng: StdRng,
}

impl LearningSession {
    /// Starts a session on a copy of `words`. Later edits to the stored words
    /// do not reach a running session.
    pub fn start(
        list_id: ListId,
        list_name: String,
        words: Vec<Word>,
        mode: SessionMode,
        options: SessionOptions,
        rng: StdRng,
    ) -> Result<Self, SessionError> {
        if words.is_empty() {
            return Err(SessionError::EmptyDeck);
        }

        let mut session = Self {
            list_id,
            list_name,
            deck: Vec::with_capacity(words.len()),
            words,
            mode,
            options,
            index: 0,
            score: 0,
            feedback: Feedback::None,
            advance_at: None,
            question: None,
            flipped: false,
            repetitions: 0,
            stumbled: false,
            rng,
        };
        session.reset();
        info!(
            list = %session.list_name,
            mode = session.mode.as_str(),
            words = session.deck.len(),
            "learning session started"
        );
        Ok(session)
    }

    fn reset(&mut self) {
        self.deck = self.words.clone();
        self.deck.shuffle(&mut self.rng);
        self.index = 0;
        self.score = 0;
        self.clear_item_state();
        self.prepare_item();
    }

    fn clear_item_state(&mut self) {
        self.feedback = Feedback::None;
        self.advance_at = None;
        self.flipped = false;
        self.repetitions = 0;
        self.stumbled = false;
    }

    fn prepare_item(&mut self) {
        self.question = if self.mode == SessionMode::MultipleChoice {
            MultipleChoiceQuestion::build(
                &self.deck,
                self.index,
                self.options.question_direction,
                &mut self.rng,
            )
        } else {
            None
        };
    }

    /// Same words, freshly shuffled, score back to zero.
    pub fn restart(&mut self) {
        self.reset();
        debug!(list = %self.list_name, "learning session restarted");
    }

    /// Switches mode mid-session. A finished session only offers restart or exit.
    pub fn restart_with_mode(&mut self, mode: SessionMode) -> Result<(), SessionError> {
        if self.is_finished() {
            return Err(SessionError::Finished);
        }
        self.mode = mode;
        self.restart();
        Ok(())
    }

    pub fn list_id(&self) -> ListId {
        self.list_id
    }

    pub fn list_name(&self) -> &str {
        &self.list_name
    }

    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    pub fn deck(&self) -> &[Word] {
        &self.deck
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn total(&self) -> usize {
        self.deck.len()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn feedback(&self) -> Feedback {
        self.feedback
    }

    pub fn question(&self) -> Option<&MultipleChoiceQuestion> {
        self.question.as_ref()
    }

    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    pub fn repetitions(&self) -> u8 {
        self.repetitions
    }

    pub fn required_repetitions(&self) -> u8 {
        self.options.retype_repetitions
    }

    pub fn current_word(&self) -> Option<&Word> {
        self.deck.get(self.index)
    }

    pub fn status(&self) -> SessionStatus {
        if self.index >= self.deck.len() {
            SessionStatus::Finished
        } else {
            SessionStatus::InProgress
        }
    }

    pub fn is_finished(&self) -> bool {
        self.status() == SessionStatus::Finished
    }

    /// Fraction of the deck already behind the learner.
    pub fn progress(&self) -> f32 {
        self.index as f32 / self.deck.len() as f32
    }

    pub fn summary(&self) -> Option<SessionSummary> {
        self.is_finished().then(|| SessionSummary {
            score: self.score,
            total: self.deck.len(),
        })
    }

    /// Time left before the pending advance, if one is armed.
    pub fn remaining_delay(&self, now: Instant) -> Option<Duration> {
        self.advance_at
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    fn require_mode(&self, mode: SessionMode) -> Result<(), SessionError> {
        if self.mode != mode {
            return Err(SessionError::WrongMode);
        }
        if self.is_finished() {
            return Err(SessionError::Finished);
        }
        Ok(())
    }

    fn require_awaiting(&self, mode: SessionMode) -> Result<(), SessionError> {
        self.require_mode(mode)?;
        if self.advance_at.is_some() {
            return Err(SessionError::AlreadyEvaluated);
        }
        Ok(())
    }

    /// Checks a typed answer against the current word.
    pub fn submit_typing(
        &mut self,
        answer: &str,
        now: Instant,
        recorder: &mut dyn AnswerRecorder,
    ) -> Result<Verdict, SessionError> {
        self.require_awaiting(SessionMode::Typing)?;
        let target = &self.deck[self.index];
        let correct = answers_match(answer, &target.word);
        let expected = target.word.clone();
        Ok(self.evaluate(correct, expected, now, recorder))
    }

    /// Checks the option at `option` of the current question.
    pub fn submit_choice(
        &mut self,
        option: usize,
        now: Instant,
        recorder: &mut dyn AnswerRecorder,
    ) -> Result<Verdict, SessionError> {
        self.require_awaiting(SessionMode::MultipleChoice)?;
        let question = self.question.as_ref().ok_or(SessionError::NoSuchOption)?;
        let selected = question
            .options
            .get(option)
            .ok_or(SessionError::NoSuchOption)?;
        let correct = question.is_correct(selected);
        let expected = question.answer.clone();
        Ok(self.evaluate(correct, expected, now, recorder))
    }

    fn evaluate(
        &mut self,
        correct: bool,
        expected: String,
        now: Instant,
        recorder: &mut dyn AnswerRecorder,
    ) -> Verdict {
        let word_id = self.deck[self.index].id;
        if correct {
            self.score += 1;
            self.feedback = Feedback::Correct;
        } else {
            self.feedback = Feedback::Incorrect;
        }
        record(recorder, word_id, correct);
        self.advance_at = Some(now + self.options.feedback_delay);

        Verdict {
            word_id,
            correct,
            expected,
        }
    }

    /// Performs the pending advance once its deadline has passed.
    ///
    /// Returns true when the session moved on.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.advance_at {
            Some(deadline) if now >= deadline => {
                self.advance();
                true
            }
            _ => false,
        }
    }

    fn advance(&mut self) {
        self.index += 1;
        self.clear_item_state();
        self.prepare_item();

        if self.is_finished() {
            info!(
                list = %self.list_name,
                score = self.score,
                total = self.deck.len(),
                "learning session finished"
            );
        }
    }

    /// Retype drill: the word must be typed correctly several times in a row
    /// before the next one is shown. Every attempt is recorded.
    pub fn submit_retype(
        &mut self,
        answer: &str,
        recorder: &mut dyn AnswerRecorder,
    ) -> Result<Verdict, SessionError> {
        self.require_mode(SessionMode::Retype)?;
        let target = &self.deck[self.index];
        let word_id = target.id;
        let expected = target.word.clone();
        let correct = answers_match(answer, &expected);
        record(recorder, word_id, correct);

        if correct {
            self.feedback = Feedback::Correct;
            self.repetitions += 1;
            if self.repetitions >= self.options.retype_repetitions {
                if !self.stumbled {
                    self.score += 1;
                }
                self.advance();
            }
        } else {
            self.feedback = Feedback::Incorrect;
            self.stumbled = true;
        }

        Ok(Verdict {
            word_id,
            correct,
            expected,
        })
    }

    pub fn flip(&mut self) -> Result<(), SessionError> {
        self.require_mode(SessionMode::Flashcard)?;
        self.flipped = !self.flipped;
        Ok(())
    }

    /// Moves to the next card; stays on the last one.
    pub fn next_card(&mut self) -> Result<bool, SessionError> {
        self.require_mode(SessionMode::Flashcard)?;
        if self.index + 1 < self.deck.len() {
            self.index += 1;
            self.flipped = false;
            return Ok(true);
        }
        Ok(false)
    }

    pub fn previous_card(&mut self) -> Result<bool, SessionError> {
        self.require_mode(SessionMode::Flashcard)?;
        if self.index > 0 {
            self.index -= 1;
            self.flipped = false;
            return Ok(true);
        }
        Ok(false)
    }
}

fn record(recorder: &mut dyn AnswerRecorder, word_id: WordId, correct: bool) {
    if let Err(err) = recorder.record_answer(word_id, correct) {
        warn!(word_id = word_id.0, error = %err, "failed to record answer");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::ReviewSchedule;
    use rand::SeedableRng;

    #[derive(Default)]
    struct Recorded(Vec<(WordId, bool)>);

    impl AnswerRecorder for Recorded {
        fn record_answer(&mut self, word_id: WordId, correct: bool) -> crate::error::Result<()> {
            self.0.push((word_id, correct));
            Ok(())
        }
    }

    struct Offline;

    impl AnswerRecorder for Offline {
        fn record_answer(&mut self, word_id: WordId, _: bool) -> crate::error::Result<()> {
            Err(AppError::NotFound {
                entity: "word",
                id: word_id.0,
            })
        }
    }

    fn words(size: usize) -> Vec<Word> {
        (0..size)
            .map(|i| Word {
                id: WordId(i as i64 + 1),
                owner_id: "local".to_string(),
                list_id: ListId(7),
                word: format!("Word{i}"),
                meaning: format!("meaning {i}"),
                correct_count: 0,
                incorrect_count: 0,
            })
            .collect()
    }

    fn session(size: usize, mode: SessionMode, seed: u64) -> LearningSession {
        LearningSession::start(
            ListId(7),
            "IELTS".to_string(),
            words(size),
            mode,
            SessionOptions::default(),
            StdRng::seed_from_u64(seed),
        )
        .unwrap()
    }

    fn answer_current(session: &LearningSession) -> String {
        session.current_word().unwrap().word.clone()
    }

    #[test]
    fn test_answers_match_ignores_case_and_padding() {
        assert!(answers_match("Hello ", "Hello"));
        assert!(answers_match("hello", "Hello"));
        assert!(answers_match("  HELLO\t", "hello"));
        assert!(!answers_match("hell", "Hello"));
    }

    #[test]
    fn test_empty_deck_is_rejected() {
        let result = LearningSession::start(
            ListId(1),
            "empty".to_string(),
            Vec::new(),
            SessionMode::Typing,
            SessionOptions::default(),
            StdRng::seed_from_u64(0),
        );
        assert_eq!(result.err(), Some(SessionError::EmptyDeck));
    }

    #[test]
    fn test_deck_is_a_permutation() {
        for seed in 0..25 {
            let session = session(9, SessionMode::Typing, seed);
            let mut ids: Vec<_> = session.deck().iter().map(|w| w.id).collect();
            assert_eq!(ids.len(), 9);
            ids.sort();
            let expected: Vec<_> = (1..=9).map(WordId).collect();
            assert_eq!(ids, expected);
        }
    }

    #[test]
    fn test_shuffle_changes_order_for_some_seed() {
        let original: Vec<_> = words(6).into_iter().map(|w| w.id).collect();
        let shuffled = (0..10).any(|seed| {
            let session = session(6, SessionMode::Typing, seed);
            session.deck().iter().map(|w| w.id).collect::<Vec<_>>() != original
        });
        assert!(shuffled);
    }

    #[test]
    fn test_five_word_typing_session_with_one_mistake() {
        let mut session = session(5, SessionMode::Typing, 42);
        let mut recorder = Recorded::default();
        let mut now = Instant::now();
        let mut missed = None;

        for i in 0..5 {
            assert_eq!(session.status(), SessionStatus::InProgress);
            let answer = if i == 2 {
                missed = session.current_word().map(|w| w.id);
                "definitely wrong".to_string()
            } else {
                format!("  {}  ", answer_current(&session).to_uppercase())
            };
            let verdict = session.submit_typing(&answer, now, &mut recorder).unwrap();
            assert_eq!(verdict.correct, i != 2);

            now += DEFAULT_FEEDBACK_DELAY;
            assert!(session.tick(now));
        }

        assert_eq!(session.status(), SessionStatus::Finished);
        assert_eq!(
            session.summary(),
            Some(SessionSummary { score: 4, total: 5 })
        );

        let misses: Vec<_> = recorder.0.iter().filter(|(_, ok)| !ok).collect();
        assert_eq!(misses.len(), 1);
        assert_eq!(Some(misses[0].0), missed);
        assert_eq!(recorder.0.len(), 5);
    }

    #[test]
    fn test_advance_waits_for_observation_delay() {
        let mut session = session(3, SessionMode::Typing, 1);
        let mut recorder = Recorded::default();
        let start = Instant::now();

        let answer = answer_current(&session);
        session.submit_typing(&answer, start, &mut recorder).unwrap();
        assert_eq!(session.feedback(), Feedback::Correct);

        assert!(!session.tick(start + Duration::from_millis(1999)));
        assert_eq!(session.index(), 0);
        assert_eq!(
            session.remaining_delay(start + Duration::from_millis(500)),
            Some(Duration::from_millis(1500))
        );

        assert!(session.tick(start + DEFAULT_FEEDBACK_DELAY));
        assert_eq!(session.index(), 1);
        assert_eq!(session.feedback(), Feedback::None);
        assert_eq!(session.remaining_delay(start), None);
        assert!(!session.tick(start + Duration::from_secs(10)));
        assert_eq!(session.index(), 1);
    }

    #[test]
    fn test_second_answer_during_delay_is_ignored() {
        let mut session = session(3, SessionMode::Typing, 5);
        let mut recorder = Recorded::default();
        let now = Instant::now();

        session.submit_typing("nope", now, &mut recorder).unwrap();
        let again = session.submit_typing("nope", now, &mut recorder);

        assert_eq!(again, Err(SessionError::AlreadyEvaluated));
        assert_eq!(recorder.0.len(), 1);
    }

    #[test]
    fn test_finished_only_after_every_word() {
        let mut session = session(4, SessionMode::Typing, 9);
        let mut recorder = Recorded::default();
        let mut now = Instant::now();

        for _ in 0..3 {
            session.submit_typing("x", now, &mut recorder).unwrap();
            now += DEFAULT_FEEDBACK_DELAY;
            session.tick(now);
            assert!(!session.is_finished());
            assert!(session.summary().is_none());
        }
        session.submit_typing("x", now, &mut recorder).unwrap();
        assert!(!session.is_finished());
        now += DEFAULT_FEEDBACK_DELAY;
        session.tick(now);

        assert!(session.is_finished());
        assert_eq!(session.score(), 0);
        assert_eq!(
            session.submit_typing("x", now, &mut recorder),
            Err(SessionError::Finished)
        );
    }

    #[test]
    fn test_recorder_failure_does_not_block_progress() {
        let mut session = session(2, SessionMode::Typing, 3);
        let mut now = Instant::now();

        for _ in 0..2 {
            let answer = answer_current(&session);
            let verdict = session.submit_typing(&answer, now, &mut Offline).unwrap();
            assert!(verdict.correct);
            now += DEFAULT_FEEDBACK_DELAY;
            assert!(session.tick(now));
        }

        assert_eq!(session.summary(), Some(SessionSummary { score: 2, total: 2 }));
    }

    #[test]
    fn test_restart_reshuffles_and_resets() {
        let mut session = session(5, SessionMode::Typing, 12);
        let mut recorder = Recorded::default();
        let mut now = Instant::now();
        while !session.is_finished() {
            let answer = answer_current(&session);
            session.submit_typing(&answer, now, &mut recorder).unwrap();
            now += DEFAULT_FEEDBACK_DELAY;
            session.tick(now);
        }
        assert_eq!(session.score(), 5);

        session.restart();
        assert_eq!(session.status(), SessionStatus::InProgress);
        assert_eq!(session.index(), 0);
        assert_eq!(session.score(), 0);
        assert_eq!(session.total(), 5);
    }

    #[test]
    fn test_multiple_choice_scores_correct_option() {
        let mut session = session(6, SessionMode::MultipleChoice, 21);
        let mut recorder = Recorded::default();
        let now = Instant::now();

        let question = session.question().unwrap().clone();
        assert_eq!(question.prompt, session.current_word().unwrap().meaning);
        let right = question
            .options
            .iter()
            .position(|o| *o == question.answer)
            .unwrap();

        let verdict = session.submit_choice(right, now, &mut recorder).unwrap();
        assert!(verdict.correct);
        assert_eq!(session.score(), 1);

        session.tick(now + DEFAULT_FEEDBACK_DELAY);
        let question = session.question().unwrap().clone();
        let wrong = question
            .options
            .iter()
            .position(|o| *o != question.answer)
            .unwrap();
        let verdict = session
            .submit_choice(wrong, now + DEFAULT_FEEDBACK_DELAY, &mut recorder)
            .unwrap();
        assert!(!verdict.correct);
        assert_eq!(session.score(), 1);
        assert_eq!(session.feedback(), Feedback::Incorrect);
    }

    #[test]
    fn test_multiple_choice_rejects_unknown_option() {
        let mut session = session(2, SessionMode::MultipleChoice, 2);
        let mut recorder = Recorded::default();
        assert_eq!(
            session.submit_choice(5, Instant::now(), &mut recorder),
            Err(SessionError::NoSuchOption)
        );
    }

    #[test]
    fn test_wrong_mode_is_rejected() {
        let mut session = session(2, SessionMode::Flashcard, 2);
        let mut recorder = Recorded::default();
        assert_eq!(
            session.submit_typing("x", Instant::now(), &mut recorder),
            Err(SessionError::WrongMode)
        );
        assert!(recorder.0.is_empty());
    }

    #[test]
    fn test_flashcards_browse_without_scoring() {
        let mut session = session(3, SessionMode::Flashcard, 4);

        assert!(!session.previous_card().unwrap());
        session.flip().unwrap();
        assert!(session.is_flipped());

        assert!(session.next_card().unwrap());
        assert!(!session.is_flipped());
        assert!(session.next_card().unwrap());
        assert!(!session.next_card().unwrap());
        assert_eq!(session.index(), 2);
        assert!(!session.is_finished());

        assert!(session.previous_card().unwrap());
        assert_eq!(session.index(), 1);
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn test_retype_requires_repeated_correct_answers() {
        let mut session = session(2, SessionMode::Retype, 8);
        let mut recorder = Recorded::default();

        let first = answer_current(&session);
        session.submit_retype(&first, &mut recorder).unwrap();
        session.submit_retype("oops", &mut recorder).unwrap();
        assert_eq!(session.feedback(), Feedback::Incorrect);
        session.submit_retype(&first, &mut recorder).unwrap();
        assert_eq!(session.repetitions(), 2);
        session.submit_retype(&first, &mut recorder).unwrap();
        assert_eq!(session.index(), 1);
        assert_eq!(session.score(), 0);

        let second = answer_current(&session);
        for _ in 0..3 {
            session.submit_retype(&second, &mut recorder).unwrap();
        }

        assert!(session.is_finished());
        assert_eq!(session.score(), 1);
        assert_eq!(recorder.0.len(), 7);
        assert_eq!(recorder.0.iter().filter(|(_, ok)| !ok).count(), 1);
    }

    #[test]
    fn test_restart_with_mode_builds_questions() {
        let mut session = session(4, SessionMode::Typing, 6);
        assert!(session.question().is_none());
        session.restart_with_mode(SessionMode::MultipleChoice).unwrap();
        assert_eq!(session.mode(), SessionMode::MultipleChoice);
        assert!(session.question().is_some());
    }

    #[test]
    fn test_finished_session_cannot_switch_mode() {
        let mut session = session(1, SessionMode::Typing, 3);
        let mut recorder = Recorded::default();
        let now = Instant::now();
        let answer = answer_current(&session);
        session.submit_typing(&answer, now, &mut recorder).unwrap();
        assert!(session.tick(now + DEFAULT_FEEDBACK_DELAY));
        assert!(session.is_finished());

        assert_eq!(
            session.restart_with_mode(SessionMode::Flashcard),
            Err(SessionError::Finished)
        );
        assert_eq!(session.mode(), SessionMode::Typing);

        session.restart();
        assert_eq!(session.status(), SessionStatus::InProgress);
    }

    #[test]
    fn test_mode_names_round_trip() {
        for mode in SessionMode::ALL {
            assert_eq!(SessionMode::from_name(mode.as_str()), Some(mode));
        }
        assert_eq!(SessionMode::from_name("unknown"), None);
    }

    fn ielts(anchor: Option<NaiveDate>) -> VocabularyList {
        VocabularyList {
            id: ListId(7),
            owner_id: "local".to_string(),
            name: "IELTS".to_string(),
            schedule: ReviewSchedule::from_anchor(anchor),
        }
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    #[test]
    fn test_due_scope_on_a_review_day() {
        let list = ielts(Some(date(1)));
        let deck = words(3);

        for day in [1, 2, 4, 8, 15] {
            assert_eq!(select_words(WordScope::Due, &list, &deck, date(day)).len(), 3);
        }
    }

    #[test]
    fn test_due_scope_between_review_days() {
        let list = ielts(Some(date(1)));
        let deck = words(3);

        for day in [3, 5, 14, 16] {
            assert!(select_words(WordScope::Due, &list, &deck, date(day)).is_empty());
        }
        assert!(select_words(WordScope::Due, &ielts(None), &deck, date(1)).is_empty());
    }

    #[test]
    fn test_new_scope_keeps_unanswered_words() {
        let list = ielts(None);
        let mut deck = words(4);
        deck[0].correct_count = 1;
        deck[2].incorrect_count = 2;

        let picked: Vec<WordId> = select_words(WordScope::New, &list, &deck, date(1))
            .iter()
            .map(|w| w.id)
            .collect();
        assert_eq!(picked, vec![deck[1].id, deck[3].id]);
        assert_eq!(select_words(WordScope::All, &list, &deck, date(1)).len(), 4);
    }
}
