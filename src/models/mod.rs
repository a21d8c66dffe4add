pub mod learning_session;
pub mod multiple_choice;
pub mod schedule;
pub mod session_result;
pub mod vocabulary_list;
pub mod word;

pub use learning_session::{
    AnswerRecorder, Feedback, LearningSession, SessionMode, SessionOptions, SessionStatus,
    SessionSummary, Verdict, WordScope, select_words,
};
pub use multiple_choice::{MultipleChoiceQuestion, PromptSide, QuestionDirection};
pub use schedule::ReviewSchedule;
pub use session_result::SessionResult;
pub use vocabulary_list::{ListId, ListPatch, VocabularyList};
pub use word::{Word, WordId, WordPatch};
