//! Named vocabulary list owned by one user.
use super::ReviewSchedule;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ListId(pub i64);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VocabularyList {
    pub id: ListId,
    pub owner_id: String,
    pub name: String,
    pub schedule: ReviewSchedule,
}

impl VocabularyList {
    pub fn is_due_on(&self, today: NaiveDate) -> bool {
        self.schedule.is_due_on(today)
    }
}

/// Fields to merge into an existing list. `None` leaves a field untouched.
///
/// A schedule, when given, replaces all five slots.
#[derive(Clone, Debug, Default)]
pub struct ListPatch {
    pub name: Option<String>,
    pub schedule: Option<ReviewSchedule>,
}

impl ListPatch {
    pub fn rename(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            schedule: None,
        }
    }

    pub fn reschedule(anchor: Option<NaiveDate>) -> Self {
        Self {
            name: None,
            schedule: Some(ReviewSchedule::from_anchor(anchor)),
        }
    }
}
