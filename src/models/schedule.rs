//! Review schedule of a vocabulary list.
//!
//! A schedule is derived from a single anchor date: the list is reviewed on the
//! anchor day itself and then 1, 3, 7 and 14 days later. Editing the anchor
//! always recomputes all five slots.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Day offsets of the five review slots, relative to the anchor date.
pub const REVIEW_OFFSETS_DAYS: [u64; 5] = [0, 1, 3, 7, 14];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewSchedule {
    slots: [Option<NaiveDate>; 5],
}

impl ReviewSchedule {
    /// Computes the schedule for `anchor`. No anchor means no schedule.
    pub fn from_anchor(anchor: Option<NaiveDate>) -> Self {
        match anchor {
            Some(date) => Self {
                slots: REVIEW_OFFSETS_DAYS.map(|offset| Some(date + Days::new(offset))),
            },
            None => Self::default(),
        }
    }

    /// Rebuilds a schedule from stored slots (`date1..date5` columns).
    ///
    /// Stored rows are always written through `from_anchor`, so only the
    /// first slot is trusted and the rest are recomputed from it.
    pub fn from_slots(slots: [Option<NaiveDate>; 5]) -> Self {
        Self::from_anchor(slots[0])
    }

    pub fn slots(&self) -> [Option<NaiveDate>; 5] {
        self.slots
    }

    pub fn anchor(&self) -> Option<NaiveDate> {
        self.slots[0]
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.slots.iter().flatten().copied()
    }

    /// True when one of the review days falls on `today`.
    pub fn is_due_on(&self, today: NaiveDate) -> bool {
        self.dates().any(|date| date == today)
    }

    pub fn next_review_after(&self, today: NaiveDate) -> Option<NaiveDate> {
        self.dates().find(|date| *date > today)
    }
}
