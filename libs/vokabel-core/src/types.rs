//! Core types for the vocabulary scheduler.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Weekday identifier, 0 = Sunday .. 6 = Saturday.
///
/// The same numbering is used for today's weekday, the stored learn/review
/// day sets, and weekday realignment, so values compare directly.
pub type WeekdayId = u8;

/// An ordered set of weekdays a user studies on.
///
/// `BTreeSet` so the lowest and highest configured day are direct lookups.
pub type DaySet = BTreeSet<WeekdayId>;

/// Mutable scheduling state of a vocabulary item.
///
/// Stage 0 is an unstarted item, 1-5 are active spaced-repetition stages,
/// 6 is the terminal learned stage. `review_date` is `None` exactly when
/// the item has never been reviewed (stage 0) or is fully learned (stage 6).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewState {
    pub stage_id: i32,
    pub review_date: Option<NaiveDate>,
    pub learned: bool,
}

impl ReviewState {
    /// State of a freshly imported item.
    pub fn unstarted() -> Self {
        Self {
            stage_id: 0,
            review_date: None,
            learned: false,
        }
    }
}

/// One row of the static stage table: the base interval in days added to
/// the review date when an item transitions into this stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stage {
    pub id: i32,
    pub days: i64,
}

/// Result of advancing a vocabulary item by one review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleUpdate {
    pub stage_id: i32,
    pub review_date: Option<NaiveDate>,
    pub learned: bool,
}
