//! Core scheduling library for the vokabel backend.
//!
//! Provides:
//! - Calendar primitives (weekday numbering, date shifting, weekday
//!   realignment)
//! - The stage-based spaced-repetition scheduler
//! - Shared types (ReviewState, Stage, ScheduleUpdate)
//!
//! Everything here is pure: the clock is an explicit parameter and all I/O
//! lives in the backend crate.

pub mod dates;
pub mod error;
pub mod scheduler;
pub mod types;

pub use dates::{add_days, is_before, next_date_for_weekday, today, todays_weekday, weekday_number};
pub use error::{Result, ScheduleError};
pub use scheduler::{advance_review, LEARNED_STAGE};
pub use types::{DaySet, ReviewState, ScheduleUpdate, Stage, WeekdayId};
