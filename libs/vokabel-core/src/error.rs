//! Error types for vokabel-core.

use thiserror::Error;

/// Result type alias using ScheduleError.
pub type Result<T> = std::result::Result<T, ScheduleError>;

/// Errors that can occur while advancing a vocabulary item.
///
/// All preconditions are validated before any new state is produced, so a
/// failed advance never yields a partially computed update.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("There are no Review Days")]
    NoReviewDays,

    #[error("There are no Learn Days")]
    NoLearnDays,

    #[error("stage {0} not found")]
    StageNotFound(i32),
}
