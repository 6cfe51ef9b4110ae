//! Stage-based spaced-repetition scheduler.
//!
//! Intervals are expressed in calendar days, but users only study on the
//! weekdays they configured. Naively adding the stage interval can land a
//! review on a day the user never opens the app, deferring it silently, so
//! the scheduler snaps forward to the nearest day the user actually
//! reviews before applying the interval.

use chrono::NaiveDate;

use crate::dates::{add_days, is_before, next_date_for_weekday, weekday_number};
use crate::error::{Result, ScheduleError};
use crate::types::{DaySet, ReviewState, ScheduleUpdate, Stage};

/// Terminal stage: the item is fully learned and never scheduled again.
pub const LEARNED_STAGE: i32 = 6;

/// Advance a vocabulary item by one completed review.
///
/// The stage always increments by exactly one. A stage-1 item (first-ever
/// review) scheduled on a non-learn day realigns to the next occurrence of
/// the highest configured learn day; a late mid-stage item realigns to the
/// lowest configured review day. The asymmetry matches the reference
/// behavior this scheduler replaces and is kept deliberately.
///
/// Day-set and stage-table preconditions are checked before any state is
/// computed; an error leaves nothing to write back.
pub fn advance_review(
    state: &ReviewState,
    stages: &[Stage],
    learn_days: &DaySet,
    review_days: &DaySet,
    today: NaiveDate,
) -> Result<ScheduleUpdate> {
    if review_days.is_empty() {
        return Err(ScheduleError::NoReviewDays);
    }
    if learn_days.is_empty() {
        return Err(ScheduleError::NoLearnDays);
    }

    let new_stage = state.stage_id + 1;
    let learned = new_stage == LEARNED_STAGE || state.learned;

    let stage = stages
        .iter()
        .find(|s| s.id == new_stage)
        .ok_or(ScheduleError::StageNotFound(new_stage))?;

    if new_stage >= LEARNED_STAGE {
        return Ok(ScheduleUpdate {
            stage_id: new_stage,
            review_date: None,
            learned,
        });
    }

    let today_weekday = weekday_number(today);
    let mut candidate = add_days(state.review_date, stage.days, today);

    if new_stage == 1 {
        if !learn_days.contains(&today_weekday) {
            // Highest learn day, per reference behavior.
            let target = *learn_days.iter().next_back().unwrap();
            let occurrence = next_date_for_weekday(target, today);
            candidate = add_days(Some(occurrence), stage.days, today);
        }
    } else if is_before(state.review_date, today) {
        // Late review: count the interval from today, not from the stale
        // review date, snapping to a review day when today is not one.
        if review_days.contains(&today_weekday) {
            candidate = add_days(None, stage.days, today);
        } else {
            // Lowest review day, per reference behavior.
            let target = *review_days.iter().next().unwrap();
            let occurrence = next_date_for_weekday(target, today);
            candidate = add_days(Some(occurrence), stage.days, today);
        }
    }

    Ok(ScheduleUpdate {
        stage_id: new_stage,
        review_date: Some(candidate),
        learned,
    })
}
