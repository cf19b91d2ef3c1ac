//! Quiz, question and attempt rules.
//!
//! Bounds here mirror the `CHECK` constraints in the migrations. The quiz and
//! attempt DTOs in the db crate run these validators from `check_bounds`.

use std::collections::HashSet;

use crate::error::CoreError;
use crate::types::DbId;

pub const TIME_LIMIT_MIN_MINUTES: i32 = 1;
pub const TIME_LIMIT_MAX_MINUTES: i32 = 180;
pub const DEFAULT_TIME_LIMIT_MINUTES: i32 = 30;

pub const PASSING_SCORE_MIN: f64 = 0.0;
pub const PASSING_SCORE_MAX: f64 = 100.0;
pub const DEFAULT_PASSING_SCORE: f64 = 70.0;

pub const MAX_ATTEMPTS_MIN: i32 = 1;
pub const DEFAULT_MAX_ATTEMPTS: i32 = 3;

/// Attempt scores share the passing-score scale.
pub const SCORE_MIN: f64 = 0.0;
pub const SCORE_MAX: f64 = 100.0;

pub const FIRST_ATTEMPT: i32 = 1;

pub fn validate_time_limit(minutes: i32) -> Result<(), CoreError> {
    if (TIME_LIMIT_MIN_MINUTES..=TIME_LIMIT_MAX_MINUTES).contains(&minutes) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "time_limit_minutes must be between {TIME_LIMIT_MIN_MINUTES} and \
             {TIME_LIMIT_MAX_MINUTES}, got {minutes}"
        )))
    }
}

pub fn validate_passing_score(score: f64) -> Result<(), CoreError> {
    validate_percentage("passing_score", score)
}

pub fn validate_max_attempts(max_attempts: i32) -> Result<(), CoreError> {
    if max_attempts >= MAX_ATTEMPTS_MIN {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "max_attempts must be at least {MAX_ATTEMPTS_MIN}, got {max_attempts}"
        )))
    }
}

/// Validate a recorded attempt score.
pub fn validate_score(score: f64) -> Result<(), CoreError> {
    validate_percentage("score", score)
}

fn validate_percentage(field: &str, value: f64) -> Result<(), CoreError> {
    // NaN is never contained.
    if (SCORE_MIN..=SCORE_MAX).contains(&value) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "{field} must be between {SCORE_MIN} and {SCORE_MAX}, got {value}"
        )))
    }
}

/// Whether `score` meets the quiz's `passing_score`.
pub fn is_passing(score: f64, passing_score: f64) -> bool {
    score >= passing_score
}

/// Attempt number that follows the highest one recorded so far.
pub fn next_attempt_number(latest: Option<i32>) -> i32 {
    latest.map_or(FIRST_ATTEMPT, |n| n + 1)
}

/// Anything that can be listed in question order.
pub trait OrderedQuestion {
    fn id(&self) -> DbId;
    fn sort_order(&self) -> i32;
}

/// Questions of a quiz that have no recorded answer.
///
/// `answered_question_ids` holds the question of every answer the learner
/// submitted. Ids outside `questions` are ignored. The result is ordered by
/// `(sort_order, id)` regardless of input order.
pub fn unanswered_questions<Q, I>(questions: I, answered_question_ids: &HashSet<DbId>) -> Vec<Q>
where
    Q: OrderedQuestion,
    I: IntoIterator<Item = Q>,
{
    let mut remaining: Vec<Q> = questions
        .into_iter()
        .filter(|q| !answered_question_ids.contains(&q.id()))
        .collect();
    remaining.sort_by_key(|q| (q.sort_order(), q.id()));
    remaining
}
