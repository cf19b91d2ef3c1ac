//! Quiz attempt model and DTOs.

use elearn_core::error::CoreError;
use elearn_core::quiz::{is_passing, validate_score};
use elearn_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::quiz::Quiz;

/// One attempt row from the `taken_quizzes` table.
///
/// `(learner_id, quiz_id, attempt_number)` is unique.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TakenQuiz {
    pub id: DbId,
    pub learner_id: DbId,
    pub quiz_id: DbId,
    pub score: f64,
    pub taken_at: Timestamp,
    pub time_taken_minutes: i32,
    pub is_completed: bool,
    pub attempt_number: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TakenQuiz {
    /// Whether this attempt reached the quiz's passing score.
    pub fn passed(&self, quiz: &Quiz) -> bool {
        is_passing(self.score, quiz.passing_score)
    }
}

/// DTO for recording an attempt with an explicit attempt number.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTakenQuiz {
    pub learner_id: DbId,
    pub quiz_id: DbId,
    pub score: f64,
    #[validate(range(min = 0))]
    pub time_taken_minutes: Option<i32>,
    pub is_completed: Option<bool>,
    /// Defaults to 1 if omitted.
    #[validate(range(min = 1))]
    pub attempt_number: Option<i32>,
}

impl CreateTakenQuiz {
    pub fn check_bounds(&self) -> Result<(), CoreError> {
        validate_score(self.score)
    }
}

/// DTO for recording the next attempt; the number is assigned on insert.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RecordAttempt {
    pub learner_id: DbId,
    pub quiz_id: DbId,
    pub score: f64,
    #[validate(range(min = 0))]
    pub time_taken_minutes: Option<i32>,
    pub is_completed: Option<bool>,
}

impl RecordAttempt {
    pub fn check_bounds(&self) -> Result<(), CoreError> {
        validate_score(self.score)
    }
}
