//! Learner entity model and DTOs.

use elearn_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A learner row from the `learners` table. One per user.
///
/// `total_score` and `quizzes_completed` only change through
/// `LearnerRepo::record_completed_quiz`; nothing recomputes them.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Learner {
    pub id: DbId,
    pub user_id: DbId,
    pub total_score: f64,
    pub quizzes_completed: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for enrolling a user as a learner.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateLearner {
    pub user_id: DbId,
}
