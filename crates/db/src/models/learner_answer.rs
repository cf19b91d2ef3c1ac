//! Submitted-answer model and DTOs.

use elearn_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `learner_answers` table.
///
/// `question_id` is copied from the referenced answer on insert and is
/// unique per `student_id`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LearnerAnswer {
    pub id: DbId,
    pub student_id: DbId,
    pub answer_id: DbId,
    pub question_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for submitting an answer.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateLearnerAnswer {
    pub student_id: DbId,
    pub answer_id: DbId,
}
