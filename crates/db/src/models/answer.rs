//! Answer entity model and DTOs.

use elearn_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// An answer option row from the `answers` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Answer {
    pub id: DbId,
    pub question_id: DbId,
    pub text: String,
    pub is_correct: bool,
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl std::fmt::Display for Answer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let preview: String = self.text.chars().take(50).collect();
        let verdict = if self.is_correct { "Correct" } else { "Incorrect" };
        write!(f, "{preview}... ({verdict})")
    }
}

/// DTO for adding an answer option to a question.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateAnswer {
    pub question_id: DbId,
    #[validate(length(min = 1, max = 255))]
    pub text: String,
    pub is_correct: Option<bool>,
    /// Defaults to 1 if omitted.
    #[validate(range(min = 0))]
    pub sort_order: Option<i32>,
}

impl CreateAnswer {
    pub fn new(question_id: DbId, text: impl Into<String>, is_correct: bool) -> Self {
        Self {
            question_id,
            text: text.into(),
            is_correct: Some(is_correct),
            sort_order: None,
        }
    }
}

/// DTO for updating an answer option. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateAnswer {
    #[validate(length(min = 1, max = 255))]
    pub text: Option<String>,
    pub is_correct: Option<bool>,
    #[validate(range(min = 0))]
    pub sort_order: Option<i32>,
}
