//! Question entity model and DTOs.

use elearn_core::quiz::OrderedQuestion;
use elearn_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::lookup::{LookupId, QuestionType};

/// A question row from the `questions` table.
///
/// Listed by `(sort_order, id)`.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Question {
    pub id: DbId,
    pub quiz_id: DbId,
    pub text: String,
    pub question_type_id: LookupId,
    pub points: i32,
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Question {
    pub fn question_type(&self) -> Option<QuestionType> {
        QuestionType::from_id(self.question_type_id)
    }
}

impl OrderedQuestion for Question {
    fn id(&self) -> DbId {
        self.id
    }

    fn sort_order(&self) -> i32 {
        self.sort_order
    }
}

/// DTO for adding a question to a quiz.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateQuestion {
    pub quiz_id: DbId,
    #[validate(length(min = 1, max = 500))]
    pub text: String,
    /// Defaults to 1 (Multiple Choice) if omitted.
    pub question_type_id: Option<LookupId>,
    /// Defaults to 1 if omitted.
    #[validate(range(min = 1))]
    pub points: Option<i32>,
    /// Defaults to 1 if omitted.
    #[validate(range(min = 0))]
    pub sort_order: Option<i32>,
}

impl CreateQuestion {
    pub fn new(quiz_id: DbId, text: impl Into<String>, sort_order: i32) -> Self {
        Self {
            quiz_id,
            text: text.into(),
            question_type_id: None,
            points: None,
            sort_order: Some(sort_order),
        }
    }
}

/// DTO for updating a question. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateQuestion {
    #[validate(length(min = 1, max = 500))]
    pub text: Option<String>,
    pub question_type_id: Option<LookupId>,
    #[validate(range(min = 1))]
    pub points: Option<i32>,
    #[validate(range(min = 0))]
    pub sort_order: Option<i32>,
}
