//! Quiz entity model and DTOs.

use elearn_core::error::CoreError;
use elearn_core::quiz::{
    validate_max_attempts, validate_passing_score, validate_time_limit,
    DEFAULT_MAX_ATTEMPTS, DEFAULT_PASSING_SCORE, DEFAULT_TIME_LIMIT_MINUTES,
};
use elearn_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::lookup::{LookupId, QuizStatus};

/// A quiz row from the `quizzes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Quiz {
    pub id: DbId,
    pub owner_id: DbId,
    pub name: String,
    pub course_id: DbId,
    pub description: String,
    pub time_limit_minutes: i32,
    pub passing_score: f64,
    pub status_id: LookupId,
    pub max_attempts: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Quiz {
    pub fn status(&self) -> Option<QuizStatus> {
        QuizStatus::from_id(self.status_id)
    }
}

/// DTO for creating a quiz.
///
/// String lengths are checked by `validate()`; numeric bounds by
/// [`CreateQuiz::check_bounds`] after defaults are applied.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateQuiz {
    pub owner_id: DbId,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub course_id: DbId,
    pub description: Option<String>,
    /// Defaults to 30 if omitted.
    pub time_limit_minutes: Option<i32>,
    /// Defaults to 70.0 if omitted.
    pub passing_score: Option<f64>,
    /// Defaults to 1 (Draft) if omitted.
    pub status_id: Option<LookupId>,
    /// Defaults to 3 if omitted.
    pub max_attempts: Option<i32>,
}

impl CreateQuiz {
    pub fn new(owner_id: DbId, course_id: DbId, name: impl Into<String>) -> Self {
        Self {
            owner_id,
            name: name.into(),
            course_id,
            description: None,
            time_limit_minutes: None,
            passing_score: None,
            status_id: None,
            max_attempts: None,
        }
    }

    pub fn time_limit_minutes(&self) -> i32 {
        self.time_limit_minutes.unwrap_or(DEFAULT_TIME_LIMIT_MINUTES)
    }

    pub fn passing_score(&self) -> f64 {
        self.passing_score.unwrap_or(DEFAULT_PASSING_SCORE)
    }

    pub fn max_attempts(&self) -> i32 {
        self.max_attempts.unwrap_or(DEFAULT_MAX_ATTEMPTS)
    }

    /// Check the numeric settings (with defaults applied) against their bounds.
    pub fn check_bounds(&self) -> Result<(), CoreError> {
        validate_time_limit(self.time_limit_minutes())?;
        validate_passing_score(self.passing_score())?;
        validate_max_attempts(self.max_attempts())
    }
}

/// DTO for updating a quiz. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateQuiz {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub time_limit_minutes: Option<i32>,
    pub passing_score: Option<f64>,
    pub status_id: Option<LookupId>,
    pub max_attempts: Option<i32>,
}

impl UpdateQuiz {
    /// Check whichever numeric settings are being changed.
    pub fn check_bounds(&self) -> Result<(), CoreError> {
        if let Some(minutes) = self.time_limit_minutes {
            validate_time_limit(minutes)?;
        }
        if let Some(score) = self.passing_score {
            validate_passing_score(score)?;
        }
        if let Some(max) = self.max_attempts {
            validate_max_attempts(max)?;
        }
        Ok(())
    }
}
