//! Tutorial entity model and DTOs.

use elearn_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::lookup::{Difficulty, LookupId};

/// A tutorial row from the `tutorials` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Tutorial {
    pub id: DbId,
    pub title: String,
    pub content: String,
    /// Blob key under `tutorials/thumbnails/`.
    pub thumb: Option<String>,
    pub course_id: DbId,
    pub user_id: DbId,
    /// Embeddable video URL.
    pub video: Option<String>,
    pub difficulty_id: LookupId,
    pub duration_minutes: i32,
    pub is_published: bool,
    pub views_count: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Tutorial {
    pub fn difficulty(&self) -> Option<Difficulty> {
        Difficulty::from_id(self.difficulty_id)
    }
}

/// DTO for creating a tutorial.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTutorial {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub content: String,
    pub thumb: Option<String>,
    pub course_id: DbId,
    pub user_id: DbId,
    #[validate(url)]
    pub video: Option<String>,
    /// Defaults to 1 (Beginner) if omitted.
    pub difficulty_id: Option<LookupId>,
    #[validate(range(min = 0))]
    pub duration_minutes: Option<i32>,
    pub is_published: Option<bool>,
}

/// DTO for updating a tutorial. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateTutorial {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    pub content: Option<String>,
    pub thumb: Option<String>,
    #[validate(url)]
    pub video: Option<String>,
    pub difficulty_id: Option<LookupId>,
    #[validate(range(min = 0))]
    pub duration_minutes: Option<i32>,
    pub is_published: Option<bool>,
}
