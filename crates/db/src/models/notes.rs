//! Notes entity model and DTOs.

use elearn_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `notes` table: downloadable course material.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Note {
    pub id: DbId,
    pub title: String,
    /// Blob key under `notes/files/`.
    pub file: Option<String>,
    /// Blob key under `notes/covers/`.
    pub cover: Option<String>,
    pub course_id: DbId,
    pub user_id: DbId,
    pub is_public: bool,
    pub download_count: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Note {
    /// Blob keys held by this row, file first.
    pub fn attachment_keys(&self) -> impl Iterator<Item = &str> {
        [self.file.as_deref(), self.cover.as_deref()]
            .into_iter()
            .flatten()
    }
}

/// DTO for creating a note.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateNote {
    #[validate(length(min = 1, max = 500))]
    pub title: String,
    pub file: Option<String>,
    pub cover: Option<String>,
    pub course_id: DbId,
    pub user_id: DbId,
    pub is_public: Option<bool>,
}

/// DTO for updating a note. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateNote {
    #[validate(length(min = 1, max = 500))]
    pub title: Option<String>,
    pub file: Option<String>,
    pub cover: Option<String>,
    pub is_public: Option<bool>,
}
