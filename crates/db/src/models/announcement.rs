//! Announcement entity model and DTOs.

use elearn_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// An announcement row from the `announcements` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Announcement {
    pub id: DbId,
    pub user_id: DbId,
    pub title: String,
    pub content: String,
    pub posted_at: Timestamp,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for posting an announcement.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateAnnouncement {
    pub user_id: DbId,
    /// Defaults to `"Announcement"` if omitted.
    #[validate(length(max = 255))]
    pub title: Option<String>,
    pub content: String,
    pub is_active: Option<bool>,
}

/// DTO for updating an announcement. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateAnnouncement {
    #[validate(length(max = 255))]
    pub title: Option<String>,
    pub content: Option<String>,
    pub is_active: Option<bool>,
}
