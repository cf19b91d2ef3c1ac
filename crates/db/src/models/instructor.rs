//! Instructor entity model and DTOs.

use elearn_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// An instructor row from the `instructors` table. One per user.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Instructor {
    pub id: DbId,
    pub user_id: DbId,
    pub bio: String,
    pub years_experience: i32,
    pub is_verified: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for registering a user as an instructor.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateInstructor {
    pub user_id: DbId,
    pub bio: Option<String>,
    #[validate(range(min = 0))]
    pub years_experience: Option<i32>,
}

/// DTO for updating an instructor. All fields are optional.
///
/// Verification goes through `InstructorRepo::set_verified`.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateInstructor {
    pub bio: Option<String>,
    #[validate(range(min = 0))]
    pub years_experience: Option<i32>,
}
