//! Profile entity model and DTOs.

use elearn_core::types::{Date, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A profile row from the `profiles` table. One per user.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Profile {
    pub id: DbId,
    pub user_id: DbId,
    /// Blob key under `profiles/avatars/`, or the default placeholder.
    pub avatar: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phonenumber: Option<String>,
    pub birth_date: Date,
    pub bio: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub favorite_animal: String,
    pub hobby: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a profile.
///
/// Omitted optional fields take the column defaults.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProfile {
    pub user_id: DbId,
    pub avatar: Option<String>,
    #[validate(length(max = 255))]
    pub first_name: Option<String>,
    #[validate(length(max = 255))]
    pub last_name: Option<String>,
    #[validate(email, length(max = 254))]
    pub email: String,
    #[validate(length(max = 20))]
    pub phonenumber: Option<String>,
    pub birth_date: Option<Date>,
    pub bio: Option<String>,
    #[validate(length(max = 255))]
    pub city: Option<String>,
    #[validate(length(max = 255))]
    pub state: Option<String>,
    #[validate(length(max = 255))]
    pub country: Option<String>,
    #[validate(length(max = 255))]
    pub favorite_animal: Option<String>,
    #[validate(length(max = 255))]
    pub hobby: Option<String>,
}

impl CreateProfile {
    /// A profile with only the required fields set.
    pub fn new(user_id: DbId, email: impl Into<String>) -> Self {
        Self {
            user_id,
            avatar: None,
            first_name: None,
            last_name: None,
            email: email.into(),
            phonenumber: None,
            birth_date: None,
            bio: None,
            city: None,
            state: None,
            country: None,
            favorite_animal: None,
            hobby: None,
        }
    }
}

/// DTO for updating a profile. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProfile {
    pub avatar: Option<String>,
    #[validate(length(max = 255))]
    pub first_name: Option<String>,
    #[validate(length(max = 255))]
    pub last_name: Option<String>,
    #[validate(email, length(max = 254))]
    pub email: Option<String>,
    #[validate(length(max = 20))]
    pub phonenumber: Option<String>,
    pub birth_date: Option<Date>,
    pub bio: Option<String>,
    #[validate(length(max = 255))]
    pub city: Option<String>,
    #[validate(length(max = 255))]
    pub state: Option<String>,
    #[validate(length(max = 255))]
    pub country: Option<String>,
    #[validate(length(max = 255))]
    pub favorite_animal: Option<String>,
    #[validate(length(max = 255))]
    pub hobby: Option<String>,
}
