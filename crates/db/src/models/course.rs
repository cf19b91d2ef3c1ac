//! Course entity model and DTOs.

use elearn_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::lookup::{CourseCategory, LookupId};

/// A course row from the `courses` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Course {
    pub id: DbId,
    pub name: String,
    pub color: String,
    pub description: String,
    pub category_id: LookupId,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Course {
    pub fn category(&self) -> Option<CourseCategory> {
        CourseCategory::from_id(self.category_id)
    }

    /// Inline HTML badge with the escaped name on the course colour.
    pub fn html_badge(&self) -> String {
        elearn_core::course::html_badge(&self.name, &self.color)
    }
}

/// DTO for creating a new course.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCourse {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    /// Defaults to `#007bff` if omitted.
    #[validate(custom(function = elearn_core::course::validate_color_field))]
    pub color: Option<String>,
    pub description: Option<String>,
    /// Defaults to 1 (Programming) if omitted.
    pub category_id: Option<LookupId>,
    pub is_active: Option<bool>,
}

impl CreateCourse {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: None,
            description: None,
            category_id: None,
            is_active: None,
        }
    }
}

/// DTO for updating an existing course. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateCourse {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(custom(function = elearn_core::course::validate_color_field))]
    pub color: Option<String>,
    pub description: Option<String>,
    pub category_id: Option<LookupId>,
    pub is_active: Option<bool>,
}
