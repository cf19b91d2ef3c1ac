//! Repository for the `courses` table.

use elearn_core::course::DEFAULT_COLOR;
use elearn_core::types::DbId;
use sqlx::PgPool;
use validator::Validate;

use crate::error::DbError;
use crate::models::course::{Course, CreateCourse, UpdateCourse};
use crate::models::lookup::{CourseCategory, LookupId};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, color, description, category_id, is_active, created_at, updated_at";

/// Provides CRUD operations for courses.
pub struct CourseRepo;

impl CourseRepo {
    /// Insert a new course. A taken name fails with `uq_courses_name`.
    pub async fn create(pool: &PgPool, input: &CreateCourse) -> Result<Course, DbError> {
        input.validate()?;
        let query = format!(
            "INSERT INTO courses (name, color, description, category_id, is_active)
             VALUES ($1, COALESCE($2, $3), COALESCE($4, ''), COALESCE($5, $6), COALESCE($7, true))
             RETURNING {COLUMNS}"
        );
        let course = sqlx::query_as::<_, Course>(&query)
            .bind(&input.name)
            .bind(&input.color)
            .bind(DEFAULT_COLOR)
            .bind(&input.description)
            .bind(input.category_id)
            .bind(LookupId::from(CourseCategory::Programming))
            .bind(input.is_active)
            .fetch_one(pool)
            .await?;
        Ok(course)
    }

    /// Find a course by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Course>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM courses WHERE id = $1");
        sqlx::query_as::<_, Course>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a course by its exact name.
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Course>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM courses WHERE name = $1");
        sqlx::query_as::<_, Course>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// List all courses ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Course>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM courses ORDER BY name");
        sqlx::query_as::<_, Course>(&query).fetch_all(pool).await
    }

    /// List active courses in one category, ordered by name.
    pub async fn list_by_category(
        pool: &PgPool,
        category: CourseCategory,
    ) -> Result<Vec<Course>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM courses
             WHERE category_id = $1 AND is_active = true
             ORDER BY name"
        );
        sqlx::query_as::<_, Course>(&query)
            .bind(category.id())
            .fetch_all(pool)
            .await
    }

    /// Update a course. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCourse,
    ) -> Result<Option<Course>, DbError> {
        input.validate()?;
        let query = format!(
            "UPDATE courses SET
                name = COALESCE($2, name),
                color = COALESCE($3, color),
                description = COALESCE($4, description),
                category_id = COALESCE($5, category_id),
                is_active = COALESCE($6, is_active)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let course = sqlx::query_as::<_, Course>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.color)
            .bind(&input.description)
            .bind(input.category_id)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await?;
        Ok(course)
    }

    /// Permanently delete a course and everything filed under it.
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        let deleted = result.rows_affected() > 0;
        if deleted {
            tracing::info!(
                course_id = id,
                cascaded = ?elearn_core::ownership::descendants("courses"),
                "Deleted course",
            );
        }
        Ok(deleted)
    }
}
