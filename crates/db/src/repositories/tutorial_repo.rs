//! Repository for the `tutorials` table.

use elearn_core::types::DbId;
use sqlx::PgPool;
use validator::Validate;

use crate::error::DbError;
use crate::models::lookup::{Difficulty, LookupId};
use crate::models::tutorial::{CreateTutorial, Tutorial, UpdateTutorial};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, content, thumb, course_id, user_id, video, difficulty_id, \
                        duration_minutes, is_published, views_count, created_at, updated_at";

/// Provides CRUD operations for tutorials.
pub struct TutorialRepo;

impl TutorialRepo {
    /// Insert a new tutorial, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateTutorial) -> Result<Tutorial, DbError> {
        input.validate()?;
        let query = format!(
            "INSERT INTO tutorials
                (title, content, thumb, course_id, user_id, video, difficulty_id,
                 duration_minutes, is_published)
             VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, $8), COALESCE($9, 0), COALESCE($10, true))
             RETURNING {COLUMNS}"
        );
        let tutorial = sqlx::query_as::<_, Tutorial>(&query)
            .bind(&input.title)
            .bind(&input.content)
            .bind(&input.thumb)
            .bind(input.course_id)
            .bind(input.user_id)
            .bind(&input.video)
            .bind(input.difficulty_id)
            .bind(LookupId::from(Difficulty::Beginner))
            .bind(input.duration_minutes)
            .bind(input.is_published)
            .fetch_one(pool)
            .await?;
        Ok(tutorial)
    }

    /// Find a tutorial by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Tutorial>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tutorials WHERE id = $1");
        sqlx::query_as::<_, Tutorial>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all tutorials of a course, newest first.
    pub async fn list_by_course(
        pool: &PgPool,
        course_id: DbId,
    ) -> Result<Vec<Tutorial>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tutorials
             WHERE course_id = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Tutorial>(&query)
            .bind(course_id)
            .fetch_all(pool)
            .await
    }

    /// List published tutorials of a course, newest first.
    pub async fn list_published(
        pool: &PgPool,
        course_id: DbId,
    ) -> Result<Vec<Tutorial>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tutorials
             WHERE course_id = $1 AND is_published = true
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Tutorial>(&query)
            .bind(course_id)
            .fetch_all(pool)
            .await
    }

    /// List tutorials authored by a user, newest first.
    pub async fn list_by_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Tutorial>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tutorials
             WHERE user_id = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Tutorial>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Update a tutorial. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTutorial,
    ) -> Result<Option<Tutorial>, DbError> {
        input.validate()?;
        let query = format!(
            "UPDATE tutorials SET
                title = COALESCE($2, title),
                content = COALESCE($3, content),
                thumb = COALESCE($4, thumb),
                video = COALESCE($5, video),
                difficulty_id = COALESCE($6, difficulty_id),
                duration_minutes = COALESCE($7, duration_minutes),
                is_published = COALESCE($8, is_published)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let tutorial = sqlx::query_as::<_, Tutorial>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.content)
            .bind(&input.thumb)
            .bind(&input.video)
            .bind(input.difficulty_id)
            .bind(input.duration_minutes)
            .bind(input.is_published)
            .fetch_optional(pool)
            .await?;
        Ok(tutorial)
    }

    /// Bump the view counter. Returns the new count, or `None` if the
    /// tutorial does not exist.
    pub async fn increment_views(pool: &PgPool, id: DbId) -> Result<Option<i32>, sqlx::Error> {
        sqlx::query_scalar(
            "UPDATE tutorials SET views_count = views_count + 1
             WHERE id = $1
             RETURNING views_count",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Permanently delete a tutorial. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tutorials WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
