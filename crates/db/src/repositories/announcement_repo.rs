//! Repository for the `announcements` table.

use elearn_core::types::DbId;
use sqlx::PgPool;
use validator::Validate;

use crate::error::DbError;
use crate::models::announcement::{Announcement, CreateAnnouncement, UpdateAnnouncement};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, user_id, title, content, posted_at, is_active, created_at, updated_at";

/// Provides CRUD operations for announcements.
pub struct AnnouncementRepo;

impl AnnouncementRepo {
    /// Insert a new announcement, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateAnnouncement,
    ) -> Result<Announcement, DbError> {
        input.validate()?;
        let query = format!(
            "INSERT INTO announcements (user_id, title, content, is_active)
             VALUES ($1, COALESCE($2, 'Announcement'), $3, COALESCE($4, true))
             RETURNING {COLUMNS}"
        );
        let announcement = sqlx::query_as::<_, Announcement>(&query)
            .bind(input.user_id)
            .bind(&input.title)
            .bind(&input.content)
            .bind(input.is_active)
            .fetch_one(pool)
            .await?;
        Ok(announcement)
    }

    /// Find an announcement by its internal ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Announcement>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM announcements WHERE id = $1");
        sqlx::query_as::<_, Announcement>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all announcements, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Announcement>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM announcements ORDER BY posted_at DESC, id DESC");
        sqlx::query_as::<_, Announcement>(&query)
            .fetch_all(pool)
            .await
    }

    /// List active announcements, newest first.
    pub async fn list_active(pool: &PgPool) -> Result<Vec<Announcement>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM announcements
             WHERE is_active = true
             ORDER BY posted_at DESC, id DESC"
        );
        sqlx::query_as::<_, Announcement>(&query)
            .fetch_all(pool)
            .await
    }

    /// List announcements posted by a user, newest first.
    pub async fn list_by_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<Announcement>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM announcements
             WHERE user_id = $1
             ORDER BY posted_at DESC, id DESC"
        );
        sqlx::query_as::<_, Announcement>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Update an announcement. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateAnnouncement,
    ) -> Result<Option<Announcement>, DbError> {
        input.validate()?;
        let query = format!(
            "UPDATE announcements SET
                title = COALESCE($2, title),
                content = COALESCE($3, content),
                is_active = COALESCE($4, is_active)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let announcement = sqlx::query_as::<_, Announcement>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.content)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await?;
        Ok(announcement)
    }

    /// Hide an announcement. Returns `true` if the row was updated.
    pub async fn deactivate(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE announcements SET is_active = false WHERE id = $1 AND is_active = true",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Permanently delete an announcement. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM announcements WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
