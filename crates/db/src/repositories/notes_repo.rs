//! Repository for the `notes` table.
//!
//! Notes carry up to two blob keys. Deleting a note removes the blobs from
//! the store before the row goes away, holding a row lock throughout.

use elearn_core::storage::BlobStore;
use elearn_core::types::DbId;
use sqlx::PgPool;
use validator::Validate;

use crate::error::DbError;
use crate::models::notes::{CreateNote, Note, UpdateNote};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, title, file, cover, course_id, user_id, is_public, download_count, created_at, updated_at";

/// Provides CRUD operations for notes.
pub struct NotesRepo;

impl NotesRepo {
    /// Insert a new note, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateNote) -> Result<Note, DbError> {
        input.validate()?;
        let query = format!(
            "INSERT INTO notes (title, file, cover, course_id, user_id, is_public)
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, true))
             RETURNING {COLUMNS}"
        );
        let note = sqlx::query_as::<_, Note>(&query)
            .bind(&input.title)
            .bind(&input.file)
            .bind(&input.cover)
            .bind(input.course_id)
            .bind(input.user_id)
            .bind(input.is_public)
            .fetch_one(pool)
            .await?;
        Ok(note)
    }

    /// Find a note by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Note>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM notes WHERE id = $1");
        sqlx::query_as::<_, Note>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List notes of a course, newest first.
    pub async fn list_by_course(pool: &PgPool, course_id: DbId) -> Result<Vec<Note>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM notes
             WHERE course_id = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Note>(&query)
            .bind(course_id)
            .fetch_all(pool)
            .await
    }

    /// List notes uploaded by a user, newest first.
    pub async fn list_by_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Note>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM notes
             WHERE user_id = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Note>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Update a note. Only non-`None` fields in `input` are applied.
    ///
    /// Replaced blobs are not removed from the store here.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateNote,
    ) -> Result<Option<Note>, DbError> {
        input.validate()?;
        let query = format!(
            "UPDATE notes SET
                title = COALESCE($2, title),
                file = COALESCE($3, file),
                cover = COALESCE($4, cover),
                is_public = COALESCE($5, is_public)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let note = sqlx::query_as::<_, Note>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.file)
            .bind(&input.cover)
            .bind(input.is_public)
            .fetch_optional(pool)
            .await?;
        Ok(note)
    }

    /// Bump the download counter. Returns the new count, or `None` if the
    /// note does not exist.
    pub async fn increment_downloads(pool: &PgPool, id: DbId) -> Result<Option<i32>, sqlx::Error> {
        sqlx::query_scalar(
            "UPDATE notes SET download_count = download_count + 1
             WHERE id = $1
             RETURNING download_count",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Delete a note along with its file and cover blobs.
    ///
    /// The row stays locked while its blobs are removed, so a concurrent
    /// update cannot swap in keys that would then be orphaned. A storage
    /// failure rolls back and leaves the row in place. Returns `false` if
    /// the note does not exist.
    pub async fn delete(pool: &PgPool, store: &dyn BlobStore, id: DbId) -> Result<bool, DbError> {
        let mut tx = pool.begin().await?;

        let query = format!("SELECT {COLUMNS} FROM notes WHERE id = $1 FOR UPDATE");
        let Some(note) = sqlx::query_as::<_, Note>(&query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(false);
        };

        for key in note.attachment_keys() {
            store.delete(key).await?;
        }

        let result = sqlx::query("DELETE FROM notes WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            tracing::info!(note_id = id, file = ?note.file, cover = ?note.cover, "Deleted note");
        }
        Ok(deleted)
    }
}
