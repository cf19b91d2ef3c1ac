//! Repository for the `answers` table.

use elearn_core::types::DbId;
use sqlx::PgPool;
use validator::Validate;

use crate::error::DbError;
use crate::models::answer::{Answer, CreateAnswer, UpdateAnswer};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, question_id, text, is_correct, sort_order, created_at, updated_at";

/// Provides CRUD operations for answer options.
pub struct AnswerRepo;

impl AnswerRepo {
    /// Insert a new answer option, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateAnswer) -> Result<Answer, DbError> {
        input.validate()?;
        let query = format!(
            "INSERT INTO answers (question_id, text, is_correct, sort_order)
             VALUES ($1, $2, COALESCE($3, false), COALESCE($4, 1))
             RETURNING {COLUMNS}"
        );
        let answer = sqlx::query_as::<_, Answer>(&query)
            .bind(input.question_id)
            .bind(&input.text)
            .bind(input.is_correct)
            .bind(input.sort_order)
            .fetch_one(pool)
            .await?;
        Ok(answer)
    }

    /// Find an answer by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Answer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM answers WHERE id = $1");
        sqlx::query_as::<_, Answer>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the options of a question in presentation order.
    pub async fn list_by_question(
        pool: &PgPool,
        question_id: DbId,
    ) -> Result<Vec<Answer>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM answers
             WHERE question_id = $1
             ORDER BY sort_order, id"
        );
        sqlx::query_as::<_, Answer>(&query)
            .bind(question_id)
            .fetch_all(pool)
            .await
    }

    /// The correct options of a question. More than one may be marked.
    pub async fn list_correct(
        pool: &PgPool,
        question_id: DbId,
    ) -> Result<Vec<Answer>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM answers
             WHERE question_id = $1 AND is_correct = true
             ORDER BY sort_order, id"
        );
        sqlx::query_as::<_, Answer>(&query)
            .bind(question_id)
            .fetch_all(pool)
            .await
    }

    /// Update an answer. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateAnswer,
    ) -> Result<Option<Answer>, DbError> {
        input.validate()?;
        let query = format!(
            "UPDATE answers SET
                text = COALESCE($2, text),
                is_correct = COALESCE($3, is_correct),
                sort_order = COALESCE($4, sort_order)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let answer = sqlx::query_as::<_, Answer>(&query)
            .bind(id)
            .bind(&input.text)
            .bind(input.is_correct)
            .bind(input.sort_order)
            .fetch_optional(pool)
            .await?;
        Ok(answer)
    }

    /// Permanently delete an answer option. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM answers WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
