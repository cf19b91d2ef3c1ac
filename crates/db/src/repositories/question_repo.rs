//! Repository for the `questions` table.

use elearn_core::types::DbId;
use sqlx::PgPool;
use validator::Validate;

use crate::error::DbError;
use crate::models::lookup::{LookupId, QuestionType};
use crate::models::question::{CreateQuestion, Question, UpdateQuestion};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, quiz_id, text, question_type_id, points, sort_order, created_at, updated_at";

/// Provides CRUD operations for quiz questions.
pub struct QuestionRepo;

impl QuestionRepo {
    /// Insert a new question, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateQuestion) -> Result<Question, DbError> {
        input.validate()?;
        let query = format!(
            "INSERT INTO questions (quiz_id, text, question_type_id, points, sort_order)
             VALUES ($1, $2, COALESCE($3, $4), COALESCE($5, 1), COALESCE($6, 1))
             RETURNING {COLUMNS}"
        );
        let question = sqlx::query_as::<_, Question>(&query)
            .bind(input.quiz_id)
            .bind(&input.text)
            .bind(input.question_type_id)
            .bind(LookupId::from(QuestionType::MultipleChoice))
            .bind(input.points)
            .bind(input.sort_order)
            .fetch_one(pool)
            .await?;
        Ok(question)
    }

    /// Find a question by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Question>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM questions WHERE id = $1");
        sqlx::query_as::<_, Question>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the questions of a quiz in presentation order.
    pub async fn list_by_quiz(pool: &PgPool, quiz_id: DbId) -> Result<Vec<Question>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM questions
             WHERE quiz_id = $1
             ORDER BY sort_order, id"
        );
        sqlx::query_as::<_, Question>(&query)
            .bind(quiz_id)
            .fetch_all(pool)
            .await
    }

    /// Number of questions in a quiz.
    pub async fn count_by_quiz(pool: &PgPool, quiz_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM questions WHERE quiz_id = $1")
            .bind(quiz_id)
            .fetch_one(pool)
            .await
    }

    /// Update a question. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateQuestion,
    ) -> Result<Option<Question>, DbError> {
        input.validate()?;
        let query = format!(
            "UPDATE questions SET
                text = COALESCE($2, text),
                question_type_id = COALESCE($3, question_type_id),
                points = COALESCE($4, points),
                sort_order = COALESCE($5, sort_order)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let question = sqlx::query_as::<_, Question>(&query)
            .bind(id)
            .bind(&input.text)
            .bind(input.question_type_id)
            .bind(input.points)
            .bind(input.sort_order)
            .fetch_optional(pool)
            .await?;
        Ok(question)
    }

    /// Permanently delete a question with its answers.
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM questions WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
