//! Repository for the `quizzes` table.

use elearn_core::types::DbId;
use sqlx::PgPool;
use validator::Validate;

use crate::error::DbError;
use crate::models::lookup::{LookupId, QuizStatus};
use crate::models::quiz::{CreateQuiz, Quiz, UpdateQuiz};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, owner_id, name, course_id, description, time_limit_minutes, \
                        passing_score, status_id, max_attempts, created_at, updated_at";

/// Provides CRUD operations for quizzes.
pub struct QuizRepo;

impl QuizRepo {
    /// Validate and insert a new quiz. Unset settings take their defaults.
    pub async fn create(pool: &PgPool, input: &CreateQuiz) -> Result<Quiz, DbError> {
        input.validate()?;
        input.check_bounds()?;

        let query = format!(
            "INSERT INTO quizzes
                (owner_id, name, course_id, description, time_limit_minutes,
                 passing_score, status_id, max_attempts)
             VALUES ($1, $2, $3, COALESCE($4, ''), $5, $6, COALESCE($7, $8), $9)
             RETURNING {COLUMNS}"
        );
        let quiz = sqlx::query_as::<_, Quiz>(&query)
            .bind(input.owner_id)
            .bind(&input.name)
            .bind(input.course_id)
            .bind(&input.description)
            .bind(input.time_limit_minutes())
            .bind(input.passing_score())
            .bind(input.status_id)
            .bind(LookupId::from(QuizStatus::Draft))
            .bind(input.max_attempts())
            .fetch_one(pool)
            .await?;
        Ok(quiz)
    }

    /// Find a quiz by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Quiz>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM quizzes WHERE id = $1");
        sqlx::query_as::<_, Quiz>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List quizzes of a course, newest first.
    pub async fn list_by_course(pool: &PgPool, course_id: DbId) -> Result<Vec<Quiz>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM quizzes
             WHERE course_id = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Quiz>(&query)
            .bind(course_id)
            .fetch_all(pool)
            .await
    }

    /// List quizzes owned by a user, newest first.
    pub async fn list_by_owner(pool: &PgPool, owner_id: DbId) -> Result<Vec<Quiz>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM quizzes
             WHERE owner_id = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Quiz>(&query)
            .bind(owner_id)
            .fetch_all(pool)
            .await
    }

    /// List quizzes in a given status, newest first.
    pub async fn list_by_status(
        pool: &PgPool,
        status: QuizStatus,
    ) -> Result<Vec<Quiz>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM quizzes
             WHERE status_id = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Quiz>(&query)
            .bind(status.id())
            .fetch_all(pool)
            .await
    }

    /// Update a quiz. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateQuiz,
    ) -> Result<Option<Quiz>, DbError> {
        input.validate()?;
        input.check_bounds()?;

        let query = format!(
            "UPDATE quizzes SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                time_limit_minutes = COALESCE($4, time_limit_minutes),
                passing_score = COALESCE($5, passing_score),
                status_id = COALESCE($6, status_id),
                max_attempts = COALESCE($7, max_attempts)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let quiz = sqlx::query_as::<_, Quiz>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.time_limit_minutes)
            .bind(input.passing_score)
            .bind(input.status_id)
            .bind(input.max_attempts)
            .fetch_optional(pool)
            .await?;
        Ok(quiz)
    }

    /// Move a quiz to another status. Any transition is allowed.
    ///
    /// Returns the updated row, or `None` if the quiz does not exist.
    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        status: QuizStatus,
    ) -> Result<Option<Quiz>, sqlx::Error> {
        let query = format!(
            "UPDATE quizzes SET status_id = $2
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let quiz = sqlx::query_as::<_, Quiz>(&query)
            .bind(id)
            .bind(status.id())
            .fetch_optional(pool)
            .await?;
        if quiz.is_some() {
            tracing::debug!(quiz_id = id, status = status.name(), "Quiz status changed");
        }
        Ok(quiz)
    }

    /// Permanently delete a quiz with its questions and attempts.
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM quizzes WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
