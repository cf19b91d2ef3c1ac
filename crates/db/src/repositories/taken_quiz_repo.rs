//! Repository for the `taken_quizzes` table.
//!
//! One row per attempt. `(learner_id, quiz_id, attempt_number)` is unique;
//! a duplicate surfaces as [`DbError::Integrity`].

use elearn_core::error::CoreError;
use elearn_core::quiz::{next_attempt_number, FIRST_ATTEMPT};
use elearn_core::types::DbId;
use sqlx::PgPool;
use validator::Validate;

use crate::error::DbError;
use crate::models::taken_quiz::{CreateTakenQuiz, RecordAttempt, TakenQuiz};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, learner_id, quiz_id, score, taken_at, time_taken_minutes, \
                        is_completed, attempt_number, created_at, updated_at";

const INSERT_SQL: &str = "INSERT INTO taken_quizzes
        (learner_id, quiz_id, score, time_taken_minutes, is_completed, attempt_number)
     VALUES ($1, $2, $3, COALESCE($4, 0), COALESCE($5, true), $6)";

/// Provides CRUD operations for quiz attempts.
pub struct TakenQuizRepo;

impl TakenQuizRepo {
    /// Insert an attempt with an explicit (or first) attempt number.
    pub async fn create(pool: &PgPool, input: &CreateTakenQuiz) -> Result<TakenQuiz, DbError> {
        input.validate()?;
        input.check_bounds()?;

        let query = format!("{INSERT_SQL} RETURNING {COLUMNS}");
        let attempt = sqlx::query_as::<_, TakenQuiz>(&query)
            .bind(input.learner_id)
            .bind(input.quiz_id)
            .bind(input.score)
            .bind(input.time_taken_minutes)
            .bind(input.is_completed)
            .bind(input.attempt_number.unwrap_or(FIRST_ATTEMPT))
            .fetch_one(pool)
            .await?;
        Ok(attempt)
    }

    /// Record the learner's next attempt at a quiz.
    ///
    /// The learner row is locked for the duration of the transaction so
    /// concurrent submissions get consecutive numbers.
    pub async fn record_attempt(pool: &PgPool, input: &RecordAttempt) -> Result<TakenQuiz, DbError> {
        input.validate()?;
        input.check_bounds()?;

        let mut tx = pool.begin().await?;

        let locked: Option<DbId> =
            sqlx::query_scalar("SELECT id FROM learners WHERE id = $1 FOR UPDATE")
                .bind(input.learner_id)
                .fetch_optional(&mut *tx)
                .await?;
        if locked.is_none() {
            return Err(CoreError::NotFound {
                entity: "Learner",
                id: input.learner_id,
            }
            .into());
        }

        let latest: Option<i32> = sqlx::query_scalar(
            "SELECT MAX(attempt_number) FROM taken_quizzes WHERE learner_id = $1 AND quiz_id = $2",
        )
        .bind(input.learner_id)
        .bind(input.quiz_id)
        .fetch_one(&mut *tx)
        .await?;
        let attempt_number = next_attempt_number(latest);

        let query = format!("{INSERT_SQL} RETURNING {COLUMNS}");
        let attempt = sqlx::query_as::<_, TakenQuiz>(&query)
            .bind(input.learner_id)
            .bind(input.quiz_id)
            .bind(input.score)
            .bind(input.time_taken_minutes)
            .bind(input.is_completed)
            .bind(attempt_number)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::debug!(
            learner_id = input.learner_id,
            quiz_id = input.quiz_id,
            attempt_number,
            "Recorded quiz attempt",
        );
        Ok(attempt)
    }

    /// The number the learner's next attempt at `quiz_id` would get.
    pub async fn next_attempt_number(
        pool: &PgPool,
        learner_id: DbId,
        quiz_id: DbId,
    ) -> Result<i32, sqlx::Error> {
        let latest: Option<i32> = sqlx::query_scalar(
            "SELECT MAX(attempt_number) FROM taken_quizzes WHERE learner_id = $1 AND quiz_id = $2",
        )
        .bind(learner_id)
        .bind(quiz_id)
        .fetch_one(pool)
        .await?;
        Ok(next_attempt_number(latest))
    }

    /// Find an attempt by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<TakenQuiz>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM taken_quizzes WHERE id = $1");
        sqlx::query_as::<_, TakenQuiz>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a learner's attempts, newest first.
    pub async fn list_by_learner(
        pool: &PgPool,
        learner_id: DbId,
    ) -> Result<Vec<TakenQuiz>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM taken_quizzes
             WHERE learner_id = $1
             ORDER BY taken_at DESC, id DESC"
        );
        sqlx::query_as::<_, TakenQuiz>(&query)
            .bind(learner_id)
            .fetch_all(pool)
            .await
    }

    /// List all attempts at a quiz, newest first.
    pub async fn list_by_quiz(pool: &PgPool, quiz_id: DbId) -> Result<Vec<TakenQuiz>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM taken_quizzes
             WHERE quiz_id = $1
             ORDER BY taken_at DESC, id DESC"
        );
        sqlx::query_as::<_, TakenQuiz>(&query)
            .bind(quiz_id)
            .fetch_all(pool)
            .await
    }

    /// Number of attempts a learner has made at a quiz.
    pub async fn count_attempts(
        pool: &PgPool,
        learner_id: DbId,
        quiz_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM taken_quizzes WHERE learner_id = $1 AND quiz_id = $2",
        )
        .bind(learner_id)
        .bind(quiz_id)
        .fetch_one(pool)
        .await
    }

    /// Permanently delete an attempt. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM taken_quizzes WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
