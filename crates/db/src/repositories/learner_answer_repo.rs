//! Repository for the `learner_answers` table.

use elearn_core::error::CoreError;
use elearn_core::types::DbId;
use sqlx::PgPool;

use crate::error::DbError;
use crate::models::learner_answer::{CreateLearnerAnswer, LearnerAnswer};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, student_id, answer_id, question_id, created_at, updated_at";

/// Provides CRUD operations for submitted answers.
pub struct LearnerAnswerRepo;

impl LearnerAnswerRepo {
    /// Record the answer a learner picked.
    ///
    /// `question_id` is copied from the chosen answer. A second answer to
    /// the same question fails with `uq_learner_answers_student_question`.
    pub async fn create(
        pool: &PgPool,
        input: &CreateLearnerAnswer,
    ) -> Result<LearnerAnswer, DbError> {
        let query = format!(
            "INSERT INTO learner_answers (student_id, answer_id, question_id)
             SELECT $1, a.id, a.question_id FROM answers a WHERE a.id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, LearnerAnswer>(&query)
            .bind(input.student_id)
            .bind(input.answer_id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| {
                DbError::Core(CoreError::NotFound {
                    entity: "Answer",
                    id: input.answer_id,
                })
            })
    }

    /// Find a submitted answer by its internal ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<LearnerAnswer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM learner_answers WHERE id = $1");
        sqlx::query_as::<_, LearnerAnswer>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// The learner's submitted answer to one question, if any.
    pub async fn find_for_question(
        pool: &PgPool,
        student_id: DbId,
        question_id: DbId,
    ) -> Result<Option<LearnerAnswer>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM learner_answers
             WHERE student_id = $1 AND question_id = $2"
        );
        sqlx::query_as::<_, LearnerAnswer>(&query)
            .bind(student_id)
            .bind(question_id)
            .fetch_optional(pool)
            .await
    }

    /// The learner's submitted answers for one quiz, in question order.
    pub async fn list_for_quiz(
        pool: &PgPool,
        student_id: DbId,
        quiz_id: DbId,
    ) -> Result<Vec<LearnerAnswer>, sqlx::Error> {
        let query = "SELECT la.id, la.student_id, la.answer_id, la.question_id, \
                            la.created_at, la.updated_at
                     FROM learner_answers la
                     JOIN questions q ON q.id = la.question_id
                     WHERE la.student_id = $1 AND q.quiz_id = $2
                     ORDER BY q.sort_order, q.id";
        sqlx::query_as::<_, LearnerAnswer>(query)
            .bind(student_id)
            .bind(quiz_id)
            .fetch_all(pool)
            .await
    }

    /// Number of correct options among the learner's answers to a quiz.
    pub async fn count_correct(
        pool: &PgPool,
        student_id: DbId,
        quiz_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*)
             FROM learner_answers la
             JOIN answers a ON a.id = la.answer_id
             JOIN questions q ON q.id = la.question_id
             WHERE la.student_id = $1 AND q.quiz_id = $2 AND a.is_correct = true",
        )
        .bind(student_id)
        .bind(quiz_id)
        .fetch_one(pool)
        .await
    }

    /// Permanently delete a submitted answer. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM learner_answers WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
