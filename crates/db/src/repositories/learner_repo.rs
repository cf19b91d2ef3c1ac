//! Repository for the `learners` table and the `learner_interests` links.

use std::collections::HashSet;

use elearn_core::quiz::unanswered_questions;
use elearn_core::types::DbId;
use sqlx::PgPool;

use crate::models::course::Course;
use crate::models::learner::{CreateLearner, Learner};
use crate::models::question::Question;
use crate::models::quiz::Quiz;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, total_score, quizzes_completed, created_at, updated_at";

/// Learner columns qualified with the `l.` alias for JOIN queries.
const PREFIXED_COLUMNS: &str =
    "l.id, l.user_id, l.total_score, l.quizzes_completed, l.created_at, l.updated_at";

/// Course columns qualified with the `c.` alias.
const COURSE_COLUMNS: &str = "c.id, c.name, c.color, c.description, c.category_id, \
                               c.is_active, c.created_at, c.updated_at";

/// Quiz columns qualified with the `q.` alias.
const QUIZ_COLUMNS: &str = "q.id, q.owner_id, q.name, q.course_id, q.description, \
                             q.time_limit_minutes, q.passing_score, q.status_id, \
                             q.max_attempts, q.created_at, q.updated_at";

/// Question columns, unqualified.
const QUESTION_COLUMNS: &str =
    "id, quiz_id, text, question_type_id, points, sort_order, created_at, updated_at";

/// Provides CRUD operations for learners and their course interests.
pub struct LearnerRepo;

impl LearnerRepo {
    /// Attach the learner role record to a user. A second record for the
    /// same user fails with `uq_learners_user_id`.
    pub async fn create(pool: &PgPool, input: &CreateLearner) -> Result<Learner, sqlx::Error> {
        let query = format!(
            "INSERT INTO learners (user_id) VALUES ($1)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Learner>(&query)
            .bind(input.user_id)
            .fetch_one(pool)
            .await
    }

    /// Find a learner by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Learner>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM learners WHERE id = $1");
        sqlx::query_as::<_, Learner>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the learner record of a user.
    pub async fn find_by_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<Learner>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM learners WHERE user_id = $1");
        sqlx::query_as::<_, Learner>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List all learners ordered by the owning user's username.
    pub async fn list(pool: &PgPool) -> Result<Vec<Learner>, sqlx::Error> {
        let query = format!(
            "SELECT {PREFIXED_COLUMNS}
             FROM learners l
             JOIN users u ON u.id = l.user_id
             ORDER BY u.username"
        );
        sqlx::query_as::<_, Learner>(&query).fetch_all(pool).await
    }

    /// Add a finished quiz to the learner's running totals.
    ///
    /// The counters are never recomputed from `taken_quizzes`. Returns
    /// `None` if the learner does not exist.
    pub async fn record_completed_quiz(
        pool: &PgPool,
        id: DbId,
        score: f64,
    ) -> Result<Option<Learner>, sqlx::Error> {
        let query = format!(
            "UPDATE learners SET
                total_score = total_score + $2,
                quizzes_completed = quizzes_completed + 1
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Learner>(&query)
            .bind(id)
            .bind(score)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a learner with its attempts and submitted answers.
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM learners WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Quiz progress
    // -----------------------------------------------------------------------

    /// Questions of `quiz_id` the learner has not answered yet, ordered by
    /// `(sort_order, id)`.
    ///
    /// A question counts as answered when one of the learner's submitted
    /// answers points at an answer option of that question.
    pub async fn unanswered_questions(
        pool: &PgPool,
        learner_id: DbId,
        quiz_id: DbId,
    ) -> Result<Vec<Question>, sqlx::Error> {
        let query = format!(
            "SELECT {QUESTION_COLUMNS} FROM questions
             WHERE quiz_id = $1
             ORDER BY sort_order, id"
        );
        let questions = sqlx::query_as::<_, Question>(&query)
            .bind(quiz_id)
            .fetch_all(pool)
            .await?;

        let answered: Vec<DbId> = sqlx::query_scalar(
            "SELECT DISTINCT a.question_id
             FROM learner_answers la
             JOIN answers a ON a.id = la.answer_id
             JOIN questions q ON q.id = a.question_id
             WHERE la.student_id = $1 AND q.quiz_id = $2",
        )
        .bind(learner_id)
        .bind(quiz_id)
        .fetch_all(pool)
        .await?;

        let answered: HashSet<DbId> = answered.into_iter().collect();
        Ok(unanswered_questions(questions, &answered))
    }

    /// Distinct quizzes the learner has attempted, most recent attempt first.
    pub async fn list_taken_quizzes(
        pool: &PgPool,
        learner_id: DbId,
    ) -> Result<Vec<Quiz>, sqlx::Error> {
        let query = format!(
            "SELECT {QUIZ_COLUMNS}
             FROM quizzes q
             JOIN (
                 SELECT quiz_id, MAX(taken_at) AS last_taken_at
                 FROM taken_quizzes
                 WHERE learner_id = $1
                 GROUP BY quiz_id
             ) t ON t.quiz_id = q.id
             ORDER BY t.last_taken_at DESC, q.id"
        );
        sqlx::query_as::<_, Quiz>(&query)
            .bind(learner_id)
            .fetch_all(pool)
            .await
    }

    // -----------------------------------------------------------------------
    // Interests
    // -----------------------------------------------------------------------

    /// Courses the learner is interested in, ordered by name.
    pub async fn list_interests(
        pool: &PgPool,
        learner_id: DbId,
    ) -> Result<Vec<Course>, sqlx::Error> {
        let query = format!(
            "SELECT {COURSE_COLUMNS}
             FROM courses c
             JOIN learner_interests li ON li.course_id = c.id
             WHERE li.learner_id = $1
             ORDER BY c.name"
        );
        sqlx::query_as::<_, Course>(&query)
            .bind(learner_id)
            .fetch_all(pool)
            .await
    }

    /// Add a course interest. Adding an existing interest is a no-op.
    pub async fn add_interest(
        pool: &PgPool,
        learner_id: DbId,
        course_id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO learner_interests (learner_id, course_id)
             VALUES ($1, $2)
             ON CONFLICT ON CONSTRAINT uq_learner_interests_learner_course DO NOTHING",
        )
        .bind(learner_id)
        .bind(course_id)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Remove a course interest. Returns `true` if the link existed.
    pub async fn remove_interest(
        pool: &PgPool,
        learner_id: DbId,
        course_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM learner_interests WHERE learner_id = $1 AND course_id = $2",
        )
        .bind(learner_id)
        .bind(course_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Replace the learner's interests with `course_ids` in one transaction.
    pub async fn set_interests(
        pool: &PgPool,
        learner_id: DbId,
        course_ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM learner_interests WHERE learner_id = $1")
            .bind(learner_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            "INSERT INTO learner_interests (learner_id, course_id)
             SELECT $1, course_id FROM UNNEST($2::BIGINT[]) AS course_id
             ON CONFLICT ON CONSTRAINT uq_learner_interests_learner_course DO NOTHING",
        )
        .bind(learner_id)
        .bind(course_ids)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }
}
