//! Repository for the `instructors` table and the `instructor_expertise` links.

use elearn_core::types::DbId;
use sqlx::PgPool;
use validator::Validate;

use crate::error::DbError;
use crate::models::course::Course;
use crate::models::instructor::{CreateInstructor, Instructor, UpdateInstructor};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, bio, years_experience, is_verified, created_at, updated_at";

/// Instructor columns qualified with the `i.` alias for JOIN queries.
const PREFIXED_COLUMNS: &str =
    "i.id, i.user_id, i.bio, i.years_experience, i.is_verified, i.created_at, i.updated_at";

/// Course columns qualified with the `c.` alias.
const COURSE_COLUMNS: &str = "c.id, c.name, c.color, c.description, c.category_id, \
                               c.is_active, c.created_at, c.updated_at";

/// Provides CRUD operations for instructors and their course expertise.
pub struct InstructorRepo;

impl InstructorRepo {
    /// Attach the instructor role record to a user.
    pub async fn create(pool: &PgPool, input: &CreateInstructor) -> Result<Instructor, DbError> {
        input.validate()?;
        let query = format!(
            "INSERT INTO instructors (user_id, bio, years_experience)
             VALUES ($1, COALESCE($2, ''), COALESCE($3, 0))
             RETURNING {COLUMNS}"
        );
        let instructor = sqlx::query_as::<_, Instructor>(&query)
            .bind(input.user_id)
            .bind(&input.bio)
            .bind(input.years_experience)
            .fetch_one(pool)
            .await?;
        Ok(instructor)
    }

    /// Find an instructor by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Instructor>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM instructors WHERE id = $1");
        sqlx::query_as::<_, Instructor>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the instructor record of a user.
    pub async fn find_by_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<Instructor>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM instructors WHERE user_id = $1");
        sqlx::query_as::<_, Instructor>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List all instructors ordered by the owning user's username.
    pub async fn list(pool: &PgPool) -> Result<Vec<Instructor>, sqlx::Error> {
        let query = format!(
            "SELECT {PREFIXED_COLUMNS}
             FROM instructors i
             JOIN users u ON u.id = i.user_id
             ORDER BY u.username"
        );
        sqlx::query_as::<_, Instructor>(&query)
            .fetch_all(pool)
            .await
    }

    /// Instructors with expertise in a course, ordered by username.
    pub async fn list_by_course(
        pool: &PgPool,
        course_id: DbId,
    ) -> Result<Vec<Instructor>, sqlx::Error> {
        let query = format!(
            "SELECT {PREFIXED_COLUMNS}
             FROM instructors i
             JOIN users u ON u.id = i.user_id
             JOIN instructor_expertise ie ON ie.instructor_id = i.id
             WHERE ie.course_id = $1
             ORDER BY u.username"
        );
        sqlx::query_as::<_, Instructor>(&query)
            .bind(course_id)
            .fetch_all(pool)
            .await
    }

    /// Update an instructor. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateInstructor,
    ) -> Result<Option<Instructor>, DbError> {
        input.validate()?;
        let query = format!(
            "UPDATE instructors SET
                bio = COALESCE($2, bio),
                years_experience = COALESCE($3, years_experience)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let instructor = sqlx::query_as::<_, Instructor>(&query)
            .bind(id)
            .bind(&input.bio)
            .bind(input.years_experience)
            .fetch_optional(pool)
            .await?;
        Ok(instructor)
    }

    /// Mark an instructor as verified (or not). Returns `true` if the row exists.
    pub async fn set_verified(pool: &PgPool, id: DbId, verified: bool) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE instructors SET is_verified = $2 WHERE id = $1")
            .bind(id)
            .bind(verified)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Permanently delete an instructor. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM instructors WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Expertise
    // -----------------------------------------------------------------------

    /// Courses the instructor teaches, ordered by name.
    pub async fn list_expertise(
        pool: &PgPool,
        instructor_id: DbId,
    ) -> Result<Vec<Course>, sqlx::Error> {
        let query = format!(
            "SELECT {COURSE_COLUMNS}
             FROM courses c
             JOIN instructor_expertise ie ON ie.course_id = c.id
             WHERE ie.instructor_id = $1
             ORDER BY c.name"
        );
        sqlx::query_as::<_, Course>(&query)
            .bind(instructor_id)
            .fetch_all(pool)
            .await
    }

    /// Add a course to the instructor's expertise (idempotent).
    pub async fn add_expertise(
        pool: &PgPool,
        instructor_id: DbId,
        course_id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO instructor_expertise (instructor_id, course_id)
             VALUES ($1, $2)
             ON CONFLICT ON CONSTRAINT uq_instructor_expertise_instructor_course DO NOTHING",
        )
        .bind(instructor_id)
        .bind(course_id)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Remove a course from the instructor's expertise.
    /// Returns `true` if the link existed.
    pub async fn remove_expertise(
        pool: &PgPool,
        instructor_id: DbId,
        course_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM instructor_expertise WHERE instructor_id = $1 AND course_id = $2",
        )
        .bind(instructor_id)
        .bind(course_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Replace the instructor's expertise with `course_ids` in one transaction.
    pub async fn set_expertise(
        pool: &PgPool,
        instructor_id: DbId,
        course_ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM instructor_expertise WHERE instructor_id = $1")
            .bind(instructor_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            "INSERT INTO instructor_expertise (instructor_id, course_id)
             SELECT $1, course_id FROM UNNEST($2::BIGINT[]) AS course_id
             ON CONFLICT ON CONSTRAINT uq_instructor_expertise_instructor_course DO NOTHING",
        )
        .bind(instructor_id)
        .bind(course_ids)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }
}
