//! Repository for the `profiles` table.

use elearn_core::profile::{default_birth_date, ensure_email_available, DEFAULT_AVATAR};
use elearn_core::types::DbId;
use sqlx::PgPool;
use validator::Validate;

use crate::error::DbError;
use crate::models::profile::{CreateProfile, Profile, UpdateProfile};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, avatar, first_name, last_name, email, phonenumber, \
                        birth_date, bio, city, state, country, favorite_animal, hobby, \
                        created_at, updated_at";

/// Same columns qualified with the `p.` alias for JOIN queries.
const PREFIXED_COLUMNS: &str = "p.id, p.user_id, p.avatar, p.first_name, p.last_name, \
                                 p.email, p.phonenumber, p.birth_date, p.bio, p.city, \
                                 p.state, p.country, p.favorite_animal, p.hobby, \
                                 p.created_at, p.updated_at";

/// Provides CRUD operations for profiles.
pub struct ProfileRepo;

impl ProfileRepo {
    /// Reject `email` if a different profile already uses it.
    ///
    /// `current` is the profile being saved, `None` when creating. This is
    /// an application-level check; `uq_profiles_email` still guards
    /// concurrent writers.
    pub async fn clean(pool: &PgPool, email: &str, current: Option<DbId>) -> Result<(), DbError> {
        let holder: Option<DbId> = sqlx::query_scalar("SELECT id FROM profiles WHERE email = $1")
            .bind(email)
            .fetch_optional(pool)
            .await?;

        ensure_email_available(holder, current).inspect_err(|_| {
            tracing::debug!(email, ?current, ?holder, "Rejected duplicate profile email");
        })?;
        Ok(())
    }

    /// Validate, clean, and insert a new profile.
    pub async fn create(pool: &PgPool, input: &CreateProfile) -> Result<Profile, DbError> {
        input.validate()?;
        Self::clean(pool, &input.email, None).await?;

        let query = format!(
            "INSERT INTO profiles
                (user_id, avatar, first_name, last_name, email, phonenumber, birth_date,
                 bio, city, state, country, favorite_animal, hobby)
             VALUES ($1, COALESCE($2, $3), COALESCE($4, ''), COALESCE($5, ''), $6, $7, $8,
                     COALESCE($9, ''), COALESCE($10, ''), COALESCE($11, ''),
                     COALESCE($12, ''), COALESCE($13, ''), COALESCE($14, ''))
             RETURNING {COLUMNS}"
        );
        let profile = sqlx::query_as::<_, Profile>(&query)
            .bind(input.user_id)
            .bind(&input.avatar)
            .bind(DEFAULT_AVATAR)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.email)
            .bind(&input.phonenumber)
            .bind(input.birth_date.unwrap_or_else(default_birth_date))
            .bind(&input.bio)
            .bind(&input.city)
            .bind(&input.state)
            .bind(&input.country)
            .bind(&input.favorite_animal)
            .bind(&input.hobby)
            .fetch_one(pool)
            .await?;
        Ok(profile)
    }

    /// Find a profile by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM profiles WHERE id = $1");
        sqlx::query_as::<_, Profile>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the profile belonging to a user.
    pub async fn find_by_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM profiles WHERE user_id = $1");
        sqlx::query_as::<_, Profile>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Find a profile by email (case-sensitive).
    pub async fn find_by_email(
        pool: &PgPool,
        email: &str,
    ) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM profiles WHERE email = $1");
        sqlx::query_as::<_, Profile>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// List all profiles ordered by the owning user's username.
    pub async fn list(pool: &PgPool) -> Result<Vec<Profile>, sqlx::Error> {
        let query = format!(
            "SELECT {PREFIXED_COLUMNS}
             FROM profiles p
             JOIN users u ON u.id = p.user_id
             ORDER BY u.username"
        );
        sqlx::query_as::<_, Profile>(&query).fetch_all(pool).await
    }

    /// Update a profile. Only non-`None` fields in `input` are applied.
    ///
    /// A changed email is cleaned first. Returns `None` if no row with the
    /// given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProfile,
    ) -> Result<Option<Profile>, DbError> {
        input.validate()?;
        if let Some(email) = &input.email {
            Self::clean(pool, email, Some(id)).await?;
        }

        let query = format!(
            "UPDATE profiles SET
                avatar = COALESCE($2, avatar),
                first_name = COALESCE($3, first_name),
                last_name = COALESCE($4, last_name),
                email = COALESCE($5, email),
                phonenumber = COALESCE($6, phonenumber),
                birth_date = COALESCE($7, birth_date),
                bio = COALESCE($8, bio),
                city = COALESCE($9, city),
                state = COALESCE($10, state),
                country = COALESCE($11, country),
                favorite_animal = COALESCE($12, favorite_animal),
                hobby = COALESCE($13, hobby)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let profile = sqlx::query_as::<_, Profile>(&query)
            .bind(id)
            .bind(&input.avatar)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.email)
            .bind(&input.phonenumber)
            .bind(input.birth_date)
            .bind(&input.bio)
            .bind(&input.city)
            .bind(&input.state)
            .bind(&input.country)
            .bind(&input.favorite_animal)
            .bind(&input.hobby)
            .fetch_optional(pool)
            .await?;
        Ok(profile)
    }

    /// Permanently delete a profile. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM profiles WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
