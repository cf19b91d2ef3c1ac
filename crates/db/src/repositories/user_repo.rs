//! Repository for the `users` table.

use elearn_core::roles::{Role, RoleSet};
use elearn_core::types::DbId;
use sqlx::PgPool;
use validator::Validate;

use crate::error::DbError;
use crate::models::user::{CreateUser, UpdateUser, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, username, first_name, last_name, email, password_hash, \
                        is_active, is_learner, is_instructor, is_admin, \
                        last_login_at, created_at, updated_at";

/// Flag column backing each role.
fn role_column(role: Role) -> &'static str {
    match role {
        Role::Learner => "is_learner",
        Role::Instructor => "is_instructor",
        Role::Admin => "is_admin",
    }
}

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, DbError> {
        input.validate()?;
        let (is_learner, is_instructor, is_admin) = input.roles.to_flags();

        let query = format!(
            "INSERT INTO users
                (username, first_name, last_name, email, password_hash,
                 is_learner, is_instructor, is_admin)
             VALUES ($1, COALESCE($2, ''), COALESCE($3, ''), COALESCE($4, ''), $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        let user = sqlx::query_as::<_, User>(&query)
            .bind(&input.username)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(is_learner)
            .bind(is_instructor)
            .bind(is_admin)
            .fetch_one(pool)
            .await?;
        Ok(user)
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by username (case-sensitive).
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE username = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// List all users ordered by username.
    pub async fn list(pool: &PgPool) -> Result<Vec<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users ORDER BY username");
        sqlx::query_as::<_, User>(&query).fetch_all(pool).await
    }

    /// List users holding `role`, ordered by username.
    pub async fn list_by_role(pool: &PgPool, role: Role) -> Result<Vec<User>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM users WHERE {} = true ORDER BY username",
            role_column(role)
        );
        sqlx::query_as::<_, User>(&query).fetch_all(pool).await
    }

    /// Update a user. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateUser,
    ) -> Result<Option<User>, DbError> {
        input.validate()?;
        let query = format!(
            "UPDATE users SET
                username = COALESCE($2, username),
                first_name = COALESCE($3, first_name),
                last_name = COALESCE($4, last_name),
                email = COALESCE($5, email),
                is_active = COALESCE($6, is_active)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let user = sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(&input.username)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.email)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await?;
        Ok(user)
    }

    /// Replace the user's role flags with `roles`.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn set_roles(
        pool: &PgPool,
        id: DbId,
        roles: RoleSet,
    ) -> Result<Option<User>, sqlx::Error> {
        let (is_learner, is_instructor, is_admin) = roles.to_flags();
        let query = format!(
            "UPDATE users SET is_learner = $2, is_instructor = $3, is_admin = $4
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(is_learner)
            .bind(is_instructor)
            .bind(is_admin)
            .fetch_optional(pool)
            .await
    }

    /// Set `last_login_at` to now.
    pub async fn record_login(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET last_login_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Permanently delete a user and everything it owns.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        if result.rows_affected() > 0 {
            tracing::info!(
                user_id = id,
                cascaded = ?elearn_core::ownership::descendants("users"),
                "Deleted user"
            );
        }
        Ok(result.rows_affected() > 0)
    }
}
