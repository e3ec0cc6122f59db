//! Repository for the `users` table.

use bookmyshoot_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::{CreateUser, User};

/// Column list for `users` queries.
const COLUMNS: &str = "id, email, full_name, role, is_active, created_at, updated_at";

/// Provides persistence for user accounts.
pub struct UserRepo;

impl UserRepo {
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (email, full_name, role) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.email)
            .bind(&input.full_name)
            .bind(&input.role)
            .fetch_one(pool)
            .await
    }

    /// Deactivate an account. Returns `false` if no such user exists.
    pub async fn deactivate(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE users SET is_active = FALSE WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
