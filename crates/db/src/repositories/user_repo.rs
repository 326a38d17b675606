//! Repository for the `users` table (chat visitor identities).

use sqlx::PgPool;
use tessella_core::types::DbId;

use crate::models::user::{CreateUser, User};

const COLUMNS: &str = "id, name, email, created_at";

/// Provides lookup and lazy creation of chat visitors.
pub struct UserRepo;

impl UserRepo {
    /// Find a user by email.
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Get an existing user by email or create one.
    ///
    /// An upsert on the unique email keeps this race-safe when two first
    /// messages arrive concurrently; a provided name fills a missing one
    /// but never overwrites an existing name.
    pub async fn get_or_create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (name, email)
             VALUES ($1, $2)
             ON CONFLICT ON CONSTRAINT uq_users_email
             DO UPDATE SET name = COALESCE(users.name, EXCLUDED.name)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .fetch_one(pool)
            .await
    }
}
