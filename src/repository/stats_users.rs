//! Dashboard credentials repository

use sqlx::{Pool, Postgres};

use crate::{error::AppResult, models::stats_user::StatsUser};

const SCHEMA: &[&str] = &[r#"
    CREATE TABLE IF NOT EXISTS stats_users (
        id SERIAL PRIMARY KEY,
        username VARCHAR(64) NOT NULL UNIQUE,
        password_hash VARCHAR(255) NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#];

#[derive(Clone)]
pub struct StatsUsersRepository {
    pool: Pool<Postgres>,
}

impl StatsUsersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Create the table if absent
    pub async fn ensure_schema(&self) -> AppResult<()> {
        super::run_schema(&self.pool, SCHEMA).await?;
        Ok(())
    }

    /// Whether at least one credential exists
    pub async fn any(&self) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM stats_users)")
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    /// Insert the credential only while the table is empty.
    ///
    /// Emptiness check and insert are one statement; the unique username makes
    /// concurrent first requests collapse into a single row. Returns whether a
    /// row was inserted.
    pub async fn insert_if_empty(&self, username: &str, password_hash: &str) -> AppResult<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO stats_users (username, password_hash)
            SELECT $1, $2
            WHERE NOT EXISTS (SELECT 1 FROM stats_users)
            ON CONFLICT (username) DO NOTHING
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    /// Get a credential by exact username
    pub async fn get_by_username(&self, username: &str) -> AppResult<Option<StatsUser>> {
        let user = sqlx::query_as::<_, StatsUser>(
            "SELECT id, username, password_hash, created_at FROM stats_users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}
