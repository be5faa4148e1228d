//! Repository layer for database operations

pub mod stats_users;
pub mod visit_logs;

use std::time::Duration;

use sqlx::{postgres::PgPoolOptions, Pool, Postgres};

use crate::config::DatabaseConfig;

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub visit_logs: visit_logs::VisitLogsRepository,
    pub stats_users: stats_users::StatsUsersRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            visit_logs: visit_logs::VisitLogsRepository::new(pool.clone()),
            stats_users: stats_users::StatsUsersRepository::new(pool.clone()),
            pool,
        }
    }

    /// Pool settings shared by the server and the tests. Requests fail after
    /// `acquire_timeout_secs` instead of waiting on an unreachable server.
    pub fn pool_options(config: &DatabaseConfig) -> PgPoolOptions {
        PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
    }

    /// Cheap connectivity probe used by the readiness endpoint
    pub async fn ping(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}

/// Run idempotent DDL statements in order.
///
/// `IF NOT EXISTS` is not race-free in PostgreSQL: two sessions creating the
/// same table can collide on the catalog. Those collisions mean the object now
/// exists and are ignored.
pub(crate) async fn run_schema(pool: &Pool<Postgres>, statements: &[&str]) -> Result<(), sqlx::Error> {
    for statement in statements {
        if let Err(e) = sqlx::query(statement).execute(pool).await {
            if !is_already_exists(&e) {
                return Err(e);
            }
            tracing::debug!("Schema object already present: {}", e);
        }
    }
    Ok(())
}

fn is_already_exists(error: &sqlx::Error) -> bool {
    match error {
        sqlx::Error::Database(db) => matches!(
            db.code().as_deref(),
            // unique_violation, duplicate_object, duplicate_table
            Some("23505") | Some("42710") | Some("42P07")
        ),
        _ => false,
    }
}
