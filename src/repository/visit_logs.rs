//! Visit logs repository

use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::{
        dashboard::{DailyHits, TimezoneHits, UNKNOWN_TIMEZONE},
        visit::{NewVisit, VisitLog},
    },
};

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS visit_logs (
        id BIGSERIAL PRIMARY KEY,
        timezone VARCHAR(100) NULL,
        is_friday BOOLEAN NULL,
        forced_mode VARCHAR(6) NULL CHECK (forced_mode IN ('friday', 'no')),
        season VARCHAR(30) NULL,
        generated_at TIMESTAMPTZ NULL,
        remote_addr VARCHAR(45) NULL,
        user_agent VARCHAR(255) NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_visit_logs_created_at ON visit_logs (created_at)",
    "CREATE INDEX IF NOT EXISTS idx_visit_logs_timezone ON visit_logs (timezone)",
];

/// Append-only access to `visit_logs`; rows are never updated or deleted
#[derive(Clone)]
pub struct VisitLogsRepository {
    pool: Pool<Postgres>,
}

impl VisitLogsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Create the table and its indexes if absent
    pub async fn ensure_schema(&self) -> AppResult<()> {
        super::run_schema(&self.pool, SCHEMA).await?;
        Ok(())
    }

    /// Insert one visit; `created_at` is assigned by the database
    pub async fn insert(&self, visit: &NewVisit) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO visit_logs
                (timezone, is_friday, forced_mode, season, generated_at, remote_addr, user_agent)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(&visit.payload.timezone)
        .bind(visit.payload.is_friday)
        .bind(visit.payload.forced_mode.map(|m| m.as_str()))
        .bind(&visit.payload.season)
        .bind(visit.payload.generated_at)
        .bind(&visit.remote_addr)
        .bind(&visit.user_agent)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Total number of recorded visits
    pub async fn count(&self) -> AppResult<i64> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM visit_logs")
            .fetch_one(&self.pool)
            .await?;
        Ok(total)
    }

    /// Most visited timezones; blank and null timezones share one bucket
    pub async fn top_timezones(&self, limit: i64) -> AppResult<Vec<TimezoneHits>> {
        let rows = sqlx::query_as::<_, TimezoneHits>(
            r#"
            SELECT COALESCE(NULLIF(TRIM(timezone), ''), $1) AS timezone, COUNT(*) AS hits
            FROM visit_logs
            GROUP BY 1
            ORDER BY hits DESC, timezone ASC
            LIMIT $2
            "#,
        )
        .bind(UNKNOWN_TIMEZONE)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Visits per UTC calendar date over the last `days` days including
    /// today, most recent first. Days without visits are omitted.
    pub async fn daily_counts(&self, days: i32) -> AppResult<Vec<DailyHits>> {
        let rows = sqlx::query_as::<_, DailyHits>(
            r#"
            SELECT (created_at AT TIME ZONE 'UTC')::date AS visit_date, COUNT(*) AS hits
            FROM visit_logs
            WHERE (created_at AT TIME ZONE 'UTC')::date > (NOW() AT TIME ZONE 'UTC')::date - $1::int
            GROUP BY 1
            ORDER BY visit_date DESC
            "#,
        )
        .bind(days)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Latest visits, most recent first
    pub async fn recent(&self, limit: i64) -> AppResult<Vec<VisitLog>> {
        let rows = sqlx::query_as::<_, VisitLog>(
            r#"
            SELECT id, timezone, is_friday, forced_mode, season, generated_at,
                   remote_addr, user_agent, created_at
            FROM visit_logs
            ORDER BY created_at DESC, id DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
