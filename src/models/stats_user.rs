//! Dashboard credential model

use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::FromRow;
use validator::Validate;

/// One row of `stats_users`
#[derive(Debug, Clone, FromRow)]
pub struct StatsUser {
    pub id: i32,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Login form posted to the dashboard entry point. Missing fields
/// deserialize as empty and fail validation like wrong credentials.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct LoginForm {
    #[validate(length(min = 1, max = 64))]
    pub username: String,
    #[validate(length(min = 1, max = 1024))]
    pub password: String,
}

/// Identity kept in the dashboard session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardUser {
    pub user_id: i32,
    pub username: String,
}
