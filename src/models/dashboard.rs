//! Dashboard aggregates

use chrono::NaiveDate;
use sqlx::FromRow;

use crate::models::visit::VisitLog;

/// Label used for visits without a timezone
pub const UNKNOWN_TIMEZONE: &str = "unknown";
pub const TOP_TIMEZONES_LIMIT: i64 = 20;
pub const RECENT_DAYS: i32 = 14;
pub const RECENT_VISITS_LIMIT: i64 = 50;

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct TimezoneHits {
    pub timezone: String,
    pub hits: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct DailyHits {
    pub visit_date: NaiveDate,
    pub hits: i64,
}

/// Everything the authenticated dashboard renders
#[derive(Debug, Clone)]
pub struct DashboardSummary {
    pub username: String,
    pub total_visits: i64,
    pub top_timezones: Vec<TimezoneHits>,
    pub recent_days: Vec<DailyHits>,
    pub recent_visits: Vec<VisitLog>,
}
