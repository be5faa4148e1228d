//! Visit recording and aggregation service

use crate::{
    error::AppResult,
    models::{
        dashboard::{DashboardSummary, RECENT_DAYS, RECENT_VISITS_LIMIT, TOP_TIMEZONES_LIMIT},
        visit::NewVisit,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct VisitsService {
    repository: Repository,
}

impl VisitsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Persist one visit, creating the table first if needed
    pub async fn record(&self, visit: &NewVisit) -> AppResult<()> {
        self.repository.visit_logs.ensure_schema().await?;
        self.repository.visit_logs.insert(visit).await?;

        tracing::debug!(
            timezone = ?visit.payload.timezone,
            forced_mode = ?visit.payload.forced_mode,
            "Visit recorded"
        );
        Ok(())
    }

    /// Record a visit on a detached task. Failures only reach the log.
    pub fn record_detached(&self, visit: NewVisit) {
        let service = self.clone();
        tokio::spawn(async move {
            if let Err(e) = service.record(&visit).await {
                tracing::warn!("Failed to record page view: {}", e);
            }
        });
    }

    /// Aggregates rendered on the authenticated dashboard
    pub async fn summary(&self, username: &str) -> AppResult<DashboardSummary> {
        let repo = &self.repository.visit_logs;
        repo.ensure_schema().await?;

        Ok(DashboardSummary {
            username: username.to_string(),
            total_visits: repo.count().await?,
            top_timezones: repo.top_timezones(TOP_TIMEZONES_LIMIT).await?,
            recent_days: repo.daily_counts(RECENT_DAYS).await?,
            recent_visits: repo.recent(RECENT_VISITS_LIMIT).await?,
        })
    }
}
