//! Business logic services

pub mod dashboard;
pub mod manifest;
pub mod scene;
pub mod timezone;
pub mod visits;

use std::sync::Arc;

use crate::{
    config::AppConfig,
    models::manifest::GalleryManifest,
    repository::Repository,
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub scene: scene::SceneService,
    pub visits: visits::VisitsService,
    pub dashboard: dashboard::DashboardService,
    pub repository: Repository,
}

impl Services {
    /// Create all services. A `None` manifest makes every classification
    /// report the error state.
    pub fn new(
        repository: Repository,
        config: &AppConfig,
        lookup: Arc<dyn timezone::TimezoneLookup>,
        manifest: Option<GalleryManifest>,
    ) -> Self {
        let resolver = timezone::TimezoneResolver::new(lookup, config.timezone.local.as_deref());

        Self {
            scene: scene::SceneService::new(
                manifest.map(Arc::new),
                resolver,
                config.gallery.default_hemisphere,
            ),
            visits: visits::VisitsService::new(repository.clone()),
            dashboard: dashboard::DashboardService::new(repository.clone(), config.dashboard.clone()),
            repository,
        }
    }
}
