//! Data models

pub mod dashboard;
pub mod manifest;
pub mod scene;
pub mod stats_user;
pub mod visit;

// Re-export commonly used types
pub use dashboard::{DailyHits, DashboardSummary, TimezoneHits};
pub use manifest::{GalleryManifest, MoodPools, SeasonPools};
pub use scene::{Classification, ForcedMode, Hemisphere, Mood, PageState, Scene, SceneSource, Season};
pub use stats_user::{DashboardUser, LoginForm, StatsUser};
pub use visit::{NewVisit, VisitLog, VisitPayload};
