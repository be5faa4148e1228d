//! ¿Es viernes hoy?
//!
//! Server for the "is it Friday?" page: classifies the visitor's current
//! moment (timezone, Friday or not, season, gallery image), records visits,
//! and serves a password-protected statistics dashboard.

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue},
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{services::ServeDir, set_header::SetResponseHeaderLayer, trace::TraceLayer};
use tower_sessions::{MemoryStore, SessionManagerLayer};

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;
pub mod views;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}

/// Create the application router with all routes
pub fn build_router(state: AppState) -> AppResult<Router> {
    let origin = HeaderValue::from_str(&state.config.cors.allowed_origin).map_err(|_| {
        AppError::Configuration(format!(
            "Invalid cors.allowed_origin: {:?}",
            state.config.cors.allowed_origin
        ))
    })?;

    // Headers go on every response of the ingest route, including 400/405
    let cors = ServiceBuilder::new()
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            origin,
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(api::visits::ALLOWED_METHODS),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_MAX_AGE,
            HeaderValue::from_static("86400"),
        ));

    let ingest = post(api::visits::record_visit)
        .options(api::visits::preflight)
        .fallback(api::visits::method_not_allowed)
        .layer(cors);

    // API v1 routes
    let api_v1 = Router::new()
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        .route("/scene", get(api::home::get_scene));

    // Browser-session cookie; logins do not survive a restart
    let sessions = SessionManagerLayer::new(MemoryStore::default())
        .with_secure(state.config.dashboard.cookie_secure);

    let gallery = ServeDir::new(state.config.gallery.public_dir.join("ai"));

    let app = Router::new()
        .route("/", get(api::home::index))
        .route("/stats", ingest)
        .route(
            "/stats/",
            get(api::dashboard::show).post(api::dashboard::login),
        )
        .nest("/api/v1", api_v1)
        .nest_service("/ai", gallery)
        .layer(sessions)
        .with_state(state)
        .merge(api::openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http());

    Ok(app)
}
