//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{health, home, visits};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "¿Es viernes hoy? API",
        version = "1.0.0",
        description = "Friday classification and visit ingest",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Scene
        home::get_scene,
        // Visits
        visits::record_visit,
    ),
    components(
        schemas(
            // Scene
            crate::models::scene::Classification,
            crate::models::scene::Scene,
            crate::models::scene::SceneSource,
            crate::models::scene::Season,
            crate::models::scene::ForcedMode,
            // Visits
            crate::models::visit::RecordVisitRequest,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "scene", description = "Friday classification"),
        (name = "visits", description = "Visit ingest, served at the site root rather than under /api/v1")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
