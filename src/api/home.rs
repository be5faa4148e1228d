//! Friday page and its JSON twin

use axum::{
    extract::{Query, State},
    response::Html,
    Json,
};

use crate::{
    api::ClientInfo,
    models::{
        scene::{PageState, SceneQuery},
        visit::VisitPayload,
    },
    views, AppState,
};

/// Render the page for the caller's timezone and log the view in the
/// background
pub async fn index(
    State(state): State<AppState>,
    client: ClientInfo,
    Query(query): Query<SceneQuery>,
) -> Html<String> {
    let page = state
        .services
        .scene
        .page_state(client.ip, query.forced_mode())
        .await;

    if let PageState::Ready(classification) = &page {
        if state.config.visits.record_page_views {
            let visit = client.visit(VisitPayload::from(classification));
            state.services.visits.record_detached(visit);
        }
    }

    Html(views::home::render(&page))
}

/// Classify the current instant for the caller
///
/// Returns the page state as JSON: `{"status": "ready", ...}` with the full
/// classification, or `{"status": "error", "message": ...}` when the gallery
/// is unavailable. Nothing is recorded.
#[utoipa::path(
    get,
    path = "/scene",
    tag = "scene",
    params(SceneQuery),
    responses(
        (status = 200, description = "Page state; `status` is `ready` or `error`", body = crate::models::scene::Classification)
    )
)]
pub async fn get_scene(
    State(state): State<AppState>,
    client: ClientInfo,
    Query(query): Query<SceneQuery>,
) -> Json<PageState> {
    Json(
        state
            .services
            .scene
            .page_state(client.ip, query.forced_mode())
            .await,
    )
}
