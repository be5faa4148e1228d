//! Visit ingest endpoint (`/stats`)

use axum::{
    body::Bytes,
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
};

use crate::{
    api::ClientInfo,
    error::{AppError, AppResult},
    models::visit::VisitPayload,
    AppState,
};

pub const ALLOWED_METHODS: &str = "POST, OPTIONS";

/// Record a visit
///
/// The body is read leniently: any JSON object is accepted and fields with
/// the wrong type are stored as null. Address and user agent come from the
/// connection, never from the body.
#[utoipa::path(
    post,
    path = "/stats",
    tag = "visits",
    request_body = crate::models::visit::RecordVisitRequest,
    responses(
        (status = 204, description = "Visit recorded"),
        (status = 400, description = "Body is not a JSON object", body = crate::error::ErrorResponse),
        (status = 500, description = "Storage failure", body = crate::error::ErrorResponse)
    )
)]
pub async fn record_visit(
    State(state): State<AppState>,
    client: ClientInfo,
    body: Bytes,
) -> AppResult<StatusCode> {
    let payload = VisitPayload::from_json_bytes(&body)
        .ok_or_else(|| AppError::BadRequest("Invalid JSON body".to_string()))?;

    state.services.visits.record(&client.visit(payload)).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// CORS preflight
pub async fn preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}

/// Any other method on `/stats`
pub async fn method_not_allowed() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        [(header::ALLOW, ALLOWED_METHODS)],
    )
}
