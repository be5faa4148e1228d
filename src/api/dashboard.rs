//! Statistics dashboard (`/stats/`)

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::{
    api::{CurrentUser, SESSION_USERNAME_KEY, SESSION_USER_ID_KEY},
    error::AppError,
    models::stats_user::LoginForm,
    views::dashboard::{render_dashboard, render_error, render_login, LOGIN_ERROR},
    AppState,
};

const DASHBOARD_PATH: &str = "/stats/";

/// Failure on an HTML page: generic error document, cause only in the log
#[derive(Debug)]
pub struct PageError(AppError);

impl<E> From<E> for PageError
where
    E: Into<AppError>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        tracing::error!("Dashboard request failed: {}", self.0);
        (StatusCode::INTERNAL_SERVER_ERROR, Html(render_error())).into_response()
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    pub logout: Option<String>,
}

/// Login form, aggregate view, or logout
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<DashboardQuery>,
    CurrentUser(user): CurrentUser,
) -> Result<Response, PageError> {
    state.services.dashboard.bootstrap().await?;

    if query.logout.is_some() {
        session.flush().await?;
        return Ok(Redirect::to(DASHBOARD_PATH).into_response());
    }

    let user = match user {
        Some(user) => user,
        None => return Ok(Html(render_login(None)).into_response()),
    };

    let summary = state.services.visits.summary(&user.username).await?;
    Ok(Html(render_dashboard(&summary)).into_response())
}

/// Check submitted credentials and start a session
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response, PageError> {
    state.services.dashboard.bootstrap().await?;

    let user = match state.services.dashboard.authenticate(&form).await? {
        Some(user) => user,
        None => return Ok(Html(render_login(Some(LOGIN_ERROR))).into_response()),
    };

    session.cycle_id().await?;
    session.insert(SESSION_USER_ID_KEY, user.user_id).await?;
    session.insert(SESSION_USERNAME_KEY, &user.username).await?;

    tracing::info!("Dashboard login for '{}'", user.username);
    Ok(Redirect::to(DASHBOARD_PATH).into_response())
}
