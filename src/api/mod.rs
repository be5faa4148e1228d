//! HTTP handlers for the page, the ingest endpoint and the dashboard

pub mod dashboard;
pub mod health;
pub mod home;
pub mod openapi;
pub mod visits;

use std::net::{IpAddr, SocketAddr};

use axum::{
    async_trait,
    extract::{ConnectInfo, FromRequestParts},
    http::request::Parts,
};
use axum_extra::headers::{HeaderMapExt, UserAgent};
use tower_sessions::Session;

use crate::{
    error::AppError,
    models::{
        stats_user::DashboardUser,
        visit::{NewVisit, VisitPayload},
    },
    AppState,
};

pub const SESSION_USER_ID_KEY: &str = "stats_user_id";
pub const SESSION_USERNAME_KEY: &str = "stats_username";

/// What the server itself knows about the caller
#[derive(Debug, Clone, Default)]
pub struct ClientInfo {
    pub ip: Option<IpAddr>,
    pub user_agent: Option<String>,
}

impl ClientInfo {
    /// Visit row for `payload` from this client
    pub fn visit(&self, payload: VisitPayload) -> NewVisit {
        NewVisit::new(
            payload,
            self.ip.map(|ip| ip.to_string()),
            self.user_agent.clone(),
        )
    }
}

#[async_trait]
impl FromRequestParts<AppState> for ClientInfo {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let forwarded = if state.config.server.trust_forwarded_for {
            forwarded_for(parts)
        } else {
            None
        };

        let ip = forwarded.or_else(|| {
            parts
                .extensions
                .get::<ConnectInfo<SocketAddr>>()
                .map(|ConnectInfo(addr)| addr.ip())
        });

        let user_agent = parts
            .headers
            .typed_get::<UserAgent>()
            .map(|ua| ua.as_str().to_string());

        Ok(ClientInfo { ip, user_agent })
    }
}

/// First entry of `X-Forwarded-For`
fn forwarded_for(parts: &Parts) -> Option<IpAddr> {
    parts
        .headers
        .get("x-forwarded-for")?
        .to_str()
        .ok()?
        .split(',')
        .next()?
        .trim()
        .parse()
        .ok()
}

/// Dashboard identity from the session cookie, `None` when logged out
pub struct CurrentUser(pub Option<DashboardUser>);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = dashboard::PageError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(|(_, msg)| AppError::Internal(format!("Session layer missing: {}", msg)))?;

        let user_id = session.get::<i32>(SESSION_USER_ID_KEY).await?;
        let username = session.get::<String>(SESSION_USERNAME_KEY).await?;

        Ok(CurrentUser(match (user_id, username) {
            (Some(user_id), Some(username)) => Some(DashboardUser { user_id, username }),
            _ => None,
        }))
    }
}
