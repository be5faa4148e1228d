//! Visitor timezone resolution
//!
//! Chain: IP geolocation lookup, then the runtime's local zone, then UTC.
//! Resolution never fails; lookup errors are logged and swallowed here.

use std::net::{IpAddr, Ipv4Addr};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono_tz::Tz;

use crate::{
    config::TimezoneConfig,
    error::{AppError, AppResult},
};

/// Source of a visitor's IANA timezone name
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TimezoneLookup: Send + Sync {
    /// Timezone name for `visitor`, or for the caller of the service when
    /// the address is unknown
    async fn lookup(&self, visitor: Option<IpAddr>) -> AppResult<String>;
}

/// Plain-text lookup against an ipapi-style endpoint
pub struct HttpTimezoneLookup {
    client: reqwest::Client,
    url_template: String,
}

impl HttpTimezoneLookup {
    pub fn new(config: &TimezoneConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.lookup_timeout_ms))
            .user_agent(concat!("isitfriday-server/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AppError::Configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url_template: config.lookup_url.clone(),
        })
    }

    fn url_for(&self, visitor: Option<IpAddr>) -> String {
        match visitor {
            Some(ip) => self.url_template.replace("{ip}", &ip.to_string()),
            None => self.url_template.replace("{ip}/", "").replace("{ip}", ""),
        }
    }
}

#[async_trait]
impl TimezoneLookup for HttpTimezoneLookup {
    async fn lookup(&self, visitor: Option<IpAddr>) -> AppResult<String> {
        let url = self.url_for(visitor);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::Internal(format!("timezone lookup failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Internal(format!(
                "timezone lookup failed with status {}",
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| AppError::Internal(format!("timezone lookup body: {}", e)))?;

        Ok(body.trim().to_string())
    }
}

/// Runs the fallback chain
#[derive(Clone)]
pub struct TimezoneResolver {
    lookup: Arc<dyn TimezoneLookup>,
    local: Option<Tz>,
}

impl TimezoneResolver {
    /// `local` is the configured zone name; when absent the `TZ` environment
    /// variable is consulted, then the host's zone
    pub fn new(lookup: Arc<dyn TimezoneLookup>, local: Option<&str>) -> Self {
        let local = local_zone(local, std::env::var("TZ").ok(), || {
            iana_time_zone::get_timezone().ok()
        });

        Self { lookup, local }
    }

    /// Resolve the zone for a visitor. Never fails.
    pub async fn resolve(&self, visitor: Option<IpAddr>) -> Tz {
        if visitor.is_some_and(|ip| !is_public(ip)) {
            tracing::debug!("Skipping timezone lookup for non-public address");
            return self.fallback();
        }

        match self.lookup.lookup(visitor).await {
            Ok(name) => match parse_zone(&name) {
                Some(tz) => tz,
                None => {
                    tracing::warn!("Timezone lookup returned unusable zone {:?}", name);
                    self.fallback()
                }
            },
            Err(e) => {
                tracing::warn!("Timezone lookup failed, using fallback: {}", e);
                self.fallback()
            }
        }
    }

    pub fn fallback(&self) -> Tz {
        self.local.unwrap_or(Tz::UTC)
    }
}

/// First usable zone among the configured name, `TZ` and the host setting
fn local_zone(
    configured: Option<&str>,
    env_tz: Option<String>,
    host: impl FnOnce() -> Option<String>,
) -> Option<Tz> {
    configured
        .and_then(parse_zone)
        .or_else(|| env_tz.as_deref().and_then(parse_zone))
        .or_else(|| host().as_deref().and_then(parse_zone))
}

fn parse_zone(name: &str) -> Option<Tz> {
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    Tz::from_str(name).ok()
}

/// Whether a geolocation service could know anything about `ip`
fn is_public(ip: IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => is_public_v4(v4),
        IpAddr::V6(v6) => {
            // Dual-stack listeners report IPv4 clients as ::ffff:a.b.c.d
            if let Some(v4) = v6.to_ipv4_mapped() {
                return is_public_v4(v4);
            }
            // fc00::/7 unique local, fe80::/10 link local
            let first = v6.segments()[0];
            !(v6.is_loopback()
                || v6.is_unspecified()
                || (first & 0xfe00) == 0xfc00
                || (first & 0xffc0) == 0xfe80)
        }
    }
}

fn is_public_v4(v4: Ipv4Addr) -> bool {
    let [a, b, ..] = v4.octets();
    // 100.64.0.0/10 carrier-grade NAT
    let shared = a == 100 && (b & 0xc0) == 64;
    !(v4.is_private()
        || v4.is_loopback()
        || v4.is_link_local()
        || v4.is_unspecified()
        || v4.is_broadcast()
        || shared)
}
