//! Visit log model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::models::scene::{Classification, ForcedMode};

pub const TIMEZONE_MAX_CHARS: usize = 100;
pub const SEASON_MAX_CHARS: usize = 30;
pub const REMOTE_ADDR_MAX_CHARS: usize = 45;
pub const USER_AGENT_MAX_CHARS: usize = 255;

/// One row of `visit_logs`
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct VisitLog {
    pub id: i64,
    pub timezone: Option<String>,
    pub is_friday: Option<bool>,
    /// `friday`, `no` or null
    pub forced_mode: Option<String>,
    pub season: Option<String>,
    pub generated_at: Option<DateTime<Utc>>,
    pub remote_addr: Option<String>,
    pub user_agent: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Visit payload as posted by a client (documentation only; the ingest
/// endpoint reads the body leniently through [`VisitPayload::from_value`])
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecordVisitRequest {
    /// IANA timezone name, truncated to 100 characters
    pub timezone: Option<String>,
    pub is_friday: Option<bool>,
    /// `friday` or `no`
    pub forced_mode: Option<String>,
    /// Season key, truncated to 30 characters
    pub season: Option<String>,
    /// RFC 3339 timestamp
    pub generated_at: Option<String>,
}

/// Client-supplied visit fields after sanitization
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisitPayload {
    pub timezone: Option<String>,
    pub is_friday: Option<bool>,
    pub forced_mode: Option<ForcedMode>,
    pub season: Option<String>,
    pub generated_at: Option<DateTime<Utc>>,
}

impl VisitPayload {
    /// Extract fields from a JSON object. Invalid fields become `None`;
    /// only a body that is not an object is rejected.
    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;

        Some(Self {
            timezone: string_field(object, "timezone", TIMEZONE_MAX_CHARS),
            is_friday: object.get("isFriday").and_then(Value::as_bool),
            forced_mode: object
                .get("forcedMode")
                .and_then(Value::as_str)
                .and_then(ForcedMode::parse),
            season: string_field(object, "season", SEASON_MAX_CHARS),
            generated_at: object
                .get("generatedAt")
                .and_then(Value::as_str)
                .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
                .map(|dt| dt.with_timezone(&Utc)),
        })
    }

    pub fn from_json_bytes(bytes: &[u8]) -> Option<Self> {
        let value: Value = serde_json::from_slice(bytes).ok()?;
        Self::from_value(&value)
    }
}

impl From<&Classification> for VisitPayload {
    fn from(c: &Classification) -> Self {
        Self {
            timezone: Some(truncate_chars(&c.timezone, TIMEZONE_MAX_CHARS)),
            is_friday: Some(c.is_friday),
            forced_mode: c.forced_mode,
            season: Some(c.season.key().to_string()),
            generated_at: Some(c.generated_at),
        }
    }
}

/// Insert payload for `visit_logs`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewVisit {
    pub payload: VisitPayload,
    pub remote_addr: Option<String>,
    pub user_agent: Option<String>,
}

impl NewVisit {
    /// Combine client fields with request metadata, capping column widths
    pub fn new(payload: VisitPayload, remote_addr: Option<String>, user_agent: Option<String>) -> Self {
        Self {
            payload,
            remote_addr: remote_addr.map(|a| truncate_chars(&a, REMOTE_ADDR_MAX_CHARS)),
            user_agent: user_agent.map(|ua| truncate_chars(&ua, USER_AGENT_MAX_CHARS)),
        }
    }
}

fn string_field(object: &Map<String, Value>, key: &str, max_chars: usize) -> Option<String> {
    object
        .get(key)
        .and_then(Value::as_str)
        .map(|s| truncate_chars(s, max_chars))
}

pub fn truncate_chars(value: &str, max_chars: usize) -> String {
    match value.char_indices().nth(max_chars) {
        Some((idx, _)) => value[..idx].to_string(),
        None => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_full_payload() {
        let payload = VisitPayload::from_value(&json!({
            "timezone": "Europe/Madrid",
            "isFriday": true,
            "forcedMode": "friday",
            "season": "summer",
            "generatedAt": "2024-05-10T10:15:00.123Z"
        }))
        .unwrap();

        assert_eq!(payload.timezone.as_deref(), Some("Europe/Madrid"));
        assert_eq!(payload.is_friday, Some(true));
        assert_eq!(payload.forced_mode, Some(ForcedMode::Friday));
        assert_eq!(payload.season.as_deref(), Some("summer"));
        assert_eq!(
            payload.generated_at.unwrap().to_rfc3339(),
            "2024-05-10T10:15:00.123+00:00"
        );
    }

    #[test]
    fn test_invalid_fields_become_null() {
        let payload = VisitPayload::from_value(&json!({
            "timezone": 42,
            "isFriday": "yes",
            "forcedMode": "FRIDAY",
            "season": ["summer"],
            "generatedAt": "10/05/2024 10:15"
        }))
        .unwrap();

        assert_eq!(payload, VisitPayload::default());
    }

    #[test]
    fn test_strings_are_truncated_by_chars() {
        let long_zone = "ñ".repeat(150);
        let payload = VisitPayload::from_value(&json!({
            "timezone": long_zone,
            "season": "s".repeat(31),
        }))
        .unwrap();

        assert_eq!(payload.timezone.unwrap().chars().count(), TIMEZONE_MAX_CHARS);
        assert_eq!(payload.season.unwrap().len(), SEASON_MAX_CHARS);
    }

    #[test]
    fn test_non_object_body_is_rejected() {
        assert!(VisitPayload::from_json_bytes(b"not json").is_none());
        assert!(VisitPayload::from_json_bytes(b"[1, 2, 3]").is_none());
        assert!(VisitPayload::from_json_bytes(b"\"Europe/Madrid\"").is_none());
        assert_eq!(VisitPayload::from_json_bytes(b"{}"), Some(VisitPayload::default()));
    }

    #[test]
    fn test_new_visit_caps_metadata() {
        let visit = NewVisit::new(
            VisitPayload::default(),
            Some("1".repeat(60)),
            Some("Mozilla/5.0 ".repeat(40)),
        );

        assert_eq!(visit.remote_addr.unwrap().len(), REMOTE_ADDR_MAX_CHARS);
        assert_eq!(visit.user_agent.unwrap().chars().count(), USER_AGENT_MAX_CHARS);
    }
}
