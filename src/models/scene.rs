//! Scene classification model

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

// ---------------------------------------------------------------------------
// Mood
// ---------------------------------------------------------------------------

/// Display bucket selecting the image pool and color theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum Mood {
    Friday,
    NotFriday,
}

impl Mood {
    pub fn from_is_friday(is_friday: bool) -> Self {
        if is_friday {
            Mood::Friday
        } else {
            Mood::NotFriday
        }
    }

    /// Image shown when the gallery has nothing for this mood
    pub fn fallback_image(self) -> &'static str {
        match self {
            Mood::Friday => "/ai/latest-fiesta.jpg",
            Mood::NotFriday => "/ai/latest-work.jpg",
        }
    }

    /// Directory name under `<public>/ai`
    pub fn dir_name(self) -> &'static str {
        match self {
            Mood::Friday => "friday",
            Mood::NotFriday => "not-friday",
        }
    }
}

// ---------------------------------------------------------------------------
// Season
// ---------------------------------------------------------------------------

/// Calendar season bucket, already adjusted for the hemisphere
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Autumn,
}

impl Season {
    pub const ALL: [Season; 4] = [Season::Winter, Season::Spring, Season::Summer, Season::Autumn];

    pub fn opposite(self) -> Self {
        match self {
            Season::Winter => Season::Summer,
            Season::Summer => Season::Winter,
            Season::Spring => Season::Autumn,
            Season::Autumn => Season::Spring,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Season::Winter => "winter",
            Season::Spring => "spring",
            Season::Summer => "summer",
            Season::Autumn => "autumn",
        }
    }

    /// Label shown on the page
    pub fn label(self) -> &'static str {
        match self {
            Season::Winter => "invierno",
            Season::Spring => "primavera",
            Season::Summer => "verano",
            Season::Autumn => "otoño",
        }
    }
}

impl std::fmt::Display for Season {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

// ---------------------------------------------------------------------------
// Hemisphere
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Hemisphere {
    #[default]
    North,
    South,
}

impl std::str::FromStr for Hemisphere {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "north" => Ok(Hemisphere::North),
            "south" => Ok(Hemisphere::South),
            other => Err(format!("unknown hemisphere '{}'", other)),
        }
    }
}

impl std::fmt::Display for Hemisphere {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Hemisphere::North => write!(f, "north"),
            Hemisphere::South => write!(f, "south"),
        }
    }
}

// ---------------------------------------------------------------------------
// ForcedMode
// ---------------------------------------------------------------------------

/// Explicit override simulating Friday or non-Friday
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ForcedMode {
    Friday,
    No,
}

impl ForcedMode {
    /// Parse the exact wire value; anything else is no override
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "friday" => Some(ForcedMode::Friday),
            "no" => Some(ForcedMode::No),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ForcedMode::Friday => "friday",
            ForcedMode::No => "no",
        }
    }
}

// ---------------------------------------------------------------------------
// Scene & classification
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum SceneSource {
    LocalGallery,
    Fallback,
}

/// Image chosen for a visit
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    pub url: String,
    pub season_key: Season,
    pub season_label: String,
    /// Size of the pool the image was drawn from
    pub gallery_count: usize,
    pub source: SceneSource,
}

/// Outcome of classifying one page view
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Classification {
    pub timezone: String,
    /// Displayed value; follows the forced mode when one is set
    pub is_friday: bool,
    pub forced_mode: Option<ForcedMode>,
    pub season: Season,
    pub generated_at: chrono::DateTime<chrono::Utc>,
    /// Wall-clock date-time in `timezone`
    pub local_date_iso: String,
    pub weekday_name: String,
    pub seconds_until_friday: i64,
    pub scene: Scene,
}

/// Page state, discriminated by `status`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum PageState {
    #[default]
    Loading,
    Error {
        message: String,
    },
    Ready(Classification),
}

/// Query parameters accepted by the page and the scene endpoint
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct SceneQuery {
    /// `friday` or `no`; any other value is ignored
    pub force: Option<String>,
}

impl SceneQuery {
    pub fn forced_mode(&self) -> Option<ForcedMode> {
        self.force.as_deref().and_then(ForcedMode::parse)
    }
}
