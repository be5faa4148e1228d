//! Gallery manifest model
//!
//! The manifest is written by the `gallery-manifest` binary and read once at
//! server start. Every listed path is a URL under the public root.

use std::path::Path;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::scene::{Hemisphere, Mood, Season},
};

/// Season-keyed image lists for one mood
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SeasonPools {
    #[serde(default)]
    pub winter: Vec<String>,
    #[serde(default)]
    pub spring: Vec<String>,
    #[serde(default)]
    pub summer: Vec<String>,
    #[serde(default)]
    pub autumn: Vec<String>,
}

impl SeasonPools {
    pub fn get(&self, season: Season) -> &[String] {
        match season {
            Season::Winter => &self.winter,
            Season::Spring => &self.spring,
            Season::Summer => &self.summer,
            Season::Autumn => &self.autumn,
        }
    }

    pub fn get_mut(&mut self, season: Season) -> &mut Vec<String> {
        match season {
            Season::Winter => &mut self.winter,
            Season::Spring => &mut self.spring,
            Season::Summer => &mut self.summer,
            Season::Autumn => &mut self.autumn,
        }
    }
}

/// Images available for one mood
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MoodPools {
    #[serde(default)]
    pub base: Vec<String>,
    #[serde(default)]
    pub seasons: SeasonPools,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GalleryManifest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hemisphere_default: Option<Hemisphere>,
    pub friday: MoodPools,
    pub not_friday: MoodPools,
}

impl GalleryManifest {
    pub fn pools(&self, mood: Mood) -> &MoodPools {
        match mood {
            Mood::Friday => &self.friday,
            Mood::NotFriday => &self.not_friday,
        }
    }

    /// Read and parse a manifest file
    pub async fn load(path: &Path) -> AppResult<Self> {
        let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
            AppError::Manifest(format!("cannot read {}: {}", path.display(), e))
        })?;

        Self::from_json(&raw)
            .map_err(|e| AppError::Manifest(format!("malformed {}: {}", path.display(), e)))
    }

    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}
