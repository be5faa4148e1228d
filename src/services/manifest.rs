//! Gallery manifest builder
//!
//! Scans `<public>/ai/<mood>` and its season subdirectories and produces the
//! manifest the classifier reads. Output depends only on the directory tree
//! (plus the generation timestamp), so repeated runs are reproducible.

use std::path::{Component, Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};
use walkdir::WalkDir;

use crate::{
    error::{AppError, AppResult},
    models::{
        manifest::{GalleryManifest, MoodPools},
        scene::{Hemisphere, Mood, Season},
    },
};

const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "webp", "gif"];

pub struct ManifestBuilder {
    public_dir: PathBuf,
    hemisphere: Hemisphere,
}

impl ManifestBuilder {
    pub fn new(public_dir: impl Into<PathBuf>) -> Self {
        Self {
            public_dir: public_dir.into(),
            hemisphere: Hemisphere::default(),
        }
    }

    pub fn hemisphere(mut self, hemisphere: Hemisphere) -> Self {
        self.hemisphere = hemisphere;
        self
    }

    /// Default output location, `<public>/ai/gallery-manifest.json`
    pub fn default_output(&self) -> PathBuf {
        self.gallery_root().join("gallery-manifest.json")
    }

    fn gallery_root(&self) -> PathBuf {
        self.public_dir.join("ai")
    }

    pub fn build(&self, generated_at: DateTime<Utc>) -> GalleryManifest {
        GalleryManifest {
            generated_at: Some(generated_at.to_rfc3339_opts(SecondsFormat::Millis, true)),
            hemisphere_default: Some(self.hemisphere),
            friday: self.mood_pools(Mood::Friday),
            not_friday: self.mood_pools(Mood::NotFriday),
        }
    }

    fn mood_pools(&self, mood: Mood) -> MoodPools {
        let mood_dir = self.gallery_root().join(mood.dir_name());

        let mut pools = MoodPools {
            base: self.collect_images(&mood_dir),
            ..Default::default()
        };
        for season in Season::ALL {
            *pools.seasons.get_mut(season) = self.collect_images(&mood_dir.join(season.key()));
        }

        tracing::debug!(
            "{}: {} base images, {} seasonal images",
            mood.dir_name(),
            pools.base.len(),
            Season::ALL
                .iter()
                .map(|s| pools.seasons.get(*s).len())
                .sum::<usize>()
        );

        pools
    }

    /// Image files directly inside `dir`, as sorted public URLs.
    /// A missing directory yields an empty list.
    fn collect_images(&self, dir: &Path) -> Vec<String> {
        if !dir.is_dir() {
            return Vec::new();
        }

        // Symlinked images count; their URL keeps the link's own name
        let mut images: Vec<String> = WalkDir::new(dir)
            .follow_links(true)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::warn!("Error accessing entry: {}", e);
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file() && is_image(entry.path()))
            .filter_map(|entry| self.public_url(entry.path()))
            .collect();

        images.sort();
        images
    }

    /// `/ai/friday/x.jpg` style URL relative to the public root
    fn public_url(&self, path: &Path) -> Option<String> {
        let relative = path.strip_prefix(&self.public_dir).ok()?;
        let segments: Vec<String> = relative
            .components()
            .filter_map(|c| match c {
                Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect();
        Some(format!("/{}", segments.join("/")))
    }
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.iter().any(|known| ext.eq_ignore_ascii_case(known)))
        .unwrap_or(false)
}

/// Serialize and write a manifest, creating parent directories
pub fn write_manifest(manifest: &GalleryManifest, output: &Path) -> AppResult<()> {
    let json = serde_json::to_string_pretty(manifest)
        .map_err(|e| AppError::Internal(format!("Failed to serialize manifest: {}", e)))?;

    if let Some(parent) = output.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            AppError::Internal(format!("Failed to create {}: {}", parent.display(), e))
        })?;
    }

    std::fs::write(output, json)
        .map_err(|e| AppError::Internal(format!("Failed to write {}: {}", output.display(), e)))
}
