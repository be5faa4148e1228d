//! Scene classification: is it Friday in the visitor's timezone, which
//! season is it, and which gallery image goes with that.

use std::net::IpAddr;
use std::sync::Arc;

use chrono::{DateTime, Datelike, Duration, NaiveDateTime, NaiveTime, TimeZone, Utc, Weekday};
use chrono_tz::Tz;
use rand::{seq::SliceRandom, Rng};

use crate::{
    error::{AppError, AppResult},
    models::{
        manifest::GalleryManifest,
        scene::{Classification, ForcedMode, Hemisphere, Mood, PageState, Scene, SceneSource, Season},
    },
    services::timezone::TimezoneResolver,
};

/// Shown when the manifest could not be loaded
pub const GALLERY_ERROR_MESSAGE: &str = "No se pudo cargar la galería. Inténtalo más tarde.";

/// Days from Sunday=0 to Friday
const FRIDAY_FROM_SUNDAY: u32 = 5;

/// Northern hemisphere season for a 1-based month
const NORTH_SEASONS: [Season; 12] = [
    Season::Winter,
    Season::Winter,
    Season::Spring,
    Season::Spring,
    Season::Spring,
    Season::Summer,
    Season::Summer,
    Season::Summer,
    Season::Autumn,
    Season::Autumn,
    Season::Autumn,
    Season::Winter,
];

/// Season for a month (1-12); southern hemisphere swaps opposites
pub fn season_for_month(month: u32, hemisphere: Hemisphere) -> Season {
    let north = NORTH_SEASONS[((month.clamp(1, 12)) - 1) as usize];
    match hemisphere {
        Hemisphere::North => north,
        Hemisphere::South => north.opposite(),
    }
}

/// Apply the force parameter to the natural Friday test
pub fn apply_override(actual_is_friday: bool, force: Option<ForcedMode>) -> bool {
    match force {
        Some(ForcedMode::Friday) => true,
        Some(ForcedMode::No) => false,
        None => actual_is_friday,
    }
}

/// Pick an image for the mood and season, drawing from the season pool,
/// else the base pool, else the mood's fallback image
pub fn select_scene<R: Rng + ?Sized>(
    manifest: &GalleryManifest,
    mood: Mood,
    season: Season,
    rng: &mut R,
) -> Scene {
    let pools = manifest.pools(mood);
    let seasonal = pools.seasons.get(season);
    let pool = if seasonal.is_empty() { pools.base.as_slice() } else { seasonal };

    let (url, source) = match pool.choose(rng) {
        Some(url) => (url.clone(), SceneSource::LocalGallery),
        None => (mood.fallback_image().to_string(), SceneSource::Fallback),
    };

    Scene {
        url,
        season_key: season,
        season_label: season.label().to_string(),
        gallery_count: pool.len(),
        source,
    }
}

/// Seconds from `now` until the next Friday midnight in `tz`.
/// On a Friday the target is today's midnight, which has passed, so 0.
pub fn seconds_until_friday(now: DateTime<Utc>, tz: Tz) -> i64 {
    let local = now.with_timezone(&tz).naive_local();
    let weekday = local.weekday().num_days_from_sunday();
    let days = (FRIDAY_FROM_SUNDAY + 7 - weekday) % 7;

    let target = NaiveDateTime::new(local.date() + Duration::days(days as i64), NaiveTime::MIN);

    let seconds = match tz.from_local_datetime(&target).earliest() {
        Some(midnight) => (midnight.with_timezone(&Utc) - now).num_seconds(),
        // Midnight skipped by a DST jump; fall back to wall-clock distance
        None => (target - local).num_seconds(),
    };
    seconds.max(0)
}

pub fn weekday_name_es(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Lunes",
        Weekday::Tue => "Martes",
        Weekday::Wed => "Miércoles",
        Weekday::Thu => "Jueves",
        Weekday::Fri => "Viernes",
        Weekday::Sat => "Sábado",
        Weekday::Sun => "Domingo",
    }
}

/// Human countdown with at most two units, e.g. `2 días y 3 horas`
pub fn format_countdown(total_seconds: i64) -> String {
    const UNITS: [(i64, &str, &str); 3] = [
        (86_400, "día", "días"),
        (3_600, "hora", "horas"),
        (60, "minuto", "minutos"),
    ];

    let mut parts = Vec::new();
    let mut remaining = total_seconds.max(0);

    for (size, singular, plural) in UNITS {
        let value = remaining / size;
        if value > 0 {
            parts.push(format!("{} {}", value, if value == 1 { singular } else { plural }));
            remaining -= value * size;
        }
        if parts.len() == 2 {
            break;
        }
    }

    if parts.is_empty() {
        "menos de un minuto".to_string()
    } else {
        parts.join(" y ")
    }
}

/// Classify one page view.
///
/// The forced mode changes what is displayed and logged, never the date
/// arithmetic, except that a forced Friday zeroes the countdown.
pub fn classify<R: Rng + ?Sized>(
    now: DateTime<Utc>,
    tz: Tz,
    hemisphere: Hemisphere,
    force: Option<ForcedMode>,
    manifest: &GalleryManifest,
    rng: &mut R,
) -> Classification {
    let local = now.with_timezone(&tz).naive_local();
    let weekday = local.weekday();

    let actual_is_friday = weekday.num_days_from_sunday() == FRIDAY_FROM_SUNDAY;
    let is_friday = apply_override(actual_is_friday, force);

    let season = season_for_month(local.month(), hemisphere);
    let scene = select_scene(manifest, Mood::from_is_friday(is_friday), season, rng);

    let seconds_until_friday = match force {
        Some(ForcedMode::Friday) => 0,
        _ => seconds_until_friday(now, tz),
    };

    Classification {
        timezone: tz.name().to_string(),
        is_friday,
        forced_mode: force,
        season,
        generated_at: now,
        local_date_iso: local.format("%Y-%m-%dT%H:%M:%S").to_string(),
        weekday_name: weekday_name_es(weekday).to_string(),
        seconds_until_friday,
        scene,
    }
}

/// Classifier bound to the process-wide manifest and timezone resolver
#[derive(Clone)]
pub struct SceneService {
    manifest: Option<Arc<GalleryManifest>>,
    resolver: TimezoneResolver,
    default_hemisphere: Hemisphere,
}

impl SceneService {
    pub fn new(
        manifest: Option<Arc<GalleryManifest>>,
        resolver: TimezoneResolver,
        default_hemisphere: Hemisphere,
    ) -> Self {
        Self {
            manifest,
            resolver,
            default_hemisphere,
        }
    }

    pub fn manifest(&self) -> AppResult<&GalleryManifest> {
        self.manifest
            .as_deref()
            .ok_or_else(|| AppError::Manifest("gallery manifest not loaded".to_string()))
    }

    /// Resolve the visitor's timezone and classify the current instant
    pub async fn classify_visit(
        &self,
        visitor: Option<IpAddr>,
        force: Option<ForcedMode>,
    ) -> AppResult<Classification> {
        let manifest = self.manifest()?;
        let tz = self.resolver.resolve(visitor).await;
        let hemisphere = manifest.hemisphere_default.unwrap_or(self.default_hemisphere);

        Ok(classify(
            Utc::now(),
            tz,
            hemisphere,
            force,
            manifest,
            &mut rand::thread_rng(),
        ))
    }

    /// Classification wrapped as a page state; manifest failures become the
    /// error state
    pub async fn page_state(&self, visitor: Option<IpAddr>, force: Option<ForcedMode>) -> PageState {
        match self.classify_visit(visitor, force).await {
            Ok(classification) => PageState::Ready(classification),
            Err(e) => {
                tracing::error!("Scene classification failed: {}", e);
                PageState::Error {
                    message: GALLERY_ERROR_MESSAGE.to_string(),
                }
            }
        }
    }
}
