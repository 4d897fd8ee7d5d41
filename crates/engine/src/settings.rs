//! Encounter settings loading: `.env` files plus environment overrides.
//!
//! Supported environment variables:
//! - `ME_BASE_SPAWN_WEIGHT`: starting spawn weight (range: 0-256)
//! - `ME_SPAWN_WEIGHT_INCREMENT`: weight added per missed wave (range: 0-256)
//! - `ME_MIN_WAVE` / `ME_MAX_WAVE`: spawn window (range: 1-10000)
//! - `ME_TARGET_ENCOUNTERS_PER_RUN`: pacing target (range: 0-1000)
//!
//! Malformed or out-of-range values are logged and ignored.

use std::ops::RangeInclusive;
use std::path::Path;

use mystery_encounters_domain::EncounterSettings;

pub const ENV_BASE_SPAWN_WEIGHT: &str = "ME_BASE_SPAWN_WEIGHT";
pub const ENV_SPAWN_WEIGHT_INCREMENT: &str = "ME_SPAWN_WEIGHT_INCREMENT";
pub const ENV_MIN_WAVE: &str = "ME_MIN_WAVE";
pub const ENV_MAX_WAVE: &str = "ME_MAX_WAVE";
pub const ENV_TARGET_ENCOUNTERS_PER_RUN: &str = "ME_TARGET_ENCOUNTERS_PER_RUN";

/// Load `.env.local` then `.env` from `dir`, if present. Earlier files win
/// because dotenvy never overwrites a variable that is already set.
pub fn load_dotenv(dir: &Path) {
    for filename in [".env.local", ".env"] {
        let path = dir.join(filename);
        if path.exists() {
            match dotenvy::from_path(&path) {
                Ok(()) => tracing::debug!(path = %path.display(), "Loaded env file"),
                Err(e) => tracing::warn!(path = %path.display(), error = %e, "Failed to load env file"),
            }
        }
    }
}

/// Apply process environment overrides to `base`.
pub fn load_settings_from_env(base: EncounterSettings) -> EncounterSettings {
    apply_overrides(base, |key| std::env::var(key).ok())
}

/// Apply overrides read through `lookup` (the process environment in
/// production, a map in tests).
pub fn apply_overrides<F>(base: EncounterSettings, lookup: F) -> EncounterSettings
where
    F: Fn(&str) -> Option<String>,
{
    let mut settings = base;

    if let Some(weight) = read_u32(&lookup, ENV_BASE_SPAWN_WEIGHT, 0..=256) {
        settings.base_spawn_weight = weight;
    }
    if let Some(increment) = read_u32(&lookup, ENV_SPAWN_WEIGHT_INCREMENT, 0..=256) {
        settings.spawn_weight_increment_on_miss = increment;
    }
    if let Some(target) = read_u32(&lookup, ENV_TARGET_ENCOUNTERS_PER_RUN, 0..=1000) {
        settings.target_encounters_per_run = target;
    }

    let min_wave = read_u32(&lookup, ENV_MIN_WAVE, 1..=10_000).unwrap_or(settings.min_wave);
    let max_wave = read_u32(&lookup, ENV_MAX_WAVE, 1..=10_000).unwrap_or(settings.max_wave);
    if min_wave < max_wave {
        settings.min_wave = min_wave;
        settings.max_wave = max_wave;
    } else {
        tracing::warn!(
            min_wave,
            max_wave,
            "Wave window overrides would leave an empty window, ignoring"
        );
    }

    settings
}

fn read_u32<F>(lookup: &F, key: &str, range: RangeInclusive<u32>) -> Option<u32>
where
    F: Fn(&str) -> Option<String>,
{
    let val = lookup(key)?;
    match val.trim().parse::<u32>() {
        Ok(parsed) if range.contains(&parsed) => {
            tracing::info!(key, value = parsed, "Applied environment override");
            Some(parsed)
        }
        Ok(parsed) => {
            tracing::warn!(
                key,
                value = parsed,
                min = range.start(),
                max = range.end(),
                "Environment override out of range, ignoring"
            );
            None
        }
        Err(_) => {
            tracing::warn!(key, val = %val, "Environment override is not a valid u32, ignoring");
            None
        }
    }
}
