//! Mystery encounter spawn settings
//!
//! Settings carry serde defaults per field so a partial settings document
//! (or an empty one) deserializes into a usable configuration. Hosts layer
//! environment overrides on top; see the engine's settings loader.

use serde::{Deserialize, Serialize};

use crate::DomainError;

/// Tunables for encounter spawning and tier selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncounterSettings {
    // ============================================================================
    // Spawn rate
    // ============================================================================
    /// Spawn weight a session starts with, and resets to after each spawn
    #[serde(default = "default_base_spawn_weight")]
    pub base_spawn_weight: u32,

    /// Added to the spawn weight on every wave that rolls no encounter
    #[serde(default = "default_spawn_weight_increment_on_miss")]
    pub spawn_weight_increment_on_miss: u32,

    /// Exclusive upper bound of the spawn roll
    #[serde(default = "default_spawn_roll_range")]
    pub spawn_roll_range: u32,

    /// Encounters a run is expected to see; sessions below pace are favoured
    #[serde(default = "default_target_encounters_per_run")]
    pub target_encounters_per_run: u32,

    // ============================================================================
    // Wave window
    // ============================================================================
    #[serde(default = "default_min_wave")]
    pub min_wave: u32,
    #[serde(default = "default_max_wave")]
    pub max_wave: u32,
    /// Every Nth wave is a boss wave and never rolls an encounter
    #[serde(default = "default_boss_wave_interval")]
    pub boss_wave_interval: u32,

    // ============================================================================
    // Tier selection
    // ============================================================================
    /// Base weights for Common / Great / Ultra / Rogue
    #[serde(default = "default_tier_weights")]
    pub tier_weights: [u32; 4],

    /// Weight removed from a tier per encounter of that tier already seen
    #[serde(default = "default_tier_pity")]
    pub tier_pity: [u32; 4],
}

fn default_base_spawn_weight() -> u32 {
    3
}

fn default_spawn_weight_increment_on_miss() -> u32 {
    3
}

fn default_spawn_roll_range() -> u32 {
    256
}

fn default_target_encounters_per_run() -> u32 {
    15
}

fn default_min_wave() -> u32 {
    10
}

fn default_max_wave() -> u32 {
    180
}

fn default_boss_wave_interval() -> u32 {
    10
}

fn default_tier_weights() -> [u32; 4] {
    [61, 40, 21, 6]
}

fn default_tier_pity() -> [u32; 4] {
    [6, 4, 0, 0]
}

impl Default for EncounterSettings {
    fn default() -> Self {
        Self {
            base_spawn_weight: default_base_spawn_weight(),
            spawn_weight_increment_on_miss: default_spawn_weight_increment_on_miss(),
            spawn_roll_range: default_spawn_roll_range(),
            target_encounters_per_run: default_target_encounters_per_run(),
            min_wave: default_min_wave(),
            max_wave: default_max_wave(),
            boss_wave_interval: default_boss_wave_interval(),
            tier_weights: default_tier_weights(),
            tier_pity: default_tier_pity(),
        }
    }
}

impl EncounterSettings {
    /// Check cross-field constraints.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` when the roll range is zero, the wave
    /// window is empty or inverted, or every tier weight is zero.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.spawn_roll_range == 0 {
            return Err(DomainError::validation("Spawn roll range must be > 0"));
        }
        if self.min_wave >= self.max_wave {
            return Err(DomainError::validation(format!(
                "Wave window must satisfy min < max, got {}..{}",
                self.min_wave, self.max_wave
            )));
        }
        if self.tier_weights.iter().all(|w| *w == 0) {
            return Err(DomainError::validation(
                "At least one tier weight must be > 0",
            ));
        }
        Ok(())
    }

    /// Encounters a session should have seen by `wave` to stay on pace.
    pub fn expected_encounters_by(&self, wave: u32) -> f64 {
        let span = f64::from(self.max_wave.saturating_sub(self.min_wave).max(1));
        f64::from(self.target_encounters_per_run) / span * f64::from(wave)
    }

    pub fn is_boss_wave(&self, wave: u32) -> bool {
        self.boss_wave_interval != 0 && wave % self.boss_wave_interval == 0
    }

    pub fn in_window(&self, wave: u32) -> bool {
        (self.min_wave..self.max_wave).contains(&wave)
    }

    pub fn with_base_spawn_weight(mut self, weight: u32) -> Self {
        self.base_spawn_weight = weight;
        self
    }

    pub fn with_wave_window(mut self, min_wave: u32, max_wave: u32) -> Self {
        self.min_wave = min_wave;
        self.max_wave = max_wave;
        self
    }
}
