//! Monte Carlo estimate of encounters per run for a set of spawn settings.
//!
//! Every run plays the full wave window with a fresh session and a generator
//! offset from the base seed by `1000 * run`, so results are reproducible.

use std::fmt;

use mystery_encounters_domain::{
    EncounterSession, EncounterSettings, MysteryEncounterTier, MysteryEncounterType,
};

use crate::error::EngineError;
use crate::rng::SeededRandom;

/// Runs used by the stats binary when none is given.
pub const DEFAULT_RUNS: usize = 1000;

const RUN_SEED_STRIDE: u64 = 1000;

/// Aggregate encounter counts over many simulated runs.
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnStats {
    pub base_spawn_weight: u32,
    pub runs: usize,
    pub mean: f64,
    /// Population standard deviation of encounters per run
    pub std_dev: f64,
    /// Mean encounters per run, indexed by [`MysteryEncounterTier::index`]
    pub tier_means: [f64; 4],
}

impl SpawnStats {
    pub fn tier_mean(&self, tier: MysteryEncounterTier) -> f64 {
        self.tier_means[tier.index()]
    }
}

impl fmt::Display for SpawnStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Starting weight: {}", self.base_spawn_weight)?;
        writeln!(f, "Runs: {}", self.runs)?;
        writeln!(f, "Average MEs per run: {:.3}", self.mean)?;
        writeln!(f, "Standard Deviation: {:.3}", self.std_dev)?;
        for tier in MysteryEncounterTier::ALL {
            writeln!(f, "Avg {}: {:.3}", tier, self.tier_mean(tier))?;
        }
        Ok(())
    }
}

/// Simulate `runs` runs and summarize encounter counts.
///
/// # Errors
///
/// `EngineError::Domain` when `settings` fail validation or `runs` is zero.
pub fn simulate_spawn_stats(
    settings: &EncounterSettings,
    runs: usize,
    seed: u64,
) -> Result<SpawnStats, EngineError> {
    settings.validate()?;
    if runs == 0 {
        return Err(mystery_encounters_domain::DomainError::validation(
            "Simulation needs at least one run",
        )
        .into());
    }

    let base = SeededRandom::new(seed);
    let per_run: Vec<[u32; 4]> = (0..runs as u64)
        .map(|run| base.with_seed_offset(RUN_SEED_STRIDE * run, |rng| simulate_run(settings, rng)))
        .collect();

    let n = runs as f64;
    let totals: Vec<f64> = per_run
        .iter()
        .map(|counts| f64::from(counts.iter().sum::<u32>()))
        .collect();
    let mean = totals.iter().sum::<f64>() / n;
    let std_dev = (totals.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n).sqrt();

    let mut tier_means = [0.0; 4];
    for counts in &per_run {
        for (slot, count) in tier_means.iter_mut().zip(counts) {
            *slot += f64::from(*count);
        }
    }
    for slot in &mut tier_means {
        *slot /= n;
    }

    let stats = SpawnStats {
        base_spawn_weight: settings.base_spawn_weight,
        runs,
        mean,
        std_dev,
        tier_means,
    };
    tracing::debug!(
        runs,
        seed,
        mean = stats.mean,
        std_dev = stats.std_dev,
        "Simulated spawn stats"
    );
    Ok(stats)
}

fn simulate_run(settings: &EncounterSettings, rng: &mut SeededRandom) -> [u32; 4] {
    let mut session = EncounterSession::new(settings);
    for wave in settings.min_wave..settings.max_wave {
        if !session.roll_spawn(wave, settings, rng).is_spawn() {
            continue;
        }
        let tier = session.roll_tier(settings, rng);
        let encounter_type = session
            .pick_encounter(tier, wave, rng)
            .unwrap_or_else(|| any_of_tier(tier));
        session.record_encounter(encounter_type, tier, wave);
    }
    session.tier_counts()
}

// Waves outside an encounter's own range still count toward tier pity.
fn any_of_tier(tier: MysteryEncounterTier) -> MysteryEncounterType {
    MysteryEncounterType::ALL
        .into_iter()
        .find(|encounter| encounter.tier() == tier)
        .unwrap_or(MysteryEncounterType::MysteriousChest)
}
