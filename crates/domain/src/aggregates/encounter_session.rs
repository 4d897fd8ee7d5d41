//! EncounterSession aggregate - per-run mystery encounter state
//!
//! # Rustic DDD Design
//!
//! - **Private fields**: the ledger, history, weight and queue are only
//!   reachable through methods
//! - **No globals**: every caller passes the session explicitly
//! - **Injected randomness**: rolls take a [`SeededRng`]; the session never
//!   owns a generator
//! - **Outcome enums**: rolls return [`SpawnRoll`] instead of bare booleans

use serde::{Deserialize, Serialize};

use super::{AuraLedger, TickReport};
use crate::game_systems::{pick, SeededRng};
use crate::value_objects::{EncounterSettings, MysteryEncounterTier, MysteryEncounterType};
use crate::SessionId;

/// One encounter the session has already seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncounteredEvent {
    pub encounter_type: MysteryEncounterType,
    pub tier: MysteryEncounterTier,
    pub wave: u32,
}

/// An encounter forced onto a later wave (chained encounters).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueuedEncounter {
    pub encounter_type: MysteryEncounterType,
    pub spawn_wave: u32,
}

/// Why a wave rolled nothing without consuming randomness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    BossWave,
    OutsideWindow,
}

/// Result of a spawn roll.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpawnRoll {
    /// Wave is not eligible; no roll was made
    Skipped(SkipReason),
    /// Roll failed; spawn weight grows for the next wave
    Missed { roll: u32, favoured_weight: f64 },
    /// Roll succeeded; spawn weight reset to base
    Spawned { roll: u32, favoured_weight: f64 },
}

impl SpawnRoll {
    pub fn is_spawn(&self) -> bool {
        matches!(self, Self::Spawned { .. })
    }
}

/// Mystery encounter state for one run.
///
/// # Invariants
///
/// - `spawn_weight` starts at, and resets to, the settings' base weight
/// - The ledger is ticked once per [`advance_wave`](Self::advance_wave)
///
/// # Example
///
/// ```
/// use mystery_encounters_domain::aggregates::EncounterSession;
/// use mystery_encounters_domain::value_objects::EncounterSettings;
///
/// let settings = EncounterSettings::default();
/// let mut session = EncounterSession::new(&settings);
///
/// // Wave 20 is a boss wave and never spawns.
/// let mut rng = |_range: u32| 0u32;
/// assert!(!session.roll_spawn(20, &settings, &mut rng).is_spawn());
/// assert!(session.roll_spawn(21, &settings, &mut rng).is_spawn());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncounterSession {
    id: SessionId,
    ledger: AuraLedger,
    encountered: Vec<EncounteredEvent>,
    spawn_weight: u32,
    #[serde(default)]
    queue: Vec<QueuedEncounter>,
}

impl EncounterSession {
    // =========================================================================
    // Constructor
    // =========================================================================

    pub fn new(settings: &EncounterSettings) -> Self {
        Self {
            id: SessionId::new(),
            ledger: AuraLedger::new(),
            encountered: Vec::new(),
            spawn_weight: settings.base_spawn_weight,
            queue: Vec::new(),
        }
    }

    pub fn with_id(mut self, id: SessionId) -> Self {
        self.id = id;
        self
    }

    // =========================================================================
    // Read accessors
    // =========================================================================

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn ledger(&self) -> &AuraLedger {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut AuraLedger {
        &mut self.ledger
    }

    pub fn encountered(&self) -> &[EncounteredEvent] {
        &self.encountered
    }

    pub fn spawn_weight(&self) -> u32 {
        self.spawn_weight
    }

    pub fn queued(&self) -> &[QueuedEncounter] {
        &self.queue
    }

    /// Encounters seen so far, per tier, indexed by [`MysteryEncounterTier::index`].
    pub fn tier_counts(&self) -> [u32; 4] {
        let mut counts = [0u32; 4];
        for event in &self.encountered {
            counts[event.tier.index()] += 1;
        }
        counts
    }

    pub fn has_encountered(&self, encounter_type: MysteryEncounterType) -> bool {
        self.encountered
            .iter()
            .any(|event| event.encounter_type == encounter_type)
    }

    // =========================================================================
    // Rolls
    // =========================================================================

    /// Roll whether `wave` spawns an encounter.
    ///
    /// A session trailing the expected pace gets its weight favoured by five
    /// per missing encounter, and one ahead of pace is penalized the same way.
    pub fn roll_spawn<R>(&mut self, wave: u32, settings: &EncounterSettings, rng: &mut R) -> SpawnRoll
    where
        R: SeededRng + ?Sized,
    {
        if settings.is_boss_wave(wave) {
            return SpawnRoll::Skipped(SkipReason::BossWave);
        }
        if !settings.in_window(wave) {
            return SpawnRoll::Skipped(SkipReason::OutsideWindow);
        }

        let roll = rng.rand_seed_int(settings.spawn_roll_range);
        let seen = self.encountered.len() as f64;
        let behind = settings.expected_encounters_by(wave) - seen;
        let favoured_weight = f64::from(self.spawn_weight) + behind * 5.0;

        if f64::from(roll) < favoured_weight {
            self.spawn_weight = settings.base_spawn_weight;
            SpawnRoll::Spawned {
                roll,
                favoured_weight,
            }
        } else {
            self.spawn_weight = self
                .spawn_weight
                .saturating_add(settings.spawn_weight_increment_on_miss);
            SpawnRoll::Missed {
                roll,
                favoured_weight,
            }
        }
    }

    /// Tier weights after the pity adjustment for tiers already seen.
    pub fn tier_weights(&self, settings: &EncounterSettings) -> [u32; 4] {
        let counts = self.tier_counts();
        let mut weights = settings.tier_weights;
        for (i, weight) in weights.iter_mut().enumerate() {
            *weight = weight.saturating_sub(settings.tier_pity[i].saturating_mul(counts[i]));
        }
        weights
    }

    /// Weighted tier choice.
    ///
    /// Falls back to the unadjusted weights when pity has zeroed every tier.
    pub fn roll_tier<R>(&self, settings: &EncounterSettings, rng: &mut R) -> MysteryEncounterTier
    where
        R: SeededRng + ?Sized,
    {
        let mut weights = self.tier_weights(settings);
        if weights.iter().all(|w| *w == 0) {
            weights = settings.tier_weights;
        }
        let total: u32 = weights.iter().sum();
        let value = rng.rand_seed_int(total);

        let mut threshold = 0;
        for tier in MysteryEncounterTier::ALL {
            threshold += weights[tier.index()];
            if value < threshold {
                return tier;
            }
        }
        MysteryEncounterTier::Common
    }

    /// Pick an encounter of `tier` for `wave`, preferring ones not seen this run.
    pub fn pick_encounter<R>(
        &self,
        tier: MysteryEncounterTier,
        wave: u32,
        rng: &mut R,
    ) -> Option<MysteryEncounterType>
    where
        R: SeededRng + ?Sized,
    {
        let candidates = MysteryEncounterType::candidates(tier, wave);
        let fresh: Vec<_> = candidates
            .iter()
            .copied()
            .filter(|encounter| !self.has_encountered(*encounter))
            .collect();
        let pool = if fresh.is_empty() { &candidates } else { &fresh };
        pick(pool, rng).copied()
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    pub fn record_encounter(
        &mut self,
        encounter_type: MysteryEncounterType,
        tier: MysteryEncounterTier,
        wave: u32,
    ) {
        self.encountered.push(EncounteredEvent {
            encounter_type,
            tier,
            wave,
        });
    }

    /// Force `encounter_type` to appear `waves_ahead` waves after `current_wave`.
    pub fn queue_next(
        &mut self,
        encounter_type: MysteryEncounterType,
        current_wave: u32,
        waves_ahead: u32,
    ) {
        self.queue.push(QueuedEncounter {
            encounter_type,
            spawn_wave: current_wave.saturating_add(waves_ahead),
        });
    }

    /// Remove and return the first encounter queued for `wave` or earlier.
    pub fn take_queued(&mut self, wave: u32) -> Option<MysteryEncounterType> {
        let index = self.queue.iter().position(|queued| queued.spawn_wave <= wave)?;
        Some(self.queue.remove(index).encounter_type)
    }

    /// Move to the next wave: tick the ledger exactly once.
    pub fn advance_wave(&mut self) -> TickReport {
        self.ledger.tick()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::{AuraKind, AuraTarget, TeamTarget};

    fn fixed(value: u32) -> impl FnMut(u32) -> u32 {
        move |_range| value
    }

    #[test]
    fn boss_and_out_of_window_waves_skip_without_rolling() {
        let settings = EncounterSettings::default();
        let mut session = EncounterSession::new(&settings);
        let mut calls = 0;
        let mut rng = |_range: u32| {
            calls += 1;
            0u32
        };
        assert_eq!(
            session.roll_spawn(30, &settings, &mut rng),
            SpawnRoll::Skipped(SkipReason::BossWave)
        );
        assert_eq!(
            session.roll_spawn(5, &settings, &mut rng),
            SpawnRoll::Skipped(SkipReason::OutsideWindow)
        );
        assert_eq!(
            session.roll_spawn(181, &settings, &mut rng),
            SpawnRoll::Skipped(SkipReason::OutsideWindow)
        );
        assert_eq!(calls, 0);
    }

    #[test]
    fn miss_grows_weight_and_hit_resets_it() {
        let settings = EncounterSettings::default();
        let mut session = EncounterSession::new(&settings);

        let outcome = session.roll_spawn(11, &settings, &mut fixed(255));
        assert!(matches!(outcome, SpawnRoll::Missed { roll: 255, .. }));
        assert_eq!(session.spawn_weight(), 6);

        session.roll_spawn(12, &settings, &mut fixed(255));
        assert_eq!(session.spawn_weight(), 9);

        assert!(session.roll_spawn(13, &settings, &mut fixed(0)).is_spawn());
        assert_eq!(session.spawn_weight(), 3);
    }

    #[test]
    fn favoured_weight_tracks_pace() {
        let settings = EncounterSettings::default();
        let mut session = EncounterSession::new(&settings);

        // expected at wave 34 = 15 / 170 * 34 = 3, nothing seen yet
        match session.roll_spawn(34, &settings, &mut fixed(255)) {
            SpawnRoll::Missed {
                favoured_weight, ..
            } => assert!((favoured_weight - 18.0).abs() < 1e-9),
            other => panic!("unexpected roll {:?}", other),
        }

        // Ahead of pace lowers the weight.
        let mut ahead = EncounterSession::new(&settings);
        for wave in 11..16 {
            ahead.record_encounter(
                MysteryEncounterType::MysteriousChest,
                MysteryEncounterTier::Common,
                wave,
            );
        }
        match ahead.roll_spawn(34, &settings, &mut fixed(0)) {
            SpawnRoll::Missed {
                favoured_weight, ..
            } => assert!((favoured_weight - -7.0).abs() < 1e-9),
            other => panic!("unexpected roll {:?}", other),
        }
    }

    #[test]
    fn pity_lowers_common_and_great_weights() {
        let settings = EncounterSettings::default();
        let mut session = EncounterSession::new(&settings);
        assert_eq!(session.tier_weights(&settings), [61, 40, 21, 6]);

        session.record_encounter(MysteryEncounterType::FightOrFlight, MysteryEncounterTier::Common, 11);
        session.record_encounter(MysteryEncounterType::DarkDeal, MysteryEncounterTier::Rogue, 12);
        session.record_encounter(MysteryEncounterType::ChoiceOfBalance, MysteryEncounterTier::Great, 13);
        assert_eq!(session.tier_weights(&settings), [55, 36, 21, 6]);

        for wave in 14..30 {
            session.record_encounter(
                MysteryEncounterType::MysteriousChest,
                MysteryEncounterTier::Common,
                wave,
            );
        }
        assert_eq!(session.tier_weights(&settings)[0], 0);
    }

    #[test]
    fn roll_tier_walks_cumulative_weights() {
        let settings = EncounterSettings::default();
        let session = EncounterSession::new(&settings);
        assert_eq!(session.roll_tier(&settings, &mut fixed(0)), MysteryEncounterTier::Common);
        assert_eq!(session.roll_tier(&settings, &mut fixed(60)), MysteryEncounterTier::Common);
        assert_eq!(session.roll_tier(&settings, &mut fixed(61)), MysteryEncounterTier::Great);
        assert_eq!(session.roll_tier(&settings, &mut fixed(121)), MysteryEncounterTier::Ultra);
        assert_eq!(session.roll_tier(&settings, &mut fixed(122)), MysteryEncounterTier::Rogue);
        assert_eq!(session.roll_tier(&settings, &mut fixed(127)), MysteryEncounterTier::Rogue);
    }

    #[test]
    fn pick_encounter_prefers_unseen() {
        let settings = EncounterSettings::default();
        let mut session = EncounterSession::new(&settings);
        session.record_encounter(
            MysteryEncounterType::MysteriousChest,
            MysteryEncounterTier::Common,
            11,
        );
        let picked = session.pick_encounter(MysteryEncounterTier::Common, 12, &mut fixed(0));
        assert_eq!(picked, Some(MysteryEncounterType::FightOrFlight));
        assert_eq!(
            session.pick_encounter(MysteryEncounterTier::Ultra, 5, &mut fixed(0)),
            None
        );
    }

    #[test]
    fn queued_encounters_come_out_on_their_wave() {
        let settings = EncounterSettings::default();
        let mut session = EncounterSession::new(&settings);
        session.queue_next(MysteryEncounterType::MysteriousChallengers, 40, 2);

        assert_eq!(session.take_queued(41), None);
        assert_eq!(
            session.take_queued(42),
            Some(MysteryEncounterType::MysteriousChallengers)
        );
        assert!(session.queued().is_empty());
    }

    #[test]
    fn advance_wave_ticks_ledger_once() {
        let settings = EncounterSettings::default();
        let mut session = EncounterSession::new(&settings);
        session
            .ledger_mut()
            .add(AuraTarget::All, 0.5, 2, AuraKind::Xp, TeamTarget::All)
            .unwrap();

        assert!(session.advance_wave().is_quiet());
        assert_eq!(session.ledger().aggregate(AuraKind::Xp), 0.5);
        let report = session.advance_wave();
        assert_eq!(report.expired.len(), 1);
        assert!(session.ledger().is_empty());
    }

    #[test]
    fn session_round_trips_through_json() {
        let settings = EncounterSettings::default();
        let mut session = EncounterSession::new(&settings);
        session.record_encounter(
            MysteryEncounterType::ChoiceOfBalance,
            MysteryEncounterTier::Great,
            44,
        );
        session
            .ledger_mut()
            .add_delayed(AuraTarget::All, 5.0, -1, AuraKind::Luck, TeamTarget::All, 15)
            .unwrap();

        let json = serde_json::to_string(&session).unwrap();
        let back: EncounterSession = serde_json::from_str(&json).unwrap();
        assert_eq!(back, session);
    }
}
