//! WaveDriver - advances a run wave by wave.
//!
//! Each advance ticks the aura ledger once per wave passed, then decides whether the new wave
//! carries a mystery encounter (queued encounters first, otherwise a spawn
//! roll followed by a tier roll).

use mystery_encounters_domain::{
    ChoiceOfBalance, DomainError, EncounterSession, EncounterSettings, MysteryEncounterTier,
    MysteryEncounterType, SpawnRoll, TickReport,
};

use crate::error::EngineError;
use crate::rng::SeededRandom;
use crate::snapshot::SessionSnapshot;

/// An encounter chosen for a wave.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaveEncounter {
    pub encounter_type: MysteryEncounterType,
    pub tier: MysteryEncounterTier,
    /// Came from the forced-encounter queue rather than a spawn roll
    pub queued: bool,
}

/// What one `advance` did.
#[derive(Debug, Clone, PartialEq)]
pub struct WaveOutcome {
    pub wave: u32,
    pub tick: TickReport,
    /// `None` when the wave was served from the queue
    pub spawn_roll: Option<SpawnRoll>,
    pub encounter: Option<WaveEncounter>,
}

/// Owns one run's session, settings and generator.
#[derive(Debug, Clone)]
pub struct WaveDriver {
    session: EncounterSession,
    settings: EncounterSettings,
    rng: SeededRandom,
    current_wave: u32,
}

impl WaveDriver {
    /// # Errors
    ///
    /// `EngineError::Domain` when `settings` fail validation.
    pub fn new(settings: EncounterSettings, seed: u64) -> Result<Self, EngineError> {
        settings.validate()?;
        let session = EncounterSession::new(&settings);
        tracing::info!(session_id = %session.id(), seed, "Started encounter session");
        Ok(Self {
            session,
            settings,
            rng: SeededRandom::new(seed),
            current_wave: 0,
        })
    }

    /// Resume from a snapshot with a fresh generator.
    pub fn restore(
        snapshot: SessionSnapshot,
        settings: EncounterSettings,
        seed: u64,
    ) -> Result<Self, EngineError> {
        settings.validate()?;
        tracing::info!(
            session_id = %snapshot.session.id(),
            wave = snapshot.wave,
            auras = snapshot.session.ledger().len(),
            "Restored encounter session"
        );
        Ok(Self {
            session: snapshot.session,
            settings,
            rng: SeededRandom::new(seed),
            current_wave: snapshot.wave,
        })
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::new(self.current_wave, self.session.clone())
    }

    pub fn current_wave(&self) -> u32 {
        self.current_wave
    }

    pub fn session(&self) -> &EncounterSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut EncounterSession {
        &mut self.session
    }

    pub fn settings(&self) -> &EncounterSettings {
        &self.settings
    }

    /// Move to `wave`: tick auras once per wave passed, then resolve the
    /// encounter for `wave` itself. Skipped waves roll no encounters.
    ///
    /// # Errors
    ///
    /// `EngineError::Domain` if `wave` does not come after the current wave.
    pub fn advance(&mut self, wave: u32) -> Result<WaveOutcome, EngineError> {
        if wave <= self.current_wave {
            return Err(DomainError::invalid_state_transition(format!(
                "Cannot advance from wave {} to wave {}",
                self.current_wave, wave
            ))
            .into());
        }
        let elapsed = wave - self.current_wave;
        self.current_wave = wave;

        let mut tick = TickReport::default();
        for _ in 0..elapsed {
            let step = self.session.advance_wave();
            tick.activated += step.activated;
            tick.expired.extend(step.expired);
        }
        if !tick.is_quiet() {
            tracing::debug!(
                wave,
                elapsed,
                activated = tick.activated,
                expired = tick.expired.len(),
                remaining = self.session.ledger().len(),
                "Ticked auras"
            );
        }
        for aura in &tick.expired {
            tracing::trace!(wave, kind = %aura.kind(), strength = aura.strength(), "Aura expired");
        }

        if let Some(encounter_type) = self.session.take_queued(wave) {
            let encounter = WaveEncounter {
                encounter_type,
                tier: encounter_type.tier(),
                queued: true,
            };
            self.record(wave, encounter);
            return Ok(WaveOutcome {
                wave,
                tick,
                spawn_roll: None,
                encounter: Some(encounter),
            });
        }

        let roll = self.session.roll_spawn(wave, &self.settings, &mut self.rng);
        let encounter = match roll {
            SpawnRoll::Spawned { .. } => self.resolve_spawn(wave),
            SpawnRoll::Missed {
                roll,
                favoured_weight,
            } => {
                tracing::trace!(
                    wave,
                    roll,
                    favoured_weight,
                    spawn_weight = self.session.spawn_weight(),
                    "No encounter this wave"
                );
                None
            }
            SpawnRoll::Skipped(reason) => {
                tracing::trace!(wave, ?reason, "Wave not eligible for encounters");
                None
            }
        };

        Ok(WaveOutcome {
            wave,
            tick,
            spawn_roll: Some(roll),
            encounter,
        })
    }

    /// Advance to the next wave.
    pub fn next_wave(&mut self) -> Result<WaveOutcome, EngineError> {
        self.advance(self.current_wave.saturating_add(1))
    }

    /// Roll a Choice of Balance encounter on the driver's generator.
    pub fn present_choice_of_balance(&mut self) -> Result<ChoiceOfBalance, EngineError> {
        let encounter = ChoiceOfBalance::generate(&mut self.rng)?;
        tracing::debug!(
            wave = self.current_wave,
            options = encounter.options().len(),
            "Presented Choice of Balance"
        );
        Ok(encounter)
    }

    /// Take option `index` and push its auras into the session ledger.
    pub fn choose_balance_option(
        &mut self,
        encounter: &mut ChoiceOfBalance,
        index: usize,
    ) -> Result<(), EngineError> {
        let option = encounter.choose(index, self.session.ledger_mut())?;
        tracing::info!(
            wave = self.current_wave,
            negative = ?option.negative(),
            positive = ?option.positive(),
            auras = self.session.ledger().len(),
            "Chose Choice of Balance option"
        );
        Ok(())
    }

    fn resolve_spawn(&mut self, wave: u32) -> Option<WaveEncounter> {
        let tier = self.session.roll_tier(&self.settings, &mut self.rng);
        let Some(encounter_type) = self.session.pick_encounter(tier, wave, &mut self.rng) else {
            tracing::warn!(wave, %tier, "Spawn rolled but no encounter of tier is available");
            return None;
        };
        let encounter = WaveEncounter {
            encounter_type,
            tier,
            queued: false,
        };
        self.record(wave, encounter);
        Some(encounter)
    }

    fn record(&mut self, wave: u32, encounter: WaveEncounter) {
        self.session
            .record_encounter(encounter.encounter_type, encounter.tier, wave);
        tracing::info!(
            wave,
            encounter = ?encounter.encounter_type,
            tier = %encounter.tier,
            queued = encounter.queued,
            seen = self.session.encountered().len(),
            "Mystery encounter"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mystery_encounters_domain::{AuraKind, AuraTarget, TeamTarget};

    #[test]
    fn rejects_invalid_settings() {
        let settings = EncounterSettings::default().with_wave_window(50, 20);
        assert!(WaveDriver::new(settings, 1).is_err());
    }

    #[test]
    fn advance_must_move_forward() {
        let mut driver = WaveDriver::new(EncounterSettings::default(), 1).unwrap();
        driver.advance(5).unwrap();
        let err = driver.advance(5).unwrap_err();
        assert!(err.is_domain());
        assert_eq!(driver.current_wave(), 5);
    }

    #[test]
    fn queued_encounter_bypasses_spawn_roll() {
        let mut driver = WaveDriver::new(EncounterSettings::default(), 1).unwrap();
        driver.advance(11).unwrap();
        driver
            .session_mut()
            .queue_next(MysteryEncounterType::MysteriousChallengers, 11, 1);

        let outcome = driver.advance(12).unwrap();
        assert_eq!(outcome.spawn_roll, None);
        let encounter = outcome.encounter.unwrap();
        assert!(encounter.queued);
        assert_eq!(encounter.encounter_type, MysteryEncounterType::MysteriousChallengers);
        assert_eq!(driver.session().encountered().len(), 1);
    }

    #[test]
    fn skipping_waves_ticks_once_per_wave() {
        let mut driver = WaveDriver::new(EncounterSettings::default(), 1).unwrap();
        driver.advance(10).unwrap();
        driver
            .session_mut()
            .ledger_mut()
            .add(AuraTarget::All, 1.0, 5, AuraKind::Atk, TeamTarget::All)
            .unwrap();
        driver
            .session_mut()
            .ledger_mut()
            .add(AuraTarget::All, 0.2, 12, AuraKind::Pp, TeamTarget::All)
            .unwrap();

        let outcome = driver.advance(20).unwrap();
        assert_eq!(outcome.tick.expired.len(), 1);
        assert_eq!(outcome.tick.expired[0].kind(), AuraKind::Atk);
        let held = driver.session().ledger().find_by_kind(AuraKind::Pp);
        assert_eq!(held.len(), 1);
        assert_eq!(held[0].duration().value(), 2);
    }

    #[test]
    fn boss_waves_never_spawn() {
        let mut driver = WaveDriver::new(EncounterSettings::default(), 3).unwrap();
        for wave in (10..=180).step_by(10) {
            let outcome = driver.advance(wave).unwrap();
            assert!(outcome.encounter.is_none());
        }
        assert!(driver.session().encountered().is_empty());
    }
}
