//! AuraLedger aggregate - the session's collection of timed effects
//!
//! # Rustic DDD Design
//!
//! - **Owned, not global**: one ledger per session, passed by reference to
//!   producers (encounter options) and consumers (stat/economy code)
//! - **Valid by construction**: `add()` validates raw arguments before any
//!   mutation; `push()` takes an already-valid [`Aura`]
//! - **Events from mutations**: `tick()` returns a [`TickReport`]
//!
//! The ledger keeps insertion order, never merges auras, and rebuilds its
//! list on every tick instead of deleting in place.

use serde::{Deserialize, Serialize};

use crate::entities::{Aura, AuraTickOutcome};
use crate::value_objects::{
    ActivationDelay, AuraDuration, AuraKind, AuraTarget, BattleStat, StatStages, TeamTarget,
};
use crate::{DomainError, EntityId};

/// Luck total reported when an active zero-strength luck aura is present.
///
/// Only [`AuraKind::Luck`] has this override; a zero-strength aura of any
/// other kind simply adds zero.
pub const LUCK_OVERRIDE_FLOOR: f64 = 0.5;

/// What one `tick()` changed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    /// Auras whose activation delay ran out this tick and that are still held
    pub activated: usize,
    /// Auras removed this tick, in their former ledger order
    pub expired: Vec<Aura>,
}

impl TickReport {
    pub fn is_quiet(&self) -> bool {
        self.activated == 0 && self.expired.is_empty()
    }
}

/// Ordered ledger of active and pending auras.
///
/// # Example
///
/// ```
/// use mystery_encounters_domain::aggregates::AuraLedger;
/// use mystery_encounters_domain::value_objects::{AuraKind, AuraTarget, TeamTarget};
///
/// let mut ledger = AuraLedger::new();
/// ledger
///     .add(AuraTarget::All, 0.2, 40, AuraKind::Pp, TeamTarget::All)
///     .unwrap();
///
/// for _ in 0..39 {
///     ledger.tick();
/// }
/// assert_eq!(ledger.aggregate(AuraKind::Pp), 0.2);
///
/// ledger.tick();
/// assert_eq!(ledger.aggregate(AuraKind::Pp), 0.0);
/// assert!(ledger.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuraLedger {
    auras: Vec<Aura>,
}

impl AuraLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a ledger from previously saved auras, preserving their order
    /// and pending/active state.
    pub fn from_auras(auras: Vec<Aura>) -> Self {
        Self { auras }
    }

    pub fn into_auras(self) -> Vec<Aura> {
        self.auras
    }

    pub fn auras(&self) -> &[Aura] {
        &self.auras
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Aura> {
        self.auras.iter()
    }

    pub fn len(&self) -> usize {
        self.auras.len()
    }

    pub fn is_empty(&self) -> bool {
        self.auras.is_empty()
    }

    /// Drop every aura (explicit session reset).
    pub fn clear(&mut self) {
        self.auras.clear();
    }

    // =========================================================================
    // Producers
    // =========================================================================

    /// Append an aura that is active immediately.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` when `duration < -1` or `strength`
    /// is not finite. Nothing is appended on error.
    pub fn add(
        &mut self,
        target: AuraTarget,
        strength: f64,
        duration: i32,
        kind: AuraKind,
        team: TeamTarget,
    ) -> Result<(), DomainError> {
        self.add_delayed(target, strength, duration, kind, team, 0)
    }

    /// Append an aura that waits `activation_delay` waves before it counts.
    ///
    /// # Errors
    ///
    /// As [`add`](Self::add), plus `activation_delay < 0`.
    pub fn add_delayed(
        &mut self,
        target: AuraTarget,
        strength: f64,
        duration: i32,
        kind: AuraKind,
        team: TeamTarget,
        activation_delay: i32,
    ) -> Result<(), DomainError> {
        if !strength.is_finite() {
            return Err(DomainError::validation(format!(
                "Aura strength must be finite, got {}",
                strength
            )));
        }
        let duration = AuraDuration::new(duration)?;
        let delay = ActivationDelay::new(activation_delay)?;
        self.push(Aura::new(target, strength, duration, kind, team).with_activation_delay(delay));
        Ok(())
    }

    /// Append a pre-built aura. Every call adds a distinct entry; stacking
    /// auras of the same kind expire independently.
    pub fn push(&mut self, aura: Aura) {
        self.auras.push(aura);
    }

    // =========================================================================
    // Tick driver
    // =========================================================================

    /// Advance every held aura by one wave, then drop the expired ones.
    ///
    /// Pending auras only count their delay down; an aura that activates
    /// this tick starts decaying on the next one. Active auras lose one wave
    /// of duration (permanent ones are untouched) and are removed once it is
    /// zero, which includes instant auras on their first active tick. A
    /// delayed instant aura is removed on the tick its delay ends; hosts pay
    /// out instant rewards from [`TickReport::expired`].
    pub fn tick(&mut self) -> TickReport {
        let mut report = TickReport::default();
        let mut kept = Vec::with_capacity(self.auras.len());

        for mut aura in std::mem::take(&mut self.auras) {
            match aura.tick() {
                AuraTickOutcome::Expired => report.expired.push(aura),
                AuraTickOutcome::Activated => {
                    report.activated += 1;
                    kept.push(aura);
                }
                AuraTickOutcome::Waiting | AuraTickOutcome::Decayed => kept.push(aura),
            }
        }

        self.auras = kept;
        report
    }

    // =========================================================================
    // Consumers
    // =========================================================================

    /// Auras of `kind`, in insertion order, pending ones included.
    pub fn find_by_kind(&self, kind: AuraKind) -> Vec<&Aura> {
        self.auras.iter().filter(|aura| aura.kind() == kind).collect()
    }

    /// Auras whose target and team both match the entity, optionally limited
    /// to one kind. Pending auras are included.
    pub fn find_by_entity(
        &self,
        entity: EntityId,
        is_player_side: bool,
        kind: Option<AuraKind>,
    ) -> Vec<&Aura> {
        self.auras
            .iter()
            .filter(|aura| aura.applies_to(entity, is_player_side))
            .filter(|aura| kind.map_or(true, |k| aura.kind() == k))
            .collect()
    }

    /// Total active strength for `kind`; `0.0` when nothing contributes.
    ///
    /// Luck is special-cased: the first active luck aura with zero strength
    /// forces the result to [`LUCK_OVERRIDE_FLOOR`] regardless of the others.
    pub fn aggregate(&self, kind: AuraKind) -> f64 {
        let mut total = 0.0;
        for aura in self.find_by_kind(kind) {
            if !aura.is_active() {
                continue;
            }
            if kind == AuraKind::Luck && aura.strength() == 0.0 {
                return LUCK_OVERRIDE_FLOOR;
            }
            total += aura.strength();
        }
        total
    }

    /// Add this entity's stat-stage aura totals into `stages`.
    ///
    /// Plain sums per stat; the luck override does not apply here. Pending
    /// auras contribute nothing. The ledger itself is not modified.
    pub fn apply_to_entity(&self, entity: EntityId, is_player_side: bool, stages: &mut StatStages) {
        for stat in BattleStat::ALL {
            let total: f64 = self
                .find_by_entity(entity, is_player_side, Some(stat.aura_kind()))
                .into_iter()
                .map(Aura::contribution)
                .sum();
            stages.add(stat, total);
        }
    }
}

impl<'a> IntoIterator for &'a AuraLedger {
    type Item = &'a Aura;
    type IntoIter = std::slice::Iter<'a, Aura>;

    fn into_iter(self) -> Self::IntoIter {
        self.auras.iter()
    }
}

impl FromIterator<Aura> for AuraLedger {
    fn from_iter<I: IntoIterator<Item = Aura>>(iter: I) -> Self {
        Self::from_auras(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn add(ledger: &mut AuraLedger, strength: f64, duration: i32, kind: AuraKind) {
        ledger
            .add(AuraTarget::All, strength, duration, kind, TeamTarget::All)
            .unwrap();
    }

    #[test]
    fn pp_chance_lasts_exactly_its_duration() {
        let mut ledger = AuraLedger::new();
        add(&mut ledger, 0.2, 40, AuraKind::Pp);

        for _ in 0..39 {
            ledger.tick();
        }
        assert_eq!(ledger.aggregate(AuraKind::Pp), 0.2);
        assert_eq!(ledger.auras()[0].duration().value(), 1);

        let report = ledger.tick();
        assert_eq!(report.expired.len(), 1);
        assert_eq!(ledger.aggregate(AuraKind::Pp), 0.0);
        assert!(ledger.is_empty());
    }

    #[test]
    fn permanent_auras_survive_any_number_of_ticks() {
        let mut ledger = AuraLedger::new();
        add(&mut ledger, 0.7, -1, AuraKind::Income);
        for _ in 0..500 {
            assert!(ledger.tick().is_quiet());
        }
        assert_eq!(ledger.len(), 1);
        assert!(ledger.auras()[0].duration().is_permanent());
        assert_eq!(ledger.aggregate(AuraKind::Income), 0.7);
    }

    #[test]
    fn delayed_aura_waits_then_decays() {
        let mut ledger = AuraLedger::new();
        ledger
            .add_delayed(AuraTarget::All, 1.0, 2, AuraKind::Spd, TeamTarget::All, 3)
            .unwrap();

        for tick in 1..=2 {
            ledger.tick();
            assert_eq!(ledger.aggregate(AuraKind::Spd), 0.0, "tick {}", tick);
            assert_eq!(ledger.auras()[0].duration().value(), 2);
        }

        let report = ledger.tick();
        assert_eq!(report.activated, 1);
        assert_eq!(ledger.aggregate(AuraKind::Spd), 1.0);
        assert_eq!(ledger.auras()[0].duration().value(), 2);

        ledger.tick();
        assert_eq!(ledger.auras()[0].duration().value(), 1);
        ledger.tick();
        assert!(ledger.is_empty());
    }

    #[test]
    fn instant_aura_is_removed_on_next_tick() {
        let mut ledger = AuraLedger::new();
        add(&mut ledger, 5000.0, 0, AuraKind::Money);
        assert_eq!(ledger.aggregate(AuraKind::Money), 5000.0);
        let report = ledger.tick();
        assert_eq!(report.expired.len(), 1);
        assert!(ledger.is_empty());
    }

    #[test]
    fn delayed_instant_aura_is_removed_when_delay_ends() {
        let mut ledger = AuraLedger::new();
        ledger
            .add_delayed(AuraTarget::All, 5000.0, 0, AuraKind::Money, TeamTarget::All, 2)
            .unwrap();
        assert!(ledger.tick().is_quiet());
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.aggregate(AuraKind::Money), 0.0);

        let report = ledger.tick();
        assert_eq!(report.activated, 0);
        assert_eq!(report.expired.len(), 1);
        assert_eq!(report.expired[0].strength(), 5000.0);
        assert!(ledger.is_empty());
        assert_eq!(ledger.aggregate(AuraKind::Money), 0.0);
    }

    #[test]
    fn stacked_auras_expire_independently() {
        let mut ledger = AuraLedger::new();
        add(&mut ledger, 1.0, 1, AuraKind::Atk);
        add(&mut ledger, 1.0, 3, AuraKind::Atk);
        assert_eq!(ledger.aggregate(AuraKind::Atk), 2.0);
        ledger.tick();
        assert_eq!(ledger.aggregate(AuraKind::Atk), 1.0);
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn luck_zero_overrides_sum() {
        let mut ledger = AuraLedger::new();
        add(&mut ledger, 0.0, 10, AuraKind::Luck);
        add(&mut ledger, 5.0, -1, AuraKind::Luck);
        assert_eq!(ledger.aggregate(AuraKind::Luck), LUCK_OVERRIDE_FLOOR);
    }

    #[test]
    fn luck_without_zero_is_plain_sum() {
        let mut ledger = AuraLedger::new();
        add(&mut ledger, -1.0, 10, AuraKind::Luck);
        add(&mut ledger, 5.0, -1, AuraKind::Luck);
        assert_eq!(ledger.aggregate(AuraKind::Luck), 4.0);
    }

    #[test]
    fn pending_zero_luck_does_not_override() {
        let mut ledger = AuraLedger::new();
        ledger
            .add_delayed(AuraTarget::All, 0.0, 15, AuraKind::Luck, TeamTarget::All, 2)
            .unwrap();
        add(&mut ledger, 5.0, -1, AuraKind::Luck);
        assert_eq!(ledger.aggregate(AuraKind::Luck), 5.0);
    }

    #[test]
    fn zero_strength_is_not_special_for_other_kinds() {
        let mut ledger = AuraLedger::new();
        add(&mut ledger, 0.0, 10, AuraKind::Income);
        add(&mut ledger, 0.7, -1, AuraKind::Income);
        assert!((ledger.aggregate(AuraKind::Income) - 0.7).abs() < f64::EPSILON);
    }

    #[test]
    fn aggregate_of_missing_kind_is_zero() {
        let ledger = AuraLedger::new();
        assert_eq!(ledger.aggregate(AuraKind::Xp), 0.0);
        assert!(ledger.find_by_kind(AuraKind::Xp).is_empty());
    }

    #[test]
    fn find_by_entity_respects_team() {
        let mut ledger = AuraLedger::new();
        ledger
            .add(AuraTarget::from_raw(&[7]).unwrap(), 1.0, 8, AuraKind::Atk, TeamTarget::Player)
            .unwrap();

        let player = ledger.find_by_entity(EntityId::new(7), true, Some(AuraKind::Atk));
        assert_eq!(player.len(), 1);
        assert_eq!(player[0].strength(), 1.0);
        assert!(ledger
            .find_by_entity(EntityId::new(7), false, Some(AuraKind::Atk))
            .is_empty());
    }

    #[test]
    fn find_by_entity_always_returns_all_team_auras() {
        let mut ledger = AuraLedger::new();
        add(&mut ledger, 1.0, 8, AuraKind::Def);
        ledger
            .add(AuraTarget::All, -1.0, 8, AuraKind::Def, TeamTarget::Enemy)
            .unwrap();

        assert_eq!(ledger.find_by_entity(EntityId::new(3), true, None).len(), 1);
        assert_eq!(ledger.find_by_entity(EntityId::new(3), false, None).len(), 2);
    }

    #[test]
    fn find_by_kind_preserves_insertion_order() {
        let mut ledger = AuraLedger::new();
        add(&mut ledger, 1.0, 5, AuraKind::Atk);
        add(&mut ledger, 2.0, 5, AuraKind::Def);
        add(&mut ledger, 3.0, 5, AuraKind::Atk);
        let strengths: Vec<f64> = ledger
            .find_by_kind(AuraKind::Atk)
            .into_iter()
            .map(Aura::strength)
            .collect();
        assert_eq!(strengths, vec![1.0, 3.0]);
    }

    #[test]
    fn apply_to_entity_adds_per_stat_sums() {
        let mut ledger = AuraLedger::new();
        ledger
            .add(AuraTarget::All, 1.0, 13, AuraKind::Atk, TeamTarget::Player)
            .unwrap();
        ledger
            .add(AuraTarget::All, 1.0, 13, AuraKind::Atk, TeamTarget::All)
            .unwrap();
        ledger
            .add(AuraTarget::All, -1.0, 12, AuraKind::Spd, TeamTarget::Enemy)
            .unwrap();
        ledger
            .add_delayed(AuraTarget::All, 4.0, 5, AuraKind::Def, TeamTarget::All, 2)
            .unwrap();
        add(&mut ledger, 0.0, 15, AuraKind::Luck);

        let mut stages = StatStages::new();
        stages.set(BattleStat::Atk, 1.0);
        ledger.apply_to_entity(EntityId::new(1), true, &mut stages);
        assert_eq!(stages.get(BattleStat::Atk), 3.0);
        assert_eq!(stages.get(BattleStat::Spd), 0.0);
        assert_eq!(stages.get(BattleStat::Def), 0.0);

        let mut enemy = StatStages::new();
        ledger.apply_to_entity(EntityId::new(1), false, &mut enemy);
        assert_eq!(enemy.get(BattleStat::Atk), 1.0);
        assert_eq!(enemy.get(BattleStat::Spd), -1.0);
    }

    #[test]
    fn add_rejects_malformed_arguments_without_mutating() {
        let mut ledger = AuraLedger::new();
        assert!(ledger
            .add(AuraTarget::All, 1.0, -2, AuraKind::Atk, TeamTarget::All)
            .is_err());
        assert!(ledger
            .add_delayed(AuraTarget::All, 1.0, 3, AuraKind::Atk, TeamTarget::All, -1)
            .is_err());
        assert!(ledger
            .add(AuraTarget::All, f64::NAN, 3, AuraKind::Atk, TeamTarget::All)
            .is_err());
        assert!(ledger.is_empty());
    }

    #[test]
    fn serialized_ledger_reconstructs_identical_aggregates() {
        let mut ledger = AuraLedger::new();
        add(&mut ledger, 0.0, 15, AuraKind::Luck);
        add(&mut ledger, 0.2, 40, AuraKind::Pp);
        ledger
            .add_delayed(AuraTarget::All, 5.0, -1, AuraKind::Luck, TeamTarget::All, 15)
            .unwrap();
        ledger
            .add_delayed(AuraTarget::All, 0.7, -1, AuraKind::Income, TeamTarget::All, 5)
            .unwrap();
        for _ in 0..3 {
            ledger.tick();
        }

        let json = serde_json::to_string(&ledger).unwrap();
        let mut restored: AuraLedger = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, ledger);

        for _ in 0..20 {
            for kind in AuraKind::all() {
                assert_eq!(restored.aggregate(kind), ledger.aggregate(kind));
            }
            ledger.tick();
            restored.tick();
        }
    }

    #[test]
    fn from_iterator_preserves_order() {
        let auras = vec![
            Aura::new(AuraTarget::All, 1.0, AuraDuration::PERMANENT, AuraKind::Xp, TeamTarget::All),
            Aura::new(AuraTarget::All, 2.0, AuraDuration::INSTANT, AuraKind::Money, TeamTarget::All),
        ];
        let ledger: AuraLedger = auras.clone().into_iter().collect();
        assert_eq!(ledger.into_auras(), auras);
    }
}
