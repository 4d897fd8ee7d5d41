//! Aura - one timed, targetable, team-scoped numeric modifier
//!
//! # Lifecycle
//!
//! ```text
//! PENDING (delay > 0) --tick--> ACTIVE (delay == 0) --tick--> EXPIRED (duration == 0, removed)
//! ```
//!
//! Auras are built by encounter producers and handed to an
//! [`AuraLedger`](crate::aggregates::AuraLedger); only the ledger's tick
//! mutates them afterwards. Permanent auras (`duration == -1`) never expire.

use serde::{Deserialize, Serialize};

use crate::value_objects::{ActivationDelay, AuraDuration, AuraKind, AuraTarget, TeamTarget};
use crate::EntityId;

/// Observable phase of an aura held by a ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuraState {
    /// Waiting out its activation delay; contributes nothing and does not decay
    Pending,
    /// Contributing to aggregation and decaying each tick
    Active,
    /// Duration reached zero; the next ledger cleanup removes it
    Expired,
}

/// What a single tick did to one aura.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AuraTickOutcome {
    /// Delay counted down, still pending
    Waiting,
    /// Delay reached zero this tick
    Activated,
    /// Active and still alive (or permanent)
    Decayed,
    /// Duration is zero; remove
    Expired,
}

/// A single timed effect.
///
/// Serializes field-for-field without an identity, so a saved list of auras
/// reconstructs an equivalent ledger.
///
/// # Example
///
/// ```
/// use mystery_encounters_domain::entities::{Aura, AuraState};
/// use mystery_encounters_domain::value_objects::{
///     ActivationDelay, AuraDuration, AuraKind, AuraTarget, TeamTarget,
/// };
///
/// let aura = Aura::new(
///     AuraTarget::All,
///     0.7,
///     AuraDuration::PERMANENT,
///     AuraKind::Income,
///     TeamTarget::All,
/// )
/// .with_activation_delay(ActivationDelay::new(5).unwrap());
///
/// assert_eq!(aura.state(), AuraState::Pending);
/// assert_eq!(aura.contribution(), 0.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Aura {
    target: AuraTarget,
    strength: f64,
    duration: AuraDuration,
    kind: AuraKind,
    team: TeamTarget,
    #[serde(default)]
    activation_delay: ActivationDelay,
}

impl Aura {
    // =========================================================================
    // Constructor
    // =========================================================================

    /// Create an aura that is active immediately.
    pub fn new(
        target: AuraTarget,
        strength: f64,
        duration: AuraDuration,
        kind: AuraKind,
        team: TeamTarget,
    ) -> Self {
        Self {
            target,
            strength,
            duration,
            kind,
            team,
            activation_delay: ActivationDelay::IMMEDIATE,
        }
    }

    pub fn with_activation_delay(mut self, delay: ActivationDelay) -> Self {
        self.activation_delay = delay;
        self
    }

    // =========================================================================
    // Read accessors
    // =========================================================================

    pub fn target(&self) -> &AuraTarget {
        &self.target
    }

    pub fn strength(&self) -> f64 {
        self.strength
    }

    pub fn duration(&self) -> AuraDuration {
        self.duration
    }

    pub fn kind(&self) -> AuraKind {
        self.kind
    }

    pub fn team(&self) -> TeamTarget {
        self.team
    }

    pub fn activation_delay(&self) -> ActivationDelay {
        self.activation_delay
    }

    pub fn state(&self) -> AuraState {
        if !self.activation_delay.is_ready() {
            AuraState::Pending
        } else if self.duration.is_expired() {
            AuraState::Expired
        } else {
            AuraState::Active
        }
    }

    /// Active means the delay has run out. An instant aura (duration 0) is
    /// active until the cleanup that removes it.
    pub fn is_active(&self) -> bool {
        self.activation_delay.is_ready()
    }

    /// Strength counted by aggregation: zero while pending.
    pub fn contribution(&self) -> f64 {
        if self.is_active() {
            self.strength
        } else {
            0.0
        }
    }

    /// Target and team filters both pass for this entity.
    pub fn applies_to(&self, entity: EntityId, is_player_side: bool) -> bool {
        self.target.includes(entity) && self.team.matches_side(is_player_side)
    }

    // =========================================================================
    // Ledger-only mutation
    // =========================================================================

    /// Advance one wave. The delay gates the duration: while pending, only the
    /// delay counts down. An instant aura expires on the tick its delay ends.
    pub(crate) fn tick(&mut self) -> AuraTickOutcome {
        if !self.activation_delay.is_ready() {
            self.activation_delay.decrement();
            return if !self.activation_delay.is_ready() {
                AuraTickOutcome::Waiting
            } else if self.duration.is_expired() {
                AuraTickOutcome::Expired
            } else {
                AuraTickOutcome::Activated
            };
        }

        self.duration.decrement();
        if self.duration.is_expired() {
            AuraTickOutcome::Expired
        } else {
            AuraTickOutcome::Decayed
        }
    }
}
