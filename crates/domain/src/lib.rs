//! Mystery encounter domain: timed auras, encounter reward rules and spawn
//! rolling.
//!
//! The crate is pure: no I/O, no logging, no owned randomness. Hosts drive it
//! by injecting a [`game_systems::SeededRng`] and ticking an
//! [`aggregates::EncounterSession`] once per wave.

pub mod aggregates;
pub mod entities;
pub mod error;
pub mod game_systems;
pub mod ids;
pub mod value_objects;

pub use aggregates::{AuraLedger, EncounterSession, SpawnRoll, TickReport};
pub use entities::{Aura, AuraState};
pub use error::DomainError;
pub use game_systems::{ChoiceOfBalance, RewardOption, SeededRng};
pub use ids::{EntityId, SessionId};
pub use value_objects::{
    ActivationDelay, AuraDuration, AuraKind, AuraTarget, BattleStat, EncounterSettings,
    MysteryEncounterTier, MysteryEncounterType, StatStages, TeamTarget,
};
