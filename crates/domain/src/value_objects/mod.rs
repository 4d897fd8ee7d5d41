//! Value objects - Immutable objects defined by their attributes

mod aura_duration;
mod aura_kind;
mod aura_target;
mod battle_stat;
mod encounter_settings;
mod encounter_type;
mod team_target;

// Aura lifetime newtypes
pub use aura_duration::{ActivationDelay, AuraDuration};

pub use aura_kind::AuraKind;
pub use aura_target::AuraTarget;
pub use team_target::TeamTarget;

// Stat slots and the slot -> kind mapping
pub use battle_stat::{BattleStat, StatStages};

pub use encounter_settings::EncounterSettings;
pub use encounter_type::{MysteryEncounterTier, MysteryEncounterType};
