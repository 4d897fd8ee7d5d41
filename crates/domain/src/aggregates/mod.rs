//! Aggregate roots - domain objects that own their related data
//!
//! Each aggregate:
//! - Owns all its constituent parts (enforced by Rust ownership)
//! - Exposes behavior through methods, not public fields
//! - Returns outcome values from mutations instead of emitting side effects
//!
//! | Aggregate | Owns |
//! |-----------|------|
//! | [`AuraLedger`] | Every live aura of a run |
//! | [`EncounterSession`] | The ledger, encounter history, spawn weight and queue |

pub mod aura_ledger;
pub mod encounter_session;

pub use aura_ledger::{AuraLedger, TickReport, LUCK_OVERRIDE_FLOOR};
pub use encounter_session::{
    EncounterSession, EncounteredEvent, QueuedEncounter, SkipReason, SpawnRoll,
};
