//! Domain entities - Core business objects

mod aura;

pub use aura::{Aura, AuraState};
pub(crate) use aura::AuraTickOutcome;
