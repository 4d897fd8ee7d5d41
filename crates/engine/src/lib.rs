//! Mystery encounter engine library.
//!
//! Hosts the domain crate: seeds randomness, drives waves, loads settings
//! and persists sessions.
//!
//! ## Structure
//!
//! - `wave_driver` - Per-wave orchestration of ticks, spawns and tiers
//! - `simulation` - Spawn-rate statistics over many seeded runs
//! - `rng` - `StdRng`-backed implementation of the domain's `SeededRng`
//! - `settings` - `.env` loading and environment overrides
//! - `snapshot` - JSON save/restore of a session
//! - `logging` - Tracing subscriber setup

pub mod error;
pub mod logging;
pub mod rng;
pub mod settings;
pub mod simulation;
pub mod snapshot;
pub mod wave_driver;

pub use error::EngineError;
pub use rng::SeededRandom;
pub use simulation::{simulate_spawn_stats, SpawnStats};
pub use snapshot::SessionSnapshot;
pub use wave_driver::{WaveDriver, WaveEncounter, WaveOutcome};
