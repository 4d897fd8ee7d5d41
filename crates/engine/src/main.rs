//! me-spawn-stats - print encounter spawn statistics for the configured settings.
//!
//! Usage: `me-spawn-stats [RUNS] [SEED]`

use anyhow::Context;
use mystery_encounters_domain::EncounterSettings;
use mystery_encounters_engine::{logging, settings, simulation};

fn main() -> anyhow::Result<()> {
    // Load environment from repo root (cargo runs the binary from `crates/engine`).
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");
    settings::load_dotenv(&repo_root);

    logging::init_tracing(logging::DEFAULT_FILTER);

    let mut args = std::env::args().skip(1);
    let runs = match args.next() {
        Some(raw) => raw
            .parse::<usize>()
            .with_context(|| format!("RUNS must be a positive integer, got {:?}", raw))?,
        None => simulation::DEFAULT_RUNS,
    };
    let seed = match args.next() {
        Some(raw) => raw
            .parse::<u64>()
            .with_context(|| format!("SEED must be an unsigned integer, got {:?}", raw))?,
        None => 0,
    };

    let settings = settings::load_settings_from_env(EncounterSettings::default());
    tracing::info!(runs, seed, ?settings, "Simulating mystery encounter spawns");

    let stats = simulation::simulate_spawn_stats(&settings, runs, seed)
        .context("Spawn simulation failed")?;
    print!("{}", stats);
    Ok(())
}
