//! Seeded randomness for the engine.

use mystery_encounters_domain::SeededRng;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Reproducible generator backing every domain roll.
///
/// The same seed always yields the same encounter sequence.
#[derive(Debug, Clone)]
pub struct SeededRandom {
    seed: u64,
    rng: StdRng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Run `f` with a child generator seeded from `seed + offset`.
    ///
    /// The parent stream is left untouched, so work done under an offset
    /// never shifts the rolls that follow it.
    pub fn with_seed_offset<T, F>(&self, offset: u64, f: F) -> T
    where
        F: FnOnce(&mut SeededRandom) -> T,
    {
        let mut child = SeededRandom::new(self.seed.wrapping_add(offset));
        f(&mut child)
    }
}

impl SeededRng for SeededRandom {
    fn rand_seed_int(&mut self, range: u32) -> u32 {
        if range == 0 {
            return 0;
        }
        self.rng.gen_range(0..range)
    }
}
