//! Seams between encounter rules and the host engine.

/// Deterministic integer source supplied by the host.
///
/// The domain never seeds or owns randomness; the host injects a generator
/// (usually seeded per wave) so that encounter outcomes are reproducible.
///
/// Closures work directly, which keeps tests short:
///
/// ```
/// use mystery_encounters_domain::game_systems::SeededRng;
///
/// let mut always_zero = |_range: u32| 0u32;
/// assert_eq!(always_zero.rand_seed_int(10), 0);
/// ```
pub trait SeededRng {
    /// Uniform integer in `0..range`. Implementations return `0` for `range == 0`.
    fn rand_seed_int(&mut self, range: u32) -> u32;
}

impl<F> SeededRng for F
where
    F: FnMut(u32) -> u32,
{
    fn rand_seed_int(&mut self, range: u32) -> u32 {
        if range == 0 {
            return 0;
        }
        self(range) % range
    }
}

/// Pick one element of `items` uniformly; `None` when empty.
pub fn pick<'a, T, R>(items: &'a [T], rng: &mut R) -> Option<&'a T>
where
    R: SeededRng + ?Sized,
{
    let len = u32::try_from(items.len()).ok()?;
    if len == 0 {
        return None;
    }
    items.get(rng.rand_seed_int(len) as usize)
}
