// Seeded random source for reproducible season runs.
//
// Nothing in the simulator reaches for a thread-local RNG; every draw goes
// through an `Rng` handed in by the caller, and the binary builds that RNG
// from a single logged seed.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// The RNG the season runner uses. ChaCha8 streams are stable across
/// platforms and `rand` releases, so a seed fully identifies a run.
pub type SimRng = ChaCha8Rng;

/// Build the run RNG from a seed.
pub fn seeded(seed: u64) -> SimRng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// The seed to run with: the configured one, else a fresh random seed.
pub fn resolve_seed(configured: Option<u64>) -> u64 {
    configured.unwrap_or_else(rand::random)
}
