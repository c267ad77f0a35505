//! Reviewer assignment
//!
//! Pure algorithms that pick reviewers from a team roster. Randomness is
//! passed in as an `rand::Rng` so callers control the source; the
//! application layer asks a [`RandomSource`] for a fresh generator on every
//! operation instead of sharing one across requests.

pub mod reassignment;
pub mod selection;

pub use reassignment::reassign_reviewer;
pub use selection::select_reviewers;

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Produces an independent random generator per operation
pub trait RandomSource: Send + Sync {
    fn rng(&self) -> StdRng;
}

/// Seeds every generator from operating-system entropy
#[derive(Debug, Clone, Copy, Default)]
pub struct EntropySource;

impl RandomSource for EntropySource {
    fn rng(&self) -> StdRng {
        StdRng::from_entropy()
    }
}

/// Hands out generators seeded with a fixed value
///
/// Every call returns the same sequence, which makes the surrounding logic
/// reproducible in tests.
#[derive(Debug, Clone, Copy)]
pub struct SeededSource {
    seed: u64,
}

impl SeededSource {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl RandomSource for SeededSource {
    fn rng(&self) -> StdRng {
        StdRng::seed_from_u64(self.seed)
    }
}
