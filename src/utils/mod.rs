//! # Utilities Module
//!
//! Random number generation shared by the generator and the dice engine.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Creates a random number generator, seeded when a seed is given and from
/// system entropy otherwise.
pub fn create_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
