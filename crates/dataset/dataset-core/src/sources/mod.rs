//! Data sources, one module per group.

pub mod graph;
pub mod nab;
pub mod real;
pub mod toy;

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Seeded RNG, or one drawn from OS entropy.
pub(crate) fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    }
}
