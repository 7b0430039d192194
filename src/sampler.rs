//! Reproducible random row sampling.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::index;
use tracing::info;

use crate::table::Table;

/// Draws `min(n, table.len())` distinct rows uniformly at random.
///
/// The same `seed` always selects the same rows from the same table.
pub fn sample_rows(table: &Table, n: usize, seed: u64) -> Table {
    let amount = n.min(table.len());
    let mut rng = StdRng::seed_from_u64(seed);
    let picked = index::sample(&mut rng, table.len(), amount).into_vec();

    info!(requested = n, available = table.len(), sampled = amount, seed, "Rows sampled");
    table.select_rows(&picked)
}
