//! Bounded row sampling.

use rand::rngs::StdRng;
use rand::seq::index;
use rand::SeedableRng;

use crate::types::DataSet;

/// Returns `min(n, row_count)` rows chosen uniformly without replacement.
///
/// With a seed the choice is reproducible; without one it uses the thread-local RNG.
/// Sampled rows keep their source order. `n` larger than the table is clamped.
pub fn sample(dataset: &DataSet, n: usize, seed: Option<u64>) -> DataSet {
    let total = dataset.row_count();
    if n >= total {
        return dataset.clone();
    }

    let mut picked = match seed {
        Some(seed) => index::sample(&mut StdRng::seed_from_u64(seed), total, n).into_vec(),
        None => index::sample(&mut rand::thread_rng(), total, n).into_vec(),
    };
    picked.sort_unstable();
    dataset.take_rows(&picked)
}
