//! Descriptive statistics and bottom-up aggregation over sequence trees.

use tracing::instrument;

use crate::arena::SequenceArena;
use crate::errors::TreeResult;

/// Arithmetic mean of a slice; 0 for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (n-1 denominator); 0 for fewer than 2 values.
pub fn sample_std(values: &[f64], mean: f64) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let variance =
        values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    variance.sqrt()
}

/// std/mean, defined as 0 when the mean is 0.
pub fn coefficient_of_variation(std: f64, mean: f64) -> f64 {
    if mean != 0.0 {
        std / mean
    } else {
        0.0
    }
}

/// Rolls statistics up from the leaves to the root.
///
/// Walks the tree post-order so every child's mean is finalized before its
/// parent aggregates. Leaf means must have been assigned beforehand (see
/// [`crate::builder::assign_leaf_means`]); a leaf without a mean fails with
/// [`crate::errors::TreeError::MissingLeafMean`].
///
/// Idempotent: re-running with unchanged leaf means yields identical
/// statistics, and re-running after leaf means change recomputes every
/// ancestor from the current values.
#[instrument(level = "debug", skip(tree))]
pub fn aggregate(tree: &mut SequenceArena) -> TreeResult<()> {
    let order: Vec<_> = tree.iter_postorder().map(|(idx, _)| idx).collect();
    for idx in order {
        tree.calculate_statistics(idx)?;
    }
    Ok(())
}
