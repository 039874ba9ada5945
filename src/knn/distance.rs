//! Distance between feature vectors.

use num_traits::AsPrimitive;

/// Calculates the Euclidean distance between two feature vectors:
/// `sqrt(sum((a[i] - b[i])^2))`.
///
/// Both vectors must have the same length. The classifier guarantees this by
/// resetting whenever the grid dimension changes; a mismatch is a bug in the
/// caller and trips a debug assertion.
pub fn euclidean_distance<F>(a: &[F], b: &[F]) -> f64
where
    F: AsPrimitive<f64>,
{
    debug_assert_eq!(a.len(), b.len(), "Input vectors for Euclidean distance must have the same length.");
    let sum_sq_diff: f64 = a
        .iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let diff = x.as_() - y.as_();
            diff * diff
        })
        .sum();
    sum_sq_diff.sqrt()
}
