//! Feature extraction: turning a drawn grid into a feature vector.

use crate::common_types::FeatureVector;

/// Flattens a rectangular grid into a single vector in row-major order:
/// all of row 0, then all of row 1, and so on.
///
/// For a grid with `C` columns, `flatten(grid)[r * C + c] == grid[r][c]`.
pub fn flatten<F, R>(grid: &[R]) -> FeatureVector<F>
where
    F: Copy,
    R: AsRef<[F]>,
{
    let capacity = grid.first().map_or(0, |row| row.as_ref().len() * grid.len());
    let mut flattened = Vec::with_capacity(capacity);
    for row in grid {
        flattened.extend_from_slice(row.as_ref());
    }
    flattened
}
