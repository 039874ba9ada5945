//! Data structures shared by the feature extractor, the classifier and the session.

/// A flattened drawing: one value per grid cell, row-major.
pub type FeatureVector<F = u8> = Vec<F>;

/// A training example, with the flattened drawing and the label the user gave it.
///
/// - `F`: The type of the features (`u8` for drawn grids, `f64` from Python).
/// - `L`: The type of the label (usually `String`).
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledExample<F, L> {
    pub features: FeatureVector<F>,
    pub label: L,
}

impl<F, L> LabeledExample<F, L> {
    pub fn new(features: FeatureVector<F>, label: L) -> Self {
        LabeledExample { features, label }
    }
}

/// One member of a neighbor set, borrowed from the classifier.
#[derive(Debug, PartialEq)]
pub struct Neighbor<'a, L> {
    pub distance: f64,
    pub label: &'a L,
}
