//! Brute-force K-Nearest-Neighbors classifier over labeled feature vectors.

pub mod distance;

pub use distance::euclidean_distance;

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

use num_traits::AsPrimitive;
use ordered_float::OrderedFloat;

use crate::common_types::{FeatureVector, LabeledExample, Neighbor};
use crate::error::{Result, SketchError};

/// The K-Nearest-Neighbors Classifier.
///
/// Examples are only ever appended. They are dropped all at once when the
/// feature dimension changes, since vectors of different length cannot be
/// compared.
#[derive(Debug, Clone)]
pub struct KnnClassifier<F, L> {
    k: usize,
    training_data: Vec<LabeledExample<F, L>>,
    labels: Vec<L>, // distinct, first-seen order
    dimension: Option<usize>,
}

impl<F, L> KnnClassifier<F, L> {
    pub const DEFAULT_K: usize = 5;

    /// Creates an empty classifier that votes among `k` neighbors.
    pub fn new(k: usize) -> Result<Self> {
        if k == 0 {
            return Err(SketchError::InvalidK);
        }
        Ok(Self {
            k,
            training_data: Vec::new(),
            labels: Vec::new(),
            dimension: None,
        })
    }

    pub fn k(&self) -> usize {
        self.k
    }

    /// Number of stored examples.
    pub fn len(&self) -> usize {
        self.training_data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.training_data.is_empty()
    }

    /// Feature dimension of the stored examples, `None` while empty.
    pub fn dimension(&self) -> Option<usize> {
        self.dimension
    }

    /// Known labels in the order they were first seen.
    pub fn labels(&self) -> &[L] {
        &self.labels
    }

    pub fn examples(&self) -> &[LabeledExample<F, L>] {
        &self.training_data
    }

    /// Whether the store holds strictly more examples than `k`.
    ///
    /// Front ends check this before offering a guess. `classify` still works
    /// below the threshold, it just votes among every stored example.
    pub fn is_ready(&self) -> bool {
        self.training_data.len() > self.k
    }

    /// Whether `label` has been used for training since the last reset.
    pub fn knows_label<Q>(&self, label: &Q) -> bool
    where
        L: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        self.labels.iter().any(|known| known.borrow() == label)
    }

    /// Drops every example and label. `k` is kept.
    pub fn clear(&mut self) {
        self.training_data.clear();
        self.labels.clear();
        self.dimension = None;
    }

    /// Prepares the store for vectors of `dimension` features.
    ///
    /// If stored examples have a different dimension, all examples and labels
    /// are cleared; nothing is rescaled. Returns `true` if a reset happened.
    pub fn reset_dimension(&mut self, dimension: usize) -> bool {
        match self.dimension {
            Some(current) if current != dimension => {
                tracing::debug!(
                    from = current,
                    to = dimension,
                    dropped = self.training_data.len(),
                    "feature dimension changed, clearing classifier"
                );
                self.clear();
                true
            }
            _ => false,
        }
    }
}

impl<F, L> KnnClassifier<F, L>
where
    F: AsPrimitive<f64>,
    L: Clone + Eq + Hash,
{
    /// Stores a labeled example. Duplicates are kept.
    pub fn add_example(&mut self, features: FeatureVector<F>, label: L) {
        debug_assert!(
            self.dimension.is_none_or(|d| d == features.len()),
            "All examples must have the same dimension. Expected {:?}, got {}. Call reset_dimension() first.",
            self.dimension,
            features.len()
        );
        self.dimension.get_or_insert(features.len());

        if !self.labels.contains(&label) {
            self.labels.push(label.clone());
        }
        self.training_data.push(LabeledExample::new(features, label));
    }

    /// Euclidean distance between two vectors of the same dimension.
    pub fn distance(a: &[F], b: &[F]) -> f64 {
        euclidean_distance(a, b)
    }

    /// Returns the `min(k, len())` stored examples closest to `query`, nearest first.
    ///
    /// Examples at exactly the same distance keep their insertion order.
    pub fn nearest_neighbors(&self, query: &[F]) -> Vec<Neighbor<'_, L>> {
        let mut distances_to_train: Vec<Neighbor<'_, L>> = self
            .training_data
            .iter()
            .map(|example| Neighbor {
                distance: Self::distance(query, &example.features),
                label: &example.label,
            })
            .collect();

        // sort_by_key is stable, which is what makes equal distances deterministic.
        distances_to_train.sort_by_key(|neighbor| OrderedFloat(neighbor.distance));
        distances_to_train.truncate(self.k);
        distances_to_train
    }

    /// Predicts the label of `query` by majority vote among its nearest neighbors.
    ///
    /// Returns `None` only if no examples are stored. With fewer than `k`
    /// examples every stored example takes part in the vote.
    pub fn classify(&self, query: &[F]) -> Option<L> {
        let neighbors = self.nearest_neighbors(query);
        let predicted = majority_vote(&neighbors).cloned();
        tracing::trace!(neighbors = neighbors.len(), "classified query");
        predicted
    }
}

/// Counts labels over `neighbors` (nearest first) and returns the winner.
///
/// The leader only changes when another label gets a strictly higher count,
/// so on a tie the label that reached the count first wins.
fn majority_vote<'a, L>(neighbors: &[Neighbor<'a, L>]) -> Option<&'a L>
where
    L: Eq + Hash,
{
    let mut label_counts: HashMap<&'a L, usize> = HashMap::new();
    let mut leader: Option<(&'a L, usize)> = None;

    for neighbor in neighbors {
        let count = label_counts.entry(neighbor.label).or_insert(0);
        *count += 1;
        match leader {
            Some((_, best)) if *count <= best => {}
            _ => leader = Some((neighbor.label, *count)),
        }
    }

    leader.map(|(label, _)| label)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier(k: usize) -> KnnClassifier<u8, String> {
        KnnClassifier::new(k).expect("k is positive")
    }

    #[test]
    fn test_new_rejects_zero_k() {
        let result = KnnClassifier::<u8, String>::new(0);
        assert!(matches!(result, Err(SketchError::InvalidK)));
    }

    #[test]
    fn test_add_example_tracks_labels_and_keeps_duplicates() {
        let mut knn = classifier(1);
        knn.add_example(vec![1, 0], "A".to_string());
        knn.add_example(vec![1, 0], "A".to_string());
        knn.add_example(vec![1, 0], "B".to_string());

        assert_eq!(knn.len(), 3, "Duplicate vectors must be retained");
        assert_eq!(knn.labels(), &["A".to_string(), "B".to_string()]);
        assert_eq!(knn.dimension(), Some(2));
        assert!(knn.knows_label("A"));
        assert!(!knn.knows_label("C"));
    }

    #[test]
    fn test_classify_simple_case() {
        let mut knn: KnnClassifier<f64, &str> = KnnClassifier::new(3).unwrap();
        knn.add_example(vec![1.0, 1.0], "A");
        knn.add_example(vec![1.0, 2.0], "A");
        knn.add_example(vec![2.0, 1.0], "A");
        knn.add_example(vec![5.0, 5.0], "B");
        knn.add_example(vec![5.0, 6.0], "B");
        knn.add_example(vec![6.0, 5.0], "B");

        assert_eq!(knn.classify(&[1.5, 1.5]), Some("A"));
        assert_eq!(knn.classify(&[5.5, 5.5]), Some("B"));
    }

    #[test]
    fn test_classify_empty_store_returns_none() {
        let knn = classifier(3);
        assert_eq!(knn.classify(&[0, 1]), None);
    }

    #[test]
    fn test_equal_distance_keeps_insertion_order() {
        // Both examples are at distance 1 from the query; the vote ties 1-1.
        let mut knn = classifier(2);
        knn.add_example(vec![1, 0, 0], "A".to_string());
        knn.add_example(vec![0, 1, 0], "B".to_string());

        let query = [0u8, 0, 0];
        let neighbors = knn.nearest_neighbors(&query);
        assert_eq!(neighbors.len(), 2);
        assert_eq!(neighbors[0].label, "A");
        assert_eq!(neighbors[1].label, "B");
        assert_eq!(neighbors[0].distance, neighbors[1].distance);
        assert_eq!(knn.classify(&query), Some("A".to_string()));

        // Reversed insertion order flips the winner.
        let mut reversed = classifier(2);
        reversed.add_example(vec![0, 1, 0], "B".to_string());
        reversed.add_example(vec![1, 0, 0], "A".to_string());
        assert_eq!(reversed.classify(&query), Some("B".to_string()));
    }

    #[test]
    fn test_vote_tie_keeps_first_leader() {
        // Neighbors in ascending distance: A (1), B (2), A (3), B (4).
        let mut knn: KnnClassifier<f64, &str> = KnnClassifier::new(4).unwrap();
        knn.add_example(vec![4.0], "B");
        knn.add_example(vec![2.0], "B");
        knn.add_example(vec![3.0], "A");
        knn.add_example(vec![1.0], "A");

        let neighbors = knn.nearest_neighbors(&[0.0]);
        let order: Vec<&str> = neighbors.iter().map(|n| *n.label).collect();
        assert_eq!(order, vec!["A", "B", "A", "B"]);
        assert_eq!(knn.classify(&[0.0]), Some("A"));
    }

    #[test]
    fn test_majority_beats_nearest() {
        let mut knn: KnnClassifier<f64, &str> = KnnClassifier::new(3).unwrap();
        knn.add_example(vec![0.1], "near");
        knn.add_example(vec![1.0], "far");
        knn.add_example(vec![1.1], "far");
        knn.add_example(vec![9.0], "near");
        assert_eq!(knn.classify(&[0.0]), Some("far"));
    }

    #[test]
    fn test_majority_vote_strictly_higher_count_takes_lead() {
        let (a, b) = ("A", "B");
        let neighbors = [
            Neighbor { distance: 0.0, label: &a },
            Neighbor { distance: 1.0, label: &b },
            Neighbor { distance: 2.0, label: &b },
        ];
        assert_eq!(majority_vote(&neighbors), Some(&"B"));
        assert_eq!(majority_vote::<&str>(&[]), None);
    }

    #[test]
    fn test_neighbor_set_is_limited_to_k() {
        let mut knn = classifier(2);
        for i in 0..6u8 {
            knn.add_example(vec![i, 0], format!("L{}", i));
        }
        let neighbors = knn.nearest_neighbors(&[0, 0]);
        assert_eq!(neighbors.len(), 2);
        let labels: Vec<&String> = neighbors.iter().map(|n| n.label).collect();
        assert_eq!(labels, vec!["L0", "L1"]);
        assert_eq!(knn.classify(&[0, 0]), Some("L0".to_string()));
    }

    #[test]
    fn test_fewer_examples_than_k_uses_all() {
        let mut knn = classifier(5);
        knn.add_example(vec![1, 1], "X".to_string());
        knn.add_example(vec![0, 0], "Y".to_string());
        knn.add_example(vec![0, 1], "Y".to_string());

        assert!(!knn.is_ready());
        assert_eq!(knn.nearest_neighbors(&[1, 1]).len(), 3);
        assert_eq!(knn.classify(&[1, 1]), Some("Y".to_string()));
    }

    #[test]
    fn test_is_ready_requires_more_than_k() {
        let mut knn = classifier(2);
        knn.add_example(vec![0], "A".to_string());
        knn.add_example(vec![1], "B".to_string());
        assert!(!knn.is_ready(), "Exactly k examples is not enough");
        knn.add_example(vec![1], "B".to_string());
        assert!(knn.is_ready());
    }

    #[test]
    fn test_classify_is_deterministic() {
        let mut knn = classifier(3);
        knn.add_example(vec![1, 0, 1, 0], "A".to_string());
        knn.add_example(vec![0, 1, 0, 1], "B".to_string());
        knn.add_example(vec![1, 1, 0, 0], "A".to_string());
        knn.add_example(vec![0, 0, 1, 1], "B".to_string());

        let query = [1, 0, 0, 1];
        let first = knn.classify(&query);
        let second = knn.classify(&query);
        assert_eq!(first, second);
    }

    #[test]
    fn test_reset_dimension_clears_on_change_only() {
        let mut knn = classifier(3);
        knn.add_example(vec![1, 0, 0, 1], "A".to_string());
        knn.add_example(vec![0, 1, 1, 0], "B".to_string());

        assert!(!knn.reset_dimension(4), "Same dimension keeps examples");
        assert_eq!(knn.len(), 2);

        assert!(knn.reset_dimension(9));
        assert!(knn.is_empty());
        assert!(knn.labels().is_empty());
        assert_eq!(knn.dimension(), None);
        assert_eq!(knn.k(), 3, "k survives a reset");

        knn.add_example(vec![0; 9], "C".to_string());
        assert_eq!(knn.classify(&[1; 9]), Some("C".to_string()));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "same dimension")]
    fn test_add_example_with_mismatched_dimension_panics_in_debug() {
        let mut knn = classifier(1);
        knn.add_example(vec![1, 0], "A".to_string());
        knn.add_example(vec![1, 0, 1], "A".to_string());
    }
}
