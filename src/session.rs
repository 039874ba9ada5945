//! Session state for one person drawing, training and asking for guesses.
//!
//! A [`SketchSession`] owns everything a drawing front end needs: the grid,
//! the pointer's dragging flag, the classifier and the last guess awaiting
//! feedback. Front ends hold it by value and pass `&mut` to their handlers.

use crate::common_types::FeatureVector;
use crate::config::SketchConfig;
use crate::error::{Result, SketchError};
use crate::grid::{Grid, GridSize};
use crate::knn::KnnClassifier;

/// A prediction waiting for the user to say whether it was right.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingGuess {
    pub features: FeatureVector<u8>,
    pub label: String,
}

#[derive(Debug, Clone)]
pub struct SketchSession {
    grid: Grid,
    classifier: KnnClassifier<u8, String>,
    dragging: bool,
    pending: Option<PendingGuess>,
}

impl SketchSession {
    pub fn new(config: &SketchConfig) -> Result<Self> {
        Ok(Self {
            grid: Grid::new(config.grid_size),
            classifier: KnnClassifier::new(config.k)?,
            dragging: false,
            pending: None,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn classifier(&self) -> &KnnClassifier<u8, String> {
        &self.classifier
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn pending_guess(&self) -> Option<&PendingGuess> {
        self.pending.as_ref()
    }

    /// Pointer pressed at canvas position `(x, y)`: start dragging and paint.
    pub fn press(&mut self, x: f64, y: f64) -> bool {
        self.dragging = true;
        self.paint_at(x, y)
    }

    /// Pointer moved. Paints only while the pointer is held down.
    pub fn drag(&mut self, x: f64, y: f64) -> bool {
        self.dragging && self.paint_at(x, y)
    }

    /// Pointer released or left the canvas.
    pub fn release(&mut self) {
        self.dragging = false;
    }

    fn paint_at(&mut self, x: f64, y: f64) -> bool {
        match self.grid.cell_at(x, y) {
            Some((row, col)) => self.grid.paint(row, col),
            None => false,
        }
    }

    pub fn paint_cell(&mut self, row: usize, col: usize) -> bool {
        self.grid.paint(row, col)
    }

    pub fn clear_grid(&mut self) {
        self.grid.clear();
        self.pending = None;
    }

    /// Switches to another grid size.
    ///
    /// Examples drawn at the old size cannot be compared with new drawings, so
    /// the classifier is reset. Selecting the current size does nothing.
    /// Returns `true` if the size changed.
    pub fn resize(&mut self, size: GridSize) -> bool {
        if size == self.grid.size() {
            return false;
        }
        let dropped = self.classifier.len();
        self.grid = Grid::new(size);
        self.classifier.reset_dimension(size.dimension());
        self.pending = None;
        tracing::info!(%size, dropped, "grid resized, training examples cleared");
        true
    }

    /// Stores the current drawing under `label` and starts a fresh grid.
    /// Returns the number of stored examples.
    pub fn train(&mut self, label: impl Into<String>) -> usize {
        let label = label.into();
        let features = self.grid.to_features();
        tracing::debug!(%label, painted = self.grid.painted_cells(), "training example added");
        self.classifier.add_example(features, label);
        self.grid.clear();
        self.pending = None;
        self.classifier.len()
    }

    /// Guesses the label of the current drawing.
    ///
    /// Returns `None` until the classifier holds more than `k` examples.
    pub fn guess(&mut self) -> Option<String> {
        if !self.classifier.is_ready() {
            tracing::debug!(
                examples = self.classifier.len(),
                k = self.classifier.k(),
                "not enough examples to guess"
            );
            return None;
        }
        let features = self.grid.to_features();
        let label = self.classifier.classify(&features)?;
        tracing::debug!(%label, "guessed");
        self.pending = Some(PendingGuess {
            features,
            label: label.clone(),
        });
        Some(label)
    }

    /// The last guess was right; nothing is learned.
    pub fn confirm(&mut self) -> Result<String> {
        let pending = self.pending.take().ok_or(SketchError::NoPendingGuess)?;
        Ok(pending.label)
    }

    /// The last guess was wrong and the drawing is really a `label`.
    ///
    /// Only labels already used for training are accepted. An unknown label is
    /// rejected, the training set is left as it is and the guess stays pending
    /// so the user can try again. Returns the number of stored examples.
    pub fn correct(&mut self, label: &str) -> Result<usize> {
        if self.pending.is_none() {
            return Err(SketchError::NoPendingGuess);
        }
        if !self.classifier.knows_label(label) {
            tracing::warn!(%label, "rejected correction with unknown label");
            return Err(SketchError::UnknownLabel(label.to_string()));
        }
        if let Some(pending) = self.pending.take() {
            tracing::debug!(guessed = %pending.label, corrected = %label, "correction added");
            self.classifier.add_example(pending.features, label.to_string());
        }
        Ok(self.classifier.len())
    }

    pub fn render(&self) -> String {
        self.grid.render()
    }
}
