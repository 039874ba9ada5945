//! # knn_sketchpad
//!
//! Draw small bitmaps on a grid, label them, and let a K-Nearest-Neighbors
//! classifier guess the label of the next drawing.
//!
//! - [`features`]: grid to feature-vector flattening
//! - [`knn`]: brute-force KNN classifier with deterministic tie-breaking
//! - [`session`]: the state of one drawing session (grid, pointer, feedback)
//! - [`console`]: terminal front end for a session
//! - [`server`]: static file server for the browser front end

pub mod common_types;
pub mod config;
pub mod console;
pub mod error;
pub mod features;
pub mod grid;
pub mod knn;
pub mod server;
pub mod session;

#[cfg(feature = "python")]
mod python;

pub use common_types::{FeatureVector, LabeledExample, Neighbor};
pub use config::SketchConfig;
pub use error::{Result, SketchError};
pub use features::flatten;
pub use grid::{Grid, GridSize};
pub use knn::KnnClassifier;
pub use session::SketchSession;
