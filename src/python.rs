//! Python bindings, built with `--features python` (e.g. through maturin).

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::error::SketchError;
use crate::features::flatten;
use crate::knn::{euclidean_distance, KnnClassifier};

impl From<SketchError> for PyErr {
    fn from(err: SketchError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

fn check_dimension(expected: Option<usize>, features: &[f64]) -> PyResult<()> {
    match expected {
        Some(dim) if dim != features.len() => Err(PyValueError::new_err(format!(
            "Expected {} features, got {}. Call reset_dimension() after changing grid size.",
            dim,
            features.len()
        ))),
        _ => Ok(()),
    }
}

/// Flattens a list of rows into one row-major list.
#[pyfunction]
#[pyo3(name = "flatten")]
fn flatten_py(grid: Vec<Vec<f64>>) -> Vec<f64> {
    flatten(&grid)
}

/// Calculates the Euclidean distance between two vectors of f64.
#[pyfunction]
#[pyo3(name = "euclidean_distance")]
fn euclidean_distance_py(a: Vec<f64>, b: Vec<f64>) -> PyResult<f64> {
    if a.len() != b.len() {
        return Err(PyValueError::new_err("Input vectors must have the same length."));
    }
    Ok(euclidean_distance(&a, &b))
}

#[pyclass(name = "KnnClassifier")]
struct PyKnnClassifier {
    classifier: KnnClassifier<f64, String>,
}

#[pymethods]
impl PyKnnClassifier {
    #[new]
    #[pyo3(signature = (k = 5))]
    fn new(k: usize) -> PyResult<Self> {
        Ok(PyKnnClassifier {
            classifier: KnnClassifier::new(k)?,
        })
    }

    fn add_example(&mut self, features: Vec<f64>, label: String) -> PyResult<()> {
        check_dimension(self.classifier.dimension(), &features)?;
        self.classifier.add_example(features, label);
        Ok(())
    }

    /// Returns `None` while no examples are stored.
    fn classify(&self, features: Vec<f64>) -> PyResult<Option<String>> {
        check_dimension(self.classifier.dimension(), &features)?;
        Ok(self.classifier.classify(&features))
    }

    fn is_ready(&self) -> bool {
        self.classifier.is_ready()
    }

    fn knows_label(&self, label: &str) -> bool {
        self.classifier.knows_label(label)
    }

    fn reset_dimension(&mut self, dimension: usize) -> bool {
        self.classifier.reset_dimension(dimension)
    }

    fn clear(&mut self) {
        self.classifier.clear();
    }

    #[getter]
    fn k(&self) -> usize {
        self.classifier.k()
    }

    #[getter]
    fn labels(&self) -> Vec<String> {
        self.classifier.labels().to_vec()
    }

    fn __len__(&self) -> usize {
        self.classifier.len()
    }
}

/// The `knn_sketchpad` Python module. Its name must match `lib.name` in `Cargo.toml`.
#[pymodule]
#[pyo3(name = "knn_sketchpad")]
fn knn_sketchpad_py(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(flatten_py, m)?)?;
    m.add_function(wrap_pyfunction!(euclidean_distance_py, m)?)?;
    m.add_class::<PyKnnClassifier>()?;
    Ok(())
}

