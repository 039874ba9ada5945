//! Configuration for the classifier, the sketch session and the static server.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SketchError};
use crate::grid::GridSize;

/// Settings shared by the console and the static server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SketchConfig {
    /// Number of neighbors that vote on a guess.
    pub k: usize,
    /// Grid size a new session starts with.
    pub grid_size: GridSize,
    /// Address the static server binds to.
    pub host: String,
    /// Port the static server listens on.
    pub port: u16,
    /// Directory holding `main.html` and `knn.js`.
    pub assets_dir: PathBuf,
}

impl Default for SketchConfig {
    fn default() -> Self {
        Self {
            k: 5,
            grid_size: GridSize::Small,
            host: "0.0.0.0".to_string(),
            port: 8000,
            assets_dir: PathBuf::from("assets"),
        }
    }
}

impl SketchConfig {
    /// Reads a JSON config file. Missing keys take their default values.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: SketchConfig = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.k == 0 {
            return Err(SketchError::InvalidK);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_reference_setup() {
        let config = SketchConfig::default();
        assert_eq!(config.k, 5);
        assert_eq!(config.grid_size, GridSize::Small);
        assert_eq!(config.port, 8000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "k": 3, "grid_size": 32 }}"#).unwrap();

        let config = SketchConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config.k, 3);
        assert_eq!(config.grid_size, GridSize::Medium);
        assert_eq!(config.port, 8000);
        assert_eq!(config.assets_dir, PathBuf::from("assets"));
    }

    #[test]
    fn test_zero_k_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "k": 0 }}"#).unwrap();
        assert!(matches!(SketchConfig::load_from_file(file.path()), Err(SketchError::InvalidK)));
    }

    #[test]
    fn test_bad_grid_size_is_a_json_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "grid_size": 20 }}"#).unwrap();
        assert!(matches!(SketchConfig::load_from_file(file.path()), Err(SketchError::Json(_))));
    }

    #[test]
    fn test_missing_file_is_an_io_error() {
        let result = SketchConfig::load_from_file("/nonexistent/knn_sketchpad.json");
        assert!(matches!(result, Err(SketchError::Io(_))));
    }
}
