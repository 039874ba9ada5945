//! The drawable grid and its supported sizes.

use serde::{Deserialize, Serialize};

use crate::common_types::FeatureVector;
use crate::error::SketchError;
use crate::features::flatten;

/// Side length of one cell on the canvas, in pixels.
pub const CELL_PIXELS: f64 = 10.0;

/// The square grid sizes a user can switch between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub enum GridSize {
    #[default]
    Small,
    Medium,
    Large,
}

impl GridSize {
    pub const ALL: [GridSize; 3] = [GridSize::Small, GridSize::Medium, GridSize::Large];

    /// Cells per side.
    pub fn cells(self) -> usize {
        match self {
            GridSize::Small => 16,
            GridSize::Medium => 32,
            GridSize::Large => 48,
        }
    }

    /// Canvas side length in pixels.
    pub fn canvas_pixels(self) -> f64 {
        self.cells() as f64 * CELL_PIXELS
    }

    /// Length of a feature vector drawn on a grid of this size.
    pub fn dimension(self) -> usize {
        self.cells() * self.cells()
    }
}

impl TryFrom<usize> for GridSize {
    type Error = SketchError;

    fn try_from(cells: usize) -> Result<Self, Self::Error> {
        GridSize::ALL
            .into_iter()
            .find(|size| size.cells() == cells)
            .ok_or(SketchError::InvalidGridSize(cells))
    }
}

impl From<GridSize> for usize {
    fn from(size: GridSize) -> usize {
        size.cells()
    }
}

impl std::fmt::Display for GridSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{0}x{0}", self.cells())
    }
}

/// A square grid of binary cells; 1 means painted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: GridSize,
    cells: Vec<Vec<u8>>,
}

impl Grid {
    pub fn new(size: GridSize) -> Self {
        let side = size.cells();
        Grid {
            size,
            cells: vec![vec![0; side]; side],
        }
    }

    pub fn size(&self) -> GridSize {
        self.size
    }

    pub fn rows(&self) -> &[Vec<u8>] {
        &self.cells
    }

    pub fn get(&self, row: usize, col: usize) -> Option<u8> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Paints a cell. Returns `true` if it was blank before, `false` if it was
    /// already painted or lies outside the grid.
    pub fn paint(&mut self, row: usize, col: usize) -> bool {
        match self.cells.get_mut(row).and_then(|r| r.get_mut(col)) {
            Some(cell) if *cell == 0 => {
                *cell = 1;
                true
            }
            _ => false,
        }
    }

    /// Maps a canvas position in pixels to a `(row, col)` cell, if it is on the grid.
    pub fn cell_at(&self, x: f64, y: f64) -> Option<(usize, usize)> {
        let col = (x / CELL_PIXELS).floor();
        let row = (y / CELL_PIXELS).floor();
        let side = self.size.cells() as f64;
        if row >= 0.0 && row < side && col >= 0.0 && col < side {
            Some((row as usize, col as usize))
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        for row in &mut self.cells {
            row.fill(0);
        }
    }

    pub fn painted_cells(&self) -> usize {
        self.cells.iter().flatten().filter(|&&cell| cell == 1).count()
    }

    pub fn to_features(&self) -> FeatureVector<u8> {
        flatten(&self.cells)
    }

    /// Text rendering, one line per row: `#` for painted cells, `.` for blank ones.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.size.dimension() + self.size.cells());
        for row in &self.cells {
            out.extend(row.iter().map(|&cell| if cell == 1 { '#' } else { '.' }));
            out.push('\n');
        }
        out
    }
}
