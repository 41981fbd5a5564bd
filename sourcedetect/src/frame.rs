//! Frame inputs: raw pixel arrays and the model's per-cell prediction grid.

use common::Buffer2;
use serde::{Deserialize, Serialize};

use crate::config::CellOrder;
use crate::constants::{MIN_IMAGE_SIDE, PREDICTION_CHANNELS};
use crate::error::{Error, Result};

/// One grid cell of model output.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Prediction {
    /// Objectness probability.
    pub probability: f32,
    /// Column offset, in pixels, from the cell's top-left corner.
    pub x_offset: f32,
    /// Row offset, in pixels, from the cell's top-left corner.
    pub y_offset: f32,
    pub box_width: f32,
    pub box_height: f32,
    pub bright: f32,
    pub dim: f32,
    pub trash: f32,
}

impl Prediction {
    /// Build from an 8-value cell vector.
    pub fn from_slice(values: &[f32; PREDICTION_CHANNELS]) -> Self {
        let [probability, x_offset, y_offset, box_width, box_height, bright, dim, trash] = *values;
        Self {
            probability,
            x_offset,
            y_offset,
            box_width,
            box_height,
            bright,
            dim,
            trash,
        }
    }

    /// The trash score beats both real-source classes.
    #[inline]
    pub fn is_trash(&self) -> bool {
        self.trash > self.bright && self.trash > self.dim
    }

    #[inline]
    pub fn is_bright(&self) -> bool {
        self.bright > self.dim
    }
}

/// Fixed-size grid of [`Prediction`]s for one frame, row-major.
///
/// Always holds exactly `rows * cols` cells; deserialization goes through
/// [`PredictionGrid::from_cells`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GridCells")]
pub struct PredictionGrid {
    rows: usize,
    cols: usize,
    cells: Vec<Prediction>,
}

#[derive(Deserialize)]
struct GridCells {
    rows: usize,
    cols: usize,
    cells: Vec<Prediction>,
}

impl TryFrom<GridCells> for PredictionGrid {
    type Error = Error;

    fn try_from(grid: GridCells) -> Result<Self> {
        Self::from_cells(grid.rows, grid.cols, grid.cells)
    }
}

impl PredictionGrid {
    /// Grid with every cell at zero probability.
    pub fn empty(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![Prediction::default(); rows * cols],
        }
    }

    /// Build from `rows * cols * 8` values laid out `[row][col][channel]`.
    pub fn from_flat(rows: usize, cols: usize, values: &[f32]) -> Result<Self> {
        let expected = rows * cols * PREDICTION_CHANNELS;
        if values.len() != expected {
            return Err(Error::GridShape {
                frame: 0,
                expected,
                actual: values.len(),
            });
        }

        let cells = values
            .chunks_exact(PREDICTION_CHANNELS)
            .map(|chunk| {
                let mut cell = [0.0; PREDICTION_CHANNELS];
                cell.copy_from_slice(chunk);
                Prediction::from_slice(&cell)
            })
            .collect();

        Ok(Self { rows, cols, cells })
    }

    pub fn from_cells(rows: usize, cols: usize, cells: Vec<Prediction>) -> Result<Self> {
        if cells.len() != rows * cols {
            return Err(Error::GridShape {
                frame: 0,
                expected: rows * cols * PREDICTION_CHANNELS,
                actual: cells.len() * PREDICTION_CHANNELS,
            });
        }
        Ok(Self { rows, cols, cells })
    }

    /// Inverse of [`PredictionGrid::from_flat`].
    pub fn to_flat(&self) -> Vec<f32> {
        self.cells
            .iter()
            .flat_map(|c| {
                [
                    c.probability,
                    c.x_offset,
                    c.y_offset,
                    c.box_width,
                    c.box_height,
                    c.bright,
                    c.dim,
                    c.trash,
                ]
            })
            .collect()
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> &Prediction {
        &self.cells[row * self.cols + col]
    }

    pub fn set(&mut self, row: usize, col: usize, prediction: Prediction) {
        self.cells[row * self.cols + col] = prediction;
    }

    /// Cells as `(row, col, prediction)` in the requested order.
    pub fn iter_cells(
        &self,
        order: CellOrder,
    ) -> impl Iterator<Item = (usize, usize, &Prediction)> + '_ {
        let (rows, cols) = (self.rows, self.cols);
        (0..rows * cols).map(move |i| {
            let (row, col) = match order {
                CellOrder::ColumnMajor => (i % rows, i / rows),
                CellOrder::RowMajor => (i / cols, i % cols),
            };
            (row, col, self.get(row, col))
        })
    }
}

/// One image of the sequence with its model output.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub image: Buffer2<f32>,
    pub grid: PredictionGrid,
}

impl Frame {
    pub fn new(image: Buffer2<f32>, grid: PredictionGrid) -> Self {
        Self { image, grid }
    }

    /// Check that the image covers the grid exactly and has a valid interior.
    pub fn validate(&self, index: usize, grid_size: usize) -> Result<()> {
        let (width, height) = (self.image.width(), self.image.height());
        if self.grid.cols * grid_size != width || self.grid.rows * grid_size != height {
            return Err(Error::DimensionMismatch {
                frame: index,
                image_width: width,
                image_height: height,
                grid_rows: self.grid.rows,
                grid_cols: self.grid.cols,
                grid_size,
            });
        }
        if width < MIN_IMAGE_SIDE || height < MIN_IMAGE_SIDE {
            return Err(Error::ImageTooSmall {
                frame: index,
                width,
                height,
            });
        }
        Ok(())
    }
}
