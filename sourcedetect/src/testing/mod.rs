//! Synthetic frame builders for tests.

use common::Buffer2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::detection::Position;
use crate::frame::{Frame, Prediction, PredictionGrid};

/// Confident, bright, non-trash cell pointing at local offset `(x, y)`.
pub(crate) fn cell(probability: f32, x_offset: f32, y_offset: f32) -> Prediction {
    Prediction {
        probability,
        x_offset,
        y_offset,
        box_width: 3.0,
        box_height: 3.0,
        bright: 0.9,
        dim: 0.1,
        trash: 0.0,
    }
}

/// Builds a [`Frame`] over a `grid_rows x grid_cols` grid.
pub(crate) struct FrameBuilder {
    grid_size: usize,
    image: Buffer2<f32>,
    grid: PredictionGrid,
}

impl FrameBuilder {
    /// Zero background, every cell at zero probability.
    pub fn new(grid_rows: usize, grid_cols: usize, grid_size: usize) -> Self {
        Self {
            grid_size,
            image: Buffer2::new_default(grid_cols * grid_size, grid_rows * grid_size),
            grid: PredictionGrid::empty(grid_rows, grid_cols),
        }
    }

    /// Replace the background with uniform noise in `[-amplitude, amplitude]`.
    pub fn noise(mut self, seed: u64, amplitude: f32) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        for row in 0..self.image.height() {
            for col in 0..self.image.width() {
                self.image[(row, col)] = rng.random_range(-amplitude..=amplitude);
            }
        }
        self
    }

    pub fn pixel(mut self, row: usize, col: usize, value: f32) -> Self {
        self.image[(row, col)] = value;
        self
    }

    pub fn cell(mut self, grid_row: usize, grid_col: usize, prediction: Prediction) -> Self {
        self.grid.set(grid_row, grid_col, prediction);
        self
    }

    /// Plant a peak at `(row, col)` and point the owning cell at it.
    pub fn source(self, row: usize, col: usize, value: f32, bright: bool) -> Self {
        let gs = self.grid_size;
        let mut prediction = cell(0.95, (col % gs) as f32, (row % gs) as f32);
        if !bright {
            prediction.bright = 0.1;
            prediction.dim = 0.9;
        }
        self.pixel(row, col, value)
            .cell(row / gs, col / gs, prediction)
    }

    pub fn build(self) -> Frame {
        Frame::new(self.image, self.grid)
    }
}

/// Random frame with planted peaks, returned with the peak positions.
///
/// Peaks sit on every other cell so their 5x5 neighbourhoods never overlap;
/// roughly half of the sites are populated. About half of the populated sites
/// also get a same-sign neighbour three pixels down and right, in the next
/// cell, which forms a close group with it.
pub(crate) fn random_frame(
    rng: &mut StdRng,
    grid_rows: usize,
    grid_cols: usize,
    grid_size: usize,
) -> (Frame, Vec<Position>) {
    let mut builder = FrameBuilder::new(grid_rows, grid_cols, grid_size).noise(rng.random(), 1.0);
    let mut planted = Vec::new();

    for grid_row in (0..grid_rows).step_by(2) {
        for grid_col in (0..grid_cols).step_by(2) {
            if !rng.random_bool(0.5) {
                continue;
            }
            let row = grid_row * grid_size + rng.random_range(2..grid_size.max(3));
            let col = grid_col * grid_size + rng.random_range(2..grid_size.max(3));
            if row + 2 >= grid_rows * grid_size || col + 2 >= grid_cols * grid_size {
                continue;
            }
            let value = if rng.random_bool(0.5) { 40.0 } else { -40.0 };
            builder = builder.source(row, col, value, rng.random_bool(0.5));
            planted.push(Position::new(row, col));

            let (near_row, near_col) = (row + 3, col + 3);
            let next_cell = near_row / grid_size > grid_row && near_col / grid_size > grid_col;
            if next_cell
                && near_row + 2 < grid_rows * grid_size
                && near_col + 2 < grid_cols * grid_size
                && rng.random_bool(0.5)
            {
                builder = builder.source(near_row, near_col, value, rng.random_bool(0.5));
                planted.push(Position::new(near_row, near_col));
            }
        }
    }

    (builder.build(), planted)
}
