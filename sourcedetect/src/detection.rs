//! Detection result types.

use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Integer pixel coordinate; the identity key of a source position.
///
/// Ordered by `(row, col)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Both axis distances are at most `radius`.
    #[inline]
    pub fn is_within(&self, other: &Position, radius: usize) -> bool {
        self.row.abs_diff(other.row) <= radius && self.col.abs_diff(other.col) <= radius
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

/// Sign of the pixel value at a detection's peak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FluxSign {
    Positive,
    Negative,
}

impl FluxSign {
    /// Zero counts as negative.
    pub fn of(value: f32) -> Self {
        if value > 0.0 {
            FluxSign::Positive
        } else {
            FluxSign::Negative
        }
    }
}

/// One accepted grid cell in one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Detection {
    /// Peak pixel of the 3x3 neighbourhood around `clamped`.
    pub position: Position,
    /// Frame index the detection came from.
    pub frame: usize,
    pub flux_sign: FluxSign,
    /// Grid cell `(row, col)` that produced the detection.
    pub cell: (usize, usize),
    /// Cell centre after the edge clamp, before peak refinement.
    pub clamped: Position,
    /// Objectness probability of the producing cell.
    pub probability: f32,
    /// Bright class score exceeded dim class score.
    pub bright: bool,
}

/// Detections of a single frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameDetections {
    pub frame: usize,
    /// Detection positions sorted ascending; repeats are kept.
    pub positions: Vec<Position>,
    /// Proximity groups, each sorted ascending.
    pub close_groups: Vec<Vec<Position>>,
    /// Guaranteed-unique detections, when requested by the configuration.
    pub unique: Option<Vec<Position>>,
}

impl FrameDetections {
    /// Number of detections in the frame.
    pub fn count(&self) -> usize {
        self.positions.len()
    }

    /// Detections whose row and column fall in the given half-open ranges.
    pub fn in_region(&self, rows: Range<usize>, cols: Range<usize>) -> Vec<Position> {
        self.positions
            .iter()
            .filter(|p| rows.contains(&p.row) && cols.contains(&p.col))
            .copied()
            .collect()
    }
}
