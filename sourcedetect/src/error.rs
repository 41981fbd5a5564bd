//! Error types for the detection pipeline.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a detection run.
///
/// Every variant is fatal for the invocation that produced it; no partial
/// results are returned.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Prediction grid for frame {frame} has {actual} values, expected {expected}")]
    GridShape {
        frame: usize,
        expected: usize,
        actual: usize,
    },

    #[error(
        "Frame {frame}: image {image_width}x{image_height} does not match grid {grid_cols}x{grid_rows} at grid size {grid_size}"
    )]
    DimensionMismatch {
        frame: usize,
        image_width: usize,
        image_height: usize,
        grid_rows: usize,
        grid_cols: usize,
        grid_size: usize,
    },

    #[error("Frame {frame}: image {width}x{height} has no valid interior")]
    ImageTooSmall {
        frame: usize,
        width: usize,
        height: usize,
    },

    #[error("Channel data has {actual} values, expected {expected}")]
    ChannelShape { expected: usize, actual: usize },

    #[error("Got {images} images but {grids} prediction grids")]
    FrameCountMismatch { images: usize, grids: usize },

    #[error("Frame {frame}: boundary clamp did not converge for grid cell ({grid_row}, {grid_col})")]
    ClampExhausted {
        frame: usize,
        grid_row: usize,
        grid_col: usize,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to parse '{path}': {source}")]
    ConfigFile {
        path: PathBuf,
        #[source]
        source: common::SerdeFormatError,
    },

    #[error("Failed to access '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Predictor(anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<common::ChannelShapeError> for Error {
    fn from(err: common::ChannelShapeError) -> Self {
        Error::ChannelShape {
            expected: err.expected,
            actual: err.actual,
        }
    }
}
