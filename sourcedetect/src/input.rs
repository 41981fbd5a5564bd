//! Serialized detection inputs: images with their prediction grids.
//!
//! A run file lists frames in sequence order. Each record carries the raw
//! image (optionally interleaved with extra channels, of which only the first
//! is used) and the flat `[row][col][channel]` prediction buffer.

use std::path::Path;

use common::Buffer2;
use serde::{Deserialize, Serialize};

use crate::config::{file_format, write_serialized};
use crate::error::{Error, Result};
use crate::frame::{Frame, PredictionGrid};

fn one() -> usize {
    1
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameRecord {
    pub width: usize,
    pub height: usize,
    #[serde(default = "one")]
    pub channels: usize,
    pub pixels: Vec<f32>,
    pub grid_rows: usize,
    pub grid_cols: usize,
    pub predictions: Vec<f32>,
}

impl FrameRecord {
    pub fn into_frame(self, index: usize) -> Result<Frame> {
        let image =
            Buffer2::try_from_channels(self.width, self.height, self.channels, &self.pixels)?;
        let grid = PredictionGrid::from_flat(self.grid_rows, self.grid_cols, &self.predictions)
            .map_err(|err| match err {
                Error::GridShape {
                    expected, actual, ..
                } => Error::GridShape {
                    frame: index,
                    expected,
                    actual,
                },
                other => other,
            })?;
        Ok(Frame::new(image, grid))
    }

    pub fn from_frame(frame: &Frame) -> Self {
        Self {
            width: frame.image.width(),
            height: frame.image.height(),
            channels: 1,
            pixels: frame.image.pixels().to_vec(),
            grid_rows: frame.grid.rows(),
            grid_cols: frame.grid.cols(),
            predictions: frame.grid.to_flat(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunInput {
    pub frames: Vec<FrameRecord>,
}

impl RunInput {
    pub fn from_frames(frames: &[Frame]) -> Self {
        Self {
            frames: frames.iter().map(FrameRecord::from_frame).collect(),
        }
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let format = file_format(path)?;
        let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        common::deserialize(&text, format).map_err(|source| Error::ConfigFile {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        write_serialized(path.as_ref(), self)
    }

    pub fn into_frames(self) -> Result<Vec<Frame>> {
        self.frames
            .into_iter()
            .enumerate()
            .map(|(index, record)| record.into_frame(index))
            .collect()
    }
}
