//! Configuration for the detection pipeline.
//!
//! A flat [`Config`] struct with sections grouped by comments. Loaded from YAML
//! or JSON through the `common` serde helpers; missing fields take defaults.

use std::path::Path;

use common::FileFormat;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

// ============================================================================
// Enums
// ============================================================================

/// Order in which grid cells of a frame are visited.
///
/// Source IDs and variability accumulators follow first-seen order, so this
/// choice is part of a run's reproducibility contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellOrder {
    /// Outer loop over grid columns, inner loop over grid rows.
    #[default]
    ColumnMajor,
    /// Outer loop over grid rows, inner loop over grid columns.
    RowMajor,
}

/// How per-frame proximity groups are closed over chains of neighbours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClosureMode {
    /// One in-place merge pass over pairwise adjacency lists.
    ///
    /// Groups are the deduplicated, sorted neighbour lists after the pass.
    /// Repeated coordinates inside a list collapse to one entry.
    #[default]
    SinglePass,
    /// Connected components of the adjacency graph via union-find.
    Full,
}

// ============================================================================
// Config
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // -- Decoding ------------------------------------------------------------
    /// Minimum objectness probability; cells below it are skipped.
    pub threshold: f32,
    /// Raw pixels per grid cell along each axis.
    pub grid_size: usize,
    /// Grid cell visiting order.
    pub cell_order: CellOrder,

    // -- Proximity -----------------------------------------------------------
    /// Maximum per-axis pixel distance for two detections to be close.
    pub proximity_radius: usize,
    /// Closure law for per-frame groups.
    pub closure: ClosureMode,
    /// Compute unique detections per frame during the run.
    pub unique: bool,

    // -- Photometry ----------------------------------------------------------
    /// Radius of the circular aperture used for catalog fluxes.
    pub aperture_radius: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            threshold: 0.8,
            grid_size: 4,
            cell_order: CellOrder::default(),
            proximity_radius: 4,
            closure: ClosureMode::default(),
            unique: false,
            aperture_radius: 5.0,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if !self.threshold.is_finite() || !(0.0..=1.0).contains(&self.threshold) {
            return Err(Error::InvalidConfig(format!(
                "threshold must be within [0, 1], got {}",
                self.threshold
            )));
        }
        if self.grid_size == 0 {
            return Err(Error::InvalidConfig("grid_size must be positive".into()));
        }
        if !(self.aperture_radius.is_finite() && self.aperture_radius > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "aperture_radius must be positive, got {}",
                self.aperture_radius
            )));
        }
        Ok(())
    }

    /// Load and validate a configuration file (`.yaml`, `.yml` or `.json`).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let format = file_format(path)?;
        let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config =
            common::deserialize(&text, format).map_err(|source| Error::ConfigFile {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        write_serialized(path.as_ref(), self)
    }
}

pub(crate) fn file_format(path: &Path) -> Result<FileFormat> {
    FileFormat::from_file_name(&path.to_string_lossy()).map_err(|e| Error::ConfigFile {
        path: path.to_path_buf(),
        source: e.into(),
    })
}

pub(crate) fn write_serialized<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let format = file_format(path)?;
    let text = common::serialize(value, format).map_err(|source| Error::ConfigFile {
        path: path.to_path_buf(),
        source,
    })?;
    std::fs::write(path, text).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}
