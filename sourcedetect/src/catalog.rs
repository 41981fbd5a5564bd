//! Per-detection catalog rows joining identity, grouping and photometry.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::write_serialized;
use crate::detection::FluxSign;
use crate::error::{Error, Result};
use crate::frame::Frame;
use crate::photometry::Photometry;
use crate::pipeline::DetectionRun;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogRow {
    /// Pixel column.
    pub x_centroid: usize,
    /// Pixel row.
    pub y_centroid: usize,
    pub flux: f32,
    pub frame: usize,
    /// Detections at this position over the whole run.
    pub n_detections: usize,
    /// Source ID of the position.
    pub objid: usize,
    /// Cross-frame group ID, `-1` when ungrouped.
    pub group: i64,
    pub flux_sign: FluxSign,
    pub variable: bool,
}

impl DetectionRun {
    /// One row per detection, in detection order.
    ///
    /// `frames` must be the frames the run was produced from.
    pub fn catalog(&self, frames: &[Frame], photometry: &impl Photometry) -> Result<Vec<CatalogRow>> {
        if frames.len() != self.frames.len() {
            return Err(Error::FrameCountMismatch {
                images: frames.len(),
                grids: self.frames.len(),
            });
        }

        let rows = self
            .detections
            .iter()
            .map(|detection| {
                let position = detection.position;
                CatalogRow {
                    x_centroid: position.col,
                    y_centroid: position.row,
                    flux: photometry.measure(&frames[detection.frame].image, position),
                    frame: detection.frame,
                    n_detections: self.identities.detection_count(&position),
                    objid: self.identities.source_ids[&position],
                    group: self.groups.group_label(&position),
                    flux_sign: detection.flux_sign,
                    variable: self.identities.is_variable(&position),
                }
            })
            .collect();
        Ok(rows)
    }
}

/// Write rows as YAML or JSON, chosen by the file extension.
pub fn save_catalog(path: impl AsRef<Path>, rows: &[CatalogRow]) -> Result<()> {
    write_serialized(path.as_ref(), &rows)
}
