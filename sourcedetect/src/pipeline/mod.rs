//! End-to-end detection over a frame sequence.
//!
//! Frames are decoded strictly in order against one [`SourceRegistry`], so
//! source IDs and variability follow first-seen order. Per-frame proximity
//! groups are then merged across frames and the registry is finalized.


use common::Buffer2;

use crate::config::Config;
use crate::decode::{decode_frame, DecodeDiagnostics};
use crate::detection::{Detection, FluxSign, FrameDetections, Position};
use crate::error::{Error, Result};
use crate::frame::{Frame, PredictionGrid};
use crate::grouping::CrossFrameGroups;
use crate::identity::{SourceIdentities, SourceRegistry};
use crate::predictor::GridPredictor;
use crate::proximity::{close_groups, unique_detections};

/// Decodes frame sequences into consolidated detections.
///
/// ```rust,ignore
/// let detector = SourceDetector::from_config(Config {
///     threshold: 0.9,
///     ..Default::default()
/// });
/// let run = detector.detect(&frames)?;
/// for position in run.positions() {
///     println!("{position}: group {}", run.groups.group_label(&position));
/// }
/// ```
#[derive(Debug, Default, Clone)]
pub struct SourceDetector {
    config: Config,
}

impl SourceDetector {
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    pub fn from_config(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run the full pipeline. Any malformed frame aborts the whole run.
    pub fn detect(&self, frames: &[Frame]) -> Result<DetectionRun> {
        self.config.validate()?;

        let mut registry = SourceRegistry::new();
        let mut detections: Vec<Detection> = Vec::new();
        let mut per_frame: Vec<FrameDetections> = Vec::with_capacity(frames.len());
        let mut diagnostics = DecodeDiagnostics::default();

        for (index, frame) in frames.iter().enumerate() {
            let decoded = decode_frame(index, frame, &self.config, &mut registry)?;
            diagnostics.merge(&decoded.diagnostics);

            let mut positions: Vec<Position> =
                decoded.detections.iter().map(|d| d.position).collect();
            positions.sort_unstable();

            let groups = close_groups(&positions, self.config.proximity_radius, self.config.closure);
            let unique = self
                .config
                .unique
                .then(|| unique_detections(&positions, &groups));

            tracing::debug!(
                "Frame {}: {} detections, {} close groups",
                index,
                positions.len(),
                groups.len()
            );

            per_frame.push(FrameDetections {
                frame: index,
                positions,
                close_groups: groups,
                unique,
            });
            detections.extend(decoded.detections);
        }

        let all_close: Vec<Vec<Position>> = per_frame
            .iter()
            .flat_map(|f| f.close_groups.iter().cloned())
            .collect();
        let all_positions: Vec<Position> = detections.iter().map(|d| d.position).collect();
        let groups = CrossFrameGroups::build(&all_close, &all_positions);
        let identities = registry.finalize();

        tracing::info!(
            "Detected {} sources ({} distinct positions, {} cross-frame groups) in {} frames",
            detections.len(),
            identities.len(),
            groups.len(),
            frames.len()
        );

        Ok(DetectionRun {
            detections,
            frames: per_frame,
            groups,
            identities,
            diagnostics,
        })
    }

    /// Pair images with grids produced elsewhere and run [`Self::detect`].
    pub fn detect_images(
        &self,
        images: Vec<Buffer2<f32>>,
        grids: Vec<PredictionGrid>,
    ) -> Result<DetectionRun> {
        if images.len() != grids.len() {
            return Err(Error::FrameCountMismatch {
                images: images.len(),
                grids: grids.len(),
            });
        }

        let frames: Vec<Frame> = images
            .into_iter()
            .zip(grids)
            .map(|(image, grid)| Frame::new(image, grid))
            .collect();
        self.detect(&frames)
    }

    /// Run the inference collaborator over `images`, then detect.
    pub fn detect_with(
        &self,
        predictor: &mut impl GridPredictor,
        images: Vec<Buffer2<f32>>,
    ) -> Result<DetectionRun> {
        let grids = predictor.predict(&images).map_err(Error::Predictor)?;
        self.detect_images(images, grids)
    }
}

/// Complete output of one detection run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetectionRun {
    /// Every detection in frame order, then cell scan order.
    pub detections: Vec<Detection>,
    pub frames: Vec<FrameDetections>,
    pub groups: CrossFrameGroups,
    pub identities: SourceIdentities,
    /// Decode counts summed over all frames.
    pub diagnostics: DecodeDiagnostics,
}

impl DetectionRun {
    pub fn positions(&self) -> Vec<Position> {
        self.detections.iter().map(|d| d.position).collect()
    }

    pub fn frame_indices(&self) -> Vec<usize> {
        self.detections.iter().map(|d| d.frame).collect()
    }

    pub fn flux_signs(&self) -> Vec<FluxSign> {
        self.detections.iter().map(|d| d.flux_sign).collect()
    }

    /// Detection count of every frame.
    pub fn num_sources(&self) -> Vec<usize> {
        self.frames.iter().map(FrameDetections::count).collect()
    }

    /// Close groups of all frames, in frame order.
    pub fn close_sources(&self) -> Vec<Vec<Position>> {
        self.frames
            .iter()
            .flat_map(|f| f.close_groups.iter().cloned())
            .collect()
    }

    pub fn frame(&self, index: usize) -> Option<&FrameDetections> {
        self.frames.get(index)
    }

    /// Unique detections of `frame`, derived from its close groups.
    pub fn unique_detections(&self, frame: usize) -> Option<Vec<Position>> {
        self.frames
            .get(frame)
            .map(|f| unique_detections(&f.positions, &f.close_groups))
    }
}
