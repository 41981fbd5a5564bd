//! Post-processing of grid-based source predictions over image sequences.
//!
//! A model emits, for every frame, a grid of 8-value prediction cells. This
//! crate turns those grids into pixel detections, groups detections that lie
//! close together within a frame, merges those groups across frames and
//! assigns per-position identities:
//!
//! - [`decode`]: thresholding, edge clamp, signal filters and peak refinement
//! - [`proximity`]: per-frame close groups and unique detections
//! - [`grouping`]: cross-frame groups via union-find
//! - [`identity`]: source IDs, detection counts and variability flags
//! - [`pipeline`]: [`SourceDetector`] running all of the above in order
//!
//! ```rust,ignore
//! use sourcedetect::{CircularAperture, Config, RunInput, SourceDetector};
//!
//! let frames = RunInput::from_file("run.json")?.into_frames()?;
//! let run = SourceDetector::from_config(Config::from_file("detect.yaml")?).detect(&frames)?;
//! let rows = run.catalog(&frames, &CircularAperture::default())?;
//! ```

pub mod catalog;
pub mod config;
pub mod constants;
pub mod decode;
pub mod detection;
pub mod error;
pub mod frame;
pub mod grouping;
pub mod identity;
pub mod input;
pub mod photometry;
pub mod pipeline;
pub mod predictor;
pub mod proximity;

#[cfg(test)]
pub(crate) mod testing;

pub use catalog::{save_catalog, CatalogRow};
pub use config::{CellOrder, ClosureMode, Config};
pub use decode::{DecodeDiagnostics, DecodedFrame};
pub use detection::{Detection, FluxSign, FrameDetections, Position};
pub use error::{Error, Result};
pub use frame::{Frame, Prediction, PredictionGrid};
pub use grouping::CrossFrameGroups;
pub use identity::{SourceIdentities, SourceRegistry, VariabilitySignal};
pub use input::{FrameRecord, RunInput};
pub use photometry::{CircularAperture, Photometry};
pub use pipeline::{DetectionRun, SourceDetector};
pub use predictor::GridPredictor;
