//! Fixed constants of the decode stage.
//!
//! These values define the signal-validation heuristics and the edge clamp.
//! They are not configurable: detections are only comparable across runs when
//! every run applies the same rules.

/// Length of one prediction cell vector.
///
/// Layout: objectness, local x offset, local y offset, box width, box height,
/// bright score, dim score, trash score.
pub const PREDICTION_CHANNELS: usize = 8;

/// Distance from the image edge, in pixels, that a clamped candidate must keep.
///
/// Valid rows and columns are `[INTERIOR_MARGIN, dim - 1 - INTERIOR_MARGIN]`,
/// which keeps the 5x5 contamination window inside the image.
pub const INTERIOR_MARGIN: usize = 2;

/// Step, in pixels, by which an out-of-bounds candidate is shifted.
pub const CLAMP_STEP: f32 = 2.0;

/// Smallest image side with a non-empty interior.
pub const MIN_IMAGE_SIDE: usize = 2 * INTERIOR_MARGIN + 1;

/// Pixels strictly inside `(-NO_SIGNAL_LEVEL, NO_SIGNAL_LEVEL)` carry no signal.
pub const NO_SIGNAL_LEVEL: f32 = 1.5;

/// A 5x5 neighbourhood that exceeds this level in both directions is treated
/// as contaminated (cosmic-ray-like residuals rather than a point source).
pub const CONTAMINATION_LEVEL: f32 = 7.5;

/// Minimum absolute peak in the 3x3 neighbourhood.
pub const MIN_PEAK_LEVEL: f32 = 10.0;

/// Radius of the neighbourhood used for the quiet check and peak refinement.
pub const PEAK_RADIUS: usize = 1;

/// Radius of the neighbourhood used for the contamination check.
pub const CONTAMINATION_RADIUS: usize = 2;
