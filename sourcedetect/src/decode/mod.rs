//! Grid decoding: prediction cells to validated pixel detections.
//!
//! Each cell above the objectness threshold is mapped to pixel space, clamped
//! into the image interior and run through the signal filters:
//!
//! 1. **No signal**: the centre pixel lies strictly within `±NO_SIGNAL_LEVEL`.
//! 2. **Quiet**: the whole 3x3 neighbourhood lies within `±NO_SIGNAL_LEVEL`.
//! 3. **Contaminated**: the 5x5 neighbourhood exceeds `CONTAMINATION_LEVEL`
//!    in both directions.
//! 4. **Weak peak**: the 3x3 maximum absolute value is below `MIN_PEAK_LEVEL`.
//!
//! Survivors are refined to the strongest pixel of their 3x3 neighbourhood.


use common::Buffer2;

use crate::config::Config;
use crate::constants::{
    CLAMP_STEP, CONTAMINATION_LEVEL, CONTAMINATION_RADIUS, INTERIOR_MARGIN, MIN_PEAK_LEVEL,
    NO_SIGNAL_LEVEL, PEAK_RADIUS,
};
use crate::detection::{Detection, FluxSign, Position};
use crate::error::{Error, Result};
use crate::frame::Frame;
use crate::identity::SourceRegistry;

/// Per-frame counts of how grid cells were handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeDiagnostics {
    /// Grid cells visited.
    pub cells: usize,
    pub below_threshold: usize,
    pub rejected_trash: usize,
    pub rejected_no_signal: usize,
    pub rejected_quiet: usize,
    pub rejected_contaminated: usize,
    pub rejected_weak_peak: usize,
    /// Cells that produced a detection.
    pub accepted: usize,
}

impl DecodeDiagnostics {
    pub fn rejected(&self) -> usize {
        self.cells - self.accepted
    }

    /// Accumulate another frame's counts.
    pub fn merge(&mut self, other: &DecodeDiagnostics) {
        self.cells += other.cells;
        self.below_threshold += other.below_threshold;
        self.rejected_trash += other.rejected_trash;
        self.rejected_no_signal += other.rejected_no_signal;
        self.rejected_quiet += other.rejected_quiet;
        self.rejected_contaminated += other.rejected_contaminated;
        self.rejected_weak_peak += other.rejected_weak_peak;
        self.accepted += other.accepted;
    }
}

/// Detections of one frame in cell scan order.
#[derive(Debug, Clone, Default)]
pub struct DecodedFrame {
    pub detections: Vec<Detection>,
    pub diagnostics: DecodeDiagnostics,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rejection {
    NoSignal,
    Quiet,
    Contaminated,
    WeakPeak,
}

/// Decode one frame, recording every accepted detection in `registry`.
///
/// Cells are visited in `config.cell_order`; registry updates happen in the
/// same order so source IDs are reproducible.
pub fn decode_frame(
    frame_index: usize,
    frame: &Frame,
    config: &Config,
    registry: &mut SourceRegistry,
) -> Result<DecodedFrame> {
    frame.validate(frame_index, config.grid_size)?;

    let image = &frame.image;
    let mut decoded = DecodedFrame::default();
    let diagnostics = &mut decoded.diagnostics;

    for (grid_row, grid_col, cell) in frame.grid.iter_cells(config.cell_order) {
        diagnostics.cells += 1;

        if cell.probability < config.threshold {
            diagnostics.below_threshold += 1;
            continue;
        }
        if cell.is_trash() {
            diagnostics.rejected_trash += 1;
            continue;
        }

        let gs = config.grid_size as f32;
        let pixel_x = grid_col as f32 * gs + cell.x_offset;
        let pixel_y = grid_row as f32 * gs + cell.y_offset;

        let clamp_error = || Error::ClampExhausted {
            frame: frame_index,
            grid_row,
            grid_col,
        };
        let col = clamp_axis(pixel_x, image.width()).ok_or_else(clamp_error)?;
        let row = clamp_axis(pixel_y, image.height()).ok_or_else(clamp_error)?;
        let clamped = Position::new(row, col);

        if let Err(rejection) = check_signal(image, clamped) {
            match rejection {
                Rejection::NoSignal => diagnostics.rejected_no_signal += 1,
                Rejection::Quiet => diagnostics.rejected_quiet += 1,
                Rejection::Contaminated => diagnostics.rejected_contaminated += 1,
                Rejection::WeakPeak => diagnostics.rejected_weak_peak += 1,
            }
            continue;
        }

        let (peak_row, peak_col) = image.window(row, col, PEAK_RADIUS).argmax_abs();
        let position = Position::new(peak_row, peak_col);
        let bright = cell.is_bright();
        registry.record(position, bright);

        decoded.detections.push(Detection {
            position,
            frame: frame_index,
            flux_sign: FluxSign::of(*image.at(peak_row, peak_col)),
            cell: (grid_row, grid_col),
            clamped,
            probability: cell.probability,
            bright,
        });
        diagnostics.accepted += 1;
    }

    tracing::debug!(
        "Frame {}: {} of {} cells accepted (below threshold {}, trash {}, no signal {}, quiet {}, contaminated {}, weak peak {})",
        frame_index,
        diagnostics.accepted,
        diagnostics.cells,
        diagnostics.below_threshold,
        diagnostics.rejected_trash,
        diagnostics.rejected_no_signal,
        diagnostics.rejected_quiet,
        diagnostics.rejected_contaminated,
        diagnostics.rejected_weak_peak
    );

    Ok(decoded)
}

/// Shift `value` by whole multiples of `CLAMP_STEP` until its integer part
/// lies within `[INTERIOR_MARGIN, dim - 1 - INTERIOR_MARGIN]`.
///
/// The shift count is computed directly, so any finite offset lands on the
/// same pixel as stepping one `CLAMP_STEP` at a time. Returns `None` for
/// non-finite input, or when the step jumps over an interior narrower than
/// `CLAMP_STEP`.
pub(crate) fn clamp_axis(value: f32, dim: usize) -> Option<usize> {
    if dim <= 2 * INTERIOR_MARGIN || !value.is_finite() {
        return None;
    }
    let lower = INTERIOR_MARGIN as i64;
    let upper = (dim - 1 - INTERIOR_MARGIN) as i64;
    let step = CLAMP_STEP as f64;

    let mut v = value as f64;
    if (v as i64) < lower {
        let shifts = ((lower as f64 - v) / step).ceil();
        v += shifts * step;
    }
    if (v as i64) > upper {
        let shifts = ((v - upper as f64 - 1.0) / step).floor() + 1.0;
        v -= shifts * step;
    }

    let clamped = v as i64;
    (lower..=upper).contains(&clamped).then_some(clamped as usize)
}

fn check_signal(image: &Buffer2<f32>, at: Position) -> std::result::Result<(), Rejection> {
    let value = *image.at(at.row, at.col);
    if value > -NO_SIGNAL_LEVEL && value < NO_SIGNAL_LEVEL {
        return Err(Rejection::NoSignal);
    }

    let near = image.window(at.row, at.col, PEAK_RADIUS);
    if near.min() > -NO_SIGNAL_LEVEL && near.max() < NO_SIGNAL_LEVEL {
        return Err(Rejection::Quiet);
    }

    let wide = image.window(at.row, at.col, CONTAMINATION_RADIUS);
    if wide.max() > CONTAMINATION_LEVEL && wide.min() < -CONTAMINATION_LEVEL {
        return Err(Rejection::Contaminated);
    }

    if near.max_abs() < MIN_PEAK_LEVEL {
        return Err(Rejection::WeakPeak);
    }

    Ok(())
}
