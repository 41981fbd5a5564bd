//! Aperture photometry at detection positions.

use common::Buffer2;

use crate::detection::Position;

/// Scalar flux of a detection in one frame.
pub trait Photometry {
    fn measure(&self, image: &Buffer2<f32>, position: Position) -> f32;
}

/// Circular aperture using the "center" rule: a pixel contributes its full
/// value when its centre lies strictly inside the circle, nothing otherwise.
///
/// Pixel centres sit on integer coordinates with `x` = column, `y` = row.
/// Parts of the aperture outside the image contribute nothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircularAperture {
    pub radius: f32,
}

impl CircularAperture {
    pub fn new(radius: f32) -> Self {
        assert!(radius > 0.0, "aperture radius must be positive");
        Self { radius }
    }
}

impl Default for CircularAperture {
    fn default() -> Self {
        Self { radius: 5.0 }
    }
}

impl Photometry for CircularAperture {
    fn measure(&self, image: &Buffer2<f32>, position: Position) -> f32 {
        let reach = self.radius.ceil() as usize;
        let radius_sq = self.radius * self.radius;

        let row_end = (position.row + reach).min(image.height().saturating_sub(1));
        let col_end = (position.col + reach).min(image.width().saturating_sub(1));

        let mut sum = 0.0;
        for row in position.row.saturating_sub(reach)..=row_end {
            let dy = row as f32 - position.row as f32;
            for col in position.col.saturating_sub(reach)..=col_end {
                let dx = col as f32 - position.col as f32;
                if dx * dx + dy * dy < radius_sq {
                    sum += *image.at(row, col);
                }
            }
        }
        sum
    }
}
