//! Seam for the external model that turns images into prediction grids.

use common::Buffer2;

use crate::frame::PredictionGrid;

/// Inference collaborator: one [`PredictionGrid`] per input image, same order.
pub trait GridPredictor {
    fn predict(&mut self, images: &[Buffer2<f32>]) -> anyhow::Result<Vec<PredictionGrid>>;
}

impl<F> GridPredictor for F
where
    F: FnMut(&[Buffer2<f32>]) -> anyhow::Result<Vec<PredictionGrid>>,
{
    fn predict(&mut self, images: &[Buffer2<f32>]) -> anyhow::Result<Vec<PredictionGrid>> {
        self(images)
    }
}
