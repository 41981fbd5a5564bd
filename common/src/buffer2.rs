use std::ops::{Deref, Index, IndexMut};

/// Interleaved data whose length does not match `width * height * channels`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("expected {expected} values for {width}x{height}x{channels}, got {actual}")]
pub struct ChannelShapeError {
    pub width: usize,
    pub height: usize,
    pub channels: usize,
    pub expected: usize,
    pub actual: usize,
}

/// Dense row-major 2-D buffer.
///
/// Addressed by `(row, col)`; row is the slow axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Buffer2<T> {
    pixels: Vec<T>,
    width: usize,
    height: usize,
}

impl<T> Buffer2<T> {
    pub fn new(width: usize, height: usize, pixels: Vec<T>) -> Self {
        assert_eq!(
            pixels.len(),
            width * height,
            "pixels length must equal width * height"
        );
        Self {
            pixels,
            width,
            height,
        }
    }

    #[inline]
    pub fn at(&self, row: usize, col: usize) -> &T {
        debug_assert!(row < self.height && col < self.width);
        &self.pixels[row * self.width + col]
    }

    #[inline]
    pub fn at_mut(&mut self, row: usize, col: usize) -> &mut T {
        debug_assert!(row < self.height && col < self.width);
        &mut self.pixels[row * self.width + col]
    }

    #[inline]
    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.height && col < self.width
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn pixels(&self) -> &[T] {
        &self.pixels
    }

    #[inline]
    pub fn into_vec(self) -> Vec<T> {
        self.pixels
    }
}

impl<T: Copy> Buffer2<T> {
    /// Build a buffer from interleaved `height x width x channels` data,
    /// keeping channel 0.
    pub fn try_from_channels(
        width: usize,
        height: usize,
        channels: usize,
        data: &[T],
    ) -> Result<Self, ChannelShapeError> {
        let expected = width * height * channels;
        if channels == 0 || data.len() != expected {
            return Err(ChannelShapeError {
                width,
                height,
                channels,
                expected,
                actual: data.len(),
            });
        }

        let pixels = data.chunks_exact(channels).map(|px| px[0]).collect();
        Ok(Self::new(width, height, pixels))
    }

    /// Square window of side `2 * radius + 1` centred on `(row, col)`.
    ///
    /// The window must lie fully inside the buffer.
    pub fn window(&self, row: usize, col: usize, radius: usize) -> Window<'_, T> {
        assert!(
            row >= radius && col >= radius,
            "window at ({row}, {col}) with radius {radius} crosses the top-left edge"
        );
        assert!(
            row + radius < self.height && col + radius < self.width,
            "window at ({row}, {col}) with radius {radius} crosses the bottom-right edge"
        );
        Window {
            buffer: self,
            top: row - radius,
            left: col - radius,
            side: 2 * radius + 1,
        }
    }
}

impl<T: Default + Clone> Buffer2<T> {
    pub fn new_default(width: usize, height: usize) -> Self {
        Self::new_filled(width, height, T::default())
    }
}

impl<T: Clone> Buffer2<T> {
    pub fn new_filled(width: usize, height: usize, value: T) -> Self {
        Self {
            pixels: vec![value; width * height],
            width,
            height,
        }
    }
}

impl<T> Index<(usize, usize)> for Buffer2<T> {
    type Output = T;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        &self.pixels[row * self.width + col]
    }
}

impl<T> IndexMut<(usize, usize)> for Buffer2<T> {
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Self::Output {
        &mut self.pixels[row * self.width + col]
    }
}

impl<T> Deref for Buffer2<T> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.pixels
    }
}

// ============================================================================
// Window
// ============================================================================

/// Borrowed square neighbourhood of a [`Buffer2`].
#[derive(Debug, Clone, Copy)]
pub struct Window<'a, T> {
    buffer: &'a Buffer2<T>,
    top: usize,
    left: usize,
    side: usize,
}

impl<'a, T: Copy> Window<'a, T> {
    /// Values in row-major order with their absolute `(row, col)`.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, T)> + 'a {
        let buffer = self.buffer;
        let (top, left, side) = (self.top, self.left, self.side);
        (top..top + side)
            .flat_map(move |row| (left..left + side).map(move |col| (row, col)))
            .map(move |(row, col)| (row, col, *buffer.at(row, col)))
    }
}

impl Window<'_, f32> {
    pub fn min(&self) -> f32 {
        self.iter().map(|(_, _, v)| v).fold(f32::INFINITY, f32::min)
    }

    pub fn max(&self) -> f32 {
        self.iter().map(|(_, _, v)| v).fold(f32::NEG_INFINITY, f32::max)
    }

    pub fn max_abs(&self) -> f32 {
        self.iter().map(|(_, _, v)| v.abs()).fold(0.0, f32::max)
    }

    /// Position of the largest absolute value; the first one in row-major
    /// order wins ties.
    pub fn argmax_abs(&self) -> (usize, usize) {
        let mut best = (self.top, self.left);
        let mut best_value = f32::NEG_INFINITY;
        for (row, col, v) in self.iter() {
            if v.abs() > best_value {
                best_value = v.abs();
                best = (row, col);
            }
        }
        best
    }
}
