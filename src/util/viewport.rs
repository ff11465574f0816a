use std::str::FromStr;

use crate::error::RenderError;
use crate::math::Complex;

/// Relative difference between the two pixel scales below which the
/// aspect ratio is considered already matched.
const ASPECT_TOLERANCE: f64 = 1e-12;

/// Visible rectangle of the complex plane, `max` strictly above `min` on both axes.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Viewport {
    pub min: Complex,
    pub max: Complex
}

impl Viewport {
    pub fn new(min: Complex, max: Complex) -> Self {
        Viewport {
            min,
            max
        }
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.max.re - self.min.re
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.max.im - self.min.im
    }

    pub fn centre(&self) -> Complex {
        (self.min + self.max).scale(0.5)
    }

    pub fn is_valid(&self) -> bool {
        self.width() > 0.0 && self.height() > 0.0
    }

    pub fn translate(&self, offset: Complex) -> Self {
        Viewport::new(self.min + offset, self.max + offset)
    }

    /// Widens the under-scaled axis symmetrically so that both axes have
    /// the same number of pixels per unit.
    pub fn corrected(&self, image_width: usize, image_height: usize) -> Self {
        let size_x = self.width();
        let size_y = self.height();

        let ratio_width = image_width as f64 / size_x;
        let ratio_height = image_height as f64 / size_y;

        if (ratio_width - ratio_height).abs() <= ASPECT_TOLERANCE * ratio_width.max(ratio_height) {
            return *self;
        }

        if ratio_width > ratio_height {
            let margin = (image_width as f64 / ratio_height - size_x) / 2.0;

            Viewport::new(self.min.add_re(-margin), self.max.add_re(margin))
        } else {
            let margin = (image_height as f64 / ratio_width - size_y) / 2.0;

            Viewport::new(self.min.add_im(-margin), self.max.add_im(margin))
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    /// Unit step as (columns, rows).
    pub fn offset(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0)
        }
    }
}

impl FromStr for Direction {
    type Err = RenderError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            other => Err(RenderError::InvalidArgument(format!("unknown direction '{}'", other)))
        }
    }
}

/// Two pixel corners given as (row, column).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PixelRect {
    pub min_i: usize,
    pub min_j: usize,
    pub max_i: usize,
    pub max_j: usize
}

impl PixelRect {
    pub fn new(min_i: usize, min_j: usize, max_i: usize, max_j: usize) -> Self {
        PixelRect {
            min_i,
            min_j,
            max_i,
            max_j
        }
    }

    /// Same rectangle with the corners ordered.
    pub fn normalised(&self) -> Self {
        PixelRect::new(
            self.min_i.min(self.max_i),
            self.min_j.min(self.max_j),
            self.min_i.max(self.max_i),
            self.min_j.max(self.max_j),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.min_i == self.max_i || self.min_j == self.max_j
    }
}
