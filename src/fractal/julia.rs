use image::Rgb;

use crate::math::Complex;
use crate::util::colouring::{colour_between, escape_factor, BLACK, DARK_BLUE, WHITE};
use crate::util::Viewport;

use super::{ConvergenceStatus, Fractal, FractalResult};

/// Filled Julia set of `z² + c`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Julia {
    pub c: Complex,
}

impl Julia {
    pub fn new(c: Complex) -> Self {
        Julia {
            c
        }
    }
}

impl Default for Julia {
    fn default() -> Self {
        Julia::new(Complex::new(-0.8, 0.156))
    }
}

impl Fractal for Julia {
    fn name(&self) -> &str {
        "julia"
    }

    fn default_viewport(&self) -> Viewport {
        Viewport::new(Complex::new(-1.6, -1.0), Complex::new(1.6, 1.0))
    }

    fn maximum_iteration(&self) -> usize {
        200
    }

    fn maximum_square_modulus(&self) -> f64 {
        4.0
    }

    #[inline]
    fn iterate(&self, z: Complex, _z0: Complex) -> Complex {
        z.square() + self.c
    }

    fn colour(&self, result: &FractalResult) -> Rgb<u8> {
        match result.status {
            ConvergenceStatus::Diverged => {
                colour_between(DARK_BLUE, WHITE, escape_factor(result.iterations, self.maximum_iteration()))
            }
            _ => BLACK,
        }
    }
}
