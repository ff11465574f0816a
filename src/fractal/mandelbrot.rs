use image::Rgb;

use crate::math::Complex;
use crate::util::colouring::{colour_between, escape_factor, BLACK, DARK_BLUE, WHITE};
use crate::util::Viewport;

use super::{ConvergenceStatus, Fractal, FractalResult};

#[derive(Debug, Copy, Clone, Default)]
pub struct Mandelbrot;

impl Mandelbrot {
    pub fn new() -> Self {
        Mandelbrot
    }
}

impl Fractal for Mandelbrot {
    fn name(&self) -> &str {
        "mandelbrot"
    }

    fn default_viewport(&self) -> Viewport {
        Viewport::new(Complex::new(-2.0, -1.0), Complex::new(1.0, 0.0))
    }

    fn maximum_iteration(&self) -> usize {
        100
    }

    fn maximum_square_modulus(&self) -> f64 {
        4.0
    }

    #[inline]
    fn iterate(&self, z: Complex, z0: Complex) -> Complex {
        z.square() + z0
    }

    fn colour(&self, result: &FractalResult) -> Rgb<u8> {
        match result.status {
            ConvergenceStatus::Converged | ConvergenceStatus::Unknown => BLACK,
            ConvergenceStatus::Diverged => {
                colour_between(DARK_BLUE, WHITE, escape_factor(result.iterations, self.maximum_iteration()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_is_a_fixpoint() {
        let result = Mandelbrot.convergence(Complex::ZERO);

        assert_eq!(result.status, ConvergenceStatus::Converged);
        assert_eq!(result.iterations, 0);
        assert_eq!(result.point, Complex::ZERO);
        assert_eq!(Mandelbrot.colour(&result), BLACK);
    }

    #[test]
    fn far_point_escapes_immediately() {
        let z0 = Complex::new(2.0, 2.0);
        let result = Mandelbrot.convergence(z0);

        assert_eq!(result.status, ConvergenceStatus::Diverged);
        assert_eq!(result.iterations, 0);
        assert_eq!(result.point, z0);
        assert_eq!(Mandelbrot.colour(&result), DARK_BLUE);
    }

    #[test]
    fn interior_point_exhausts_budget() {
        // period-2 bulb, oscillates between -1 and 0
        let result = Mandelbrot.convergence(Complex::new(-1.0, 0.0));

        assert_eq!(result.status, ConvergenceStatus::Unknown);
        assert_eq!(result.iterations, 100);
        assert_eq!(Mandelbrot.colour(&result), BLACK);
    }

    #[test]
    fn slow_escape_is_brighter() {
        let quick = Mandelbrot.convergence(Complex::new(1.0, 1.0));
        let slow = Mandelbrot.convergence(Complex::new(0.26, 0.0));

        assert_eq!(quick.status, ConvergenceStatus::Diverged);
        assert_eq!(slow.status, ConvergenceStatus::Diverged);
        assert!(slow.iterations > quick.iterations);
        assert!(Mandelbrot.colour(&slow)[0] > Mandelbrot.colour(&quick)[0]);
    }
}
