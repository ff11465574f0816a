use image::Rgb;

use crate::math::Complex;
use crate::util::Viewport;

mod julia;
mod mandelbrot;

pub use julia::Julia;
pub use mandelbrot::Mandelbrot;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConvergenceStatus {
    Unknown,
    Converged,
    Diverged,
}

/// Outcome of the escape-time loop for one sample point.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FractalResult {
    pub point: Complex,
    pub iterations: usize,
    pub status: ConvergenceStatus,
}

impl FractalResult {
    pub fn new(point: Complex, iterations: usize, status: ConvergenceStatus) -> Self {
        FractalResult {
            point,
            iterations,
            status,
        }
    }
}

/// An escape-time formula. Implementors must be cheap to share between the
/// row workers.
pub trait Fractal: Send + Sync {
    fn name(&self) -> &str;

    fn default_viewport(&self) -> Viewport;

    fn maximum_iteration(&self) -> usize;

    fn maximum_square_modulus(&self) -> f64;

    /// One step of the recurrence, `z0` being the sampled point.
    fn iterate(&self, z: Complex, z0: Complex) -> Complex;

    fn convergence(&self, z0: Complex) -> FractalResult {
        let maximum_iteration = self.maximum_iteration();
        let maximum_square_modulus = self.maximum_square_modulus();

        let mut z = z0;

        for n in 0..maximum_iteration {
            let next = self.iterate(z, z0);

            if next.square_modulus() >= maximum_square_modulus {
                return FractalResult::new(z, n, ConvergenceStatus::Diverged);
            }

            if next == z {
                return FractalResult::new(next, n, ConvergenceStatus::Converged);
            }

            z = next;
        }

        FractalResult::new(z, maximum_iteration, ConvergenceStatus::Unknown)
    }

    fn colour(&self, result: &FractalResult) -> Rgb<u8>;
}
