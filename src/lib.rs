pub mod error;
pub mod fractal;
pub mod math;
pub mod renderer;
pub mod shared;
pub mod util;

pub use error::{MathError, RenderError};
pub use fractal::{ConvergenceStatus, Fractal, FractalResult, Julia, Mandelbrot};
pub use math::{Complex, Polynom};
pub use renderer::{Command, FractalRenderer, RenderStatus};
pub use shared::SharedRenderer;
pub use util::{Direction, Image, PixelRect, RenderSettings, Viewport};
