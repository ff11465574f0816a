pub mod cancellation;
pub mod colouring;
pub mod image;
pub mod progress;
pub mod settings;
pub mod viewport;

pub use cancellation::{CancelHandle, GenerationCounter, RenderToken};
pub use self::image::Image;
pub use progress::ProgressCounters;
pub use settings::{FractalKind, RenderSettings};
pub use viewport::{Direction, PixelRect, Viewport};

pub type ComplexFixed<T> = num_complex::Complex<T>;
