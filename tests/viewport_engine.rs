use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use image::Rgb;
use parking_lot::Mutex;

use fractal_cells::util::CancelHandle;
use fractal_cells::{Complex, Direction, Fractal, FractalRenderer, FractalResult, Mandelbrot, RenderStatus, Viewport};

/// Mandelbrot on a square power-of-two view, so pixel coordinates are exact.
struct Dyadic;

impl Fractal for Dyadic {
    fn name(&self) -> &str {
        "dyadic"
    }

    fn default_viewport(&self) -> Viewport {
        Viewport::new(Complex::new(-2.0, -2.0), Complex::new(2.0, 2.0))
    }

    fn maximum_iteration(&self) -> usize {
        Mandelbrot.maximum_iteration()
    }

    fn maximum_square_modulus(&self) -> f64 {
        Mandelbrot.maximum_square_modulus()
    }

    fn iterate(&self, z: Complex, z0: Complex) -> Complex {
        Mandelbrot.iterate(z, z0)
    }

    fn colour(&self, result: &FractalResult) -> Rgb<u8> {
        Mandelbrot.colour(result)
    }
}

/// Cancels its own compute on the first sample once armed.
struct SelfCancelling {
    armed: Arc<AtomicBool>,
    handle: Arc<Mutex<Option<CancelHandle>>>,
}

impl Fractal for SelfCancelling {
    fn name(&self) -> &str {
        "self-cancelling"
    }

    fn default_viewport(&self) -> Viewport {
        Dyadic.default_viewport()
    }

    fn maximum_iteration(&self) -> usize {
        Dyadic.maximum_iteration()
    }

    fn maximum_square_modulus(&self) -> f64 {
        Dyadic.maximum_square_modulus()
    }

    fn iterate(&self, z: Complex, z0: Complex) -> Complex {
        Dyadic.iterate(z, z0)
    }

    fn convergence(&self, z0: Complex) -> FractalResult {
        if self.armed.load(Ordering::SeqCst) {
            if let Some(handle) = self.handle.lock().as_ref() {
                handle.cancel();
            }
        }

        Dyadic.convergence(z0)
    }

    fn colour(&self, result: &FractalResult) -> Rgb<u8> {
        Dyadic.colour(result)
    }
}

fn dyadic(anti_aliasing: usize) -> FractalRenderer {
    FractalRenderer::new(64, 64, anti_aliasing, 4, Box::new(Dyadic)).unwrap()
}

fn assert_same_grid(a: &FractalRenderer, b: &FractalRenderer) {
    assert_eq!(a.viewport(), b.viewport());

    for i in 0..a.image_height() {
        for j in 0..a.image_width() {
            assert_eq!(a.samples(i, j), b.samples(i, j), "pixel ({}, {})", i, j);
        }
    }
}

#[test]
fn pan_reuses_grid_exactly() {
    for &direction in [Direction::Up, Direction::Down, Direction::Left, Direction::Right].iter() {
        let mut panned = dyadic(2);
        assert_eq!(panned.pan(direction), RenderStatus::Completed);

        let mut fresh = dyadic(2);
        fresh.pan(direction);
        fresh.compute();

        assert_same_grid(&panned, &fresh);

        // a second pan keeps reusing rows that were themselves reused
        panned.pan(direction);
        fresh.pan(direction);
        fresh.compute();

        assert_same_grid(&panned, &fresh);
    }
}

#[test]
fn pan_round_trip_restores_bounds_and_pixels() {
    let mut renderer = dyadic(2);
    let start = renderer.viewport();
    let before = renderer.image();

    renderer.pan(Direction::Right);
    assert_eq!(renderer.viewport().min, Complex::new(-2.0 + 21.0 / 16.0, -2.0));

    renderer.pan(Direction::Left);
    assert_eq!(renderer.viewport(), start);

    renderer.pan(Direction::Up);
    renderer.pan(Direction::Down);
    assert_eq!(renderer.viewport(), start);

    assert_eq!(renderer.image(), before);
}

#[test]
fn cancelled_compute_leaves_grid_untouched() {
    let armed = Arc::new(AtomicBool::new(false));
    let handle = Arc::new(Mutex::new(None));

    let fractal = SelfCancelling {
        armed: Arc::clone(&armed),
        handle: Arc::clone(&handle),
    };

    let mut renderer = FractalRenderer::new(64, 64, 1, 4, Box::new(fractal)).unwrap();
    *handle.lock() = Some(renderer.cancel_handle());

    let before = renderer.image();
    let progress = renderer.progress();

    armed.store(true, Ordering::SeqCst);
    assert_eq!(renderer.zoom_on_point(Complex::new(-1.0, 0.0), true), RenderStatus::Cancelled);

    assert!(!renderer.is_complete());
    assert_eq!(progress.computed(), 0);
    assert_eq!(progress.discarded(), 64);
    assert_eq!(renderer.image(), before);

    // the stale grid is not reused by the next pan
    armed.store(false, Ordering::SeqCst);
    assert_eq!(renderer.pan(Direction::Left), RenderStatus::Completed);
    assert!(renderer.is_complete());
    assert_eq!(progress.computed(), 64);

    let mut fresh = FractalRenderer::new(64, 64, 1, 4, Box::new(Dyadic)).unwrap();
    fresh.zoom_on_point(Complex::new(-1.0, 0.0), true);
    fresh.pan(Direction::Left);
    fresh.compute();

    assert_same_grid(&renderer, &fresh);
}

#[test]
fn external_cancel_does_not_block_later_commands() {
    let mut renderer = dyadic(1);
    let handle = renderer.cancel_handle();

    handle.cancel();

    assert_eq!(renderer.pan(Direction::Down), RenderStatus::Completed);
    assert!(renderer.is_complete());
}
