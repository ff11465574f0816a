use std::ops::Range;
use std::str::FromStr;
use std::time::Instant;

use atomic_counter::AtomicCounter;
use image::Rgb;
use log::{debug, info, trace};
use rayon::prelude::*;
use smallvec::SmallVec;

use crate::error::RenderError;
use crate::fractal::{Fractal, FractalResult};
use crate::math::Complex;
use crate::util::colouring::mean_colour;
use crate::util::{CancelHandle, Direction, GenerationCounter, Image, PixelRect, ProgressCounters, RenderSettings, Viewport};

/// Scale applied to the viewport by a single zoom step.
pub const ZOOM_FACTOR: f64 = 1.3;

/// Anti-aliasing samples of one pixel, inline up to 2x2.
pub type Samples = SmallVec<[FractalResult; 4]>;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RenderStatus {
    Completed,
    Cancelled,
}

/// A viewport-changing user action.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Command {
    Pan(Direction),
    Zoom { point: Complex, zoom_in: bool },
    ZoomRectangle(PixelRect),
}

fn parse_arguments<T: FromStr>(arguments: &str, count: usize) -> Result<Vec<T>, RenderError> {
    let values = arguments
        .split(',')
        .map(|value| value.trim().parse::<T>())
        .collect::<Result<Vec<T>, _>>()
        .map_err(|_| RenderError::InvalidArgument(format!("could not parse '{}'", arguments)))?;

    if values.len() != count {
        return Err(RenderError::InvalidArgument(format!("expected {} values in '{}'", count, arguments)));
    }

    Ok(values)
}

impl FromStr for Command {
    type Err = RenderError;

    /// `up`, `down`, `left`, `right`, `in:RE,IM`, `out:RE,IM` or `rect:I0,J0,I1,J1`.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();

        let (kind, arguments) = match value.split_once(':') {
            Some(split) => split,
            None => return Ok(Command::Pan(value.parse::<Direction>()?)),
        };

        match kind.trim().to_ascii_lowercase().as_str() {
            "in" | "out" => {
                let values = parse_arguments::<f64>(arguments, 2)?;

                Ok(Command::Zoom {
                    point: Complex::new(values[0], values[1]),
                    zoom_in: kind.trim().eq_ignore_ascii_case("in"),
                })
            }
            "rect" => {
                let values = parse_arguments::<usize>(arguments, 4)?;

                Ok(Command::ZoomRectangle(PixelRect::new(values[0], values[1], values[2], values[3])))
            }
            other => Err(RenderError::InvalidArgument(format!("unknown command '{}'", other))),
        }
    }
}

/// Evaluates sample points for one compute, borrowing only what the workers need.
struct Sampler<'a> {
    fractal: &'a dyn Fractal,
    min: Complex,
    delta_x: f64,
    delta_y: f64,
    anti_aliasing: usize,
}

impl<'a> Sampler<'a> {
    #[inline]
    fn point(&self, i: usize, j: usize) -> Complex {
        Complex::new(self.min.re + j as f64 * self.delta_x, self.min.im + i as f64 * self.delta_y)
    }

    fn samples(&self, i: usize, j: usize) -> Samples {
        let origin = self.point(i, j);

        let step_x = self.delta_x / self.anti_aliasing as f64;
        let step_y = self.delta_y / self.anti_aliasing as f64;

        let mut samples = Samples::with_capacity(self.anti_aliasing * self.anti_aliasing);

        for jj in 0..self.anti_aliasing {
            for ii in 0..self.anti_aliasing {
                let offset = Complex::new(jj as f64 * step_x, ii as f64 * step_y);
                samples.push(self.fractal.convergence(origin + offset));
            }
        }

        samples
    }
}

/// Owns the pixel grid of one escape-time fractal and keeps it in sync with
/// the viewport. Row `i` maps to the imaginary axis, column `j` to the real axis.
pub struct FractalRenderer {
    image_width: usize,
    image_height: usize,
    anti_aliasing: usize,
    fractal: Box<dyn Fractal>,
    viewport: Viewport,
    results: Vec<Samples>,
    complete: bool,
    generation: GenerationCounter,
    progress: ProgressCounters,
    thread_pool: rayon::ThreadPool,
}

impl FractalRenderer {
    /// Builds the renderer and computes the default view. A `thread_count` of
    /// zero lets rayon pick the number of threads.
    pub fn new(image_width: usize,
               image_height: usize,
               anti_aliasing: usize,
               thread_count: usize,
               fractal: Box<dyn Fractal>) -> Result<Self, RenderError> {

        if image_width == 0 || image_height == 0 {
            return Err(RenderError::InvalidArgument(format!("image size {}x{} is empty", image_width, image_height)));
        }

        if anti_aliasing == 0 {
            return Err(RenderError::InvalidArgument(String::from("anti-aliasing must be at least 1")));
        }

        let thread_pool = rayon::ThreadPoolBuilder::new()
            .num_threads(thread_count)
            .build()?;

        let viewport = fractal.default_viewport().corrected(image_width, image_height);

        let mut renderer = FractalRenderer {
            image_width,
            image_height,
            anti_aliasing,
            fractal,
            viewport,
            results: vec![Samples::new(); image_width * image_height],
            complete: false,
            generation: GenerationCounter::new(),
            progress: ProgressCounters::new(),
            thread_pool,
        };

        renderer.reset();

        Ok(renderer)
    }

    pub fn from_settings(settings: &RenderSettings) -> Result<Self, RenderError> {
        FractalRenderer::new(
            settings.image_width,
            settings.image_height,
            settings.anti_aliasing,
            settings.thread_count,
            settings.fractal.build(),
        )
    }

    #[inline]
    pub fn image_width(&self) -> usize {
        self.image_width
    }

    #[inline]
    pub fn image_height(&self) -> usize {
        self.image_height
    }

    pub fn anti_aliasing(&self) -> usize {
        self.anti_aliasing
    }

    pub fn fractal(&self) -> &dyn Fractal {
        self.fractal.as_ref()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// False after a cancelled compute, until the next full compute succeeds.
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        self.generation.cancel_handle()
    }

    pub fn progress(&self) -> ProgressCounters {
        self.progress.clone()
    }

    /// Plane size of one pixel, (real, imaginary).
    pub fn pixel_size(&self) -> (f64, f64) {
        (self.viewport.width() / self.image_width as f64, self.viewport.height() / self.image_height as f64)
    }

    fn sampler(&self) -> Sampler<'_> {
        let (delta_x, delta_y) = self.pixel_size();

        Sampler {
            fractal: self.fractal.as_ref(),
            min: self.viewport.min,
            delta_x,
            delta_y,
            anti_aliasing: self.anti_aliasing,
        }
    }

    /// Plane coordinate of the top-left sample of pixel `(i, j)`.
    pub fn point(&self, i: usize, j: usize) -> Complex {
        self.sampler().point(i, j)
    }

    pub fn samples(&self, i: usize, j: usize) -> &[FractalResult] {
        assert!(i < self.image_height && j < self.image_width, "pixel ({}, {}) outside the image", i, j);

        &self.results[i * self.image_width + j]
    }

    pub fn colour(&self, i: usize, j: usize) -> Rgb<u8> {
        mean_colour(self.samples(i, j).iter().map(|result| self.fractal.colour(result)))
    }

    pub fn image(&self) -> Image {
        let time = Instant::now();
        let width = self.image_width;
        let mut image = Image::new(width, self.image_height);

        self.thread_pool.install(|| {
            image.as_bytes_mut()
                .par_chunks_mut(3 * width)
                .enumerate()
                .for_each(|(i, row)| {
                    for j in 0..width {
                        row[3 * j..3 * j + 3].copy_from_slice(&self.colour(i, j).0);
                    }
                });
        });

        debug!("{:<14}{:>6} ms", "Colouring", time.elapsed().as_millis());

        image
    }

    /// Default view of the current fractal, recomputed.
    pub fn reset(&mut self) -> RenderStatus {
        self.viewport = self.fractal.default_viewport().corrected(self.image_width, self.image_height);
        info!("Reset to {} at {} .. {}", self.fractal.name(), self.viewport.min, self.viewport.max);

        self.compute()
    }

    pub fn set_fractal(&mut self, fractal: Box<dyn Fractal>) -> RenderStatus {
        self.fractal = fractal;
        self.reset()
    }

    pub fn set_anti_aliasing(&mut self, anti_aliasing: usize) -> Result<RenderStatus, RenderError> {
        if anti_aliasing == 0 {
            return Err(RenderError::InvalidArgument(String::from("anti-aliasing must be at least 1")));
        }

        self.anti_aliasing = anti_aliasing;
        info!("Anti-aliasing {}x{}", anti_aliasing, anti_aliasing);

        Ok(self.compute())
    }

    pub fn apply(&mut self, command: Command) -> Result<RenderStatus, RenderError> {
        match command {
            Command::Pan(direction) => Ok(self.pan(direction)),
            Command::Zoom { point, zoom_in } => Ok(self.zoom_on_point(point, zoom_in)),
            Command::ZoomRectangle(rectangle) => self.zoom_on_rectangle(rectangle),
        }
    }

    /// Shifts the view by a third of the image and recomputes only the exposed strip.
    pub fn pan(&mut self, direction: Direction) -> RenderStatus {
        let (columns, rows) = direction.offset();
        let (delta_x, delta_y) = self.pixel_size();

        let width = self.image_width;
        let height = self.image_height;
        let delta_w = width / 3;
        let delta_h = height / 3;

        self.viewport = self.viewport.translate(Complex::new(
            columns as f64 * (delta_w as f64 * delta_x),
            rows as f64 * (delta_h as f64 * delta_y),
        ));

        info!("Pan {:?} to {} .. {}", direction, self.viewport.min, self.viewport.max);

        if !self.complete {
            debug!("Grid incomplete, recomputing everything");
            return self.compute();
        }

        match direction {
            Direction::Down => {
                self.results.rotate_left(delta_h * width);
                self.compute_region(height - delta_h..height, 0..width)
            }
            Direction::Up => {
                self.results.rotate_right(delta_h * width);
                self.compute_region(0..delta_h, 0..width)
            }
            Direction::Right => {
                for row in self.results.chunks_mut(width) {
                    row.rotate_left(delta_w);
                }

                self.compute_region(0..height, width - delta_w..width)
            }
            Direction::Left => {
                for row in self.results.chunks_mut(width) {
                    row.rotate_right(delta_w);
                }

                self.compute_region(0..height, 0..delta_w)
            }
        }
    }

    pub fn zoom_on_point(&mut self, point: Complex, zoom_in: bool) -> RenderStatus {
        let factor = if zoom_in { 1.0 / ZOOM_FACTOR } else { ZOOM_FACTOR };
        let half = Complex::new(self.viewport.width() * factor / 2.0, self.viewport.height() * factor / 2.0);

        self.viewport = Viewport::new(point - half, point + half).corrected(self.image_width, self.image_height);
        info!("Zoom {} on {} to {} .. {}", if zoom_in { "in" } else { "out" }, point, self.viewport.min, self.viewport.max);

        self.compute()
    }

    pub fn zoom_on_pixel(&mut self, i: usize, j: usize, zoom_in: bool) -> RenderStatus {
        assert!(i < self.image_height && j < self.image_width, "pixel ({}, {}) outside the image", i, j);

        let point = self.point(i, j);
        self.zoom_on_point(point, zoom_in)
    }

    /// Corners may be given in any order and may lie on the far image edge.
    pub fn zoom_on_rectangle(&mut self, rectangle: PixelRect) -> Result<RenderStatus, RenderError> {
        let rectangle = rectangle.normalised();

        if rectangle.is_empty() {
            return Err(RenderError::InvalidArgument(format!("rectangle {:?} is empty", rectangle)));
        }

        if rectangle.max_i > self.image_height || rectangle.max_j > self.image_width {
            return Err(RenderError::InvalidArgument(format!("rectangle {:?} is outside the image", rectangle)));
        }

        let min = self.point(rectangle.min_i, rectangle.min_j);
        let max = self.point(rectangle.max_i, rectangle.max_j);

        self.viewport = Viewport::new(min, max).corrected(self.image_width, self.image_height);
        info!("Zoom on {:?} to {} .. {}", rectangle, self.viewport.min, self.viewport.max);

        Ok(self.compute())
    }

    /// Recomputes the whole grid.
    pub fn compute(&mut self) -> RenderStatus {
        self.compute_region(0..self.image_height, 0..self.image_width)
    }

    /// Recomputes the given rows and columns under a fresh generation. Rows
    /// finished after the generation moved on are dropped.
    fn compute_region(&mut self, rows: Range<usize>, columns: Range<usize>) -> RenderStatus {
        let time = Instant::now();
        let token = self.generation.next_token();

        self.progress.reset();

        let width = self.image_width;
        let first_row = rows.start;

        let (delta_x, delta_y) = self.pixel_size();

        let sampler = Sampler {
            fractal: self.fractal.as_ref(),
            min: self.viewport.min,
            delta_x,
            delta_y,
            anti_aliasing: self.anti_aliasing,
        };

        let progress = &self.progress;
        let results = &mut self.results[rows.start * width..rows.end * width];

        self.thread_pool.install(|| {
            results
                .par_chunks_mut(width)
                .enumerate()
                .for_each(|(k, row)| {
                    let i = first_row + k;

                    if token.is_cancelled() {
                        progress.rows_discarded.inc();
                        return;
                    }

                    let computed = columns.clone()
                        .map(|j| sampler.samples(i, j))
                        .collect::<Vec<Samples>>();

                    if token.is_cancelled() {
                        trace!("Discarding row {} of generation {}", i, token.generation());
                        progress.rows_discarded.inc();
                        return;
                    }

                    for (cell, samples) in row[columns.clone()].iter_mut().zip(computed) {
                        *cell = samples;
                    }

                    progress.rows_computed.inc();
                });
        });

        if token.is_cancelled() {
            self.complete = false;

            debug!("{:<14}{:>6} ms (cancelled, {} rows discarded)", "Compute", time.elapsed().as_millis(), self.progress.discarded());

            RenderStatus::Cancelled
        } else {
            self.complete = true;

            debug!("{:<14}{:>6} ms ({} rows)", "Compute", time.elapsed().as_millis(), self.progress.computed());

            RenderStatus::Completed
        }
    }
}
