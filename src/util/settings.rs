use std::str::FromStr;

use config::{Config, ConfigError};

use crate::error::RenderError;
use crate::fractal::{Fractal, Julia, Mandelbrot};
use crate::math::Complex;

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum FractalKind {
    Mandelbrot,
    Julia(Complex),
}

impl FractalKind {
    pub fn build(&self) -> Box<dyn Fractal> {
        match *self {
            FractalKind::Mandelbrot => Box::new(Mandelbrot::new()),
            FractalKind::Julia(c) => Box::new(Julia::new(c)),
        }
    }
}

impl FromStr for FractalKind {
    type Err = RenderError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "mandelbrot" => Ok(FractalKind::Mandelbrot),
            "julia" => Ok(FractalKind::Julia(Julia::default().c)),
            other => Err(RenderError::InvalidArgument(format!("unknown fractal '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderSettings {
    pub image_width: usize,
    pub image_height: usize,
    pub anti_aliasing: usize,
    pub thread_count: usize,
    pub fractal: FractalKind,
    pub output: String,
}

impl Default for RenderSettings {
    fn default() -> Self {
        RenderSettings {
            image_width: 1200,
            image_height: 800,
            anti_aliasing: 2,
            thread_count: num_cpus::get(),
            fractal: FractalKind::Mandelbrot,
            output: String::from("output.png"),
        }
    }
}

impl RenderSettings {
    /// Reads the known keys, missing ones keep their default.
    pub fn from_config(settings: &Config) -> Result<Self, RenderError> {
        let defaults = RenderSettings::default();

        let image_width = positive(settings, "image_width", defaults.image_width)?;
        let image_height = positive(settings, "image_height", defaults.image_height)?;
        let anti_aliasing = positive(settings, "anti_aliasing", defaults.anti_aliasing)?;
        let thread_count = positive(settings, "thread_count", defaults.thread_count)?;

        let mut fractal = match optional(settings.get_str("fractal"))? {
            Some(name) => name.parse::<FractalKind>()?,
            None => defaults.fractal,
        };

        if let FractalKind::Julia(ref mut c) = fractal {
            if let Some(re) = optional(settings.get_float("julia_real"))? {
                c.re = re;
            }

            if let Some(im) = optional(settings.get_float("julia_imag"))? {
                c.im = im;
            }
        }

        let output = optional(settings.get_str("output"))?.unwrap_or(defaults.output);

        Ok(RenderSettings {
            image_width,
            image_height,
            anti_aliasing,
            thread_count,
            fractal,
            output,
        })
    }

    pub fn from_file(path: &str) -> Result<Self, RenderError> {
        let mut settings = Config::default();
        settings.merge(config::File::with_name(path))?;

        RenderSettings::from_config(&settings)
    }
}

fn optional<T>(value: Result<T, ConfigError>) -> Result<Option<T>, RenderError> {
    match value {
        Ok(value) => Ok(Some(value)),
        Err(ConfigError::NotFound(_)) => Ok(None),
        Err(error) => Err(error.into()),
    }
}

fn positive(settings: &Config, key: &str, default: usize) -> Result<usize, RenderError> {
    match optional(settings.get_int(key))? {
        Some(value) if value > 0 => Ok(value as usize),
        Some(value) => Err(RenderError::InvalidArgument(format!("{} must be positive, got {}", key, value))),
        None => Ok(default),
    }
}
