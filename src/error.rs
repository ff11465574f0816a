//! Error types for the algebra layer and the viewport engine.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MathError {
    #[error("Division by zero")]
    DivisionByZero,

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Math(#[from] MathError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid settings: {0}")]
    Settings(#[from] config::ConfigError),

    #[error("Could not write image: {0}")]
    Image(#[from] image::ImageError),

    #[error("Could not build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
