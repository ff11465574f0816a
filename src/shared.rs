use std::sync::Arc;

use image::Rgb;
use parking_lot::RwLock;

use crate::error::RenderError;
use crate::renderer::{Command, FractalRenderer, RenderStatus};
use crate::util::{CancelHandle, Image, ProgressCounters, Viewport};

/// Renderer shared between a presentation thread reading colours and a
/// command thread changing the view. Commands abandon the compute in flight
/// before waiting for the lock.
#[derive(Clone)]
pub struct SharedRenderer {
    renderer: Arc<RwLock<FractalRenderer>>,
    cancel: CancelHandle,
    progress: ProgressCounters,
}

impl SharedRenderer {
    pub fn new(renderer: FractalRenderer) -> Self {
        let cancel = renderer.cancel_handle();
        let progress = renderer.progress();

        SharedRenderer {
            renderer: Arc::new(RwLock::new(renderer)),
            cancel,
            progress,
        }
    }

    pub fn apply(&self, command: Command) -> Result<RenderStatus, RenderError> {
        self.cancel.cancel();

        let mut renderer = self.renderer.write();
        renderer.apply(command)
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Readable without the lock, also while a compute runs.
    pub fn progress(&self) -> &ProgressCounters {
        &self.progress
    }

    pub fn colour(&self, i: usize, j: usize) -> Rgb<u8> {
        self.renderer.read().colour(i, j)
    }

    pub fn image(&self) -> Image {
        self.renderer.read().image()
    }

    pub fn viewport(&self) -> Viewport {
        self.renderer.read().viewport()
    }

    pub fn is_complete(&self) -> bool {
        self.renderer.read().is_complete()
    }
}
