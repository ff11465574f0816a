use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Monotonic compute generation. Starting a compute takes a fresh token;
/// anything that advances the counter afterwards invalidates that token.
#[derive(Debug, Default)]
pub struct GenerationCounter {
    current: Arc<AtomicUsize>,
}

impl GenerationCounter {
    pub fn new() -> Self {
        GenerationCounter {
            current: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn next_token(&self) -> RenderToken {
        let generation = self.current.fetch_add(1, Ordering::SeqCst) + 1;

        RenderToken {
            generation,
            current: Arc::clone(&self.current),
        }
    }

    pub fn current(&self) -> usize {
        self.current.load(Ordering::SeqCst)
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        CancelHandle {
            current: Arc::clone(&self.current),
        }
    }
}

/// Ticket held by the workers of one compute.
#[derive(Debug, Clone)]
pub struct RenderToken {
    generation: usize,
    current: Arc<AtomicUsize>,
}

impl RenderToken {
    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn is_cancelled(&self) -> bool {
        self.current.load(Ordering::Relaxed) != self.generation
    }
}

/// Cloneable, thread-safe handle that abandons the compute in flight.
#[derive(Debug, Clone)]
pub struct CancelHandle {
    current: Arc<AtomicUsize>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.current.fetch_add(1, Ordering::SeqCst);
    }
}
