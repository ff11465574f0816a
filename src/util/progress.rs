use atomic_counter::{AtomicCounter, RelaxedCounter};

use std::sync::Arc;

/// Row counters shared with the worker threads, readable while a compute runs.
#[derive(Clone)]
pub struct ProgressCounters {
    pub rows_computed: Arc<RelaxedCounter>,
    pub rows_discarded: Arc<RelaxedCounter>,
}

impl ProgressCounters {
    pub fn new() -> ProgressCounters {
        ProgressCounters {
            rows_computed: Arc::new(RelaxedCounter::new(0)),
            rows_discarded: Arc::new(RelaxedCounter::new(0)),
        }
    }

    // Cleared at the start of each compute
    pub fn reset(&self) {
        self.rows_computed.reset();
        self.rows_discarded.reset();
    }

    pub fn computed(&self) -> usize {
        self.rows_computed.get()
    }

    pub fn discarded(&self) -> usize {
        self.rows_discarded.get()
    }
}

impl Default for ProgressCounters {
    fn default() -> Self {
        ProgressCounters::new()
    }
}
