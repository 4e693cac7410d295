//! Injected progress reporting for the build-time validation pass.
//!
//! Progress is observability only, not part of the pipeline contract, so the
//! interface is a trait with no-op defaults: callers that do not care (and
//! tests) pass [`NoProgress`], long-running builds pass [`LogProgress`].

use tracing::info;

/// Receiver for per-item progress during dataset construction.
///
/// All methods default to no-ops. Implementations must be `Send + Sync`
/// because the dataset constructor takes `&dyn Progress`.
pub trait Progress: Send + Sync {
    /// Called once before the pass starts, with the total item count.
    fn begin(&self, _total: usize, _desc: &str) {}

    /// Called after each item is checked. `index` is zero-based.
    fn update(&self, _index: usize, _total: usize) {}

    /// Called once after the pass completes successfully.
    fn finish(&self) {}
}

/// Progress sink that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl Progress for NoProgress {}

/// Progress sink that emits `tracing` events every `stride` items.
#[derive(Debug, Clone)]
pub struct LogProgress {
    stride: usize,
}

impl LogProgress {
    pub fn new(stride: usize) -> Self {
        Self {
            stride: stride.max(1),
        }
    }
}

impl Default for LogProgress {
    fn default() -> Self {
        Self::new(100)
    }
}

impl Progress for LogProgress {
    fn begin(&self, total: usize, desc: &str) {
        info!(total, desc, "checking dataset");
    }

    fn update(&self, index: usize, total: usize) {
        let done = index + 1;
        if done % self.stride == 0 || done == total {
            info!(done, total, "checked");
        }
    }

    fn finish(&self) {
        info!("dataset check complete");
    }
}
