//! Cooperative cancellation of a training run.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

/// Shared flag asking a training run to stop.
///
/// Clones share the same flag. The engine only looks at it between generations, so a
/// run always finishes the generation it is in.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}
