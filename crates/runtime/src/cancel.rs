use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cooperative cancellation pair.
///
/// The guard is the single owner of the right to cancel: `cancel` consumes it,
/// and dropping it cancels as well, so the signal fires exactly once per
/// lifecycle and can never dangle across remounts.
pub fn cancellation() -> (CancelGuard, CancelToken) {
    let flag = Arc::new(AtomicBool::new(false));
    (
        CancelGuard {
            flag: Arc::clone(&flag),
        },
        CancelToken { flag },
    )
}

#[derive(Debug)]
pub struct CancelGuard {
    flag: Arc<AtomicBool>,
}

impl CancelGuard {
    pub fn cancel(self) {
        // Drop does the store.
    }
}

impl Drop for CancelGuard {
    fn drop(&mut self) {
        self.flag.store(true, Ordering::Release);
    }
}

#[derive(Debug, Clone)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }
}
