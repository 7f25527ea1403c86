use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

/// Cooperative cancellation check polled by long scans between items.
pub trait Cancel {
    fn is_cancelled(&self) -> bool;
}

/// Shared flag flipped by whoever owns the stale request.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }
}

impl Cancel for CancelToken {
    fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

/// Never cancels.
#[derive(Clone, Copy, Debug, Default)]
pub struct Uncancellable;

impl Cancel for Uncancellable {
    fn is_cancelled(&self) -> bool {
        false
    }
}

impl<F> Cancel for F
where
    F: Fn() -> bool,
{
    fn is_cancelled(&self) -> bool {
        self()
    }
}
