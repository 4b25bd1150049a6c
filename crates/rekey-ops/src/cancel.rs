//! Cooperative cancellation.
//!
//! The pipeline polls an [`enough::Stop`] token between stages. Callers that
//! never cancel pass [`enough::Unstoppable`]; a UI that needs an abort button
//! hands a [`CancelFlag`] clone to the worker and flips the original.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use enough::{Stop, StopReason};

/// Shared cancel switch.
///
/// ```rust
/// use enough::Stop;
/// use rekey_ops::CancelFlag;
///
/// let flag = CancelFlag::new();
/// let worker = flag.clone();
/// assert!(worker.check().is_ok());
/// flag.cancel();
/// assert!(worker.check().is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    /// Creates an unset flag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation; seen by every clone.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// `true` once [`CancelFlag::cancel`] has been called.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

impl Stop for CancelFlag {
    fn check(&self) -> Result<(), StopReason> {
        if self.is_cancelled() {
            Err(StopReason::Cancelled)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clone_shares_state() {
        let a = CancelFlag::new();
        let b = a.clone();
        assert!(!b.is_cancelled());
        a.cancel();
        assert!(b.is_cancelled());
        assert!(matches!(b.check(), Err(StopReason::Cancelled)));
    }

    #[test]
    fn test_cancel_from_other_thread() {
        let flag = CancelFlag::new();
        let remote = flag.clone();
        std::thread::spawn(move || remote.cancel()).join().unwrap();
        assert!(flag.check().is_err());
    }
}
