//! Cooperative cancellation
//!
//! A [`CancellationToken`] is polled by the walker and the discoverer before
//! every directory read. Clones share the same flag, so the owner can keep one
//! handle and pass another down into a long-running discovery.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Error returned once a cancellation has been observed
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("operation cancelled")]
pub struct Cancelled;

/// Shared cancellation flag
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Every clone of this token observes it.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Returns `Err(Cancelled)` if cancellation was requested
    pub fn check(&self) -> Result<(), Cancelled> {
        if self.is_cancelled() {
            Err(Cancelled)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_passes_until_cancelled() {
        let token = CancellationToken::new();
        assert_eq!(token.check(), Ok(()));

        token.cancel();
        assert_eq!(token.check(), Err(Cancelled));
    }

    #[test]
    fn clones_share_the_same_flag() {
        let owner = CancellationToken::new();
        let worker = owner.clone();

        owner.cancel();

        assert!(worker.is_cancelled());
    }
}
