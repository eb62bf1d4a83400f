use thiserror::Error;

use crate::cancel::Cancelled;

/// Discovery only fails on cancellation; unreadable or malformed files are
/// left out of the result instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DiscoveryError {
    #[error("discovery cancelled")]
    Cancelled,
}

impl From<Cancelled> for DiscoveryError {
    fn from(_: Cancelled) -> Self {
        DiscoveryError::Cancelled
    }
}
