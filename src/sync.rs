//! Write one version to every sync candidate

use std::path::PathBuf;

use tracing::{debug, warn};

use crate::cancel::{CancellationToken, Cancelled};
use crate::discovery::{DiscoveryResult, SyncCandidate};
use crate::version::{FileConfig, VersionFileError, VersionStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStatus {
    Updated,
    /// The candidate already carried the version; nothing was written
    Unchanged,
}

/// Result of syncing a single candidate
#[derive(Debug)]
pub struct SyncOutcome {
    pub path: PathBuf,
    pub result: Result<SyncStatus, VersionFileError>,
}

impl SyncOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Write `version` to each candidate independently.
///
/// A failing file does not stop the others and nothing is rolled back.
/// Cancellation is checked before each file; once observed the loop stops and
/// the outcomes collected so far are dropped.
pub fn apply(
    store: &VersionStore,
    candidates: &[SyncCandidate],
    version: &str,
    cancel: &CancellationToken,
) -> Result<Vec<SyncOutcome>, Cancelled> {
    let mut outcomes = Vec::with_capacity(candidates.len());

    for candidate in candidates {
        cancel.check()?;

        let result = if candidate.version == version {
            debug!("{} already at {}", candidate.path.display(), version);
            Ok(SyncStatus::Unchanged)
        } else {
            store
                .write(&candidate.file_config(), version, cancel)
                .map(|()| SyncStatus::Updated)
        };

        match &result {
            Err(e) if e.is_cancelled() => return Err(Cancelled),
            Err(e) => warn!("Failed to update {}: {}", candidate.path.display(), e),
            Ok(_) => {}
        }

        outcomes.push(SyncOutcome {
            path: candidate.path.clone(),
            result,
        });
    }

    Ok(outcomes)
}

/// Bring every file of a discovery result to `version`.
///
/// The root marker is never a sync candidate, so when `version` differs from
/// it the marker is rewritten first and reported as the first outcome. The
/// candidates follow through [`apply`].
pub fn apply_to_result(
    store: &VersionStore,
    result: &DiscoveryResult,
    version: &str,
    cancel: &CancellationToken,
) -> Result<Vec<SyncOutcome>, Cancelled> {
    let mut outcomes = Vec::with_capacity(result.sync_candidates().len() + 1);

    if let Some(root) = result.root_module()
        && root.version != version
    {
        cancel.check()?;
        let written = store.write(&FileConfig::raw(&root.path), version, cancel);
        match &written {
            Err(e) if e.is_cancelled() => return Err(Cancelled),
            Err(e) => warn!("Failed to update {}: {}", root.path.display(), e),
            Ok(()) => {}
        }
        outcomes.push(SyncOutcome {
            path: root.path.clone(),
            result: written.map(|()| SyncStatus::Updated),
        });
    }

    outcomes.extend(apply(store, result.sync_candidates(), version, cancel)?);
    Ok(outcomes)
}
