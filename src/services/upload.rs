//! Upload pipeline — sequential batch processing of attachments.
//!
//! DESIGN
//! ======
//! Admission is all-or-nothing over the whole batch: a partially oversized
//! batch is rejected entirely, before any entry is appended or any byte is
//! sent. Admitted files are processed strictly one at a time: each gets its
//! timeline entry the moment it is queued, and that entry reaches a
//! terminal status before the next file starts. One file failing does not
//! abort the rest.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::gateway::config::REQUEST_TIMEOUT_SECS;
use crate::gateway::{Gateway, PendingFile, UploadError};
use crate::quota;
use crate::state::SessionState;
use crate::timeline::UploadStatus;

/// What a batch submission came to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchOutcome {
    /// Quota rejected the whole batch; no uploads, no entries.
    LimitExceeded,
    Completed { succeeded: usize, failed: usize },
}

/// Upload a batch of files, one timeline entry per file.
pub async fn submit_batch(
    state: &SessionState,
    gateway: &Arc<dyn Gateway>,
    files: Vec<PendingFile>,
) -> BatchOutcome {
    {
        let timeline = state.timeline();
        if !quota::can_accept_batch(&timeline, &files) {
            warn!(batch = files.len(), "upload: batch rejected by quota");
            return BatchOutcome::LimitExceeded;
        }
    }

    let mut succeeded = 0;
    let mut failed = 0;
    for file in &files {
        let entry = state.timeline().push_file(&file.name);
        info!(file = %file.name, bytes = file.size(), "upload: queued");

        let result = match tokio::time::timeout(
            Duration::from_secs(REQUEST_TIMEOUT_SECS),
            gateway.upload_one(file),
        )
        .await
        {
            Ok(settled) => settled,
            Err(_) => Err(UploadError::Timeout),
        };

        match result {
            Ok(()) => {
                info!(file = %file.name, "upload: indexed");
                state.timeline().update_file(entry, UploadStatus::Ok, file.name.clone());
                succeeded += 1;
            }
            Err(err) => {
                warn!(file = %file.name, error = %err, "upload: failed");
                state.timeline().update_file(entry, UploadStatus::Error, file.name.clone());
                failed += 1;
            }
        }
    }

    BatchOutcome::Completed { succeeded, failed }
}

#[cfg(test)]
#[path = "upload_test.rs"]
mod tests;
