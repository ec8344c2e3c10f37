//! Session quotas for questions and file attachments.
//!
//! DESIGN
//! ======
//! Pure predicates over the timeline; nothing here is stored or cached, so
//! a reset never leaves stale counters behind. Thresholds are fixed policy,
//! not runtime configuration. Admission is checked before any network call
//! is issued.

use crate::gateway::types::PendingFile;
use crate::timeline::Timeline;

/// Maximum questions per session.
pub const MAX_USER_QUERIES: usize = 5;
/// Maximum user-originated entries (questions + files) a batch may bring
/// the session to.
pub const MAX_FILES: usize = 5;
/// Shared payload budget in bytes: question text and file payloads draw
/// from the same accumulator.
pub const MAX_TOTAL_SIZE: u64 = 60 * 1024 * 1024;

/// True while another question is admissible.
#[must_use]
pub fn can_ask_question(timeline: &Timeline) -> bool {
    timeline.question_count() < MAX_USER_QUERIES
}

/// Whole-batch admission: either every file in `incoming` is accepted or
/// none is. Existing question text length counts against the same size
/// budget as the incoming file byte sizes.
#[must_use]
pub fn can_accept_batch(timeline: &Timeline, incoming: &[PendingFile]) -> bool {
    if timeline.user_entry_count() + incoming.len() > MAX_FILES {
        return false;
    }
    let incoming_bytes: u64 = incoming.iter().map(PendingFile::size).sum();
    timeline.user_entry_text_bytes() + incoming_bytes <= MAX_TOTAL_SIZE
}

#[cfg(test)]
#[path = "quota_test.rs"]
mod tests;
