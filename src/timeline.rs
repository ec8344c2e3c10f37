//! Timeline — the ordered log of all interaction entries in a session.
//!
//! DESIGN
//! ======
//! Append-only, with exactly two permitted in-place mutations: a loading
//! marker is replaced by the answer (or error) it was holding a seat for,
//! and a file entry's upload status advances to a terminal state. Every
//! entry keeps the id it was created with, so both mutations target entries
//! by id rather than by position. Consumers may rely on insertion order and
//! nothing else.

use serde_json::Value;
use uuid::Uuid;

// =============================================================================
// ENTRY
// =============================================================================

/// What a timeline entry represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// A question the user submitted.
    User,
    /// An answer from the service.
    Assistant,
    /// An attached document's upload record.
    File,
    /// Transient placeholder while an answer is outstanding.
    Loading,
    /// A failed question, rendered inline.
    Error,
}

/// Upload lifecycle of a [`EntryKind::File`] entry. `Ok` and `Error` are
/// terminal; no further transitions are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadStatus {
    Uploading,
    Ok,
    Error,
}

impl UploadStatus {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Ok | Self::Error)
    }
}

/// A citation attached to an answer.
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
pub struct SourceRef {
    pub text: String,
    #[serde(default)]
    pub metadata: Option<Value>,
}

impl SourceRef {
    /// Display label: the `source` field of the metadata object, when present.
    #[must_use]
    pub fn label(&self) -> &str {
        self.metadata
            .as_ref()
            .and_then(|m| m.get("source"))
            .and_then(Value::as_str)
            .unwrap_or("unknown")
    }
}

/// One unit in the timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub id: Uuid,
    pub kind: EntryKind,
    pub text: String,
    /// Non-empty only on [`EntryKind::Assistant`] entries.
    pub sources: Vec<SourceRef>,
    /// Present only on [`EntryKind::File`] entries.
    pub upload: Option<UploadStatus>,
}

impl Entry {
    fn new(kind: EntryKind, text: String) -> Self {
        Self { id: Uuid::new_v4(), kind, text, sources: Vec::new(), upload: None }
    }
}

// =============================================================================
// TIMELINE
// =============================================================================

/// The session's interaction log. Created empty, discarded wholesale on
/// reset; quota counts are derived from it and never stored.
#[derive(Debug, Default)]
pub struct Timeline {
    entries: Vec<Entry>,
}

impl Timeline {
    #[must_use]
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append a user question. Returns the new entry's id.
    pub fn push_user(&mut self, text: impl Into<String>) -> Uuid {
        self.push(Entry::new(EntryKind::User, text.into()))
    }

    /// Append a loading marker holding the seat for an outstanding answer.
    pub fn push_loading(&mut self) -> Uuid {
        self.push(Entry::new(EntryKind::Loading, String::new()))
    }

    /// Append a file entry in `Uploading` state. The entry text carries the
    /// display name with an in-flight suffix until the terminal update.
    pub fn push_file(&mut self, name: &str) -> Uuid {
        let mut entry = Entry::new(EntryKind::File, format!("{name} (uploading…)"));
        entry.upload = Some(UploadStatus::Uploading);
        self.push(entry)
    }

    fn push(&mut self, entry: Entry) -> Uuid {
        let id = entry.id;
        self.entries.push(entry);
        id
    }

    /// Replace the loading marker `id` in place with an answer entry.
    /// Returns false when no such marker exists (e.g. the session was reset
    /// while the call was in flight); the caller drops the result.
    pub fn settle_answer(&mut self, id: Uuid, text: String, sources: Vec<SourceRef>) -> bool {
        self.settle(id, EntryKind::Assistant, text, sources)
    }

    /// Replace the loading marker `id` in place with an error entry.
    pub fn settle_error(&mut self, id: Uuid, text: String) -> bool {
        self.settle(id, EntryKind::Error, text, Vec::new())
    }

    fn settle(&mut self, id: Uuid, kind: EntryKind, text: String, sources: Vec<SourceRef>) -> bool {
        let Some(entry) = self.find_mut(id) else {
            return false;
        };
        if entry.kind != EntryKind::Loading {
            return false;
        }
        entry.kind = kind;
        entry.text = text;
        entry.sources = sources;
        true
    }

    /// Advance the file entry `id` to a terminal status and refresh its
    /// display text. Ignored once the entry is already terminal.
    pub fn update_file(&mut self, id: Uuid, status: UploadStatus, text: String) -> bool {
        let Some(entry) = self.find_mut(id) else {
            return false;
        };
        if entry.kind != EntryKind::File {
            return false;
        }
        if entry.upload.is_some_and(UploadStatus::is_terminal) {
            return false;
        }
        entry.upload = Some(status);
        entry.text = text;
        true
    }

    fn find_mut(&mut self, id: Uuid) -> Option<&mut Entry> {
        self.entries.iter_mut().find(|e| e.id == id)
    }

    /// Number of submitted questions.
    #[must_use]
    pub fn question_count(&self) -> usize {
        self.count_kind(EntryKind::User)
    }

    /// Number of outstanding loading markers (0 or 1 by construction).
    #[must_use]
    pub fn loading_count(&self) -> usize {
        self.count_kind(EntryKind::Loading)
    }

    fn count_kind(&self, kind: EntryKind) -> usize {
        self.entries.iter().filter(|e| e.kind == kind).count()
    }

    /// Number of user-originated entries: questions and file records.
    #[must_use]
    pub fn user_entry_count(&self) -> usize {
        self.user_entries().count()
    }

    /// Total text length in bytes across user-originated entries. Feeds the
    /// shared size budget together with incoming file byte sizes.
    #[must_use]
    pub fn user_entry_text_bytes(&self) -> u64 {
        self.user_entries().map(|e| e.text.len() as u64).sum()
    }

    fn user_entries(&self) -> impl Iterator<Item = &Entry> {
        self.entries
            .iter()
            .filter(|e| matches!(e.kind, EntryKind::User | EntryKind::File))
    }

    /// Discard every entry. Quota counts implicitly reset with it.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
#[path = "timeline_test.rs"]
mod tests;
