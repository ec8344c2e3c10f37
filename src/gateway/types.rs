//! Gateway types — operation payloads and errors.

use crate::timeline::SourceRef;

// =============================================================================
// ERRORS
// =============================================================================

/// Failure kinds of an `ask` call (also used by the read-only listing
/// fetches, which share the same failure surface).
#[derive(Debug, thiserror::Error)]
pub enum AskError {
    /// The abort timer fired before the service answered.
    #[error("request timed out")]
    Timeout,

    /// The service returned a non-2xx status.
    #[error("HTTP {status}")]
    Http { status: u16 },

    /// Transport failure, or a response body that could not be decoded.
    #[error("network error: {0}")]
    Network(String),
}

/// Failure kinds of an `upload_one` call.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    /// The service rejected the file format (HTTP 400).
    #[error("unsupported file format")]
    UnsupportedFormat,

    /// Any other non-2xx status.
    #[error("HTTP {status}")]
    Http { status: u16 },

    /// A 2xx response whose payload did not acknowledge the upload.
    #[error("upload rejected: {0}")]
    Application(String),

    /// Transport failure.
    #[error("network error: {0}")]
    Network(String),

    /// The abort timer fired before the upload completed.
    #[error("upload timed out")]
    Timeout,
}

// =============================================================================
// PAYLOADS
// =============================================================================

/// An attachment read into memory, awaiting admission and upload.
#[derive(Debug, Clone)]
pub struct PendingFile {
    /// Display name (what the timeline entry shows).
    pub name: String,
    pub bytes: Vec<u8>,
}

impl PendingFile {
    #[must_use]
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self { name: name.into(), bytes }
    }

    #[must_use]
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// A settled answer: display text plus its citations.
#[derive(Debug, Clone)]
pub struct AskReply {
    pub answer: String,
    pub sources: Vec<SourceRef>,
}

// =============================================================================
// GATEWAY TRAIT
// =============================================================================

/// The two network operations the core depends on. Both are single-shot:
/// no automatic retry; a new attempt requires a fresh call. Enables mocking
/// in tests.
#[async_trait::async_trait]
pub trait Gateway: Send + Sync {
    /// Submit a question. `quick` selects the quick-search endpoint.
    ///
    /// # Errors
    ///
    /// Returns an [`AskError`] on a non-2xx status or transport failure.
    /// The caller owns the wall-clock timeout.
    async fn ask(&self, question: &str, quick: bool) -> Result<AskReply, AskError>;

    /// Upload a single file for indexing. Does not touch the timeline;
    /// that is the caller's responsibility.
    ///
    /// # Errors
    ///
    /// Returns an [`UploadError`] when the service rejects the file or the
    /// transport fails.
    async fn upload_one(&self, file: &PendingFile) -> Result<(), UploadError>;
}
