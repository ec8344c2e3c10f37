//! Shared session state.
//!
//! DESIGN
//! ======
//! `SessionState` is the single handle both flows mutate through: the
//! timeline behind a mutex with short critical sections (never held across
//! an await), the `busy` flag that serializes question submissions, and the
//! quick-search toggle. Cloning the handle shares the same session. Uploads
//! are not gated by `busy`: a batch may run while a question is mid-flight;
//! the flows never target the same entry.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::timeline::Timeline;

#[derive(Clone, Default)]
pub struct SessionState {
    timeline: Arc<Mutex<Timeline>>,
    busy: Arc<AtomicBool>,
    quick_search: Arc<AtomicBool>,
}

impl SessionState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock the timeline. Poisoning is absorbed: a panicked writer leaves
    /// the log readable.
    #[must_use]
    pub fn timeline(&self) -> MutexGuard<'_, Timeline> {
        self.timeline.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Claim the ask slot. Fails while a prior answer is outstanding, which
    /// is what keeps the timeline at a single loading marker.
    pub fn try_begin_ask(&self) -> bool {
        self.busy
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }

    pub fn end_ask(&self) {
        self.busy.store(false, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn quick_search(&self) -> bool {
        self.quick_search.load(Ordering::SeqCst)
    }

    /// Flip quick-search mode; returns the new value.
    pub fn toggle_quick_search(&self) -> bool {
        !self.quick_search.fetch_xor(true, Ordering::SeqCst)
    }

    /// Discard the session wholesale. Quota counts reset with the timeline;
    /// an in-flight answer that settles afterwards is dropped.
    pub fn reset(&self) {
        self.timeline().clear();
    }
}
