//! Ask flow — the per-question state machine.
//!
//! DESIGN
//! ======
//! `Idle -> Sending -> {Answered, Failed} -> Idle`. The `busy` flag makes
//! `Sending -> Sending` unreachable: a new question is silently ignored
//! while an answer is outstanding, so the timeline never holds more than
//! one loading marker. Quota is checked before anything is appended or
//! sent; a rejected question leaves no trace. Every gateway failure is
//! converted into an inline error entry here and propagates no further.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::gateway::config::REQUEST_TIMEOUT_SECS;
use crate::gateway::{AskError, Gateway};
use crate::quota;
use crate::state::SessionState;

/// Inline text for a timed-out question. Kept distinct from the other
/// failure texts: "took too long" and "failed" render differently.
pub const TIMEOUT_TEXT: &str = "Request timed out: the archive took too long to answer.";

/// What a submission attempt came to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AskOutcome {
    /// Empty input or an answer already outstanding; nothing happened.
    Ignored,
    /// Question quota rejected the submission; nothing was sent or appended.
    LimitReached,
    Answered,
    Failed,
}

/// Submit a question. Appends the user turn and a loading marker, issues
/// the ask bounded by the wall-clock timer, and replaces the marker with
/// the answer or an inline error.
pub async fn submit_question(
    state: &SessionState,
    gateway: &Arc<dyn Gateway>,
    input: &str,
) -> AskOutcome {
    let question = input.trim();
    if question.is_empty() || !state.try_begin_ask() {
        return AskOutcome::Ignored;
    }

    if !quota::can_ask_question(&state.timeline()) {
        state.end_ask();
        info!("ask: question limit reached");
        return AskOutcome::LimitReached;
    }

    let marker = {
        let mut timeline = state.timeline();
        timeline.push_user(question);
        timeline.push_loading()
    };
    let quick = state.quick_search();
    info!(question_len = question.len(), quick, "ask: question submitted");

    let result = match tokio::time::timeout(
        Duration::from_secs(REQUEST_TIMEOUT_SECS),
        gateway.ask(question, quick),
    )
    .await
    {
        Ok(settled) => settled,
        // The elapsed timer aborts the in-flight call; only Timeout
        // surfaces for it.
        Err(_) => Err(AskError::Timeout),
    };

    let outcome = match result {
        Ok(reply) => {
            info!(answer_len = reply.answer.len(), sources = reply.sources.len(), "ask: answered");
            state.timeline().settle_answer(marker, reply.answer, reply.sources);
            AskOutcome::Answered
        }
        Err(err) => {
            warn!(error = %err, "ask: failed");
            state.timeline().settle_error(marker, failure_text(&err));
            AskOutcome::Failed
        }
    };
    state.end_ask();
    outcome
}

fn failure_text(err: &AskError) -> String {
    match err {
        AskError::Timeout => TIMEOUT_TEXT.to_string(),
        other => format!("Request failed: {other}"),
    }
}

#[cfg(test)]
#[path = "ask_test.rs"]
mod tests;
