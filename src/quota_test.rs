use super::*;
use crate::timeline::UploadStatus;

fn file(name: &str, size: usize) -> PendingFile {
    PendingFile { name: name.into(), bytes: vec![0u8; size] }
}

#[test]
fn questions_allowed_up_to_limit() {
    let mut tl = Timeline::new();
    for i in 0..MAX_USER_QUERIES {
        assert!(can_ask_question(&tl), "question {i} should be admissible");
        tl.push_user(format!("question {i}"));
    }
    assert!(!can_ask_question(&tl));
}

#[test]
fn file_entries_do_not_count_toward_question_limit() {
    let mut tl = Timeline::new();
    for i in 0..MAX_FILES {
        tl.push_file(&format!("doc-{i}"));
    }
    assert!(can_ask_question(&tl));
}

#[test]
fn batch_rejected_when_count_would_exceed_limit() {
    let tl = Timeline::new();
    let batch: Vec<PendingFile> = (0..=MAX_FILES).map(|i| file(&format!("doc-{i}"), 1)).collect();
    assert!(!can_accept_batch(&tl, &batch));

    let batch = &batch[..MAX_FILES];
    assert!(can_accept_batch(&tl, batch));
}

#[test]
fn existing_user_entries_count_toward_file_limit() {
    let mut tl = Timeline::new();
    tl.push_user("a question");
    let id = tl.push_file("earlier.pdf");
    tl.update_file(id, UploadStatus::Ok, "earlier.pdf".into());

    // 2 existing user-originated entries + 4 incoming > 5.
    let batch: Vec<PendingFile> = (0..4).map(|i| file(&format!("doc-{i}"), 1)).collect();
    assert!(!can_accept_batch(&tl, &batch));
    assert!(can_accept_batch(&tl, &batch[..3]));
}

#[test]
fn size_budget_is_shared_between_text_and_file_bytes() {
    let mut tl = Timeline::new();
    // A question whose text length eats all but 10 bytes of the budget.
    let question = "q".repeat(usize::try_from(MAX_TOTAL_SIZE).unwrap() - 10);
    tl.push_user(question);

    assert!(can_accept_batch(&tl, &[file("tiny", 10)]));
    assert!(!can_accept_batch(&tl, &[file("tiny", 11)]));
}

#[test]
fn batch_admission_is_all_or_nothing_on_size() {
    let tl = Timeline::new();
    let over = usize::try_from(MAX_TOTAL_SIZE).unwrap() + 1;
    assert!(!can_accept_batch(&tl, &[file("small", 1), file("huge", over - 1)]));
}

#[test]
fn empty_batch_is_admissible() {
    let tl = Timeline::new();
    assert!(can_accept_batch(&tl, &[]));
}
