use super::*;
use serde_json::json;

#[test]
fn entries_keep_insertion_order() {
    let mut tl = Timeline::new();
    tl.push_user("first");
    tl.push_file("codex.pdf");
    tl.push_user("second");

    let kinds: Vec<EntryKind> = tl.entries().iter().map(|e| e.kind).collect();
    assert_eq!(kinds, vec![EntryKind::User, EntryKind::File, EntryKind::User]);
    assert_eq!(tl.entries()[0].text, "first");
    assert_eq!(tl.entries()[2].text, "second");
}

#[test]
fn settle_answer_replaces_marker_in_place() {
    let mut tl = Timeline::new();
    tl.push_user("question");
    let marker = tl.push_loading();
    assert_eq!(tl.len(), 2);

    let sources = vec![SourceRef { text: "excerpt".into(), metadata: Some(json!({"source": "codex"})) }];
    assert!(tl.settle_answer(marker, "answer".into(), sources));

    // Net one entry: the marker became the answer, nothing was appended.
    assert_eq!(tl.len(), 2);
    assert_eq!(tl.loading_count(), 0);
    let settled = &tl.entries()[1];
    assert_eq!(settled.kind, EntryKind::Assistant);
    assert_eq!(settled.id, marker);
    assert_eq!(settled.text, "answer");
    assert_eq!(settled.sources[0].label(), "codex");
}

#[test]
fn settle_error_replaces_marker_in_place() {
    let mut tl = Timeline::new();
    let marker = tl.push_loading();
    assert!(tl.settle_error(marker, "request failed".into()));
    assert_eq!(tl.entries()[0].kind, EntryKind::Error);
    assert_eq!(tl.entries()[0].text, "request failed");
    assert!(tl.entries()[0].sources.is_empty());
}

#[test]
fn settle_missing_marker_is_dropped() {
    let mut tl = Timeline::new();
    let marker = tl.push_loading();
    tl.clear();

    assert!(!tl.settle_answer(marker, "late answer".into(), Vec::new()));
    assert!(tl.is_empty());
}

#[test]
fn settle_does_not_touch_non_marker_entries() {
    let mut tl = Timeline::new();
    let user = tl.push_user("question");
    assert!(!tl.settle_answer(user, "answer".into(), Vec::new()));
    assert_eq!(tl.entries()[0].kind, EntryKind::User);
    assert_eq!(tl.entries()[0].text, "question");
}

#[test]
fn file_entry_lifecycle() {
    let mut tl = Timeline::new();
    let id = tl.push_file("bestiary.pdf");
    assert_eq!(tl.entries()[0].upload, Some(UploadStatus::Uploading));
    assert_eq!(tl.entries()[0].text, "bestiary.pdf (uploading…)");

    assert!(tl.update_file(id, UploadStatus::Ok, "bestiary.pdf".into()));
    assert_eq!(tl.entries()[0].upload, Some(UploadStatus::Ok));
    assert_eq!(tl.entries()[0].text, "bestiary.pdf");
}

#[test]
fn terminal_upload_status_rejects_further_transitions() {
    let mut tl = Timeline::new();
    let id = tl.push_file("doc.txt");
    assert!(tl.update_file(id, UploadStatus::Error, "doc.txt".into()));

    assert!(!tl.update_file(id, UploadStatus::Ok, "doc.txt".into()));
    assert_eq!(tl.entries()[0].upload, Some(UploadStatus::Error));
}

#[test]
fn update_file_rejects_non_file_entries() {
    let mut tl = Timeline::new();
    let user = tl.push_user("question");
    assert!(!tl.update_file(user, UploadStatus::Ok, "x".into()));
}

#[test]
fn derived_counts() {
    let mut tl = Timeline::new();
    tl.push_user("ab");
    let file = tl.push_file("doc");
    tl.update_file(file, UploadStatus::Ok, "doc".into());
    tl.push_loading();

    assert_eq!(tl.question_count(), 1);
    assert_eq!(tl.user_entry_count(), 2);
    assert_eq!(tl.loading_count(), 1);
    // "ab" (2) + "doc" (3); markers and answers do not count.
    assert_eq!(tl.user_entry_text_bytes(), 5);
}

#[test]
fn clear_resets_everything() {
    let mut tl = Timeline::new();
    tl.push_user("question");
    tl.push_file("doc");
    tl.clear();

    assert!(tl.is_empty());
    assert_eq!(tl.question_count(), 0);
    assert_eq!(tl.user_entry_count(), 0);
    assert_eq!(tl.user_entry_text_bytes(), 0);
}

#[test]
fn source_label_falls_back_when_metadata_missing() {
    let source = SourceRef { text: "excerpt".into(), metadata: None };
    assert_eq!(source.label(), "unknown");

    let source = SourceRef { text: "excerpt".into(), metadata: Some(json!({"page": 3})) };
    assert_eq!(source.label(), "unknown");
}
