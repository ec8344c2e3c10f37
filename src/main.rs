mod gateway;
mod quota;
mod services;
mod state;
mod timeline;

use std::io::Write as _;
use std::path::Path;
use std::sync::Arc;

use gateway::{Gateway, GatewayConfig, HttpGateway, PendingFile};
use services::ask::{self, AskOutcome};
use services::upload::{self, BatchOutcome};
use state::SessionState;
use timeline::{Entry, EntryKind, UploadStatus};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let config = GatewayConfig::from_env();
    let http = Arc::new(HttpGateway::new(config).expect("HTTP client init failed"));
    let gateway: Arc<dyn Gateway> = http.clone();
    let state = SessionState::new();

    println!("lorechat: ask the archive.");
    println!("Commands: /upload <path>.., /sources, /chats, /quick, /reset, /quit");

    let stdin = std::io::stdin();
    let mut rendered = 0usize;
    loop {
        print!("> ");
        let _ = std::io::stdout().flush();

        let mut line = String::new();
        match stdin.read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let line = line.trim();

        match line {
            "" => {}
            "/quit" | "/exit" => break,
            "/reset" => {
                state.reset();
                rendered = 0;
                println!("Session cleared; all quotas are back to zero.");
            }
            "/quick" => {
                let on = state.toggle_quick_search();
                println!("Quick search {}", if on { "on" } else { "off" });
            }
            "/sources" => show_sources(&http).await,
            "/chats" => show_chats(&http).await,
            _ if line.starts_with("/upload") => {
                let files = read_files(line.trim_start_matches("/upload").split_whitespace());
                if files.is_empty() {
                    println!("usage: /upload <path> [<path>..]");
                } else {
                    match upload::submit_batch(&state, &gateway, files).await {
                        BatchOutcome::LimitExceeded => print_file_limit(),
                        BatchOutcome::Completed { succeeded, failed } => {
                            println!("{succeeded} uploaded, {failed} failed");
                        }
                    }
                    rendered = render_new(&state, rendered);
                }
            }
            _ if line.starts_with('/') => println!("unknown command: {line}"),
            question => {
                if ask::submit_question(&state, &gateway, question).await == AskOutcome::LimitReached {
                    print_question_limit();
                }
                rendered = render_new(&state, rendered);
            }
        }
    }
}

/// Print entries appended since the last render; returns the new high-water
/// mark. Loading markers are transient and settled by render time.
fn render_new(state: &SessionState, from: usize) -> usize {
    let timeline = state.timeline();
    for entry in &timeline.entries()[from.min(timeline.len())..] {
        render_entry(entry);
    }
    timeline.len()
}

fn render_entry(entry: &Entry) {
    match entry.kind {
        EntryKind::User => println!("you: {}", entry.text),
        EntryKind::Assistant => {
            println!("archive: {}", entry.text);
            if !entry.sources.is_empty() {
                let labels: Vec<&str> = entry.sources.iter().take(3).map(timeline::SourceRef::label).collect();
                let more = if entry.sources.len() > 3 { " …" } else { "" };
                println!("  sources: {}{more}", labels.join("; "));
            }
        }
        EntryKind::Error => println!("error: {}", entry.text),
        EntryKind::File => {
            let status = match entry.upload {
                Some(UploadStatus::Ok) => "uploaded",
                Some(UploadStatus::Error) => "failed",
                Some(UploadStatus::Uploading) | None => "uploading",
            };
            println!("file: {} [{status}]", entry.text);
        }
        EntryKind::Loading => {}
    }
}

fn read_files<'a>(paths: impl Iterator<Item = &'a str>) -> Vec<PendingFile> {
    let mut files = Vec::new();
    for path in paths {
        match std::fs::read(path) {
            Ok(bytes) => {
                let name = Path::new(path)
                    .file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or(path);
                files.push(PendingFile::new(name, bytes));
            }
            Err(e) => println!("skipping {path}: {e}"),
        }
    }
    files
}

async fn show_sources(http: &HttpGateway) {
    match http.list_sources().await {
        Ok(links) if links.is_empty() => println!("no sources ingested yet"),
        Ok(links) => {
            for link in links {
                println!("  {} -> {}", link.name, link.url);
            }
        }
        Err(e) => println!("sources unavailable: {e}"),
    }
}

async fn show_chats(http: &HttpGateway) {
    match http.list_chats().await {
        Ok(chats) if chats.is_empty() => println!("no chats yet"),
        Ok(chats) => {
            for chat in chats {
                println!("  {}", chat.label());
            }
        }
        Err(e) => println!("chats unavailable: {e}"),
    }
}

fn print_question_limit() {
    println!(
        "Question limit reached ({} per session). /reset starts a new session.",
        quota::MAX_USER_QUERIES
    );
}

fn print_file_limit() {
    println!(
        "File limit exceeded: at most {} attachments and {} MiB of payload per session. /reset starts a new session.",
        quota::MAX_FILES,
        quota::MAX_TOTAL_SIZE / (1024 * 1024)
    );
}
