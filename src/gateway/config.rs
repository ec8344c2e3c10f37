//! Gateway endpoint configuration parsed from environment variables.

pub const DEFAULT_BASE_URL: &str = "http://localhost:8081";
pub const DEFAULT_ASK_PATH: &str = "/api/chat/semantics";
pub const DEFAULT_UPLOAD_PATH: &str = "/api/documents/upload";
pub const DEFAULT_SOURCES_PATH: &str = "/get_books";
pub const DEFAULT_CHATS_PATH: &str = "/chats";

/// Wall-clock bound on `ask` and `upload_one`. Fixed policy, not runtime
/// configuration.
pub const REQUEST_TIMEOUT_SECS: u64 = 60;
pub const CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    pub ask_url: String,
    pub quick_ask_url: String,
    pub upload_url: String,
    pub sources_url: String,
    pub chats_url: String,
}

impl GatewayConfig {
    /// Build endpoint config from environment variables.
    ///
    /// Optional:
    /// - `CHAT_BASE_URL`: default `http://localhost:8081`
    /// - `CHAT_ASK_PATH`: default `/api/chat/semantics`
    /// - `CHAT_QUICK_ASK_PATH`: defaults to the ask path
    /// - `CHAT_UPLOAD_PATH`: default `/api/documents/upload`
    /// - `CHAT_SOURCES_PATH`: default `/get_books`
    /// - `CHAT_CHATS_PATH`: default `/chats`
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let base = get("CHAT_BASE_URL")
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let ask_path = get("CHAT_ASK_PATH").unwrap_or_else(|| DEFAULT_ASK_PATH.to_string());
        let quick_ask_path = get("CHAT_QUICK_ASK_PATH").unwrap_or_else(|| ask_path.clone());
        let upload_path = get("CHAT_UPLOAD_PATH").unwrap_or_else(|| DEFAULT_UPLOAD_PATH.to_string());
        let sources_path = get("CHAT_SOURCES_PATH").unwrap_or_else(|| DEFAULT_SOURCES_PATH.to_string());
        let chats_path = get("CHAT_CHATS_PATH").unwrap_or_else(|| DEFAULT_CHATS_PATH.to_string());

        Self {
            ask_url: format!("{base}{ask_path}"),
            quick_ask_url: format!("{base}{quick_ask_path}"),
            upload_url: format!("{base}{upload_path}"),
            sources_url: format!("{base}{sources_path}"),
            chats_url: format!("{base}{chats_path}"),
        }
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
