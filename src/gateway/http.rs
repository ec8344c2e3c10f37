//! HTTP gateway backed by `reqwest`.
//!
//! Thin wrappers around the four endpoints; pure parsing in the `parse_*`
//! functions for testability. The wall-clock timeout on `ask`/`upload_one`
//! belongs to the calling flow; this client only bounds connection setup.

use std::time::Duration;

use reqwest::multipart;
use serde_json::Value;

use super::config::{CONNECT_TIMEOUT_SECS, GatewayConfig};
use super::types::{AskError, AskReply, Gateway, PendingFile, UploadError};

/// Shown in place of an answer the service left empty or absent. A UX
/// fallback, not an error.
pub const EMPTY_ANSWER_PLACEHOLDER: &str = "(the archive returned no answer)";

const UPLOAD_FIELD: &str = "file";

#[derive(Debug, thiserror::Error)]
#[error("HTTP client build failed: {0}")]
pub struct ClientBuildError(String);

// =============================================================================
// CLIENT
// =============================================================================

pub struct HttpGateway {
    http: reqwest::Client,
    config: GatewayConfig,
}

impl HttpGateway {
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client fails to build.
    pub fn new(config: GatewayConfig) -> Result<Self, ClientBuildError> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(|e| ClientBuildError(e.to_string()))?;
        Ok(Self { http, config })
    }

    /// Fetch the ingested-sources listing for the read-only sidebar.
    ///
    /// # Errors
    ///
    /// Same failure surface as `ask`: non-2xx status or transport failure.
    pub async fn list_sources(&self) -> Result<Vec<SourceLink>, AskError> {
        let text = self.get_text(&self.config.sources_url).await?;
        parse_sources_listing(&text)
    }

    /// Fetch the chats listing for the read-only sidebar.
    ///
    /// # Errors
    ///
    /// Same failure surface as `ask`.
    pub async fn list_chats(&self) -> Result<Vec<ChatSummary>, AskError> {
        let text = self.get_text(&self.config.chats_url).await?;
        parse_chats_listing(&text)
    }

    async fn get_text(&self, url: &str) -> Result<String, AskError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| AskError::Network(e.to_string()))?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| AskError::Network(e.to_string()))?;
        if !status.is_success() {
            return Err(AskError::Http { status: status.as_u16() });
        }
        Ok(text)
    }
}

#[async_trait::async_trait]
impl Gateway for HttpGateway {
    async fn ask(&self, question: &str, quick: bool) -> Result<AskReply, AskError> {
        let url = if quick { &self.config.quick_ask_url } else { &self.config.ask_url };
        let response = self
            .http
            .post(url)
            .json(&AskRequest { question })
            .send()
            .await
            .map_err(|e| AskError::Network(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| AskError::Network(e.to_string()))?;
        if !status.is_success() {
            return Err(AskError::Http { status: status.as_u16() });
        }
        parse_ask_reply(&text)
    }

    async fn upload_one(&self, file: &PendingFile) -> Result<(), UploadError> {
        let part = multipart::Part::bytes(file.bytes.clone()).file_name(file.name.clone());
        let form = multipart::Form::new().part(UPLOAD_FIELD, part);

        let response = self
            .http
            .post(&self.config.upload_url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| UploadError::Network(e.to_string()))?;

        let status = response.status();
        if status.as_u16() == 400 {
            return Err(UploadError::UnsupportedFormat);
        }
        let text = response
            .text()
            .await
            .map_err(|e| UploadError::Network(e.to_string()))?;
        if !status.is_success() {
            return Err(UploadError::Http { status: status.as_u16() });
        }
        parse_upload_ack(&text)
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(serde::Serialize)]
struct AskRequest<'a> {
    question: &'a str,
}

#[derive(serde::Deserialize)]
struct AskBody {
    answer: Option<String>,
    sources: Option<Vec<crate::timeline::SourceRef>>,
}

#[derive(serde::Deserialize)]
struct UploadAck {
    status: Option<String>,
    message: Option<String>,
}

/// One row of the sources sidebar: display name and link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLink {
    pub name: String,
    pub url: String,
}

/// One row of the chats sidebar.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct ChatSummary {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl ChatSummary {
    #[must_use]
    pub fn label(&self) -> &str {
        self.title
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or("Untitled")
    }
}

// =============================================================================
// PARSING
// =============================================================================

fn parse_ask_reply(json: &str) -> Result<AskReply, AskError> {
    let body: AskBody =
        serde_json::from_str(json).map_err(|e| AskError::Network(format!("response parse failed: {e}")))?;

    let answer = body
        .answer
        .filter(|a| !a.trim().is_empty())
        .unwrap_or_else(|| EMPTY_ANSWER_PLACEHOLDER.to_string());

    Ok(AskReply { answer, sources: body.sources.unwrap_or_default() })
}

fn parse_upload_ack(json: &str) -> Result<(), UploadError> {
    let ack: UploadAck =
        serde_json::from_str(json).map_err(|e| UploadError::Application(format!("response parse failed: {e}")))?;

    match ack.status.as_deref() {
        Some("success" | "ok") => Ok(()),
        _ => Err(UploadError::Application(
            ack.message.unwrap_or_else(|| "upload failed".to_string()),
        )),
    }
}

fn parse_sources_listing(json: &str) -> Result<Vec<SourceLink>, AskError> {
    let map: serde_json::Map<String, Value> =
        serde_json::from_str(json).map_err(|e| AskError::Network(format!("response parse failed: {e}")))?;

    Ok(map
        .into_iter()
        .map(|(name, link)| {
            let url = match link {
                Value::String(s) => s,
                other => other.to_string(),
            };
            SourceLink { name, url }
        })
        .collect())
}

fn parse_chats_listing(json: &str) -> Result<Vec<ChatSummary>, AskError> {
    let value: Value =
        serde_json::from_str(json).map_err(|e| AskError::Network(format!("response parse failed: {e}")))?;

    // Either a bare array or `{ "chats": [...] }`; anything else is an
    // empty listing.
    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut obj) => match obj.remove("chats") {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    };

    Ok(items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect())
}

#[cfg(test)]
#[path = "http_test.rs"]
mod tests;
