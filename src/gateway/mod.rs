//! Request gateway — the HTTP boundary to the answering service.
//!
//! DESIGN
//! ======
//! The two core operations (`ask`, `upload_one`) sit behind the [`Gateway`]
//! trait so the ask flow and the upload pipeline can be driven by a scripted
//! mock in tests. The read-only sidebar listings are plain methods on the
//! HTTP implementation; nothing in the core calls them.

pub mod config;
pub mod http;
pub mod types;

pub use config::GatewayConfig;
pub use http::HttpGateway;
pub use types::{AskError, AskReply, Gateway, PendingFile, UploadError};
