//! # restprobe
//!
//! An interactive REST API tester: configure a request, send it and inspect
//! the response, with a cURL equivalent for reuse.
//!
//! ## Features
//! - HTTP methods: GET, POST, PUT, PATCH, DELETE
//! - Query params and headers from key/value rows
//! - JSON or raw request bodies
//! - Auth support (Bearer, Basic)
//! - Timeout and TLS verification toggle
//! - JSON response sniffing
//! - cURL preview and import
//! - Session presets
//!
//! ## Architecture
//! Actor-based with channels:
//! - Shell Layer (stdin/stdout) - line oriented
//! - App Layer (session state)
//! - Network Layer (Tokio runtime)

pub mod constants;
pub mod error;
pub mod models;
pub mod kv;
pub mod auth;
pub mod builder;
pub mod response;
pub mod curl;
pub mod presets;
pub mod ui;
pub mod messages;
pub mod app;
pub mod network;

// Re-export commonly used types
pub use error::ProbeError;
pub use models::{
    AuthConfig, AuthMode, BodyMode, HttpMethod, KeyValueRow, RequestBody, RequestConfig,
    RequestDescriptor, ResponsePayload,
};
pub use kv::collect_rows;
pub use auth::{resolve_auth, AuthAdditions};
pub use builder::build_request;
pub use response::{interpret_body, BodyView, DisplayModel};
pub use curl::{curl_preview, parse_curl, to_curl};
pub use presets::{Preset, PresetStore};
pub use messages::{UiEvent, NetworkCommand, NetworkResponse, RenderState};
pub use app::{AppState, AppActor};
pub use network::{HttpExecutor, NetworkActor, ReqwestExecutor};
