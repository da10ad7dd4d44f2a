//! App state - pure data structure with no I/O logic

use crate::messages::{Notice, RenderState};
use crate::models::{RequestConfig, RequestDescriptor};
use crate::presets::PresetStore;
use crate::response::DisplayModel;

/// The single request currently in flight
#[derive(Clone, Debug)]
pub struct PendingRequest {
    pub id: u64,
    pub descriptor: RequestDescriptor,
}

/// Session state - one per user session, dropped when the session ends
pub struct AppState {
    // Request form
    pub config: RequestConfig,

    // Presets (session scoped, never persisted)
    pub presets: PresetStore,

    // In-flight request
    pub is_loading: bool,
    pub next_request_id: u64,
    pub pending: Option<PendingRequest>,

    // Last response, kept for download
    pub last_response: Option<DisplayModel>,
    pub fresh_response: bool,

    // Feedback
    pub notice: Option<Notice>,
    pub show_help: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        AppState {
            config: RequestConfig::default(),
            presets: PresetStore::new(),
            is_loading: false,
            next_request_id: 1,
            pending: None,
            last_response: None,
            fresh_response: false,
            notice: None,
            show_help: false,
        }
    }

    /// Generate a unique request ID
    pub fn next_id(&mut self) -> u64 {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.notice = Some(Notice::Info(message.into()));
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.notice = Some(Notice::Success(message.into()));
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.notice = Some(Notice::Error(message.into()));
    }

    /// Raw bytes of the last response, for download
    pub fn last_body(&self) -> Option<&[u8]> {
        self.last_response.as_ref().map(|r| r.raw.as_slice())
    }

    /// Convert state to RenderState for the shell.
    ///
    /// The notice and a fresh response are handed out once.
    pub fn to_render_state(&mut self) -> RenderState {
        let response = if self.fresh_response {
            self.fresh_response = false;
            self.last_response.clone()
        } else {
            None
        };
        RenderState {
            method: self.config.method,
            url: self.config.url.clone(),
            is_loading: self.is_loading,
            response,
            notice: self.notice.take(),
            show_help: std::mem::take(&mut self.show_help),
        }
    }
}
