//! Render state - data structure sent from App layer to the shell for display

use crate::models::HttpMethod;
use crate::response::DisplayModel;

/// One-line feedback for the user
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    Info(String),
    Success(String),
    Error(String),
}

/// Complete state needed by the shell to render
#[derive(Debug, Clone, PartialEq)]
pub struct RenderState {
    // Request summary, shown in the prompt
    pub method: HttpMethod,
    pub url: String,
    pub is_loading: bool,

    /// Set only in the render that follows a new response
    pub response: Option<DisplayModel>,
    pub notice: Option<Notice>,
    pub show_help: bool,
}

impl Default for RenderState {
    fn default() -> Self {
        RenderState {
            method: HttpMethod::GET,
            url: String::new(),
            is_loading: false,
            response: None,
            notice: None,
            show_help: false,
        }
    }
}
