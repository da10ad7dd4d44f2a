//! Error types surfaced to the user.
//!
//! Every variant is recoverable: the session reports it as a notice and the
//! user may retry straight away with corrected input.

use std::fmt;

/// Errors raised while building, sending or saving a request.
#[derive(Debug, Clone, PartialEq)]
pub enum ProbeError {
    /// The URL does not start with `http`; nothing was sent.
    InvalidUrl(String),

    /// Transport-level failure (DNS, connect, TLS, timeout, body read).
    RequestFailed { message: String },

    /// Body mode is JSON but the text does not parse.
    MalformedJsonBody { message: String },

    /// A preset snapshot violates a structural constraint; the store is untouched.
    PresetValidation { message: String },
}

impl ProbeError {
    pub fn request_failed(message: impl Into<String>) -> Self {
        ProbeError::RequestFailed {
            message: message.into(),
        }
    }

    pub fn preset_validation(message: impl Into<String>) -> Self {
        ProbeError::PresetValidation {
            message: message.into(),
        }
    }
}

impl fmt::Display for ProbeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeError::InvalidUrl(url) => {
                write!(f, "Invalid URL '{url}'. Must start with http or https.")
            }
            ProbeError::RequestFailed { message } => write!(f, "{message}"),
            ProbeError::MalformedJsonBody { message } => {
                write!(f, "JSON body is not valid JSON: {message}")
            }
            ProbeError::PresetValidation { message } => {
                write!(f, "Preset rejected: {message}")
            }
        }
    }
}

impl std::error::Error for ProbeError {}
