//! Application constants
//!
//! Centralized location for magic strings and configuration defaults.

/// Placeholder shown for an empty URL field
pub const URL_PLACEHOLDER: &str = "https://api.example.com/v1/resource";

/// MIME type used for JSON bodies and the default `Accept` header
pub const APPLICATION_JSON: &str = "application/json";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: f64 = 20.0;

/// Smallest timeout a request may use
pub const MIN_TIMEOUT_SECS: f64 = 1.0;

/// Largest timeout a request may use
pub const MAX_TIMEOUT_SECS: f64 = 120.0;

/// Name substituted when a preset is saved with a blank name
pub const DEFAULT_PRESET_NAME: &str = "Preset";

/// File the raw response body is written to when no path is given
pub const DEFAULT_DOWNLOAD_FILE: &str = "response.bin";

/// Log file, written to the working directory
pub const LOG_FILE: &str = "restprobe.log";

/// Application name
pub const APP_NAME: &str = "restprobe";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
