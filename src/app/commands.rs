//! Command handlers - business logic for processing shell events

use crate::app::state::PendingRequest;
use crate::app::AppState;
use crate::builder::build_request;
use crate::constants::{MAX_TIMEOUT_SECS, MIN_TIMEOUT_SECS};
use crate::curl;
use crate::messages::{NetworkCommand, NetworkResponse};
use crate::models::{AuthConfig, BodyMode, HttpMethod, KeyValueRow};
use crate::response::DisplayModel;

impl AppState {
    // ========================
    // Request form
    // ========================

    pub fn set_method(&mut self, method: HttpMethod) {
        self.config.method = method;
        if !method.has_body() && self.config.body_mode != BodyMode::None {
            self.info("GET requests do not include a body; the body will not be sent.");
        }
    }

    pub fn set_url(&mut self, url: String) {
        self.config.url = url;
    }

    pub fn add_param(&mut self, row: KeyValueRow) {
        self.config.params.push(row);
    }

    pub fn add_header(&mut self, row: KeyValueRow) {
        self.config.headers.push(row);
    }

    pub fn clear_params(&mut self) {
        self.config.params.clear();
    }

    pub fn clear_headers(&mut self) {
        self.config.headers.clear();
    }

    pub fn set_body(&mut self, mode: BodyMode, text: String) {
        self.config.body_mode = mode;
        self.config.body_raw = text;
        if !self.config.method.has_body() && mode != BodyMode::None {
            self.info("GET requests do not include a body. Switch to POST, PUT, PATCH, or DELETE to send data.");
        }
    }

    pub fn set_auth(&mut self, auth: AuthConfig) {
        self.config.auth = auth;
    }

    pub fn set_timeout(&mut self, secs: f64) {
        if !(MIN_TIMEOUT_SECS..=MAX_TIMEOUT_SECS).contains(&secs) {
            self.error(format!(
                "Timeout must be between {} and {} seconds",
                MIN_TIMEOUT_SECS, MAX_TIMEOUT_SECS
            ));
            return;
        }
        self.config.timeout_secs = secs;
    }

    pub fn set_verify_tls(&mut self, verify: bool) {
        self.config.verify_tls = verify;
        if !verify {
            self.info("TLS verification disabled. Use only in test environments.");
        }
    }

    pub fn show_config(&mut self) {
        match serde_json::to_string_pretty(&self.config) {
            Ok(text) => self.info(text),
            Err(e) => self.error(format!("Cannot display request: {}", e)),
        }
    }

    // ========================
    // Request lifecycle
    // ========================

    /// Validate and build the form; returns the command for the network layer
    pub fn send_request(&mut self) -> Option<NetworkCommand> {
        if self.is_loading {
            self.error("A request is already in progress");
            return None;
        }

        let descriptor = match build_request(&self.config) {
            Ok(descriptor) => descriptor,
            Err(e) => {
                tracing::info!(error = %e, "Submission rejected");
                self.error(e.to_string());
                return None;
            }
        };

        self.is_loading = true;
        self.last_response = None;
        self.fresh_response = false;
        let id = self.next_id();
        self.info(format!("Sending {} {} ...", descriptor.method.as_str(), descriptor.url));
        self.pending = Some(PendingRequest {
            id,
            descriptor: descriptor.clone(),
        });

        Some(NetworkCommand::ExecuteRequest { id, descriptor })
    }

    pub fn handle_response(&mut self, response: NetworkResponse) {
        // Only process if it matches the pending request
        let pending = match self.pending.take() {
            Some(pending) if pending.id == response.id() => pending,
            other => {
                tracing::debug!(id = response.id(), "Ignoring stale response");
                self.pending = other;
                return;
            }
        };
        self.is_loading = false;

        match response {
            NetworkResponse::Completed { payload, .. } => {
                self.last_response = Some(DisplayModel::new(&pending.descriptor, payload));
                self.fresh_response = true;
            }
            NetworkResponse::Failed { message, .. } => {
                self.error(message);
            }
        }
    }

    pub fn show_curl(&mut self) {
        match build_request(&self.config) {
            Ok(descriptor) => match curl::curl_preview(&descriptor) {
                Some(cmd) => self.info(cmd),
                None => self.info("No cURL preview available for this request"),
            },
            Err(e) => self.error(e.to_string()),
        }
    }

    // ========================
    // Presets
    // ========================

    pub fn save_preset(&mut self, name: &str) {
        match self.presets.save(name, &self.config) {
            Ok(saved) => self.success(format!("Saved preset: {}", saved)),
            Err(e) => {
                tracing::warn!(error = %e, "Preset not saved");
                self.error(e.to_string());
            }
        }
    }

    pub fn load_preset(&mut self, name: &str) {
        match self.presets.get(name) {
            Some(preset) => {
                self.config = preset.to_config();
                self.info(format!("Preset selected: {}", name));
            }
            None => self.info(format!("No preset named '{}'", name)),
        }
    }

    pub fn list_presets(&mut self) {
        if self.presets.is_empty() {
            self.info("No presets saved");
        } else {
            let listing = self.presets.list().join("\n");
            self.info(listing);
        }
    }

    // ========================
    // cURL import
    // ========================

    pub fn import_curl(&mut self, input: &str) {
        match curl::parse_curl(input) {
            Ok(config) => {
                self.config = config;
                let message = format!(
                    "Imported {} {}",
                    self.config.method.as_str(),
                    self.config.url
                );
                self.success(message);
            }
            Err(e) => self.error(format!("Invalid cURL command: {}", e)),
        }
    }

    // ========================
    // Help popup
    // ========================

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }
}
