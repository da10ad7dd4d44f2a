use reqwest::header::HeaderName;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::constants::{DEFAULT_PRESET_NAME, MAX_TIMEOUT_SECS, MIN_TIMEOUT_SECS};
use crate::error::ProbeError;
use crate::kv::collect_rows;
use crate::models::{AuthConfig, BodyMode, HttpMethod, KeyValueRow, RequestConfig};

/// A named snapshot of the request form
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    pub name: String,
    pub method: HttpMethod,
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub params: BTreeMap<String, String>,
    pub auth: AuthConfig,
    pub body_mode: BodyMode,
    pub body_raw: String,
    pub timeout_secs: f64,
    pub verify_tls: bool,
}

impl Preset {
    /// Snapshot the form. A blank name becomes the default placeholder.
    pub fn from_config(name: &str, config: &RequestConfig) -> Result<Self, ProbeError> {
        let name = match name.trim() {
            "" => DEFAULT_PRESET_NAME.to_string(),
            trimmed => trimmed.to_string(),
        };
        let preset = Preset {
            name,
            method: config.method,
            url: config.url.clone(),
            headers: collect_rows(&config.headers),
            params: collect_rows(&config.params),
            auth: config.auth.clone(),
            body_mode: config.body_mode,
            body_raw: config.body_raw.clone(),
            timeout_secs: config.timeout_secs,
            verify_tls: config.verify_tls,
        };
        preset.validate()?;
        Ok(preset)
    }

    /// Structural checks: timeout range and header names legal on the wire
    pub fn validate(&self) -> Result<(), ProbeError> {
        if !self.timeout_secs.is_finite()
            || !(MIN_TIMEOUT_SECS..=MAX_TIMEOUT_SECS).contains(&self.timeout_secs)
        {
            return Err(ProbeError::preset_validation(format!(
                "timeout must be between {} and {} seconds, got {}",
                MIN_TIMEOUT_SECS, MAX_TIMEOUT_SECS, self.timeout_secs
            )));
        }
        for key in self.headers.keys() {
            if HeaderName::from_bytes(key.as_bytes()).is_err() {
                return Err(ProbeError::preset_validation(format!(
                    "invalid header name '{}'",
                    key
                )));
            }
        }
        Ok(())
    }

    /// Form state to load back into the editor
    pub fn to_config(&self) -> RequestConfig {
        let rows = |map: &BTreeMap<String, String>| {
            map.iter()
                .map(|(k, v)| KeyValueRow::new(k.as_str(), v.as_str()))
                .collect::<Vec<_>>()
        };
        RequestConfig {
            method: self.method,
            url: self.url.clone(),
            params: rows(&self.params),
            headers: rows(&self.headers),
            body_mode: self.body_mode,
            body_raw: self.body_raw.clone(),
            auth: self.auth.clone(),
            timeout_secs: self.timeout_secs,
            verify_tls: self.verify_tls,
        }
    }
}

/// Session-scoped preset collection, unique by name
#[derive(Debug, Default)]
pub struct PresetStore {
    presets: Vec<Preset>,
}

impl PresetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upsert by name and return the stored name. A replaced preset moves to the end.
    pub fn save(&mut self, name: &str, config: &RequestConfig) -> Result<String, ProbeError> {
        let preset = Preset::from_config(name, config)?;
        let saved = preset.name.clone();
        self.presets.retain(|p| p.name != saved);
        self.presets.push(preset);
        tracing::info!(name = %saved, count = self.presets.len(), "Preset saved");
        Ok(saved)
    }

    /// Preset names in store order
    pub fn list(&self) -> Vec<&str> {
        self.presets.iter().map(|p| p.name.as_str()).collect()
    }

    pub fn get(&self, name: &str) -> Option<&Preset> {
        self.presets.iter().find(|p| p.name == name)
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}
