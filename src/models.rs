use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;
use std::time::Duration;

use crate::constants::{APPLICATION_JSON, DEFAULT_TIMEOUT_SECS};

/// HTTP Method enum
#[allow(clippy::upper_case_acronyms)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    GET,
    POST,
    PUT,
    PATCH,
    DELETE,
}

impl HttpMethod {
    pub fn as_str(&self) -> &str {
        match self {
            HttpMethod::GET => "GET",
            HttpMethod::POST => "POST",
            HttpMethod::PUT => "PUT",
            HttpMethod::PATCH => "PATCH",
            HttpMethod::DELETE => "DELETE",
        }
    }

    /// GET never carries a body; every other method may.
    pub fn has_body(&self) -> bool {
        !matches!(self, HttpMethod::GET)
    }
}

impl FromStr for HttpMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "GET" => Ok(HttpMethod::GET),
            "POST" => Ok(HttpMethod::POST),
            "PUT" => Ok(HttpMethod::PUT),
            "PATCH" => Ok(HttpMethod::PATCH),
            "DELETE" => Ok(HttpMethod::DELETE),
            other => Err(format!("Unknown HTTP method: {}", other)),
        }
    }
}

/// One editable key/value row (header or query param), possibly incomplete
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct KeyValueRow {
    pub key: String,
    pub value: String,
}

impl KeyValueRow {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        KeyValueRow {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Which authentication scheme the form selects
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AuthMode {
    #[default]
    None,
    Bearer,
    Basic,
}

/// Auth fields as entered; only the ones matching `mode` are consulted
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthConfig {
    pub mode: AuthMode,
    pub bearer_token: Option<String>,
    pub basic_user: Option<String>,
    pub basic_pass: Option<String>,
}

impl AuthConfig {
    pub fn bearer(token: impl Into<String>) -> Self {
        AuthConfig {
            mode: AuthMode::Bearer,
            bearer_token: Some(token.into()),
            ..Default::default()
        }
    }

    pub fn basic(user: impl Into<String>, pass: Option<String>) -> Self {
        AuthConfig {
            mode: AuthMode::Basic,
            basic_user: Some(user.into()),
            basic_pass: pass,
            ..Default::default()
        }
    }
}

/// How the body text should be sent
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum BodyMode {
    #[default]
    None,
    Json,
    Raw,
}

/// Raw form state submitted by the host shell
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RequestConfig {
    pub method: HttpMethod,
    pub url: String,
    pub params: Vec<KeyValueRow>,
    pub headers: Vec<KeyValueRow>,
    pub body_mode: BodyMode,
    pub body_raw: String,
    pub auth: AuthConfig,
    pub timeout_secs: f64,
    pub verify_tls: bool,
}

impl Default for RequestConfig {
    fn default() -> Self {
        RequestConfig {
            method: HttpMethod::GET,
            url: String::new(),
            params: Vec::new(),
            headers: vec![KeyValueRow::new("Accept", APPLICATION_JSON)],
            body_mode: BodyMode::None,
            body_raw: String::new(),
            auth: AuthConfig::default(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            verify_tls: true,
        }
    }
}

/// Transport-level Basic credentials; the executor encodes them
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicCredentials {
    pub username: String,
    pub password: String,
}

/// Outbound body. JSON and raw text are mutually exclusive.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(serde_json::Value),
    Raw(String),
}

impl RequestBody {
    pub fn is_empty(&self) -> bool {
        matches!(self, RequestBody::Empty)
    }

    /// Bytes as they go on the wire
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            RequestBody::Empty => Vec::new(),
            RequestBody::Json(value) => value.to_string().into_bytes(),
            RequestBody::Raw(text) => text.clone().into_bytes(),
        }
    }
}

/// Fully resolved request, ready for execution
#[derive(Clone, Debug, PartialEq)]
pub struct RequestDescriptor {
    pub method: HttpMethod,
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub params: BTreeMap<String, String>,
    pub body: RequestBody,
    pub credentials: Option<BasicCredentials>,
    pub timeout: Duration,
    pub verify_tls: bool,
}

impl RequestDescriptor {
    /// Case-insensitive header lookup
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Response as received; never mutated after construction
#[derive(Clone, Debug, PartialEq)]
pub struct ResponsePayload {
    pub status: u16,
    pub elapsed: Duration,
    pub final_url: String,
    /// Lowercase header names; repeated headers joined with ", "
    pub headers: BTreeMap<String, String>,
    pub body: Vec<u8>,
}

impl ResponsePayload {
    pub fn content_type(&self) -> &str {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case("content-type"))
            .map(|(_, v)| v.as_str())
            .unwrap_or("")
    }
}
