//! Response interpretation - decides how a body is shown

use std::collections::BTreeMap;
use std::time::Duration;

use serde_json::Value;

use crate::constants::APPLICATION_JSON;
use crate::curl;
use crate::models::{RequestDescriptor, ResponsePayload};

/// How a response body is displayed
#[derive(Clone, Debug, PartialEq)]
pub enum BodyView {
    Structured(Value),
    Plain(String),
}

impl BodyView {
    /// Text form: pretty JSON for structured bodies, verbatim otherwise
    pub fn to_text(&self) -> String {
        match self {
            BodyView::Structured(value) => {
                serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
            }
            BodyView::Plain(text) => text.clone(),
        }
    }
}

/// Pick the body representation.
///
/// A declared `application/json` body is parsed first; anything else is
/// still sniffed for JSON. Bodies that fail both are shown as plain text.
pub fn interpret_body(content_type: &str, body: &[u8]) -> BodyView {
    let declared_json = content_type.contains(APPLICATION_JSON);
    match serde_json::from_slice::<Value>(body) {
        Ok(value) => {
            if !declared_json {
                tracing::debug!(content_type, "Undeclared JSON body");
            }
            BodyView::Structured(value)
        }
        Err(_) => BodyView::Plain(String::from_utf8_lossy(body).into_owned()),
    }
}

/// Everything the host shell needs to show one response
#[derive(Clone, Debug, PartialEq)]
pub struct DisplayModel {
    pub status: u16,
    pub elapsed: Duration,
    pub final_url: String,
    pub headers: BTreeMap<String, String>,
    pub body: BodyView,
    pub curl: Option<String>,
    pub raw: Vec<u8>,
}

impl DisplayModel {
    pub fn new(descriptor: &RequestDescriptor, payload: ResponsePayload) -> Self {
        let body = interpret_body(payload.content_type(), &payload.body);
        DisplayModel {
            status: payload.status,
            elapsed: payload.elapsed,
            final_url: payload.final_url,
            headers: payload.headers,
            body,
            curl: curl::curl_preview(descriptor),
            raw: payload.body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{HttpMethod, RequestBody};
    use serde_json::json;

    #[test]
    fn test_declared_json_is_structured() {
        let view = interpret_body("application/json", br#"{"a":1}"#);
        assert_eq!(view, BodyView::Structured(json!({"a": 1})));
    }

    #[test]
    fn test_declared_json_with_charset_is_structured() {
        let view = interpret_body("application/json; charset=utf-8", b"[1,2]");
        assert_eq!(view, BodyView::Structured(json!([1, 2])));
    }

    #[test]
    fn test_mislabelled_json_is_still_structured() {
        let view = interpret_body("text/plain", br#"{"a":1}"#);
        assert_eq!(view, BodyView::Structured(json!({"a": 1})));
    }

    #[test]
    fn test_undeclared_null_is_structured() {
        let view = interpret_body("text/plain", b"null");
        assert_eq!(view, BodyView::Structured(serde_json::Value::Null));
    }

    #[test]
    fn test_non_json_is_plain_for_any_content_type() {
        for content_type in ["application/json", "text/plain", ""] {
            let view = interpret_body(content_type, b"not json");
            assert_eq!(view, BodyView::Plain("not json".into()));
        }
    }

    #[test]
    fn test_structured_text_is_pretty_printed() {
        let text = BodyView::Structured(json!({"a": 1})).to_text();
        assert_eq!(text, "{\n  \"a\": 1\n}");
    }

    #[test]
    fn test_display_model_keeps_raw_bytes_and_preview() {
        let descriptor = RequestDescriptor {
            method: HttpMethod::GET,
            url: "https://host/ping".into(),
            headers: BTreeMap::new(),
            params: BTreeMap::new(),
            body: RequestBody::Empty,
            credentials: None,
            timeout: Duration::from_secs(20),
            verify_tls: true,
        };
        let payload = ResponsePayload {
            status: 204,
            elapsed: Duration::from_millis(12),
            final_url: "https://host/ping".into(),
            headers: BTreeMap::new(),
            body: b"pong".to_vec(),
        };
        let model = DisplayModel::new(&descriptor, payload);
        assert_eq!(model.status, 204);
        assert_eq!(model.raw, b"pong");
        assert_eq!(model.body, BodyView::Plain("pong".into()));
        assert_eq!(model.curl.as_deref(), Some("curl \\\n  'https://host/ping'"));
    }
}
