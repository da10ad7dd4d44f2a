//! Request building - merges form state, auth and body into one descriptor

use std::time::Duration;

use crate::auth::resolve_auth;
use crate::constants::{APPLICATION_JSON, DEFAULT_TIMEOUT_SECS, MAX_TIMEOUT_SECS, MIN_TIMEOUT_SECS};
use crate::error::ProbeError;
use crate::kv::collect_rows;
use crate::models::{BodyMode, RequestBody, RequestConfig, RequestDescriptor};

/// Build a descriptor from the submitted form state.
///
/// Fails before any network activity when the URL lacks an `http` prefix or
/// when a JSON body does not parse.
pub fn build_request(config: &RequestConfig) -> Result<RequestDescriptor, ProbeError> {
    let url = config.url.trim();
    if !url.starts_with("http") {
        return Err(ProbeError::InvalidUrl(url.to_string()));
    }

    let mut headers = collect_rows(&config.headers);
    let params = collect_rows(&config.params);

    let auth = resolve_auth(&config.auth);
    for (key, value) in auth.headers {
        headers.retain(|k, _| !k.eq_ignore_ascii_case(&key));
        headers.insert(key, value);
    }

    let body_mode = if config.method.has_body() {
        config.body_mode
    } else {
        BodyMode::None
    };

    let body = match body_mode {
        BodyMode::Json if !config.body_raw.trim().is_empty() => {
            let value = serde_json::from_str(&config.body_raw).map_err(|e| {
                ProbeError::MalformedJsonBody {
                    message: e.to_string(),
                }
            })?;
            RequestBody::Json(value)
        }
        BodyMode::Raw => RequestBody::Raw(config.body_raw.clone()),
        BodyMode::Json | BodyMode::None => RequestBody::Empty,
    };

    if !body.is_empty() {
        let has_content_type = headers
            .keys()
            .any(|k| k.eq_ignore_ascii_case("content-type"));
        if !has_content_type {
            headers.insert("Content-Type".to_string(), APPLICATION_JSON.to_string());
        }
    }

    let descriptor = RequestDescriptor {
        method: config.method,
        url: url.to_string(),
        headers,
        params,
        body,
        credentials: auth.credentials,
        timeout: clamp_timeout(config.timeout_secs),
        verify_tls: config.verify_tls,
    };
    tracing::debug!(
        method = descriptor.method.as_str(),
        url = %descriptor.url,
        headers = descriptor.headers.len(),
        params = descriptor.params.len(),
        "Built request descriptor"
    );
    Ok(descriptor)
}

/// Clamp into the allowed range; non-finite values use the default.
fn clamp_timeout(secs: f64) -> Duration {
    let secs = if secs.is_finite() {
        secs.clamp(MIN_TIMEOUT_SECS, MAX_TIMEOUT_SECS)
    } else {
        DEFAULT_TIMEOUT_SECS
    };
    Duration::from_secs_f64(secs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AuthConfig, HttpMethod, KeyValueRow};
    use serde_json::json;

    fn config(method: HttpMethod, url: &str) -> RequestConfig {
        RequestConfig {
            method,
            url: url.to_string(),
            headers: Vec::new(),
            ..Default::default()
        }
    }

    #[test]
    fn test_url_prefix_check() {
        let err = build_request(&config(HttpMethod::GET, "ftp://host")).unwrap_err();
        assert_eq!(err, ProbeError::InvalidUrl("ftp://host".into()));
        assert!(build_request(&config(HttpMethod::GET, "https://host")).is_ok());
        assert!(build_request(&config(HttpMethod::GET, "http://host")).is_ok());
        assert!(build_request(&config(HttpMethod::GET, "  https://host  ")).is_ok());
    }

    #[test]
    fn test_plain_get_has_no_body_and_no_content_type() {
        let desc = build_request(&config(HttpMethod::GET, "https://api.example.com/ping")).unwrap();
        assert_eq!(desc.body, RequestBody::Empty);
        assert!(desc.header("Content-Type").is_none());
        assert!(desc.headers.is_empty());
        assert!(desc.params.is_empty());
    }

    #[test]
    fn test_get_ignores_body_mode() {
        let mut cfg = config(HttpMethod::GET, "https://host");
        cfg.body_mode = BodyMode::Raw;
        cfg.body_raw = "payload".into();
        let desc = build_request(&cfg).unwrap();
        assert_eq!(desc.body, RequestBody::Empty);
        assert!(desc.header("Content-Type").is_none());
    }

    #[test]
    fn test_post_json_with_bearer() {
        let mut cfg = config(HttpMethod::POST, "https://host/items");
        cfg.body_mode = BodyMode::Json;
        cfg.body_raw = r#"{"x":1}"#.into();
        cfg.auth = AuthConfig::bearer("tok");
        let desc = build_request(&cfg).unwrap();
        assert_eq!(desc.header("Authorization"), Some("Bearer tok"));
        assert_eq!(desc.header("Content-Type"), Some("application/json"));
        assert_eq!(desc.body, RequestBody::Json(json!({"x": 1})));
    }

    #[test]
    fn test_malformed_json_is_rejected() {
        let mut cfg = config(HttpMethod::PUT, "https://host");
        cfg.body_mode = BodyMode::Json;
        cfg.body_raw = "{not json".into();
        assert!(matches!(
            build_request(&cfg),
            Err(ProbeError::MalformedJsonBody { .. })
        ));
    }

    #[test]
    fn test_blank_json_body_sends_nothing() {
        let mut cfg = config(HttpMethod::POST, "https://host");
        cfg.body_mode = BodyMode::Json;
        cfg.body_raw = "   \n".into();
        let desc = build_request(&cfg).unwrap();
        assert_eq!(desc.body, RequestBody::Empty);
        assert!(desc.header("Content-Type").is_none());
    }

    #[test]
    fn test_raw_body_defaults_to_json_content_type() {
        let mut cfg = config(HttpMethod::PATCH, "https://host");
        cfg.body_mode = BodyMode::Raw;
        cfg.body_raw = "hello".into();
        let desc = build_request(&cfg).unwrap();
        assert_eq!(desc.body, RequestBody::Raw("hello".into()));
        assert_eq!(desc.header("content-type"), Some("application/json"));
    }

    #[test]
    fn test_user_content_type_is_kept() {
        let mut cfg = config(HttpMethod::POST, "https://host");
        cfg.body_mode = BodyMode::Raw;
        cfg.body_raw = "a,b".into();
        cfg.headers = vec![KeyValueRow::new("content-type", "text/csv")];
        let desc = build_request(&cfg).unwrap();
        assert_eq!(desc.headers.len(), 1);
        assert_eq!(desc.header("Content-Type"), Some("text/csv"));
    }

    #[test]
    fn test_auth_header_wins_over_user_header() {
        let mut cfg = config(HttpMethod::GET, "https://host");
        cfg.headers = vec![KeyValueRow::new("authorization", "Token old")];
        cfg.auth = AuthConfig::bearer("new");
        let desc = build_request(&cfg).unwrap();
        assert_eq!(desc.headers.len(), 1);
        assert_eq!(desc.header("Authorization"), Some("Bearer new"));
    }

    #[test]
    fn test_basic_auth_becomes_credentials_not_header() {
        let mut cfg = config(HttpMethod::GET, "https://host");
        cfg.auth = AuthConfig::basic("alice", Some("pw".into()));
        let desc = build_request(&cfg).unwrap();
        assert!(desc.header("Authorization").is_none());
        assert_eq!(desc.credentials.map(|c| c.username), Some("alice".into()));
    }

    #[test]
    fn test_timeout_is_clamped() {
        let mut cfg = config(HttpMethod::GET, "https://host");
        cfg.timeout_secs = 500.0;
        assert_eq!(build_request(&cfg).unwrap().timeout, Duration::from_secs(120));
        cfg.timeout_secs = 0.0;
        assert_eq!(build_request(&cfg).unwrap().timeout, Duration::from_secs(1));
        cfg.timeout_secs = f64::NAN;
        assert_eq!(build_request(&cfg).unwrap().timeout, Duration::from_secs(20));
    }
}
