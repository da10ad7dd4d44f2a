use crate::models::{
    AuthConfig, BodyMode, HttpMethod, KeyValueRow, RequestBody, RequestConfig,
    RequestDescriptor,
};
use anyhow::{anyhow, Result};
use reqwest::Url;

/// Parse a cURL command into form state
pub fn parse_curl(input: &str) -> Result<RequestConfig> {
    let mut config = RequestConfig {
        headers: Vec::new(),
        ..Default::default()
    };
    let mut method_given = false;

    // Remove line continuations and normalize
    let normalized = input
        .replace("\\\r\n", " ")
        .replace("\\\n", " ");

    let mut tokens = tokenize(&normalized)?;

    // Skip 'curl' command if present
    if tokens.first().map(|s| s.as_str()) == Some("curl") {
        tokens.remove(0);
    }

    let mut i = 0;
    while i < tokens.len() {
        let token = &tokens[i];
        let next = tokens.get(i + 1);

        match (token.as_str(), next) {
            ("-X" | "--request", Some(value)) => {
                config.method = value.parse().map_err(|e: String| anyhow!(e))?;
                method_given = true;
                i += 1;
            }
            ("-H" | "--header", Some(value)) => {
                let (key, value) = value
                    .split_once(':')
                    .ok_or_else(|| anyhow!("Invalid header format: {}", value))?;
                let (key, value) = (key.trim(), value.trim());
                match bearer_token(key, value) {
                    Some(token) => config.auth = AuthConfig::bearer(token),
                    None => config.headers.push(KeyValueRow::new(key, value)),
                }
                i += 1;
            }
            ("-d" | "--data" | "--data-raw" | "--data-binary", Some(value)) => {
                config.body_mode = if serde_json::from_str::<serde_json::Value>(value).is_ok() {
                    BodyMode::Json
                } else {
                    BodyMode::Raw
                };
                config.body_raw = value.clone();
                // Infer POST if not set
                if !method_given {
                    config.method = HttpMethod::POST;
                }
                i += 1;
            }
            ("-u" | "--user", Some(value)) => {
                let (user, pass) = match value.split_once(':') {
                    Some((user, pass)) => (user.to_string(), Some(pass.to_string())),
                    None => (value.clone(), None),
                };
                config.auth = AuthConfig::basic(user, pass);
                i += 1;
            }
            ("-m" | "--max-time", Some(value)) => {
                config.timeout_secs = value
                    .parse()
                    .map_err(|_| anyhow!("Invalid timeout: {}", value))?;
                i += 1;
            }
            ("-k" | "--insecure", _) => config.verify_tls = false,
            ("--compressed" | "-L" | "--location" | "-s" | "--silent" | "-v" | "--verbose", _) => {
                // Ignored flags
            }
            (flag, None) if flag.starts_with('-') => {
                return Err(anyhow!("Missing value for {}", flag));
            }
            _ => {
                if token.starts_with("http://") || token.starts_with("https://") {
                    config.url = token.clone();
                }
            }
        }
        i += 1;
    }

    if config.url.is_empty() {
        return Err(anyhow!("No URL found in cURL command"));
    }

    Ok(config)
}

fn bearer_token<'a>(key: &str, value: &'a str) -> Option<&'a str> {
    if !key.eq_ignore_ascii_case("authorization") {
        return None;
    }
    let (scheme, token) = value.split_once(' ')?;
    scheme.eq_ignore_ascii_case("bearer").then(|| token.trim())
}

/// Tokenize a curl command, respecting quotes
fn tokenize(input: &str) -> Result<Vec<String>> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_single_quote = false;
    let mut in_double_quote = false;
    let mut escape_next = false;
    let mut quoted = false;

    for c in input.chars() {
        if escape_next {
            current.push(c);
            escape_next = false;
            continue;
        }

        match c {
            '\\' if !in_single_quote => {
                escape_next = true;
            }
            '\'' if !in_double_quote => {
                in_single_quote = !in_single_quote;
                quoted = true;
            }
            '"' if !in_single_quote => {
                in_double_quote = !in_double_quote;
                quoted = true;
            }
            ' ' | '\t' | '\n' | '\r' if !in_single_quote && !in_double_quote => {
                if !current.is_empty() || quoted {
                    tokens.push(std::mem::take(&mut current));
                    quoted = false;
                }
            }
            _ => {
                current.push(c);
            }
        }
    }

    if in_single_quote || in_double_quote {
        return Err(anyhow!("Unterminated quote in cURL command"));
    }

    if !current.is_empty() || quoted {
        tokens.push(current);
    }

    Ok(tokens)
}

/// Quote a shell argument with single quotes
fn shell_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', "'\\''"))
}

/// Format a descriptor as cURL command
pub fn to_curl(request: &RequestDescriptor) -> Result<String> {
    let mut parts = vec!["curl".to_string()];

    // Method
    if request.method != HttpMethod::GET {
        parts.push(format!("-X {}", request.method.as_str()));
    }

    // URL, with query params merged in
    let url = if request.params.is_empty() {
        request.url.clone()
    } else {
        Url::parse_with_params(&request.url, &request.params)?.to_string()
    };
    parts.push(shell_quote(&url));

    // Headers; Basic credentials replace any Authorization header on the wire
    for (key, value) in &request.headers {
        if request.credentials.is_some() && key.eq_ignore_ascii_case("authorization") {
            continue;
        }
        parts.push(format!("-H {}", shell_quote(&format!("{}: {}", key, value))));
    }

    // Auth
    if let Some(credentials) = &request.credentials {
        parts.push(format!(
            "-u {}",
            shell_quote(&format!("{}:{}", credentials.username, credentials.password))
        ));
    }

    // Body
    match &request.body {
        RequestBody::Empty => {}
        RequestBody::Json(value) => {
            parts.push(format!("-d {}", shell_quote(&serde_json::to_string(value)?)));
        }
        RequestBody::Raw(text) => parts.push(format!("-d {}", shell_quote(text))),
    }

    Ok(parts.join(" \\\n  "))
}

/// Best-effort preview: a descriptor that cannot be rendered has no preview
pub fn curl_preview(request: &RequestDescriptor) -> Option<String> {
    match to_curl(request) {
        Ok(cmd) => Some(cmd),
        Err(e) => {
            tracing::debug!(error = %e, url = %request.url, "cURL preview omitted");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BasicCredentials;
    use serde_json::json;
    use std::collections::BTreeMap;
    use std::time::Duration;

    fn descriptor(method: HttpMethod, url: &str) -> RequestDescriptor {
        RequestDescriptor {
            method,
            url: url.to_string(),
            headers: BTreeMap::new(),
            params: BTreeMap::new(),
            body: RequestBody::Empty,
            credentials: None,
            timeout: Duration::from_secs(20),
            verify_tls: true,
        }
    }

    #[test]
    fn test_parse_simple_get() {
        let curl = "curl https://api.example.com/users";
        let req = parse_curl(curl).unwrap();
        assert_eq!(req.url, "https://api.example.com/users");
        assert_eq!(req.method, HttpMethod::GET);
        assert!(req.headers.is_empty());
    }

    #[test]
    fn test_parse_post_with_data() {
        let curl = r#"curl -X POST -H "Content-Type: application/json" -d '{"name":"test"}' https://api.example.com/users"#;
        let req = parse_curl(curl).unwrap();
        assert_eq!(req.method, HttpMethod::POST);
        assert_eq!(req.body_mode, BodyMode::Json);
        assert_eq!(req.body_raw, r#"{"name":"test"}"#);
        assert_eq!(req.headers, vec![KeyValueRow::new("Content-Type", "application/json")]);
    }

    #[test]
    fn test_parse_data_infers_post_and_raw_mode() {
        let req = parse_curl("curl -d 'a=1&b=2' 'https://host/form'").unwrap();
        assert_eq!(req.method, HttpMethod::POST);
        assert_eq!(req.body_mode, BodyMode::Raw);
        assert_eq!(req.url, "https://host/form");
    }

    #[test]
    fn test_parse_explicit_method_survives_data() {
        let req = parse_curl("curl -X PUT -d x https://host").unwrap();
        assert_eq!(req.method, HttpMethod::PUT);
    }

    #[test]
    fn test_parse_auth_and_flags() {
        let req = parse_curl(
            "curl -k -m 5 -H 'Authorization: Bearer abc' --compressed https://host",
        )
        .unwrap();
        assert_eq!(req.auth, AuthConfig::bearer("abc"));
        assert!(req.headers.is_empty());
        assert!(!req.verify_tls);
        assert_eq!(req.timeout_secs, 5.0);

        let req = parse_curl("curl -u bob:s3cret https://host").unwrap();
        assert_eq!(req.auth, AuthConfig::basic("bob", Some("s3cret".into())));
    }

    #[test]
    fn test_parse_line_continuations() {
        let req = parse_curl("curl \\\n  -X DELETE \\\n  'https://host/items/1'").unwrap();
        assert_eq!(req.method, HttpMethod::DELETE);
        assert_eq!(req.url, "https://host/items/1");
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_curl("curl -X BREW https://host").is_err());
        assert!(parse_curl("curl 'https://host").is_err());
        assert!(parse_curl("curl -H nocolon https://host").is_err());
        assert!(parse_curl("curl -X GET").is_err());
    }

    #[test]
    fn test_to_curl_get() {
        let cmd = to_curl(&descriptor(HttpMethod::GET, "https://host/ping")).unwrap();
        assert_eq!(cmd, "curl \\\n  'https://host/ping'");
    }

    #[test]
    fn test_to_curl_full_request() {
        let mut req = descriptor(HttpMethod::POST, "https://host/items");
        req.params.insert("q".into(), "a b".into());
        req.headers.insert("Content-Type".into(), "application/json".into());
        req.credentials = Some(BasicCredentials {
            username: "u".into(),
            password: "p".into(),
        });
        req.body = RequestBody::Json(json!({"name": "it's"}));
        let cmd = to_curl(&req).unwrap();
        assert_eq!(
            cmd,
            "curl \\\n  -X POST \\\n  'https://host/items?q=a+b' \\\n  -H 'Content-Type: application/json' \\\n  -u 'u:p' \\\n  -d '{\"name\":\"it'\\''s\"}'"
        );
    }

    #[test]
    fn test_basic_credentials_hide_authorization_header() {
        let mut req = descriptor(HttpMethod::GET, "https://host/secure");
        req.headers.insert("authorization".into(), "Token abc".into());
        req.headers.insert("X-Trace".into(), "1".into());
        req.credentials = Some(BasicCredentials {
            username: "u".into(),
            password: "p".into(),
        });
        let cmd = to_curl(&req).unwrap();
        assert!(!cmd.contains("Token abc"));
        assert!(cmd.contains("-H 'X-Trace: 1'"));
        assert!(cmd.contains("-u 'u:p'"));

        req.credentials = None;
        assert!(to_curl(&req).unwrap().contains("-H 'authorization: Token abc'"));
    }

    #[test]
    fn test_preview_is_omitted_when_url_cannot_be_parsed() {
        let mut req = descriptor(HttpMethod::GET, "http//broken");
        req.params.insert("a".into(), "1".into());
        assert!(to_curl(&req).is_err());
        assert!(curl_preview(&req).is_none());
    }

    #[test]
    fn test_preview_round_trips_through_import() {
        let mut req = descriptor(HttpMethod::PATCH, "https://host/x");
        req.headers.insert("X-Mode".into(), "fast".into());
        req.body = RequestBody::Raw("hello world".into());
        let parsed = parse_curl(&to_curl(&req).unwrap()).unwrap();
        assert_eq!(parsed.method, HttpMethod::PATCH);
        assert_eq!(parsed.headers, vec![KeyValueRow::new("X-Mode", "fast")]);
        assert_eq!(parsed.body_raw, "hello world");
    }
}
