//! HTTP client wrapper - executes descriptors and collects responses

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use base64::Engine;
use futures_util::StreamExt;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};

use crate::constants::{APP_NAME, APP_VERSION};
use crate::error::ProbeError;
use crate::models::{HttpMethod, RequestDescriptor, ResponsePayload};

/// Executes one descriptor over the network.
///
/// Failures of any kind come back as [`ProbeError::RequestFailed`]; nothing
/// is retried.
#[async_trait]
pub trait HttpExecutor: Send + Sync {
    async fn execute(&self, request: &RequestDescriptor) -> Result<ResponsePayload, ProbeError>;
}

/// reqwest-backed executor with one pooled client per TLS policy
#[derive(Clone, Debug)]
pub struct ReqwestExecutor {
    verified: reqwest::Client,
    insecure: reqwest::Client,
}

impl ReqwestExecutor {
    pub fn new() -> anyhow::Result<Self> {
        Ok(ReqwestExecutor {
            verified: create_client(true)?,
            insecure: create_client(false)?,
        })
    }

    fn client_for(&self, request: &RequestDescriptor) -> &reqwest::Client {
        if request.verify_tls {
            &self.verified
        } else {
            &self.insecure
        }
    }
}

#[async_trait]
impl HttpExecutor for ReqwestExecutor {
    async fn execute(&self, request: &RequestDescriptor) -> Result<ResponsePayload, ProbeError> {
        let start = Instant::now();
        let req_builder = build_request(self.client_for(request), request)?;

        let resp = req_builder
            .send()
            .await
            .map_err(|e| classify_error(&e, request.timeout))?;
        let elapsed = start.elapsed();

        let status = resp.status().as_u16();
        let final_url = resp.url().to_string();
        let headers = collect_headers(resp.headers());

        let mut body = Vec::new();
        let mut stream = resp.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let bytes = chunk.map_err(|e| {
                if e.is_timeout() {
                    classify_error(&e, request.timeout)
                } else {
                    ProbeError::request_failed(format!("Error reading body: {}", e))
                }
            })?;
            body.extend_from_slice(&bytes);
        }

        Ok(ResponsePayload {
            status,
            elapsed,
            final_url,
            headers,
            body,
        })
    }
}

/// Build a reqwest request from a descriptor
fn build_request(
    client: &reqwest::Client,
    request: &RequestDescriptor,
) -> Result<reqwest::RequestBuilder, ProbeError> {
    let method = match request.method {
        HttpMethod::GET => reqwest::Method::GET,
        HttpMethod::POST => reqwest::Method::POST,
        HttpMethod::PUT => reqwest::Method::PUT,
        HttpMethod::PATCH => reqwest::Method::PATCH,
        HttpMethod::DELETE => reqwest::Method::DELETE,
    };

    let mut headers = HeaderMap::new();
    for (key, value) in &request.headers {
        let name = HeaderName::from_bytes(key.as_bytes()).map_err(|e| {
            ProbeError::request_failed(format!("Invalid header name '{}': {}", key, e))
        })?;
        let value = HeaderValue::from_str(value).map_err(|e| {
            ProbeError::request_failed(format!("Invalid value for header '{}': {}", key, e))
        })?;
        headers.insert(name, value);
    }

    // Transport-level Basic credentials override any Authorization header
    if let Some(credentials) = &request.credentials {
        let encoded = base64::engine::general_purpose::STANDARD
            .encode(format!("{}:{}", credentials.username, credentials.password));
        let value = HeaderValue::from_str(&format!("Basic {}", encoded)).map_err(|e| {
            ProbeError::request_failed(format!("Invalid Basic credentials: {}", e))
        })?;
        headers.insert(AUTHORIZATION, value);
    }

    let mut req_builder = client
        .request(method, &request.url)
        .headers(headers)
        .timeout(request.timeout);

    if !request.params.is_empty() {
        req_builder = req_builder.query(&request.params);
    }

    if !request.body.is_empty() {
        req_builder = req_builder.body(request.body.to_bytes());
    }

    Ok(req_builder)
}

fn classify_error(e: &reqwest::Error, timeout: Duration) -> ProbeError {
    let message = if e.is_timeout() {
        format!("Request timed out after {}s", timeout.as_secs_f64())
    } else if e.is_connect() {
        format!("Connection failed: {}", e)
    } else {
        format!("Request failed: {}", e)
    };
    tracing::warn!(error = %e, "Transport failure");
    ProbeError::RequestFailed { message }
}

/// Lowercase header map; repeated headers are joined with ", "
fn collect_headers(map: &HeaderMap) -> BTreeMap<String, String> {
    let mut out = BTreeMap::new();
    for (name, value) in map {
        let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
        match out.entry(name.as_str().to_string()) {
            Entry::Occupied(mut entry) => {
                let existing: &mut String = entry.get_mut();
                existing.push_str(", ");
                existing.push_str(&value);
            }
            Entry::Vacant(entry) => {
                entry.insert(value);
            }
        }
    }
    out
}

/// Create an HTTP client, optionally accepting invalid certificates
pub fn create_client(verify_tls: bool) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(format!("{}/{}", APP_NAME, APP_VERSION))
        .danger_accept_invalid_certs(!verify_tls)
        .build()
}
