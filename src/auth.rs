//! Auth resolution - turns the auth form fields into headers or credentials

use std::collections::BTreeMap;

use crate::models::{AuthConfig, AuthMode, BasicCredentials};

/// What an auth mode contributes to the outgoing request
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthAdditions {
    pub headers: BTreeMap<String, String>,
    pub credentials: Option<BasicCredentials>,
}

/// Resolve auth fields. Total: incomplete input falls back to no auth.
pub fn resolve_auth(auth: &AuthConfig) -> AuthAdditions {
    match auth.mode {
        AuthMode::Bearer => match auth.bearer_token.as_deref() {
            Some(token) if !token.is_empty() => {
                let mut headers = BTreeMap::new();
                headers.insert("Authorization".to_string(), format!("Bearer {}", token));
                AuthAdditions {
                    headers,
                    credentials: None,
                }
            }
            _ => AuthAdditions::default(),
        },
        AuthMode::Basic => match &auth.basic_user {
            Some(username) => AuthAdditions {
                headers: BTreeMap::new(),
                credentials: Some(BasicCredentials {
                    username: username.clone(),
                    password: auth.basic_pass.clone().unwrap_or_default(),
                }),
            },
            None => AuthAdditions::default(),
        },
        AuthMode::None => AuthAdditions::default(),
    }
}
