//! API session shared by the HTTP image store and product API.
//!
//! The base URL and auth token are read from configuration once, here, and
//! travel with the client instead of being looked up at each call site.

use crate::config::AppConfig;
use crate::error::{ArtisanError, Result};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use url::Url;

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
    auth_token: Option<String>,
}

impl ApiClient {
    pub fn new(
        base_url: &str,
        auth_token: Option<String>,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        // Url::join drops the last path segment unless the base ends with '/'
        let mut normalized = base_url.trim().to_string();
        if !normalized.ends_with('/') {
            normalized.push('/');
        }
        let base_url = Url::parse(&normalized)?;

        let mut builder = Client::builder()
            .user_agent(concat!("artisan-listing/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        Ok(Self {
            http,
            base_url,
            auth_token: auth_token.filter(|token| !token.trim().is_empty()),
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let base_url = config
            .api_base_url
            .as_deref()
            .ok_or_else(|| ArtisanError::Config("No API base URL configured".to_string()))?;

        Self::new(
            base_url,
            config.auth_token.clone(),
            config.request_timeout_secs.map(Duration::from_secs),
        )
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth_token.is_some()
    }

    pub fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    /// POST request to `path` with the bearer token attached when present
    pub fn post(&self, path: &str) -> Result<RequestBuilder> {
        let url = self.endpoint(path)?;
        Ok(self.authorize(self.http.post(url)))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.auth_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ServerMessage {
    message: Option<String>,
    error: Option<String>,
}

/// Human-readable message from an error response body, falling back to the status
pub fn server_error_message(status: StatusCode, body: &str) -> String {
    let parsed: ServerMessage = serde_json::from_str(body).unwrap_or_default();
    parsed
        .message
        .or(parsed.error)
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| {
            let body = body.trim();
            if body.is_empty() || body.starts_with('{') {
                format!("request failed with status {}", status)
            } else {
                format!("request failed with status {}: {}", status, body)
            }
        })
}
