//
//  bitbucket-rest-client
//  api/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # HTTP Executor for the Bitbucket Server API
//!
//! Resource clients never talk to reqwest directly. They go through the
//! [`HttpExecutor`] trait, which takes a method, a path relative to the
//! server's base URL and an optional JSON body, and returns the parsed JSON
//! response or an [`ApiError`]. A 404 always surfaces as
//! [`ApiError::NotFound`] so callers can tell it apart from other failures.
//!
//! [`BitbucketClient`] is the reqwest-backed implementation.
//!
//! ## Features
//!
//! - Base URL normalisation and validation
//! - Authentication header injection
//! - Custom User-Agent header and request timeout
//! - Error status mapping with the server's error message extracted

use std::fmt;
use std::sync::RwLock;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use super::common::{ApiError, Result};
use crate::auth::AuthCredential;
use crate::config::normalize_base_url;

/// Request timeout applied when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP methods used by the resource clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Delete,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Delete => "DELETE",
        })
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Self::GET,
            HttpMethod::Post => Self::POST,
            HttpMethod::Delete => Self::DELETE,
        }
    }
}

/// Executes HTTP requests against one Bitbucket Server instance.
///
/// `path` is relative to the base URL and already carries its query string.
/// A successful response with an empty body yields [`Value::Null`].
#[async_trait]
pub trait HttpExecutor: Send + Sync {
    async fn execute(&self, method: HttpMethod, path: &str, body: Option<&Value>) -> Result<Value>;

    /// Releases the underlying connection pool. Requests issued afterwards
    /// fail with [`ApiError::Shutdown`].
    fn shutdown(&self) {}
}

/// Settings for constructing a [`BitbucketClient`].
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use bitbucket_rest_client::api::ClientConfig;
/// use bitbucket_rest_client::auth::AuthCredential;
///
/// let config = ClientConfig::new("bitbucket.example.com/", AuthCredential::token("pat"))
///     .with_timeout(Duration::from_secs(10));
/// assert_eq!(config.timeout, Duration::from_secs(10));
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server URL, e.g. "https://bitbucket.example.com" or "https://host/bitbucket".
    pub base_url: String,
    pub credentials: AuthCredential,
    pub timeout: Duration,
    pub user_agent: String,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>, credentials: AuthCredential) -> Self {
        Self {
            base_url: base_url.into(),
            credentials,
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("{}/{}", crate::APP_NAME, crate::VERSION),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// The reqwest-backed [`HttpExecutor`].
///
/// # Example
///
/// ```rust,no_run
/// use bitbucket_rest_client::api::{BitbucketClient, ClientConfig, HttpExecutor, HttpMethod};
/// use bitbucket_rest_client::auth::AuthCredential;
///
/// # async fn example() -> bitbucket_rest_client::api::common::Result<()> {
/// let config = ClientConfig::new("https://bitbucket.example.com", AuthCredential::token("pat"));
/// let client = BitbucketClient::new(&config)?;
/// let props = client
///     .execute(HttpMethod::Get, "/rest/api/1.0/application-properties", None)
///     .await?;
/// println!("{}", props["version"]);
/// # Ok(())
/// # }
/// ```
pub struct BitbucketClient {
    /// The pooled HTTP client; taken out on shutdown.
    http: RwLock<Option<Client>>,
    /// Normalised base URL without a trailing slash.
    base_url: String,
    credentials: AuthCredential,
}

impl BitbucketClient {
    /// Creates a client for the configured server.
    ///
    /// # Errors
    ///
    /// - [`ApiError::InvalidUrl`] if the base URL does not parse
    /// - [`ApiError::Network`] if the HTTP client cannot be built
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let base_url = normalize_base_url(&config.base_url)?;

        let http = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            http: RwLock::new(Some(http)),
            base_url,
            credentials: config.credentials.clone(),
        })
    }

    /// Returns the normalised base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn client(&self) -> Result<Client> {
        let slot = self.http.read().unwrap_or_else(|e| e.into_inner());
        slot.clone().ok_or(ApiError::Shutdown)
    }
}

#[async_trait]
impl HttpExecutor for BitbucketClient {
    async fn execute(&self, method: HttpMethod, path: &str, body: Option<&Value>) -> Result<Value> {
        let http = self.client()?;
        let url = format!("{}{}", self.base_url, path);
        debug!(%method, %path, "sending request");

        let mut request = http
            .request(method.into(), &url)
            .header(reqwest::header::ACCEPT, "application/json");
        if let Some(body) = body {
            request = request.json(body);
        }
        request = self.credentials.apply_to_request(request);

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            debug!(%method, %path, status = status.as_u16(), "request failed");
            return Err(ApiError::from_status(status, &text));
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        Ok(serde_json::from_str(&text)?)
    }

    fn shutdown(&self) {
        let mut slot = self.http.write().unwrap_or_else(|e| e.into_inner());
        if slot.take().is_some() {
            debug!(base_url = %self.base_url, "HTTP executor shut down");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_for(server: &mockito::Server, credentials: AuthCredential) -> BitbucketClient {
        BitbucketClient::new(&ClientConfig::new(server.url(), credentials)).unwrap()
    }

    #[tokio::test]
    async fn test_get_parses_json_and_sends_credentials() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/rest/api/1.0/projects/PRJ")
            .match_header("authorization", "Bearer secret")
            .match_header("accept", "application/json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"key":"PRJ","id":1,"name":"Project"}"#)
            .create_async()
            .await;

        let client = client_for(&server, AuthCredential::token("secret"));
        let json = client
            .execute(HttpMethod::Get, "/rest/api/1.0/projects/PRJ", None)
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(json["key"], "PRJ");
    }

    #[tokio::test]
    async fn test_post_sends_json_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/rest/api/1.0/projects")
            .match_body(mockito::Matcher::Json(serde_json::json!({"key": "NEW", "name": "New"})))
            .with_status(201)
            .with_body(r#"{"key":"NEW","id":9,"name":"New"}"#)
            .create_async()
            .await;

        let client = client_for(&server, AuthCredential::basic("jdoe", "pw"));
        let body = serde_json::json!({"key": "NEW", "name": "New"});
        let json = client
            .execute(HttpMethod::Post, "/rest/api/1.0/projects", Some(&body))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(json["id"], 9);
    }

    #[tokio::test]
    async fn test_empty_body_is_null() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("DELETE", "/rest/api/1.0/projects/PRJ")
            .with_status(204)
            .create_async()
            .await;

        let client = client_for(&server, AuthCredential::Anonymous);
        let json = client
            .execute(HttpMethod::Delete, "/rest/api/1.0/projects/PRJ", None)
            .await
            .unwrap();

        assert_eq!(json, Value::Null);
    }

    #[tokio::test]
    async fn test_statuses_map_to_errors() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/missing")
            .with_status(404)
            .with_body(r#"{"errors":[{"message":"Project MISSING does not exist."}]}"#)
            .create_async()
            .await;
        server
            .mock("GET", "/denied")
            .with_status(401)
            .create_async()
            .await;
        server
            .mock("GET", "/broken")
            .with_status(500)
            .with_body("boom")
            .create_async()
            .await;

        let client = client_for(&server, AuthCredential::Anonymous);

        let err = client.execute(HttpMethod::Get, "/missing", None).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(ref m) if m == "Project MISSING does not exist."));

        let err = client.execute(HttpMethod::Get, "/denied", None).await.unwrap_err();
        assert!(matches!(err, ApiError::AuthFailed(_)));

        let err = client.execute(HttpMethod::Get, "/broken", None).await.unwrap_err();
        assert!(matches!(err, ApiError::ServerError(ref m) if m == "boom"));
    }

    #[tokio::test]
    async fn test_invalid_json_is_parse_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/garbled")
            .with_status(200)
            .with_body("{not json")
            .create_async()
            .await;

        let client = client_for(&server, AuthCredential::Anonymous);
        let err = client.execute(HttpMethod::Get, "/garbled", None).await.unwrap_err();
        assert!(matches!(err, ApiError::Parse(_)));
    }

    #[tokio::test]
    async fn test_shutdown_rejects_later_requests() {
        let server = mockito::Server::new_async().await;
        let client = client_for(&server, AuthCredential::Anonymous);

        client.shutdown();
        client.shutdown();

        let err = client.execute(HttpMethod::Get, "/anything", None).await.unwrap_err();
        assert!(matches!(err, ApiError::Shutdown));
    }

    #[test]
    fn test_invalid_base_url() {
        let config = ClientConfig::new("http://[::1", AuthCredential::Anonymous);
        assert!(matches!(
            BitbucketClient::new(&config),
            Err(ApiError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_default_user_agent() {
        let config = ClientConfig::new("https://bb.example.com", AuthCredential::Anonymous);
        assert!(config.user_agent.starts_with("bbrest/"));
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    }
}
