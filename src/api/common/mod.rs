//
//  bitbucket-rest-client
//  api/common/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Common API Types for the Bitbucket Server REST client
//!
//! This module provides the shared error type and the pagination primitives
//! used by every resource client.
//!
//! # Overview
//!
//! - [`ApiError`] - Unified error type for all API operations
//! - [`Result`] - Crate-wide result alias defaulting to [`ApiError`]
//! - Pagination types (re-exported from the [`pagination`] submodule)
//!
//! # Example
//!
//! ```rust
//! use bitbucket_rest_client::api::common::ApiError;
//!
//! fn handle_result<T>(result: Result<T, ApiError>) {
//!     match result {
//!         Ok(_) => println!("Success!"),
//!         Err(ApiError::NotFound(resource)) => println!("Resource not found: {}", resource),
//!         Err(ApiError::InvalidArgument(reason)) => println!("Bad call: {}", reason),
//!         Err(e) => println!("Error: {}", e),
//!     }
//! }
//! ```

use reqwest::StatusCode;
use thiserror::Error;

mod pagination;

pub use pagination::*;

/// Result alias used throughout the crate.
pub type Result<T, E = ApiError> = std::result::Result<T, E>;

/// Unified error type for all Bitbucket API operations.
///
/// # Variants
///
/// | Variant | Description | HTTP Status |
/// |---------|-------------|-------------|
/// | `NotFound` | Requested resource does not exist | 404 |
/// | `InvalidArgument` | Local precondition violated before sending | N/A |
/// | `AuthFailed` | Invalid or missing credentials | 401 |
/// | `Forbidden` | Insufficient permissions | 403 |
/// | `BadRequest` | Invalid request parameters | 400 |
/// | `Conflict` | Resource state conflict (e.g. duplicate key) | 409 |
/// | `RateLimited` | Too many requests | 429 |
/// | `ServerError` | Internal server error | 5xx |
/// | `Http` | Any other non-success status | other |
/// | `Network` | Transport-level failure | N/A |
/// | `Parse` | Response did not match the expected schema | N/A |
/// | `InvalidUrl` | The configured base URL is not a valid URL | N/A |
/// | `Shutdown` | The executor was used after `shutdown()` | N/A |
///
/// # Notes
///
/// - Listing operations never surface `NotFound`; they return an empty page.
/// - Single-entity lookups turn `NotFound` into `None`.
/// - Nothing in this crate retries; every other variant reaches the caller as is.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The requested resource was not found (HTTP 404).
    ///
    /// # Parameters
    ///
    /// - `0` - Description of the resource that was not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// A caller-supplied argument violated a local precondition.
    ///
    /// Raised synchronously, before any request is built or sent.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Authentication failed due to invalid, expired or missing credentials.
    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    /// The authenticated user lacks permission for the operation.
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// The server rejected the request as malformed.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The request conflicts with the current state of the resource.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// API rate limit has been exceeded.
    #[error("Rate limit exceeded")]
    RateLimited,

    /// An internal server error occurred on the Bitbucket server.
    #[error("Server error: {0}")]
    ServerError(String),

    /// Any other non-success HTTP status.
    #[error("HTTP {status}: {message}")]
    Http {
        /// The HTTP status code returned by the server
        status: u16,
        /// Message extracted from the error body
        message: String,
    },

    /// A network-level error occurred during the request.
    ///
    /// Covers connection failures, timeouts, DNS resolution errors and
    /// other transport-layer issues.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The response body did not match the expected schema.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// The configured base URL could not be parsed.
    #[error("Invalid base URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The HTTP executor has already been shut down.
    #[error("HTTP executor has been shut down")]
    Shutdown,
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

impl ApiError {
    /// Maps a non-success HTTP status and its body to an error variant.
    ///
    /// Bitbucket Server returns errors in the format:
    /// ```json
    /// {"errors": [{"message": "Human readable message"}]}
    /// ```
    ///
    /// The first message is extracted when present; otherwise the raw body
    /// (or the status reason) is kept.
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let message = extract_error_message(body).unwrap_or_else(|| {
            if body.trim().is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("no response body")
                    .to_string()
            } else {
                body.to_string()
            }
        });

        match status {
            StatusCode::NOT_FOUND => Self::NotFound(message),
            StatusCode::UNAUTHORIZED => Self::AuthFailed(message),
            StatusCode::FORBIDDEN => Self::Forbidden(message),
            StatusCode::BAD_REQUEST => Self::BadRequest(message),
            StatusCode::CONFLICT => Self::Conflict(message),
            StatusCode::TOO_MANY_REQUESTS => Self::RateLimited,
            s if s.is_server_error() => Self::ServerError(message),
            s => Self::Http {
                status: s.as_u16(),
                message,
            },
        }
    }

    /// Returns `true` if this error is the not-found signal.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

fn extract_error_message(body: &str) -> Option<String> {
    let json = serde_json::from_str::<serde_json::Value>(body).ok()?;

    // Server format: {"errors": [{"message": "..."}]}
    if let Some(message) = json
        .get("errors")
        .and_then(|e| e.as_array())
        .and_then(|arr| arr.first())
        .and_then(|e| e.get("message"))
        .and_then(|m| m.as_str())
    {
        return Some(message.to_string());
    }

    // Simple message format: {"message": "..."}
    json.get("message")
        .and_then(|m| m.as_str())
        .map(str::to_string)
}
