//
//  bitbucket-rest-client
//  config/hosts.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Server URL Normalisation
//!
//! Users write server addresses in many shapes: with or without a scheme,
//! with trailing slashes, with a context path. Requests are built by
//! appending an absolute API path to the base URL, so the base URL is
//! normalised once when the client is created.
//!
//! ```rust
//! use bitbucket_rest_client::config::normalize_base_url;
//!
//! assert_eq!(
//!     normalize_base_url(" bitbucket.example.com/ ").unwrap(),
//!     "https://bitbucket.example.com"
//! );
//! assert_eq!(
//!     normalize_base_url("http://host:7990/bitbucket//").unwrap(),
//!     "http://host:7990/bitbucket"
//! );
//! ```

use url::Url;

use crate::api::common::{ApiError, Result};

/// Scheme assumed when the address carries none.
pub const DEFAULT_SCHEME: &str = "https";

/// Trims the address, adds `https://` when no scheme is given, strips
/// trailing slashes and checks that the result is a valid URL.
///
/// # Errors
///
/// [`ApiError::InvalidUrl`] if the address does not parse, and
/// [`ApiError::InvalidArgument`] if it is empty or carries a query string.
pub fn normalize_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ApiError::InvalidArgument(
            "base URL must not be empty".to_string(),
        ));
    }

    let with_scheme = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("{}://{}", DEFAULT_SCHEME, trimmed)
    };
    let normalized = with_scheme.trim_end_matches('/').to_string();

    let parsed = Url::parse(&normalized)?;
    if parsed.query().is_some() || parsed.fragment().is_some() {
        return Err(ApiError::InvalidArgument(format!(
            "base URL must not carry a query or fragment: {}",
            normalized
        )));
    }

    Ok(normalized)
}
