//
//  bitbucket-rest-client
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # API Layer
//!
//! The building blocks the resource clients are made of.
//!
//! ## Architecture
//!
//! - [`client`]: The [`HttpExecutor`] trait and its reqwest implementation
//! - [`common`]: Error type and pagination primitives
//! - [`server`]: Typed records for Bitbucket Server/Data Center payloads
//! - [`parsers`]: JSON tree to typed record conversion
//! - [`query`]: Request path and query string construction
//!
//! ## Error Handling
//!
//! API errors are returned as [`ApiError`] variants, which map to common HTTP error scenarios:
//!
//! - `AuthFailed`: 401 Unauthorized
//! - `Forbidden`: 403 Forbidden
//! - `NotFound`: 404 Not Found
//! - `RateLimited`: 429 Too Many Requests
//! - `ServerError`: 5xx Server Errors

/// HTTP executor trait and the reqwest-backed client.
pub mod client;

/// Shared error and pagination types.
pub mod common;

/// Response parsers for every domain type.
pub mod parsers;

/// URL and query parameter construction.
pub mod query;

/// Bitbucket Server/Data Center domain types.
pub mod server;

#[cfg(test)]
pub(crate) mod testing;

pub use client::{BitbucketClient, ClientConfig, HttpExecutor, HttpMethod};
pub use common::{collect_all, ApiError, Page, Range};
pub use query::PullRequestQuery;
