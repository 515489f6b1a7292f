//
//  bitbucket-rest-client
//  clients/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Resource Clients
//!
//! One client per resource family, each a trait with a single REST-backed
//! implementation. The clients build request paths, call the shared
//! [`HttpExecutor`] and parse the responses.
//!
//! - [`ProjectClient`]: projects, repositories, branches, pull requests, users
//! - [`BuildStatusClient`]: build statuses and build counts per commit
//! - [`SshClient`]: user SSH keys and project/repository access keys
//!
//! [`BitbucketClientFactory`] wires all three around one executor.
//!
//! ## Not-found handling
//!
//! | Operation kind | Result on 404 |
//! |----------------|---------------|
//! | Listing | Empty last page |
//! | Single lookup | `None` |
//! | Write | `Err(ApiError::NotFound)` |

mod build_status;
mod factory;
mod project;
mod ssh;

pub use build_status::{BuildStatusClient, BuildStatusClientRest};
pub use factory::BitbucketClientFactory;
pub use project::{ProjectClient, ProjectClientRest};
pub use ssh::{SshClient, SshClientRest};

use serde_json::Value;
use tracing::debug;

use crate::api::common::{ApiError, Page, Result};
use crate::api::parsers::parse_page;
use crate::api::{HttpExecutor, HttpMethod};

/// Page size used by the "get all" operations.
pub const DEFAULT_LIMIT: u32 = 100;

/// Issues a GET, turning not-found into `None`.
pub(crate) async fn get_optional(executor: &dyn HttpExecutor, path: &str) -> Result<Option<Value>> {
    match executor.execute(HttpMethod::Get, path, None).await {
        Ok(json) => Ok(Some(json)),
        Err(ApiError::NotFound(message)) => {
            debug!(%path, %message, "resource not found");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Fetches one page of a listing; not-found yields the empty page.
pub(crate) async fn get_page<T, F>(
    executor: &dyn HttpExecutor,
    path: &str,
    element: F,
) -> Result<Page<T>>
where
    F: Fn(&Value) -> Result<T>,
{
    match get_optional(executor, path).await? {
        Some(json) => parse_page(&json, element),
        None => Ok(Page::empty()),
    }
}
