//
//  bitbucket-rest-client
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Bitbucket Server REST Client
//!
//! A typed client library for the REST API of Bitbucket Server and
//! Bitbucket Data Center, plus the `bbrest` command-line tool built on it.
//!
//! ## Overview
//!
//! The library exposes three resource clients behind traits:
//!
//! - [`clients::ProjectClient`]: projects, repositories, branches, forks,
//!   pull requests and their changes, activities and tasks, users and
//!   server properties
//! - [`clients::BuildStatusClient`]: build results attached to commits
//! - [`clients::SshClient`]: user SSH keys and project/repository access keys
//!
//! Every listing comes in two flavours: a single [`Page`] for an explicit
//! [`Range`], and a `get_all_*` variant that walks every page.
//!
//! ## Module Structure
//!
//! - [`api`]: HTTP executor, error type, pagination, response parsers and models
//! - [`auth`]: Credentials attached to every request
//! - [`clients`]: Resource clients and the factory wiring them together
//! - [`config`]: Configuration file and base URL handling
//! - [`output`]: Table and JSON output for the CLI
//! - [`cli`]: Command-line interface definitions using clap
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use bitbucket_rest_client::{AuthCredential, BitbucketClientFactory};
//!
//! # async fn example() -> Result<(), bitbucket_rest_client::ApiError> {
//! let factory = BitbucketClientFactory::new(
//!     "https://bitbucket.example.com",
//!     AuthCredential::token("personal-access-token"),
//! )?;
//!
//! for project in factory.project_client().get_all_projects().await? {
//!     println!("{} {}", project.key, project.name);
//! }
//! # Ok(())
//! # }
//! ```

/// HTTP plumbing and data model.
///
/// Contains the [`api::HttpExecutor`] seam, the reqwest-backed
/// [`api::BitbucketClient`], the error type, pagination and the typed
/// records returned by the server.
pub mod api;

/// Credentials for Basic authentication or personal access tokens.
pub mod auth;

/// Command-line interface definitions.
///
/// Contains all CLI commands, arguments, and subcommands defined using the clap derive API.
pub mod cli;

/// Resource clients and their factory.
pub mod clients;

/// Configuration file management.
///
/// Manages the CLI's configuration stored in platform-specific locations:
/// - Linux: `~/.config/bbrest/config.toml`
/// - macOS: `~/Library/Application Support/bbrest/config.toml`
/// - Windows: `%APPDATA%\bbrest\config\config.toml`
pub mod config;

/// Output formatting for tables and JSON.
pub mod output;

pub use api::common::{ApiError, Page, Range};
pub use auth::AuthCredential;
pub use cli::Cli;
pub use clients::BitbucketClientFactory;
pub use config::Config;

/// Application name constant.
///
/// The name of the CLI binary, used for the user agent and configuration paths.
pub const APP_NAME: &str = "bbrest";

/// Application version constant, derived from Cargo.toml at compile time.
///
/// # Example
///
/// ```rust
/// use bitbucket_rest_client::VERSION;
///
/// println!("bbrest version {}", VERSION);
/// ```
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Exit codes for the CLI.
///
/// Standardized exit codes following Unix conventions, allowing scripts
/// to programmatically detect the outcome of CLI operations.
///
/// # Exit Code Ranges
///
/// - `0`: Success
/// - `1-3`: General errors and usage issues
/// - `4-7`: Authentication-related issues
/// - `8-15`: Resource-related issues
/// - `32+`: External service issues
pub mod exit_codes {
    use crate::api::common::ApiError;

    /// Successful execution.
    pub const SUCCESS: i32 = 0;

    /// General error. Check stderr for details.
    pub const ERROR: i32 = 1;

    /// Invalid usage or arguments.
    pub const USAGE: i32 = 2;

    /// Authentication required or failed, or the caller lacks permission.
    pub const AUTH_ERROR: i32 = 4;

    /// The requested resource does not exist.
    pub const NOT_FOUND: i32 = 8;

    /// The server is throttling requests.
    pub const RATE_LIMIT: i32 = 32;

    /// Picks the exit code for an error returned by a command.
    ///
    /// Only an [`ApiError`] somewhere in the chain selects a specific code;
    /// everything else is [`ERROR`].
    pub fn for_error(err: &anyhow::Error) -> i32 {
        let api_error = err.chain().find_map(|e| e.downcast_ref::<ApiError>());

        match api_error {
            Some(ApiError::NotFound(_)) => NOT_FOUND,
            Some(ApiError::InvalidArgument(_)) => USAGE,
            Some(ApiError::AuthFailed(_)) | Some(ApiError::Forbidden(_)) => AUTH_ERROR,
            Some(ApiError::RateLimited) => RATE_LIMIT,
            _ => ERROR,
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use anyhow::Context;

        #[test]
        fn test_api_errors_pick_their_code() {
            let err = anyhow::Error::from(ApiError::NotFound("project PRJ".to_string()));
            assert_eq!(for_error(&err), NOT_FOUND);

            let err = anyhow::Error::from(ApiError::InvalidArgument("limit".to_string()));
            assert_eq!(for_error(&err), USAGE);
        }

        #[test]
        fn test_context_does_not_hide_the_cause() {
            let result: Result<(), ApiError> = Err(ApiError::Forbidden("no access".to_string()));
            let err = result.context("Failed to list projects").unwrap_err();
            assert_eq!(for_error(&err), AUTH_ERROR);
        }

        #[test]
        fn test_other_errors_are_general() {
            assert_eq!(for_error(&anyhow::anyhow!("boom")), ERROR);
        }
    }
}
