//
//  bitbucket-rest-client
//  auth/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Authentication Module
//!
//! Credentials for a Bitbucket Server/Data Center instance. The HTTP
//! executor applies them to every outgoing request.
//!
//! ## Supported Authentication Methods
//!
//! - **Personal Access Token (PAT)**: Sent as a Bearer token. The
//!   recommended method for Server/Data Center.
//! - **Basic Authentication**: Username and password over HTTP Basic.
//! - **Anonymous**: No credentials; only public resources are visible.
//!
//! ## Example
//!
//! ```rust
//! use bitbucket_rest_client::auth::AuthCredential;
//!
//! let credential = AuthCredential::token("NjM0NTY3ODkw...");
//! assert_eq!(credential.type_name(), "Personal Access Token");
//! ```

use std::fmt;

use reqwest::RequestBuilder;

/// Authentication credentials for Bitbucket Server/Data Center.
///
/// # Variants
///
/// - `PersonalAccessToken`: Bearer token authentication.
/// - `Basic`: Standard HTTP Basic authentication with username and password.
/// - `Anonymous`: Requests are sent without an `Authorization` header.
///
/// # Notes
///
/// - `Debug` output never contains the secret part of a credential.
#[derive(Clone, PartialEq, Eq, Default)]
pub enum AuthCredential {
    /// Personal Access Token generated in the user's account settings.
    PersonalAccessToken {
        /// The personal access token string.
        token: String,
    },
    /// Basic HTTP authentication with username and password.
    Basic {
        /// The username for authentication.
        username: String,
        /// The password for authentication.
        password: String,
    },
    /// No authentication.
    #[default]
    Anonymous,
}

impl AuthCredential {
    /// Creates a personal access token credential.
    pub fn token(token: impl Into<String>) -> Self {
        Self::PersonalAccessToken {
            token: token.into(),
        }
    }

    /// Creates a username/password credential.
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Basic {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Applies the credential to an HTTP request.
    ///
    /// PATs use Bearer authentication, username/password uses HTTP Basic and
    /// anonymous credentials leave the request untouched.
    pub fn apply_to_request(&self, request: RequestBuilder) -> RequestBuilder {
        match self {
            Self::PersonalAccessToken { token } => request.bearer_auth(token),
            Self::Basic { username, password } => request.basic_auth(username, Some(password)),
            Self::Anonymous => request,
        }
    }

    /// Human-readable name of the authentication method.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::PersonalAccessToken { .. } => "Personal Access Token",
            Self::Basic { .. } => "Basic Auth",
            Self::Anonymous => "Anonymous",
        }
    }

    /// Username carried by the credential, if any.
    pub fn username(&self) -> Option<&str> {
        match self {
            Self::Basic { username, .. } => Some(username),
            _ => None,
        }
    }
}

impl fmt::Debug for AuthCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PersonalAccessToken { .. } => f
                .debug_struct("PersonalAccessToken")
                .field("token", &"***")
                .finish(),
            Self::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"***")
                .finish(),
            Self::Anonymous => f.write_str("Anonymous"),
        }
    }
}
