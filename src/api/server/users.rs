//
//  bitbucket-rest-client
//  api/server/users.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Users, as listed by `GET /rest/api/1.0/users` and embedded in pull
//! requests, comments and tasks.

use serde::{Deserialize, Serialize};

/// Represents a user in Bitbucket Server/Data Center.
///
/// # Fields
///
/// * `id` - Unique numeric identifier for the user
/// * `name` - Username (login name)
/// * `display_name` - Full display name
/// * `email_address` - Email address (may be hidden by privacy settings)
/// * `slug` - URL-safe version of the username
/// * `active` - Whether the account is enabled
/// * `user_type` - "NORMAL" or "SERVICE"
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct User {
    /// Unique numeric identifier for the user.
    pub id: u64,

    /// Username (login name) for the user.
    pub name: String,

    /// Full display name of the user.
    #[serde(rename = "displayName")]
    pub display_name: String,

    /// Email address of the user.
    #[serde(rename = "emailAddress")]
    #[serde(default)]
    pub email_address: Option<String>,

    /// URL-safe version of the username.
    #[serde(default)]
    pub slug: Option<String>,

    /// Whether the account is enabled.
    #[serde(default)]
    pub active: bool,

    /// Account kind, "NORMAL" for people and "SERVICE" for service accounts.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub user_type: Option<String>,
}
