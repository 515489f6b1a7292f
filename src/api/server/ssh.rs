//
//  bitbucket-rest-client
//  api/server/ssh.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Bitbucket Server/DC SSH Key API
//!
//! User keys authenticate a person; access keys grant a key read or write
//! access to a single project or repository.
//!
//! ```text
//! GET/POST /rest/ssh/1.0/keys
//! DELETE   /rest/ssh/1.0/keys/{keyId}
//! GET      /rest/keys/1.0/projects/{projectKey}/ssh
//! GET      /rest/keys/1.0/projects/{projectKey}/repos/{repoSlug}/ssh
//! ```

use serde::{Deserialize, Serialize};

use super::{Project, Repository};

/// A public SSH key registered with the server.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SshKey {
    pub id: u64,

    /// The public key in OpenSSH format.
    pub text: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// An SSH key granted access to a project or repository.
///
/// Exactly one of `project` and `repository` is set, depending on the
/// endpoint the key was listed from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccessKey {
    pub key: SshKey,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<Project>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository: Option<Repository>,

    /// PROJECT_READ, PROJECT_WRITE, REPO_READ or REPO_WRITE.
    pub permission: String,
}

/// Request body for registering a user key.
#[derive(Debug, Clone, Serialize)]
pub struct AddSshKeyRequest {
    pub text: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}
