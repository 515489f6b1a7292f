//
//  bitbucket-rest-client
//  api/server/branches.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Bitbucket Server/DC Branch API
//!
//! ```text
//! GET /rest/api/1.0/projects/{projectKey}/repos/{repoSlug}/branches
//! GET /rest/api/1.0/projects/{projectKey}/repos/{repoSlug}/branches/default
//! ```
//!
//! Branch responses do not name the repository they belong to, so the
//! resource client stamps `project_key` and `repository_slug` onto every
//! parsed branch.

use serde::{Deserialize, Serialize};

/// A branch of a repository.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Branch {
    /// Full ref path, e.g. "refs/heads/master".
    pub id: String,

    /// Short display name, e.g. "master".
    #[serde(rename = "displayId")]
    pub display_id: String,

    /// Ref kind reported by the server ("BRANCH").
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub ref_type: Option<String>,

    /// Hash of the commit at the tip of the branch.
    /// Older servers call this `latestChangeset`.
    #[serde(rename = "latestCommit", alias = "latestChangeset", default)]
    pub latest_commit: Option<String>,

    /// Whether this is the repository's default branch.
    #[serde(rename = "isDefault", default)]
    pub is_default: bool,

    /// Key of the project owning the repository. Not part of the response.
    #[serde(
        rename = "projectKey",
        skip_deserializing,
        skip_serializing_if = "Option::is_none"
    )]
    pub project_key: Option<String>,

    /// Slug of the repository owning the branch. Not part of the response.
    #[serde(
        rename = "repositorySlug",
        skip_deserializing,
        skip_serializing_if = "Option::is_none"
    )]
    pub repository_slug: Option<String>,
}

impl Branch {
    /// Records the repository this branch belongs to.
    pub fn located_at(mut self, project_key: &str, repository_slug: &str) -> Self {
        self.project_key = Some(project_key.to_string());
        self.repository_slug = Some(repository_slug.to_string());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_location_is_not_read_from_the_wire() {
        let branch: Branch = serde_json::from_value(json!({
            "id": "refs/heads/master",
            "displayId": "master",
            "type": "BRANCH",
            "latestCommit": "8d51122def5632836d1cb1026e879069e10a1e13",
            "isDefault": true,
            "projectKey": "IGNORED"
        }))
        .unwrap();

        assert_eq!(branch.project_key, None);
        let branch = branch.located_at("PRJ", "repo");
        assert_eq!(branch.project_key.as_deref(), Some("PRJ"));
        assert_eq!(branch.repository_slug.as_deref(), Some("repo"));
        assert!(branch.is_default);
    }

    #[test]
    fn test_legacy_changeset_key() {
        let branch: Branch = serde_json::from_value(json!({
            "id": "refs/heads/dev",
            "displayId": "dev",
            "latestChangeset": "abc"
        }))
        .unwrap();

        assert_eq!(branch.latest_commit.as_deref(), Some("abc"));
        assert!(!branch.is_default);
    }
}
