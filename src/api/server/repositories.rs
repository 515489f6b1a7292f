//
//  bitbucket-rest-client
//  api/server/repositories.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Bitbucket Server/DC Repository API
//!
//! Types for working with repositories in Bitbucket Server/Data Center.
//! Repositories are always associated with a project.
//!
//! ## API Endpoints
//!
//! ```text
//! GET /rest/api/1.0/repos
//! GET/POST /rest/api/1.0/projects/{projectKey}/repos
//! GET/DELETE /rest/api/1.0/projects/{projectKey}/repos/{repoSlug}
//! GET /rest/api/1.0/projects/{projectKey}/repos/{repoSlug}/forks
//! ```

use serde::{Deserialize, Serialize};

use super::{Links, Project};

/// Represents a repository in Bitbucket Server/Data Center.
///
/// # Fields
///
/// * `id` - Unique numeric identifier for the repository
/// * `slug` - URL-safe identifier used in API paths and clone URLs
/// * `name` - Human-readable display name of the repository
/// * `scm_id` - Source control management type (typically "git")
/// * `state` - Current state of the repository (e.g., "AVAILABLE", "INITIALISING")
/// * `project` - The parent project containing this repository
/// * `origin` - The repository this one was forked from, for forks
/// * `links` - Clone and web UI URLs
///
/// # Notes
///
/// - The `slug` is derived from the name but may differ (lowercase, hyphenated)
/// - Clone links typically include both SSH and HTTP options
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Repository {
    /// Unique numeric identifier assigned by Bitbucket Server.
    pub id: u64,

    /// URL-safe identifier used in API endpoints and clone URLs.
    pub slug: String,

    /// Human-readable display name of the repository.
    pub name: String,

    /// Optional description of the repository.
    #[serde(default)]
    pub description: Option<String>,

    /// Source control management identifier (typically "git").
    #[serde(rename = "scmId")]
    pub scm_id: String,

    /// Current state of the repository.
    /// Common values: "AVAILABLE", "INITIALISING", "INITIALISATION_FAILED".
    #[serde(default)]
    pub state: String,

    /// Optional message providing additional context about the state.
    #[serde(rename = "statusMessage")]
    #[serde(default)]
    pub status_message: Option<String>,

    /// Whether the repository allows forking.
    #[serde(default)]
    pub forkable: bool,

    /// The project that contains this repository.
    pub project: Project,

    /// Whether the repository is publicly accessible.
    #[serde(rename = "public")]
    #[serde(default)]
    pub is_public: bool,

    /// The repository this one was forked from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<Box<Repository>>,

    /// Collection of links for accessing the repository.
    #[serde(default)]
    pub links: Links,
}

/// Request body for creating a new repository.
///
/// The repository slug is derived from the name by the server.
#[derive(Debug, Clone, Serialize)]
pub struct CreateRepositoryRequest {
    /// Name for the new repository.
    pub name: String,

    /// Source control management type. Bitbucket Server supports "git".
    #[serde(rename = "scmId")]
    pub scm_id: String,

    /// Whether the repository should allow forking.
    pub forkable: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fork_carries_origin() {
        let repo: Repository = serde_json::from_value(json!({
            "slug": "my-repo",
            "id": 2,
            "name": "My repo",
            "scmId": "git",
            "state": "AVAILABLE",
            "statusMessage": "Available",
            "forkable": true,
            "origin": {
                "slug": "upstream",
                "id": 1,
                "name": "Upstream",
                "scmId": "git",
                "project": {"key": "PRJ", "id": 1, "name": "Project"}
            },
            "project": {"key": "~JDOE", "id": 7, "name": "Jane", "type": "PERSONAL"},
            "public": false
        }))
        .unwrap();

        assert_eq!(repo.project.key, "~JDOE");
        assert_eq!(repo.origin.as_ref().map(|o| o.slug.as_str()), Some("upstream"));
        assert!(repo.links.clone.is_empty());
    }

    #[test]
    fn test_create_request_wire_names() {
        let body = serde_json::to_value(CreateRepositoryRequest {
            name: "My repo".to_string(),
            scm_id: "git".to_string(),
            forkable: false,
        })
        .unwrap();

        assert_eq!(body, json!({"name": "My repo", "scmId": "git", "forkable": false}));
    }
}
