//
//  bitbucket-rest-client
//  api/server/projects.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Bitbucket Server/DC Project API
//!
//! Types for working with projects in Bitbucket Server/Data Center.
//! Projects are containers that group related repositories together and
//! provide shared access control.
//!
//! ## Project Structure
//!
//! In Bitbucket Server/DC, projects:
//! - Have a unique key (short uppercase identifier used in URLs)
//! - Contain one or more repositories
//! - Can be public or private
//! - Have a type indicating their purpose (NORMAL or PERSONAL)
//!
//! ## API Endpoints
//!
//! ```text
//! GET/POST /rest/api/1.0/projects
//! GET/DELETE /rest/api/1.0/projects/{projectKey}
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Links;

/// Kind of project.
///
/// Personal projects belong to a single user and have keys prefixed with `~`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectType {
    /// A regular, shared project.
    #[default]
    Normal,
    /// A user's personal project.
    Personal,
}

impl ProjectType {
    /// The wire representation ("NORMAL" or "PERSONAL").
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Personal => "PERSONAL",
        }
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Represents a project in Bitbucket Server/Data Center.
///
/// # Fields
///
/// * `id` - Unique numeric identifier for the project
/// * `key` - Short uppercase key used in URLs (e.g., "PROJ", "DEV")
/// * `name` - Human-readable display name of the project
/// * `description` - Optional description of the project's purpose
/// * `is_public` - Whether the project is publicly accessible
/// * `project_type` - Type of project (NORMAL or PERSONAL)
/// * `links` - Collection of URLs for accessing the project
///
/// # Notes
///
/// - Personal projects have keys starting with "~" (e.g., "~jsmith")
/// - Project keys are case-insensitive but typically uppercase
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Project {
    /// Unique numeric identifier assigned by Bitbucket Server.
    pub id: u64,

    /// Short uppercase key used in URLs and API paths.
    pub key: String,

    /// Human-readable display name of the project.
    pub name: String,

    /// Optional description explaining the project's purpose.
    #[serde(default)]
    pub description: Option<String>,

    /// Whether the project is publicly accessible.
    /// Defaults to `false` if not specified in the API response.
    #[serde(rename = "public")]
    #[serde(default)]
    pub is_public: bool,

    /// Type of the project.
    #[serde(rename = "type")]
    #[serde(default)]
    pub project_type: ProjectType,

    /// Collection of links for accessing the project.
    #[serde(default)]
    pub links: Links,
}

/// Request body for creating a new project.
///
/// # Notes
///
/// - Project keys must be unique and typically use uppercase letters
/// - The key cannot be changed after project creation
/// - `description` is omitted from the JSON when `None`
#[derive(Debug, Clone, Serialize)]
pub struct CreateProjectRequest {
    /// Unique key for the new project.
    pub key: String,

    /// Human-readable name for the project.
    pub name: String,

    /// Kind of project to create.
    #[serde(rename = "type")]
    pub project_type: ProjectType,

    /// Optional description of the project's purpose.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_project_from_wire_format() {
        let project: Project = serde_json::from_value(json!({
            "key": "PRJ",
            "id": 1,
            "name": "My Cool Project",
            "description": "The description for my cool project.",
            "public": true,
            "type": "NORMAL",
            "links": {"self": [{"href": "http://link/to/project"}]}
        }))
        .unwrap();

        assert_eq!(project.key, "PRJ");
        assert!(project.is_public);
        assert_eq!(project.project_type, ProjectType::Normal);
        assert_eq!(project.links.web_url(), Some("http://link/to/project"));
    }

    #[test]
    fn test_create_request_omits_missing_description() {
        let body = serde_json::to_value(CreateProjectRequest {
            key: "PRJ".to_string(),
            name: "Project".to_string(),
            project_type: ProjectType::Normal,
            description: None,
        })
        .unwrap();

        assert_eq!(body, json!({"key": "PRJ", "name": "Project", "type": "NORMAL"}));
    }
}
