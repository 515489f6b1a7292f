//
//  bitbucket-rest-client
//  api/server/links.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Hypermedia links attached to projects, repositories and pull requests.

use serde::{Deserialize, Serialize};

/// Collection of links associated with a resource.
///
/// The Bitbucket Server API returns links as arrays to support multiple
/// protocols (SSH, HTTP) for clone links.
///
/// ```json
/// {
///     "clone": [{"href": "ssh://git@host:7999/proj/repo.git", "name": "ssh"}],
///     "self": [{"href": "https://host/projects/PROJ/repos/repo/browse"}]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Links {
    /// Clone URLs for a repository; empty for other resources.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub clone: Vec<NamedLink>,

    /// Links to the resource in the web UI.
    #[serde(default, rename = "self")]
    pub self_link: Vec<Link>,
}

impl Links {
    /// First web UI link, if any.
    pub fn web_url(&self) -> Option<&str> {
        self.self_link.first().map(|link| link.href.as_str())
    }

    /// Clone URL for the given protocol name ("ssh" or "http").
    pub fn clone_url(&self, protocol: &str) -> Option<&str> {
        self.clone
            .iter()
            .find(|link| link.name == protocol)
            .map(|link| link.href.as_str())
    }
}

/// Self-referential link to a resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Link {
    /// The full URL to view this resource in the web UI.
    pub href: String,
}

/// A link qualified by a protocol name, as used for clone URLs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NamedLink {
    /// The full clone URL for this protocol.
    pub href: String,

    /// Protocol identifier. Common values: "ssh", "http".
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_helpers() {
        let links: Links = serde_json::from_value(serde_json::json!({
            "clone": [
                {"href": "https://host/scm/proj/repo.git", "name": "http"},
                {"href": "ssh://git@host:7999/proj/repo.git", "name": "ssh"}
            ],
            "self": [{"href": "https://host/projects/PROJ/repos/repo/browse"}]
        }))
        .unwrap();

        assert_eq!(links.clone_url("ssh"), Some("ssh://git@host:7999/proj/repo.git"));
        assert_eq!(links.clone_url("git"), None);
        assert_eq!(links.web_url(), Some("https://host/projects/PROJ/repos/repo/browse"));
    }
}
