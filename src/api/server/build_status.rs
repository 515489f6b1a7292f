//
//  bitbucket-rest-client
//  api/server/build_status.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Bitbucket Server/DC Build Status API
//!
//! ```text
//! POST /rest/build-status/latest/commits/stats
//! GET  /rest/build-status/latest/commits/stats/{commitId}
//! GET  /rest/build-status/latest/commits/{commitId}
//! ```
//!
//! Build counts are tri-state: a count the server did not report stays
//! `None` and is never read as zero.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::pullrequests::millis_to_utc;

/// Aggregated build counts for one commit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildStatsSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failed: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_progress: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub successful: Option<u64>,
}

impl BuildStatsSummary {
    /// True when the server reported no counts at all.
    pub fn is_unset(&self) -> bool {
        self.failed.is_none() && self.in_progress.is_none() && self.successful.is_none()
    }
}

/// Result of a single build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BuildState {
    Successful,
    Failed,
    Inprogress,
}

impl fmt::Display for BuildState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Successful => "SUCCESSFUL",
            Self::Failed => "FAILED",
            Self::Inprogress => "INPROGRESS",
        })
    }
}

/// One build reported against a commit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BuildStatus {
    pub state: BuildState,

    /// Identifier of the build plan, unique per commit.
    pub key: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Link to the build result in the CI server.
    pub url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Unix timestamp in milliseconds.
    #[serde(rename = "dateAdded")]
    pub date_added: u64,
}

impl BuildStatus {
    pub fn added_at(&self) -> Option<DateTime<Utc>> {
        millis_to_utc(self.date_added)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_build_status_wire_format() {
        let status: BuildStatus = serde_json::from_value(json!({
            "state": "INPROGRESS",
            "key": "REPO-MASTER",
            "name": "REPO-MASTER-42",
            "url": "https://bamboo.example.com/browse/REPO-MASTER-42",
            "description": "Changes by John Doe",
            "dateAdded": 1359065920000u64
        }))
        .unwrap();

        assert_eq!(status.state, BuildState::Inprogress);
        assert_eq!(status.state.to_string(), "INPROGRESS");
        assert!(status.added_at().is_some());
    }

    #[test]
    fn test_summary_serializes_only_reported_counts() {
        let summary = BuildStatsSummary {
            failed: Some(2),
            in_progress: None,
            successful: Some(5),
        };

        assert!(!summary.is_unset());
        assert!(BuildStatsSummary::default().is_unset());
        assert_eq!(
            serde_json::to_value(summary).unwrap(),
            json!({"failed": 2, "successful": 5})
        );
    }
}
