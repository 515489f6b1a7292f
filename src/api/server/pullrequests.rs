//
//  bitbucket-rest-client
//  api/server/pullrequests.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Bitbucket Server/DC Pull Request API
//!
//! Types for pull requests in Bitbucket Server/Data Center, together with
//! the records returned by their sub-resources (changes and activities).
//!
//! ## API Endpoints
//!
//! ```text
//! GET /rest/api/1.0/projects/{projectKey}/repos/{repoSlug}/pull-requests
//! GET /rest/api/1.0/projects/{projectKey}/repos/{repoSlug}/pull-requests/{id}/changes
//! GET /rest/api/1.0/projects/{projectKey}/repos/{repoSlug}/pull-requests/{id}/activities
//! ```
//!
//! ## Notes
//!
//! - Timestamps (`created_date`, `updated_date`) are Unix milliseconds
//! - Branch IDs use the full ref path format: "refs/heads/branch-name"

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Links, Repository, User};

/// Lifecycle state of a pull request.
///
/// Listing accepts "ALL" as well; that is expressed by passing no state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PullRequestState {
    Open,
    Merged,
    Declined,
}

impl PullRequestState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::Merged => "MERGED",
            Self::Declined => "DECLINED",
        }
    }
}

impl fmt::Display for PullRequestState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Role of a participant in a pull request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PullRequestRole {
    Author,
    Reviewer,
    Participant,
}

impl PullRequestRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Author => "AUTHOR",
            Self::Reviewer => "REVIEWER",
            Self::Participant => "PARTICIPANT",
        }
    }
}

impl fmt::Display for PullRequestRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Review verdict of a participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParticipantStatus {
    Approved,
    Unapproved,
    NeedsWork,
}

/// Represents a pull request in Bitbucket Server/Data Center.
///
/// # Fields
///
/// * `id` - Numeric identifier, unique within the target repository
/// * `version` - Optimistic-locking version of the pull request
/// * `title` - Short summary of the changes being proposed
/// * `state` - Current state (OPEN, MERGED, DECLINED)
/// * `from_ref` - Source branch reference (the changes to merge)
/// * `to_ref` - Target branch reference (where changes will be merged)
/// * `author` - User who created the pull request
/// * `reviewers` - Users assigned to review the pull request
/// * `participants` - Other users who have interacted with the PR
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PullRequest {
    /// Numeric identifier for this pull request.
    pub id: u64,

    /// Version used for optimistic locking on updates.
    #[serde(default)]
    pub version: u32,

    /// Short summary title describing the changes.
    pub title: String,

    /// Detailed description of the changes being proposed.
    #[serde(default)]
    pub description: Option<String>,

    /// Current state of the pull request.
    pub state: PullRequestState,

    /// Whether the pull request is currently open for review.
    #[serde(default)]
    pub open: bool,

    /// Whether the pull request has been closed (merged or declined).
    #[serde(default)]
    pub closed: bool,

    /// Unix timestamp in milliseconds when the PR was created.
    #[serde(rename = "createdDate")]
    pub created_date: u64,

    /// Unix timestamp in milliseconds of the last update.
    #[serde(rename = "updatedDate")]
    pub updated_date: u64,

    /// Source branch reference containing the changes to merge.
    #[serde(rename = "fromRef")]
    pub from_ref: PullRequestRef,

    /// Target branch reference where changes will be merged.
    #[serde(rename = "toRef")]
    pub to_ref: PullRequestRef,

    /// Whether the pull request is locked against changes.
    #[serde(default)]
    pub locked: bool,

    /// The user who created this pull request.
    pub author: PullRequestParticipant,

    /// Users assigned to review this pull request.
    #[serde(default)]
    pub reviewers: Vec<PullRequestParticipant>,

    /// Users who have participated without being reviewers.
    #[serde(default)]
    pub participants: Vec<PullRequestParticipant>,

    #[serde(default)]
    pub links: Links,
}

impl PullRequest {
    /// Creation time as a UTC timestamp.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        millis_to_utc(self.created_date)
    }

    /// Last update time as a UTC timestamp.
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        millis_to_utc(self.updated_date)
    }

    /// Number of reviewers that have approved.
    pub fn approvals(&self) -> usize {
        self.reviewers.iter().filter(|r| r.approved).count()
    }
}

pub(crate) fn millis_to_utc(millis: u64) -> Option<DateTime<Utc>> {
    i64::try_from(millis)
        .ok()
        .and_then(DateTime::<Utc>::from_timestamp_millis)
}

/// Branch reference within a pull request context.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PullRequestRef {
    /// Full Git ref path for the branch, e.g. "refs/heads/feature/my-feature".
    pub id: String,

    /// Human-readable short name for the branch.
    #[serde(rename = "displayId")]
    pub display_id: String,

    /// Hash of the latest commit on this branch.
    #[serde(rename = "latestCommit", alias = "latestChangeset")]
    #[serde(default)]
    pub latest_commit: Option<String>,

    /// Repository containing this branch.
    pub repository: Repository,
}

/// Represents a participant in a pull request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PullRequestParticipant {
    /// The user who is participating.
    pub user: User,

    /// Role of this participant in the pull request.
    pub role: PullRequestRole,

    /// Whether this participant has approved the pull request.
    #[serde(default)]
    pub approved: bool,

    /// Detailed review status from this participant.
    #[serde(default)]
    pub status: Option<ParticipantStatus>,
}

/// A file touched by a pull request.
///
/// `change_type` is one of ADD, MODIFY, DELETE, COPY, MOVE or UNKNOWN and
/// `node_type` one of FILE, DIRECTORY or SUBMODULE.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PullRequestChange {
    #[serde(rename = "contentId")]
    pub content_id: String,

    #[serde(rename = "fromContentId", default)]
    pub from_content_id: Option<String>,

    pub path: ChangePath,

    /// Previous location of a moved or copied file.
    #[serde(rename = "srcPath", default, skip_serializing_if = "Option::is_none")]
    pub src_path: Option<ChangePath>,

    #[serde(default)]
    pub executable: bool,

    #[serde(rename = "percentUnchanged", default)]
    pub percent_unchanged: Option<i32>,

    #[serde(rename = "type")]
    pub change_type: String,

    #[serde(rename = "nodeType")]
    pub node_type: String,
}

/// Path of a changed file, split the way the server reports it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChangePath {
    #[serde(default)]
    pub components: Vec<String>,

    #[serde(default)]
    pub parent: String,

    pub name: String,

    #[serde(default)]
    pub extension: Option<String>,

    /// The full slash-separated path.
    #[serde(rename = "toString")]
    pub full: String,
}

/// One entry in the activity stream of a pull request.
///
/// The server does not repeat the pull request id in each entry; the
/// resource client records it in `pull_request_id`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PullRequestActivity {
    pub id: u64,

    /// Id of the pull request this activity belongs to. Not part of the response.
    #[serde(rename = "pullRequestId", skip_deserializing)]
    pub pull_request_id: u64,

    #[serde(rename = "createdDate")]
    pub created_date: u64,

    /// User who performed the action.
    pub user: User,

    /// What happened: OPENED, COMMENTED, APPROVED, UNAPPROVED, REVIEWED,
    /// RESCOPED, UPDATED, MERGED, DECLINED, REOPENED.
    pub action: String,

    /// For COMMENTED activities: ADDED, EDITED, DELETED or REPLIED.
    #[serde(rename = "commentAction", default, skip_serializing_if = "Option::is_none")]
    pub comment_action: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<Comment>,
}

impl PullRequestActivity {
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        millis_to_utc(self.created_date)
    }
}

/// A comment on a pull request, with its replies.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Comment {
    pub id: u64,

    #[serde(default)]
    pub version: u32,

    pub text: String,

    pub author: User,

    #[serde(rename = "createdDate")]
    pub created_date: u64,

    #[serde(rename = "updatedDate", default)]
    pub updated_date: u64,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<Comment>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_millis_conversion() {
        let at = millis_to_utc(1_359_075_920_000).unwrap();
        assert_eq!(at.to_rfc3339(), "2013-01-25T01:05:20+00:00");
        assert!(millis_to_utc(u64::MAX).is_none());
    }

    #[test]
    fn test_enum_wire_names() {
        assert_eq!(serde_json::to_value(ParticipantStatus::NeedsWork).unwrap(), "NEEDS_WORK");
        assert_eq!(PullRequestRole::Reviewer.to_string(), "REVIEWER");
        assert_eq!(
            serde_json::from_value::<PullRequestState>("DECLINED".into()).unwrap(),
            PullRequestState::Declined
        );
    }
}
