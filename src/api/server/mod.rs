//
//  bitbucket-rest-client
//  api/server/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Bitbucket Server/Data Center domain types
//!
//! Typed records for the payloads of the Bitbucket Server REST API v1.0 and
//! the build-status and SSH key plugins.
//!
//! ## Module Organization
//!
//! - [`projects`] - Projects and the project creation payload
//! - [`repositories`] - Repositories and the repository creation payload
//! - [`branches`] - Branches, with the owning repository recorded post-parse
//! - [`pullrequests`] - Pull requests, their changes and their activities
//! - [`tasks`] - Review tasks
//! - [`users`] - Users
//! - [`build_status`] - Build statuses and per-commit build counts
//! - [`ssh`] - User SSH keys and project/repository access keys
//!
//! ## Notes
//!
//! - Timestamps are Unix milliseconds instead of ISO 8601 strings
//! - Optional fields use `Option<T>` and default to `None` during deserialization
//! - Boolean fields default to `false` when not present in the API response

pub mod branches;
pub mod build_status;
pub mod links;
pub mod projects;
pub mod pullrequests;
pub mod repositories;
pub mod ssh;
pub mod tasks;
pub mod users;

pub use branches::Branch;
pub use build_status::{BuildState, BuildStatsSummary, BuildStatus};
pub use links::{Link, Links, NamedLink};
pub use projects::{CreateProjectRequest, Project, ProjectType};
pub use pullrequests::{
    ChangePath, Comment, ParticipantStatus, PullRequest, PullRequestActivity, PullRequestChange,
    PullRequestParticipant, PullRequestRef, PullRequestRole, PullRequestState,
};
pub use repositories::{CreateRepositoryRequest, Repository};
pub use ssh::{AccessKey, AddSshKeyRequest, SshKey};
pub use tasks::{Task, TaskState};
pub use users::User;
