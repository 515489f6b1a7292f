//
//  bitbucket-rest-client
//  clients/project.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Project Client
//!
//! Operations on the core REST API (`/rest/api/1.0`): projects,
//! repositories, branches, forks, pull requests and their sub-resources,
//! users and application properties.
//!
//! Every listing comes in two forms: a paged method taking a [`Range`] and
//! a `get_all_*` method that walks all pages with [`collect_all`].

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use super::{get_optional, get_page, DEFAULT_LIMIT};
use crate::api::common::{collect_all, Page, Range, Result};
use crate::api::parsers::{
    activity_parser, parse_application_properties, parse_branch, parse_change, parse_project,
    parse_pull_request, parse_repository, parse_task, parse_user,
};
use crate::api::query::{PullRequestQuery, UrlBuilder};
use crate::api::server::{
    Branch, CreateProjectRequest, CreateRepositoryRequest, Project, ProjectType, PullRequest,
    PullRequestActivity, PullRequestChange, Repository, Task, User,
};
use crate::api::{HttpExecutor, HttpMethod};

const API_ROOT: &str = "/rest/api/1.0";

/// Client for projects, repositories, branches, pull requests and users.
///
/// # Example
///
/// ```rust,no_run
/// use bitbucket_rest_client::auth::AuthCredential;
/// use bitbucket_rest_client::clients::BitbucketClientFactory;
///
/// # async fn example() -> bitbucket_rest_client::api::common::Result<()> {
/// let factory = BitbucketClientFactory::new(
///     "https://bitbucket.example.com",
///     AuthCredential::token("pat"),
/// )?;
///
/// for repo in factory.project_client().get_all_project_repositories("PRJ").await? {
///     println!("{}", repo.slug);
/// }
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait ProjectClient: Send + Sync {
    /// Lists the projects visible to the caller.
    async fn get_projects(&self, range: Range) -> Result<Page<Project>>;

    async fn get_all_projects(&self) -> Result<Vec<Project>> {
        collect_all(DEFAULT_LIMIT, |range| self.get_projects(range)).await
    }

    /// Looks up a project by key; `None` if it does not exist.
    async fn get_project(&self, project_key: &str) -> Result<Option<Project>>;

    /// Lists the repositories of one project.
    async fn get_project_repositories(
        &self,
        project_key: &str,
        range: Range,
    ) -> Result<Page<Repository>>;

    async fn get_all_project_repositories(&self, project_key: &str) -> Result<Vec<Repository>> {
        collect_all(DEFAULT_LIMIT, |range| {
            self.get_project_repositories(project_key, range)
        })
        .await
    }

    /// Lists repositories across all projects.
    async fn get_repositories(&self, range: Range) -> Result<Page<Repository>>;

    async fn get_all_repositories(&self) -> Result<Vec<Repository>> {
        collect_all(DEFAULT_LIMIT, |range| self.get_repositories(range)).await
    }

    async fn get_repository(
        &self,
        project_key: &str,
        repository_slug: &str,
    ) -> Result<Option<Repository>>;

    /// Lists branches, most recently modified first.
    ///
    /// `filter` keeps branches whose name contains the text; `details` asks
    /// the server for branch metadata. Every branch returned records the
    /// project key and repository slug it was listed from.
    async fn get_branches(
        &self,
        project_key: &str,
        repository_slug: &str,
        filter: Option<&str>,
        range: Range,
        details: bool,
    ) -> Result<Page<Branch>>;

    async fn get_all_branches(
        &self,
        project_key: &str,
        repository_slug: &str,
        filter: Option<&str>,
        details: bool,
    ) -> Result<Vec<Branch>> {
        collect_all(DEFAULT_LIMIT, |range| {
            self.get_branches(project_key, repository_slug, filter, range, details)
        })
        .await
    }

    /// The repository's default branch; `None` for an empty repository.
    async fn get_default_branch(
        &self,
        project_key: &str,
        repository_slug: &str,
    ) -> Result<Option<Branch>>;

    /// Lists the forks of a repository.
    async fn get_forks(
        &self,
        project_key: &str,
        repository_slug: &str,
        range: Range,
    ) -> Result<Page<Repository>>;

    async fn get_all_forks(
        &self,
        project_key: &str,
        repository_slug: &str,
    ) -> Result<Vec<Repository>> {
        collect_all(DEFAULT_LIMIT, |range| {
            self.get_forks(project_key, repository_slug, range)
        })
        .await
    }

    /// Lists pull requests matching `query`.
    ///
    /// # Errors
    ///
    /// [`ApiError::InvalidArgument`](crate::api::ApiError::InvalidArgument)
    /// if the participant filters do not line up; no request is sent.
    async fn get_pull_requests(
        &self,
        project_key: &str,
        repository_slug: &str,
        query: &PullRequestQuery,
        range: Range,
    ) -> Result<Page<PullRequest>>;

    async fn get_all_pull_requests(
        &self,
        project_key: &str,
        repository_slug: &str,
        query: &PullRequestQuery,
    ) -> Result<Vec<PullRequest>> {
        query.validate()?;
        collect_all(DEFAULT_LIMIT, |range| {
            self.get_pull_requests(project_key, repository_slug, query, range)
        })
        .await
    }

    /// Lists the files changed by a pull request, optionally relative to
    /// the commit `since`.
    async fn get_pull_request_changes(
        &self,
        project_key: &str,
        repository_slug: &str,
        pull_request_id: u64,
        since: Option<&str>,
        range: Range,
    ) -> Result<Page<PullRequestChange>>;

    async fn get_all_pull_request_changes(
        &self,
        project_key: &str,
        repository_slug: &str,
        pull_request_id: u64,
        since: Option<&str>,
    ) -> Result<Vec<PullRequestChange>> {
        collect_all(DEFAULT_LIMIT, |range| {
            self.get_pull_request_changes(project_key, repository_slug, pull_request_id, since, range)
        })
        .await
    }

    /// Lists the activity stream of a pull request, newest first.
    async fn get_pull_request_activities(
        &self,
        project_key: &str,
        repository_slug: &str,
        pull_request_id: u64,
        range: Range,
    ) -> Result<Page<PullRequestActivity>>;

    async fn get_all_pull_request_activities(
        &self,
        project_key: &str,
        repository_slug: &str,
        pull_request_id: u64,
    ) -> Result<Vec<PullRequestActivity>> {
        collect_all(DEFAULT_LIMIT, |range| {
            self.get_pull_request_activities(project_key, repository_slug, pull_request_id, range)
        })
        .await
    }

    /// Lists the tasks of a pull request.
    async fn get_pull_request_tasks(
        &self,
        project_key: &str,
        repository_slug: &str,
        pull_request_id: u64,
        range: Range,
    ) -> Result<Page<Task>>;

    async fn get_all_pull_request_tasks(
        &self,
        project_key: &str,
        repository_slug: &str,
        pull_request_id: u64,
    ) -> Result<Vec<Task>> {
        collect_all(DEFAULT_LIMIT, |range| {
            self.get_pull_request_tasks(project_key, repository_slug, pull_request_id, range)
        })
        .await
    }

    async fn get_users(&self, range: Range) -> Result<Page<User>>;

    async fn get_all_users(&self) -> Result<Vec<User>> {
        collect_all(DEFAULT_LIMIT, |range| self.get_users(range)).await
    }

    /// Version and build information of the server.
    async fn get_application_properties(&self) -> Result<BTreeMap<String, String>>;

    async fn create_project(
        &self,
        project_key: &str,
        name: &str,
        project_type: ProjectType,
        description: Option<&str>,
    ) -> Result<Project>;

    async fn create_repository(
        &self,
        project_key: &str,
        name: &str,
        scm_id: &str,
        forkable: bool,
    ) -> Result<Repository>;

    async fn delete_project(&self, project_key: &str) -> Result<()>;

    async fn delete_repository(&self, project_key: &str, repository_slug: &str) -> Result<()>;
}

/// [`ProjectClient`] over the REST API.
pub struct ProjectClientRest {
    executor: Arc<dyn HttpExecutor>,
}

impl ProjectClientRest {
    pub fn new(executor: Arc<dyn HttpExecutor>) -> Self {
        Self { executor }
    }

    fn repo_path(project_key: &str, repository_slug: &str) -> String {
        format!("{}/projects/{}/repos/{}", API_ROOT, project_key, repository_slug)
    }

    fn pull_request_path(project_key: &str, repository_slug: &str, pull_request_id: u64) -> String {
        format!(
            "{}/pull-requests/{}",
            Self::repo_path(project_key, repository_slug),
            pull_request_id
        )
    }

    async fn post(&self, path: &str, body: Value) -> Result<Value> {
        self.executor.execute(HttpMethod::Post, path, Some(&body)).await
    }

    async fn delete(&self, path: &str) -> Result<()> {
        self.executor.execute(HttpMethod::Delete, path, None).await?;
        Ok(())
    }
}

#[async_trait]
impl ProjectClient for ProjectClientRest {
    async fn get_projects(&self, range: Range) -> Result<Page<Project>> {
        let path = UrlBuilder::new(format!("{}/projects", API_ROOT))
            .range(range)
            .build();
        get_page(self.executor.as_ref(), &path, parse_project).await
    }

    async fn get_project(&self, project_key: &str) -> Result<Option<Project>> {
        let path = format!("{}/projects/{}", API_ROOT, project_key);
        get_optional(self.executor.as_ref(), &path)
            .await?
            .map(|json| parse_project(&json))
            .transpose()
    }

    async fn get_project_repositories(
        &self,
        project_key: &str,
        range: Range,
    ) -> Result<Page<Repository>> {
        let path = UrlBuilder::new(format!("{}/projects/{}/repos", API_ROOT, project_key))
            .range(range)
            .build();
        get_page(self.executor.as_ref(), &path, parse_repository).await
    }

    async fn get_repositories(&self, range: Range) -> Result<Page<Repository>> {
        let path = UrlBuilder::new(format!("{}/repos", API_ROOT))
            .range(range)
            .build();
        get_page(self.executor.as_ref(), &path, parse_repository).await
    }

    async fn get_repository(
        &self,
        project_key: &str,
        repository_slug: &str,
    ) -> Result<Option<Repository>> {
        let path = Self::repo_path(project_key, repository_slug);
        get_optional(self.executor.as_ref(), &path)
            .await?
            .map(|json| parse_repository(&json))
            .transpose()
    }

    async fn get_branches(
        &self,
        project_key: &str,
        repository_slug: &str,
        filter: Option<&str>,
        range: Range,
        details: bool,
    ) -> Result<Page<Branch>> {
        let path = UrlBuilder::new(format!(
            "{}/branches",
            Self::repo_path(project_key, repository_slug)
        ))
        .range(range)
        .param_opt("filterText", filter)
        .param("details", details)
        .param("orderBy", "MODIFICATION")
        .build();

        get_page(self.executor.as_ref(), &path, |json| {
            parse_branch(json).map(|b| b.located_at(project_key, repository_slug))
        })
        .await
    }

    async fn get_default_branch(
        &self,
        project_key: &str,
        repository_slug: &str,
    ) -> Result<Option<Branch>> {
        let path = format!(
            "{}/branches/default",
            Self::repo_path(project_key, repository_slug)
        );
        get_optional(self.executor.as_ref(), &path)
            .await?
            .map(|json| {
                parse_branch(&json).map(|b| b.located_at(project_key, repository_slug))
            })
            .transpose()
    }

    async fn get_forks(
        &self,
        project_key: &str,
        repository_slug: &str,
        range: Range,
    ) -> Result<Page<Repository>> {
        let path = UrlBuilder::new(format!(
            "{}/forks",
            Self::repo_path(project_key, repository_slug)
        ))
        .range(range)
        .build();
        get_page(self.executor.as_ref(), &path, parse_repository).await
    }

    async fn get_pull_requests(
        &self,
        project_key: &str,
        repository_slug: &str,
        query: &PullRequestQuery,
        range: Range,
    ) -> Result<Page<PullRequest>> {
        let path = query
            .apply(
                UrlBuilder::new(format!(
                    "{}/pull-requests",
                    Self::repo_path(project_key, repository_slug)
                ))
                .range(range),
            )?
            .build();

        get_page(self.executor.as_ref(), &path, parse_pull_request).await
    }

    async fn get_pull_request_changes(
        &self,
        project_key: &str,
        repository_slug: &str,
        pull_request_id: u64,
        since: Option<&str>,
        range: Range,
    ) -> Result<Page<PullRequestChange>> {
        let path = UrlBuilder::new(format!(
            "{}/changes",
            Self::pull_request_path(project_key, repository_slug, pull_request_id)
        ))
        .range(range)
        .param_opt("since", since)
        .build();
        get_page(self.executor.as_ref(), &path, parse_change).await
    }

    async fn get_pull_request_activities(
        &self,
        project_key: &str,
        repository_slug: &str,
        pull_request_id: u64,
        range: Range,
    ) -> Result<Page<PullRequestActivity>> {
        let path = UrlBuilder::new(format!(
            "{}/activities",
            Self::pull_request_path(project_key, repository_slug, pull_request_id)
        ))
        .range(range)
        .build();
        get_page(
            self.executor.as_ref(),
            &path,
            activity_parser(pull_request_id),
        )
        .await
    }

    // TODO: switch to the dedicated tasks resource once servers older than
    // 7.2 no longer need to be supported.
    async fn get_pull_request_tasks(
        &self,
        project_key: &str,
        repository_slug: &str,
        pull_request_id: u64,
        range: Range,
    ) -> Result<Page<Task>> {
        let path = UrlBuilder::new(format!(
            "{}/activities",
            Self::pull_request_path(project_key, repository_slug, pull_request_id)
        ))
        .range(range)
        .build();
        get_page(self.executor.as_ref(), &path, parse_task).await
    }

    async fn get_users(&self, range: Range) -> Result<Page<User>> {
        let path = UrlBuilder::new(format!("{}/users", API_ROOT))
            .range(range)
            .build();
        get_page(self.executor.as_ref(), &path, parse_user).await
    }

    async fn get_application_properties(&self) -> Result<BTreeMap<String, String>> {
        let path = format!("{}/application-properties", API_ROOT);
        let json = self.executor.execute(HttpMethod::Get, &path, None).await?;
        parse_application_properties(&json)
    }

    async fn create_project(
        &self,
        project_key: &str,
        name: &str,
        project_type: ProjectType,
        description: Option<&str>,
    ) -> Result<Project> {
        let body = serde_json::to_value(CreateProjectRequest {
            key: project_key.to_string(),
            name: name.to_string(),
            project_type,
            description: description.map(str::to_string),
        })?;
        let json = self.post(&format!("{}/projects", API_ROOT), body).await?;
        parse_project(&json)
    }

    async fn create_repository(
        &self,
        project_key: &str,
        name: &str,
        scm_id: &str,
        forkable: bool,
    ) -> Result<Repository> {
        let body = serde_json::to_value(CreateRepositoryRequest {
            name: name.to_string(),
            scm_id: scm_id.to_string(),
            forkable,
        })?;
        let path = format!("{}/projects/{}/repos", API_ROOT, project_key);
        let json = self.post(&path, body).await?;
        parse_repository(&json)
    }

    async fn delete_project(&self, project_key: &str) -> Result<()> {
        self.delete(&format!("{}/projects/{}", API_ROOT, project_key))
            .await
    }

    async fn delete_repository(&self, project_key: &str, repository_slug: &str) -> Result<()> {
        self.delete(&Self::repo_path(project_key, repository_slug))
            .await
    }
}
