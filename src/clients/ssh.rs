//
//  bitbucket-rest-client
//  clients/ssh.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # SSH Key Client
//!
//! User keys live under `/rest/ssh/1.0`, project and repository access keys
//! under `/rest/keys/1.0`.

use std::sync::Arc;

use async_trait::async_trait;

use super::{get_page, DEFAULT_LIMIT};
use crate::api::common::{collect_all, Page, Range, Result};
use crate::api::parsers::{parse_access_key, parse_ssh_key};
use crate::api::query::UrlBuilder;
use crate::api::server::{AccessKey, AddSshKeyRequest, SshKey};
use crate::api::{HttpExecutor, HttpMethod};

const SSH_ROOT: &str = "/rest/ssh/1.0";
const KEYS_ROOT: &str = "/rest/keys/1.0";

/// Client for SSH keys.
#[async_trait]
pub trait SshClient: Send + Sync {
    /// Lists the SSH keys of `user`, or of the caller when `user` is `None`.
    async fn get_user_keys(&self, user: Option<&str>, range: Range) -> Result<Page<SshKey>>;

    async fn get_all_user_keys(&self, user: Option<&str>) -> Result<Vec<SshKey>> {
        collect_all(DEFAULT_LIMIT, |range| self.get_user_keys(user, range)).await
    }

    /// Registers a public key for the caller.
    async fn add_user_key(&self, text: &str, label: Option<&str>) -> Result<SshKey>;

    async fn delete_user_key(&self, key_id: u64) -> Result<()>;

    async fn get_project_access_keys(
        &self,
        project_key: &str,
        range: Range,
    ) -> Result<Page<AccessKey>>;

    async fn get_all_project_access_keys(&self, project_key: &str) -> Result<Vec<AccessKey>> {
        collect_all(DEFAULT_LIMIT, |range| {
            self.get_project_access_keys(project_key, range)
        })
        .await
    }

    async fn get_repository_access_keys(
        &self,
        project_key: &str,
        repository_slug: &str,
        range: Range,
    ) -> Result<Page<AccessKey>>;

    async fn get_all_repository_access_keys(
        &self,
        project_key: &str,
        repository_slug: &str,
    ) -> Result<Vec<AccessKey>> {
        collect_all(DEFAULT_LIMIT, |range| {
            self.get_repository_access_keys(project_key, repository_slug, range)
        })
        .await
    }
}

/// [`SshClient`] over the REST API.
pub struct SshClientRest {
    executor: Arc<dyn HttpExecutor>,
}

impl SshClientRest {
    pub fn new(executor: Arc<dyn HttpExecutor>) -> Self {
        Self { executor }
    }
}

#[async_trait]
impl SshClient for SshClientRest {
    async fn get_user_keys(&self, user: Option<&str>, range: Range) -> Result<Page<SshKey>> {
        let path = UrlBuilder::new(format!("{}/keys", SSH_ROOT))
            .range(range)
            .param_opt("user", user)
            .build();
        get_page(self.executor.as_ref(), &path, parse_ssh_key).await
    }

    async fn add_user_key(&self, text: &str, label: Option<&str>) -> Result<SshKey> {
        let body = serde_json::to_value(AddSshKeyRequest {
            text: text.to_string(),
            label: label.map(str::to_string),
        })?;
        let path = format!("{}/keys", SSH_ROOT);
        let json = self
            .executor
            .execute(HttpMethod::Post, &path, Some(&body))
            .await?;
        parse_ssh_key(&json)
    }

    async fn delete_user_key(&self, key_id: u64) -> Result<()> {
        let path = format!("{}/keys/{}", SSH_ROOT, key_id);
        self.executor
            .execute(HttpMethod::Delete, &path, None)
            .await?;
        Ok(())
    }

    async fn get_project_access_keys(
        &self,
        project_key: &str,
        range: Range,
    ) -> Result<Page<AccessKey>> {
        let path = UrlBuilder::new(format!("{}/projects/{}/ssh", KEYS_ROOT, project_key))
            .range(range)
            .build();
        get_page(self.executor.as_ref(), &path, parse_access_key).await
    }

    async fn get_repository_access_keys(
        &self,
        project_key: &str,
        repository_slug: &str,
        range: Range,
    ) -> Result<Page<AccessKey>> {
        let path = UrlBuilder::new(format!(
            "{}/projects/{}/repos/{}/ssh",
            KEYS_ROOT, project_key, repository_slug
        ))
        .range(range)
        .build();
        get_page(self.executor.as_ref(), &path, parse_access_key).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::common::ApiError;
    use crate::api::testing::{FakeExecutor, Reply};
    use serde_json::json;

    fn key(id: u64) -> serde_json::Value {
        json!({"id": id, "text": format!("ssh-ed25519 AAAA{} me@host", id), "label": "me@host"})
    }

    #[tokio::test]
    async fn test_user_keys_for_named_user() {
        let fake = Arc::new(FakeExecutor::new().on_get(
            "/rest/ssh/1.0/keys?start=0&limit=100&user=jdoe",
            json!({"isLastPage": false, "nextPageStart": 1, "values": [key(1)]}),
        ).on_get(
            "/rest/ssh/1.0/keys?start=1&limit=100&user=jdoe",
            json!({"isLastPage": true, "values": [key(1), key(2)]}),
        ));
        let client = SshClientRest::new(fake.clone());

        let keys = client.get_all_user_keys(Some("jdoe")).await.unwrap();

        let ids: Vec<u64> = keys.iter().map(|k| k.id).collect();
        assert_eq!(ids, [1, 2]);
        assert_eq!(fake.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_add_and_delete_user_key() {
        let fake = Arc::new(
            FakeExecutor::new()
                .on(HttpMethod::Post, "/rest/ssh/1.0/keys", Reply::Json(key(9)))
                .on(HttpMethod::Delete, "/rest/ssh/1.0/keys/9", Reply::Json(serde_json::Value::Null))
                .on(HttpMethod::Delete, "/rest/ssh/1.0/keys/10", Reply::NotFound),
        );
        let client = SshClientRest::new(fake.clone());

        let added = client.add_user_key("ssh-ed25519 AAAA9 me@host", None).await.unwrap();
        assert_eq!(added.id, 9);
        assert_eq!(fake.calls()[0].body, Some(json!({"text": "ssh-ed25519 AAAA9 me@host"})));

        client.delete_user_key(9).await.unwrap();
        assert!(matches!(client.delete_user_key(10).await, Err(ApiError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_access_keys_not_found_is_empty() {
        let fake = FakeExecutor::new()
            .on(HttpMethod::Get, "/rest/keys/1.0/projects/NOPE/ssh?start=0&limit=100", Reply::NotFound)
            .on_get(
                "/rest/keys/1.0/projects/PRJ/repos/repo/ssh?start=0&limit=100",
                json!({"isLastPage": true, "values": [{
                    "key": key(4),
                    "repository": {"slug": "repo", "id": 1, "name": "repo", "scmId": "git",
                                   "project": {"key": "PRJ", "id": 1, "name": "Project"}},
                    "permission": "REPO_WRITE"
                }]}),
            );
        let client = SshClientRest::new(Arc::new(fake));

        assert!(client.get_all_project_access_keys("NOPE").await.unwrap().is_empty());

        let keys = client.get_all_repository_access_keys("PRJ", "repo").await.unwrap();
        assert_eq!(keys[0].permission, "REPO_WRITE");
    }
}
