//
//  bitbucket-rest-client
//  clients/build_status.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Build results reported against commits by CI servers.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use super::{get_optional, get_page, DEFAULT_LIMIT};
use crate::api::common::{collect_all, ApiError, Page, Range, Result};
use crate::api::parsers::{parse_build_stats, parse_build_status, parse_build_summaries};
use crate::api::query::UrlBuilder;
use crate::api::server::{BuildStatsSummary, BuildStatus};
use crate::api::{HttpExecutor, HttpMethod};

const BUILD_STATUS_ROOT: &str = "/rest/build-status/latest/commits";

/// Client for the build status resource.
#[async_trait]
pub trait BuildStatusClient: Send + Sync {
    /// Build counts for several commits in one request, keyed by commit id.
    ///
    /// Commits the server knows nothing about are missing from the map.
    async fn get_build_summaries(
        &self,
        commits: &[String],
    ) -> Result<BTreeMap<String, BuildStatsSummary>>;

    /// Build counts for one commit. A commit without builds has every
    /// count unset.
    async fn get_build_stats(&self, commit: &str) -> Result<BuildStatsSummary>;

    async fn get_build_statuses(&self, commit: &str, range: Range) -> Result<Page<BuildStatus>>;

    async fn get_all_build_statuses(&self, commit: &str) -> Result<Vec<BuildStatus>> {
        collect_all(DEFAULT_LIMIT, |range| self.get_build_statuses(commit, range)).await
    }
}

/// [`BuildStatusClient`] over the REST API.
pub struct BuildStatusClientRest {
    executor: Arc<dyn HttpExecutor>,
}

impl BuildStatusClientRest {
    pub fn new(executor: Arc<dyn HttpExecutor>) -> Self {
        Self { executor }
    }
}

#[async_trait]
impl BuildStatusClient for BuildStatusClientRest {
    async fn get_build_summaries(
        &self,
        commits: &[String],
    ) -> Result<BTreeMap<String, BuildStatsSummary>> {
        let path = format!("{}/stats", BUILD_STATUS_ROOT);
        let body = Value::from(commits.to_vec());

        match self
            .executor
            .execute(HttpMethod::Post, &path, Some(&body))
            .await
        {
            Ok(json) => parse_build_summaries(&json),
            Err(ApiError::NotFound(_)) => Ok(BTreeMap::new()),
            Err(e) => Err(e),
        }
    }

    async fn get_build_stats(&self, commit: &str) -> Result<BuildStatsSummary> {
        let path = format!("{}/stats/{}", BUILD_STATUS_ROOT, commit);
        match get_optional(self.executor.as_ref(), &path).await? {
            Some(json) => parse_build_stats(&json),
            None => Ok(BuildStatsSummary::default()),
        }
    }

    async fn get_build_statuses(&self, commit: &str, range: Range) -> Result<Page<BuildStatus>> {
        let path = UrlBuilder::new(format!("{}/{}", BUILD_STATUS_ROOT, commit))
            .range(range)
            .build();
        get_page(self.executor.as_ref(), &path, parse_build_status).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::{FakeExecutor, Reply};
    use serde_json::json;

    const COMMIT: &str = "9e72f04322c4a1f240e0b3158c67c3c19cdd16e7";

    #[tokio::test]
    async fn test_summaries_post_commit_list() {
        let fake = Arc::new(FakeExecutor::new().on(
            HttpMethod::Post,
            "/rest/build-status/latest/commits/stats",
            Reply::Json(json!({COMMIT: {"failed": 2, "successful": 5}})),
        ));
        let client = BuildStatusClientRest::new(fake.clone());

        let summaries = client
            .get_build_summaries(&[COMMIT.to_string(), "deadbeef".to_string()])
            .await
            .unwrap();

        let summary = summaries[COMMIT];
        assert_eq!(summary.failed, Some(2));
        assert_eq!(summary.in_progress, None);
        assert_eq!(summary.successful, Some(5));
        assert!(!summaries.contains_key("deadbeef"));
        assert_eq!(fake.calls()[0].body, Some(json!([COMMIT, "deadbeef"])));
    }

    #[tokio::test]
    async fn test_not_found_means_no_builds() {
        let path = format!("/rest/build-status/latest/commits/stats/{}", COMMIT);
        let fake = FakeExecutor::new()
            .on(HttpMethod::Get, &path, Reply::NotFound)
            .on(
                HttpMethod::Post,
                "/rest/build-status/latest/commits/stats",
                Reply::NotFound,
            );
        let client = BuildStatusClientRest::new(Arc::new(fake));

        assert!(client.get_build_stats(COMMIT).await.unwrap().is_unset());
        assert!(client
            .get_build_summaries(&[COMMIT.to_string()])
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_all_build_statuses() {
        let path = format!(
            "/rest/build-status/latest/commits/{}?start=0&limit=100",
            COMMIT
        );
        let fake = FakeExecutor::new().on_get(
            &path,
            json!({"size": 1, "limit": 100, "isLastPage": true, "start": 0, "values": [{
                "state": "SUCCESSFUL",
                "key": "REPO-MASTER",
                "name": "REPO-MASTER-42",
                "url": "https://bamboo.example.com/browse/REPO-MASTER-42",
                "dateAdded": 1359065920000u64
            }]}),
        );
        let client = BuildStatusClientRest::new(Arc::new(fake));

        let statuses = client.get_all_build_statuses(COMMIT).await.unwrap();
        assert_eq!(statuses.len(), 1);
        assert_eq!(statuses[0].key, "REPO-MASTER");
    }
}
