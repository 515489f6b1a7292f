//
//  bitbucket-rest-client
//  clients/factory.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Construction of the resource clients around one shared executor.

use std::sync::Arc;

use tracing::debug;

use super::{
    BuildStatusClient, BuildStatusClientRest, ProjectClient, ProjectClientRest, SshClient,
    SshClientRest,
};
use crate::api::common::Result;
use crate::api::{BitbucketClient, ClientConfig, HttpExecutor};
use crate::auth::AuthCredential;

/// Owns the HTTP executor and the three resource clients built on it.
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
///     AuthCredential::basic("jdoe", "secret"),
/// )?;
///
/// let stats = factory.build_status_client().get_build_stats("abc123").await?;
/// println!("{:?} failed", stats.failed);
///
/// factory.shutdown();
/// # Ok(())
/// # }
/// ```
pub struct BitbucketClientFactory {
    executor: Arc<dyn HttpExecutor>,
    project: ProjectClientRest,
    build_status: BuildStatusClientRest,
    ssh: SshClientRest,
}

impl BitbucketClientFactory {
    /// Creates a factory talking to `base_url` with default client settings.
    pub fn new(base_url: &str, credentials: AuthCredential) -> Result<Self> {
        Self::from_config(&ClientConfig::new(base_url, credentials))
    }

    /// Creates a factory from explicit client settings.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let client = BitbucketClient::new(config)?;
        debug!(base_url = client.base_url(), "created HTTP executor");
        Ok(Self::with_executor(Arc::new(client)))
    }

    /// Wires the resource clients around an existing executor.
    pub fn with_executor(executor: Arc<dyn HttpExecutor>) -> Self {
        Self {
            project: ProjectClientRest::new(Arc::clone(&executor)),
            build_status: BuildStatusClientRest::new(Arc::clone(&executor)),
            ssh: SshClientRest::new(Arc::clone(&executor)),
            executor,
        }
    }

    pub fn project_client(&self) -> &dyn ProjectClient {
        &self.project
    }

    pub fn build_status_client(&self) -> &dyn BuildStatusClient {
        &self.build_status
    }

    pub fn ssh_client(&self) -> &dyn SshClient {
        &self.ssh
    }

    /// Shuts the shared executor down. Every client fails with
    /// [`ApiError::Shutdown`](crate::api::ApiError::Shutdown) afterwards.
    pub fn shutdown(&self) {
        self.executor.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::common::{ApiError, Range};
    use crate::api::testing::FakeExecutor;
    use serde_json::json;

    #[tokio::test]
    async fn test_clients_share_one_executor() {
        let fake = Arc::new(
            FakeExecutor::new()
                .on_get(
                    "/rest/api/1.0/users?start=0&limit=5",
                    json!({"isLastPage": true, "values": []}),
                )
                .on_get(
                    "/rest/ssh/1.0/keys?start=0&limit=5",
                    json!({"isLastPage": true, "values": []}),
                ),
        );
        let factory = BitbucketClientFactory::with_executor(fake.clone());
        let range = Range::new(0, 5).unwrap();

        factory.project_client().get_users(range).await.unwrap();
        factory.ssh_client().get_user_keys(None, range).await.unwrap();

        assert_eq!(
            fake.paths(),
            [
                "/rest/api/1.0/users?start=0&limit=5",
                "/rest/ssh/1.0/keys?start=0&limit=5"
            ]
        );
    }

    #[tokio::test]
    async fn test_shutdown_stops_every_client() {
        let server = mockito::Server::new_async().await;
        let factory = BitbucketClientFactory::new(&server.url(), AuthCredential::Anonymous).unwrap();

        factory.shutdown();

        assert!(matches!(
            factory.project_client().get_project("PRJ").await,
            Err(ApiError::Shutdown)
        ));
        assert!(matches!(
            factory.build_status_client().get_build_stats("abc").await,
            Err(ApiError::Shutdown)
        ));
    }
}
