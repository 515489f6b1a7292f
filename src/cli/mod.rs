//
//  bitbucket-rest-client
//  cli/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! CLI command definitions using clap derive macros

mod build;
mod completion;
mod config;
mod pr;
mod project;
mod repo;
mod server;
mod ssh_key;
mod user;

pub use build::BuildCommand;
pub use completion::CompletionCommand;
pub use config::ConfigCommand;
pub use pr::PrCommand;
pub use project::ProjectCommand;
pub use repo::RepoCommand;
pub use server::ServerCommand;
pub use ssh_key::SshKeyCommand;
pub use user::UserCommand;

use std::ops::Deref;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::debug;

use crate::api::common::Range;
use crate::api::ClientConfig;
use crate::auth::AuthCredential;
use crate::clients::BitbucketClientFactory;
use crate::config::Config;
use crate::output::{OutputFormat, OutputWriter};

/// Command-line interface for Bitbucket Server/Data Center
#[derive(Parser, Debug)]
#[command(
    name = "bbrest",
    version,
    about = "Query and manage a Bitbucket Server/Data Center instance",
    long_about = "bbrest talks to the REST API of a Bitbucket Server or Data Center instance.\n\n\
                  It lists and manages projects, repositories, pull requests, build statuses and SSH keys.",
    propagate_version = true,
    after_help = "Use 'bbrest <command> --help' for more information about a command."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOptions,
}

/// Options accepted by every command.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Server URL, e.g. https://bitbucket.example.com
    #[arg(long, global = true, env = "BBREST_BASE_URL")]
    pub base_url: Option<String>,

    /// Username for Basic authentication
    #[arg(long, short = 'u', global = true, env = "BBREST_USERNAME")]
    pub username: Option<String>,

    /// Password for Basic authentication
    #[arg(long, global = true, env = "BBREST_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Personal access token; takes precedence over username and password
    #[arg(long, global = true, env = "BBREST_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Path of the configuration file
    #[arg(long, global = true, env = "BBREST_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Work with projects
    #[command(visible_alias = "proj")]
    Project(ProjectCommand),

    /// Work with repositories and their branches
    #[command(visible_alias = "r")]
    Repo(RepoCommand),

    /// Work with pull requests
    Pr(PrCommand),

    /// List users
    User(UserCommand),

    /// Inspect build results of commits
    Build(BuildCommand),

    /// Manage SSH keys and access keys
    #[command(name = "ssh-key")]
    SshKey(SshKeyCommand),

    /// Show information about the server
    Server(ServerCommand),

    /// Manage configuration
    Config(ConfigCommand),

    /// Generate shell completion scripts
    Completion(CompletionCommand),

    /// Print the version
    Version,
}

/// Paging options shared by list commands.
///
/// Without `--limit` every page is fetched from the beginning.
#[derive(Args, Debug, Clone, Default)]
pub struct PageArgs {
    /// Index of the first result (only with --limit)
    #[arg(long, requires = "limit")]
    pub start: Option<u32>,

    /// Fetch a single page of at most this many results
    #[arg(long, short = 'l')]
    pub limit: Option<u32>,
}

impl PageArgs {
    /// The requested window, or `None` to fetch everything.
    pub fn range(&self) -> Result<Option<Range>> {
        self.limit
            .map(|limit| Range::new(self.start.unwrap_or(0), limit))
            .transpose()
            .map_err(Into::into)
    }
}

/// A repository named as `SLUG` with `--project`, or as `PROJECT/SLUG`.
#[derive(Args, Debug, Clone)]
pub struct RepoTarget {
    /// Repository slug, or PROJECT/SLUG
    pub repo: String,

    /// Project key (defaults to default_project from the config file)
    #[arg(long, short = 'p')]
    pub project: Option<String>,
}

impl RepoTarget {
    /// Returns the project key and repository slug.
    pub fn resolve(&self, global: &GlobalOptions) -> Result<(String, String)> {
        if let Some((project, slug)) = self.repo.split_once('/') {
            if project.is_empty() || slug.is_empty() {
                anyhow::bail!("Invalid repository '{}', expected PROJECT/SLUG", self.repo);
            }
            return Ok((project.to_string(), slug.to_string()));
        }

        let project = global.project_or_default(self.project.as_deref())?;
        Ok((project, self.repo.clone()))
    }
}

impl GlobalOptions {
    pub fn output(&self) -> OutputWriter {
        let format = if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Table
        };
        OutputWriter::new(format)
    }

    /// The `--config` path, or the default location.
    pub fn config_path(&self) -> Result<PathBuf> {
        match &self.config {
            Some(path) => Ok(path.clone()),
            None => Config::config_path(),
        }
    }

    pub fn load_config(&self) -> Result<Config> {
        Config::load_from(&self.config_path()?)
    }

    /// Resolves the credentials: a token wins, then username and password,
    /// otherwise requests are anonymous.
    pub fn credentials(&self, config: &Config) -> AuthCredential {
        let username = self.username.as_ref().or(config.username.as_ref());

        match (&self.token, username, &self.password) {
            (Some(token), _, _) => AuthCredential::token(token.as_str()),
            (None, Some(username), Some(password)) => {
                AuthCredential::basic(username.as_str(), password.as_str())
            }
            _ => AuthCredential::Anonymous,
        }
    }

    /// Builds the client settings from flags, environment and the config file.
    pub fn client_config(&self, config: &Config) -> Result<ClientConfig> {
        let base_url = self
            .base_url
            .as_ref()
            .or(config.base_url.as_ref())
            .context("No server configured. Pass --base-url, set BBREST_BASE_URL or add base_url to the config file")?;

        let credentials = self.credentials(config);
        debug!(base_url = %base_url, auth = credentials.type_name(), "resolved connection settings");

        let mut client = ClientConfig::new(base_url.as_str(), credentials);
        if let Some(timeout) = self.timeout.map(Duration::from_secs).or(config.timeout()) {
            client = client.with_timeout(timeout);
        }
        Ok(client)
    }

    /// Connects to the configured server for the duration of one command.
    pub fn factory(&self) -> Result<Session> {
        let config = self.load_config()?;
        let client = self.client_config(&config)?;
        Ok(Session::new(BitbucketClientFactory::from_config(&client)?))
    }

    /// The given project key, falling back to the configured default.
    pub fn project_or_default(&self, project: Option<&str>) -> Result<String> {
        if let Some(project) = project {
            return Ok(project.to_string());
        }
        self.load_config()?
            .default_project
            .context("No project given and no default_project configured")
    }
}

/// A [`BitbucketClientFactory`] that is shut down when dropped.
pub struct Session {
    factory: BitbucketClientFactory,
}

impl Session {
    pub fn new(factory: BitbucketClientFactory) -> Self {
        Self { factory }
    }
}

impl Deref for Session {
    type Target = BitbucketClientFactory;

    fn deref(&self) -> &Self::Target {
        &self.factory
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        debug!("shutting down HTTP executor");
        self.factory.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::api::common::ApiError;
    use crate::api::{BitbucketClient, HttpExecutor, HttpMethod};

    fn options() -> GlobalOptions {
        GlobalOptions::default()
    }

    #[test]
    fn test_token_takes_precedence() {
        let opts = GlobalOptions {
            token: Some("pat".to_string()),
            username: Some("jdoe".to_string()),
            password: Some("pw".to_string()),
            ..options()
        };

        assert_eq!(
            opts.credentials(&Config::default()),
            AuthCredential::token("pat")
        );
    }

    #[test]
    fn test_username_from_config_with_password_flag() {
        let opts = GlobalOptions {
            password: Some("pw".to_string()),
            ..options()
        };
        let config = Config {
            username: Some("jdoe".to_string()),
            ..Config::default()
        };

        assert_eq!(opts.credentials(&config), AuthCredential::basic("jdoe", "pw"));
        assert_eq!(options().credentials(&config), AuthCredential::Anonymous);
    }

    #[test]
    fn test_flags_override_config() {
        let opts = GlobalOptions {
            base_url: Some("https://flag.example.com".to_string()),
            timeout: Some(5),
            ..options()
        };
        let config = Config {
            base_url: Some("https://file.example.com".to_string()),
            timeout_secs: Some(60),
            ..Config::default()
        };

        let client = opts.client_config(&config).unwrap();
        assert_eq!(client.base_url, "https://flag.example.com");
        assert_eq!(client.timeout, Duration::from_secs(5));

        let client = options().client_config(&config).unwrap();
        assert_eq!(client.base_url, "https://file.example.com");
        assert_eq!(client.timeout, Duration::from_secs(60));
    }

    #[test]
    fn test_missing_base_url() {
        assert!(options().client_config(&Config::default()).is_err());
    }

    #[test]
    fn test_repo_target() {
        let target = RepoTarget {
            repo: "PRJ/my-repo".to_string(),
            project: None,
        };
        assert_eq!(
            target.resolve(&options()).unwrap(),
            ("PRJ".to_string(), "my-repo".to_string())
        );

        let target = RepoTarget {
            repo: "my-repo".to_string(),
            project: Some("OTH".to_string()),
        };
        assert_eq!(
            target.resolve(&options()).unwrap(),
            ("OTH".to_string(), "my-repo".to_string())
        );

        let target = RepoTarget {
            repo: "/my-repo".to_string(),
            project: None,
        };
        assert!(target.resolve(&options()).is_err());
    }

    #[test]
    fn test_page_args() {
        assert_eq!(PageArgs::default().range().unwrap(), None);

        let args = PageArgs {
            start: Some(50),
            limit: Some(25),
        };
        assert_eq!(args.range().unwrap(), Some(Range::new(50, 25).unwrap()));

        let args = PageArgs {
            start: None,
            limit: Some(10),
        };
        assert_eq!(args.range().unwrap(), Some(Range::new(0, 10).unwrap()));

        let args = PageArgs {
            start: None,
            limit: Some(0),
        };
        assert!(args.range().is_err());
    }

    #[test]
    fn test_start_requires_limit() {
        let err = Cli::try_parse_from(["bbrest", "project", "list", "--start", "5"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);

        let cli =
            Cli::try_parse_from(["bbrest", "project", "list", "--start", "5", "--limit", "10"]);
        assert!(cli.is_ok());
    }

    #[tokio::test]
    async fn test_session_shuts_down_when_dropped() {
        let config = ClientConfig::new("https://bitbucket.example.com", AuthCredential::Anonymous);
        let executor = Arc::new(BitbucketClient::new(&config).unwrap());

        let session = Session::new(BitbucketClientFactory::with_executor(executor.clone()));
        drop(session);

        assert!(matches!(
            executor.execute(HttpMethod::Get, "/rest/api/1.0/projects", None).await,
            Err(ApiError::Shutdown)
        ));
    }
}
