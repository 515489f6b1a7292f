//
//  bitbucket-rest-client
//  cli/repo.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Repository commands.
//!
//! This module provides repository functionality including:
//! - Listing repositories across the server or in one project
//! - Viewing, creating and deleting repositories
//! - Listing branches and looking up the default branch
//! - Listing forks

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use console::style;

use super::{GlobalOptions, PageArgs, RepoTarget};
use crate::api::common::ApiError;
use crate::api::server::{Branch, Repository};
use crate::output::{format_bool, print_field, print_header, TableOutput, TableRow};

/// Manage repositories
#[derive(Args, Debug)]
pub struct RepoCommand {
    #[command(subcommand)]
    pub command: RepoSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum RepoSubcommand {
    /// List repositories
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// View repository details
    View(RepoArgs),

    /// Create a new repository
    Create(CreateArgs),

    /// Delete a repository
    Delete(DeleteArgs),

    /// List branches, most recently modified first
    Branches(BranchesArgs),

    /// Show the default branch
    DefaultBranch(RepoArgs),

    /// List forks of a repository
    Forks(ForksArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only list repositories of this project
    #[arg(long, short = 'p')]
    pub project: Option<String>,

    #[command(flatten)]
    pub page: PageArgs,
}

#[derive(Args, Debug)]
pub struct RepoArgs {
    #[command(flatten)]
    pub target: RepoTarget,
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Repository name
    pub name: String,

    /// Project key (defaults to default_project from the config file)
    #[arg(long, short = 'p')]
    pub project: Option<String>,

    /// Source control system
    #[arg(long, default_value = "git")]
    pub scm: String,

    /// Disallow forking
    #[arg(long)]
    pub no_fork: bool,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    #[command(flatten)]
    pub target: RepoTarget,

    /// Skip confirmation
    #[arg(long)]
    pub confirm: bool,
}

#[derive(Args, Debug)]
pub struct BranchesArgs {
    #[command(flatten)]
    pub target: RepoTarget,

    /// Only branches whose name contains this text
    #[arg(long, short = 'f')]
    pub filter: Option<String>,

    /// Ask the server for branch metadata
    #[arg(long)]
    pub details: bool,

    #[command(flatten)]
    pub page: PageArgs,
}

#[derive(Args, Debug)]
pub struct ForksArgs {
    #[command(flatten)]
    pub target: RepoTarget,

    #[command(flatten)]
    pub page: PageArgs,
}

impl RepoCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            RepoSubcommand::List(args) => self.list(args, global).await,
            RepoSubcommand::View(args) => self.view(args, global).await,
            RepoSubcommand::Create(args) => self.create(args, global).await,
            RepoSubcommand::Delete(args) => self.delete(args, global).await,
            RepoSubcommand::Branches(args) => self.branches(args, global).await,
            RepoSubcommand::DefaultBranch(args) => self.default_branch(args, global).await,
            RepoSubcommand::Forks(args) => self.forks(args, global).await,
        }
    }

    async fn list(&self, args: &ListArgs, global: &GlobalOptions) -> Result<()> {
        let factory = global.factory()?;
        let client = factory.project_client();

        let repos = match (&args.project, args.page.range()?) {
            (Some(project), Some(range)) => {
                client.get_project_repositories(project, range).await?.values
            }
            (Some(project), None) => client.get_all_project_repositories(project).await?,
            (None, Some(range)) => client.get_repositories(range).await?.values,
            (None, None) => client.get_all_repositories().await?,
        };

        global.output().write_list(&repos)
    }

    async fn view(&self, args: &RepoArgs, global: &GlobalOptions) -> Result<()> {
        let (project, slug) = args.target.resolve(global)?;
        let factory = global.factory()?;

        let repo = factory
            .project_client()
            .get_repository(&project, &slug)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("repository {}/{}", project, slug)))?;

        global.output().write(&repo)
    }

    async fn create(&self, args: &CreateArgs, global: &GlobalOptions) -> Result<()> {
        let project = global.project_or_default(args.project.as_deref())?;
        let factory = global.factory()?;

        let repo = factory
            .project_client()
            .create_repository(&project, &args.name, &args.scm, !args.no_fork)
            .await?;

        let output = global.output();
        output.write_success(&format!("Created repository {}/{}", project, repo.slug));
        output.write(&repo)
    }

    async fn delete(&self, args: &DeleteArgs, global: &GlobalOptions) -> Result<()> {
        let (project, slug) = args.target.resolve(global)?;
        if !args.confirm {
            bail!(
                "Deleting repository {}/{} cannot be undone. Re-run with --confirm to proceed",
                project,
                slug
            );
        }

        let factory = global.factory()?;
        factory
            .project_client()
            .delete_repository(&project, &slug)
            .await?;

        global
            .output()
            .write_success(&format!("Deleted repository {}/{}", project, slug));
        Ok(())
    }

    async fn branches(&self, args: &BranchesArgs, global: &GlobalOptions) -> Result<()> {
        let (project, slug) = args.target.resolve(global)?;
        let factory = global.factory()?;
        let client = factory.project_client();
        let filter = args.filter.as_deref();

        let branches = match args.page.range()? {
            Some(range) => {
                client
                    .get_branches(&project, &slug, filter, range, args.details)
                    .await?
                    .values
            }
            None => {
                client
                    .get_all_branches(&project, &slug, filter, args.details)
                    .await?
            }
        };

        global.output().write_list(&branches)
    }

    async fn default_branch(&self, args: &RepoArgs, global: &GlobalOptions) -> Result<()> {
        let (project, slug) = args.target.resolve(global)?;
        let factory = global.factory()?;

        let branch = factory
            .project_client()
            .get_default_branch(&project, &slug)
            .await?
            .ok_or_else(|| {
                ApiError::NotFound(format!("default branch of {}/{}", project, slug))
            })?;

        global.output().write(&branch)
    }

    async fn forks(&self, args: &ForksArgs, global: &GlobalOptions) -> Result<()> {
        let (project, slug) = args.target.resolve(global)?;
        let factory = global.factory()?;
        let client = factory.project_client();

        let forks = match args.page.range()? {
            Some(range) => client.get_forks(&project, &slug, range).await?.values,
            None => client.get_all_forks(&project, &slug).await?,
        };

        global.output().write_list(&forks)
    }
}

impl TableOutput for Repository {
    fn print_table(&self, color: bool) {
        print_header(&format!("{}/{}", self.project.key, self.slug), color);
        print_field("Name", &self.name, color);
        print_field("ID", &self.id.to_string(), color);
        print_field("SCM", &self.scm_id, color);
        print_field("State", &self.state, color);
        print_field("Public", &format_bool(self.is_public), color);
        print_field("Forkable", &format_bool(self.forkable), color);
        if let Some(description) = &self.description {
            print_field("Description", description, color);
        }
        if let Some(origin) = &self.origin {
            print_field(
                "Forked from",
                &format!("{}/{}", origin.project.key, origin.slug),
                color,
            );
        }
        if let Some(url) = self.links.clone_url("http") {
            print_field("Clone (HTTP)", url, color);
        }
        if let Some(url) = self.links.clone_url("ssh") {
            print_field("Clone (SSH)", url, color);
        }
        if let Some(url) = self.links.web_url() {
            print_field("URL", url, color);
        }
    }
}

impl TableRow for Branch {
    fn headers() -> Vec<&'static str> {
        vec!["BRANCH", "COMMIT", "DEFAULT"]
    }

    fn row(&self, color: bool) -> Vec<String> {
        let name = if color && self.is_default {
            style(&self.display_id).green().bold().to_string()
        } else {
            self.display_id.clone()
        };

        vec![
            name,
            short_commit(self.latest_commit.as_deref()),
            format_bool(self.is_default),
        ]
    }
}

impl TableOutput for Branch {
    fn print_table(&self, color: bool) {
        print_header(&self.display_id, color);
        print_field("Ref", &self.id, color);
        print_field("Commit", self.latest_commit.as_deref().unwrap_or("-"), color);
        if let (Some(project), Some(slug)) = (&self.project_key, &self.repository_slug) {
            print_field("Repository", &format!("{}/{}", project, slug), color);
        }
    }
}

/// First 12 characters of a commit hash.
pub(crate) fn short_commit(commit: Option<&str>) -> String {
    commit
        .map(|c| c.chars().take(12).collect())
        .unwrap_or_else(|| "-".to_string())
}
