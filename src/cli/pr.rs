//
//  bitbucket-rest-client
//  cli/pr.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Pull request commands

use anyhow::Result;
use clap::{Args, Subcommand, ValueEnum};
use console::style;

use super::repo::short_commit;
use super::{GlobalOptions, PageArgs, RepoTarget};
use crate::api::query::PullRequestQuery;
use crate::api::server::{
    PullRequest, PullRequestActivity, PullRequestChange, PullRequestRole, PullRequestState, Task,
};
use crate::output::{format_status, format_time, truncate, TableRow};

/// Work with pull requests
#[derive(Args, Debug)]
pub struct PrCommand {
    #[command(subcommand)]
    pub command: PrSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum PrSubcommand {
    /// List pull requests
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// List files changed by a pull request
    Changes(ChangesArgs),

    /// Show the activity stream of a pull request
    Activities(PullRequestArgs),

    /// List tasks of a pull request
    Tasks(PullRequestArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StateArg {
    Open,
    Merged,
    Declined,
    All,
}

impl StateArg {
    fn state(self) -> Option<PullRequestState> {
        match self {
            Self::Open => Some(PullRequestState::Open),
            Self::Merged => Some(PullRequestState::Merged),
            Self::Declined => Some(PullRequestState::Declined),
            Self::All => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RoleArg {
    Author,
    Reviewer,
    Participant,
}

impl From<RoleArg> for PullRequestRole {
    fn from(role: RoleArg) -> Self {
        match role {
            RoleArg::Author => PullRequestRole::Author,
            RoleArg::Reviewer => PullRequestRole::Reviewer,
            RoleArg::Participant => PullRequestRole::Participant,
        }
    }
}

#[derive(Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub target: RepoTarget,

    /// Filter by state
    #[arg(long, short = 's', value_enum, default_value = "all")]
    pub state: StateArg,

    /// List pull requests going out of the repository instead of into it
    #[arg(long)]
    pub outgoing: bool,

    /// Only pull requests touching this ref, e.g. refs/heads/main
    #[arg(long)]
    pub at: Option<String>,

    /// Oldest first
    #[arg(long)]
    pub oldest: bool,

    /// Participant username (repeatable)
    #[arg(long = "user")]
    pub users: Vec<String>,

    /// Role of the matching --user (repeatable)
    #[arg(long = "role", value_enum)]
    pub roles: Vec<RoleArg>,

    /// Approval state of the matching --user (repeatable)
    #[arg(long = "approved")]
    pub approved: Vec<bool>,

    #[command(flatten)]
    pub page: PageArgs,
}

impl ListArgs {
    fn query(&self) -> PullRequestQuery {
        let mut query = PullRequestQuery::new();
        query.state = self.state.state();
        query.incoming = !self.outgoing;
        query.branch_id = self.at.clone();
        query.newest_first = !self.oldest;

        if !self.users.is_empty() {
            query = query.users(self.users.iter().cloned());
        }
        if !self.roles.is_empty() {
            query = query.roles(self.roles.iter().copied().map(Into::into));
        }
        if !self.approved.is_empty() {
            query = query.approved(self.approved.iter().copied());
        }
        query
    }
}

#[derive(Args, Debug)]
pub struct PullRequestArgs {
    #[command(flatten)]
    pub target: RepoTarget,

    /// Pull request ID
    #[arg(long = "id", short = 'i')]
    pub id: u64,

    #[command(flatten)]
    pub page: PageArgs,
}

#[derive(Args, Debug)]
pub struct ChangesArgs {
    #[command(flatten)]
    pub pr: PullRequestArgs,

    /// Only changes made after this commit
    #[arg(long)]
    pub since: Option<String>,
}

impl PrCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            PrSubcommand::List(args) => self.list(args, global).await,
            PrSubcommand::Changes(args) => self.changes(args, global).await,
            PrSubcommand::Activities(args) => self.activities(args, global).await,
            PrSubcommand::Tasks(args) => self.tasks(args, global).await,
        }
    }

    async fn list(&self, args: &ListArgs, global: &GlobalOptions) -> Result<()> {
        let (project, slug) = args.target.resolve(global)?;
        let query = args.query();
        let factory = global.factory()?;
        let client = factory.project_client();

        let prs = match args.page.range()? {
            Some(range) => {
                client
                    .get_pull_requests(&project, &slug, &query, range)
                    .await?
                    .values
            }
            None => client.get_all_pull_requests(&project, &slug, &query).await?,
        };

        global.output().write_list(&prs)
    }

    async fn changes(&self, args: &ChangesArgs, global: &GlobalOptions) -> Result<()> {
        let (project, slug) = args.pr.target.resolve(global)?;
        let since = args.since.as_deref();
        let factory = global.factory()?;
        let client = factory.project_client();

        let changes = match args.pr.page.range()? {
            Some(range) => {
                client
                    .get_pull_request_changes(&project, &slug, args.pr.id, since, range)
                    .await?
                    .values
            }
            None => {
                client
                    .get_all_pull_request_changes(&project, &slug, args.pr.id, since)
                    .await?
            }
        };

        global.output().write_list(&changes)
    }

    async fn activities(&self, args: &PullRequestArgs, global: &GlobalOptions) -> Result<()> {
        let (project, slug) = args.target.resolve(global)?;
        let factory = global.factory()?;
        let client = factory.project_client();

        let activities = match args.page.range()? {
            Some(range) => {
                client
                    .get_pull_request_activities(&project, &slug, args.id, range)
                    .await?
                    .values
            }
            None => {
                client
                    .get_all_pull_request_activities(&project, &slug, args.id)
                    .await?
            }
        };

        global.output().write_list(&activities)
    }

    async fn tasks(&self, args: &PullRequestArgs, global: &GlobalOptions) -> Result<()> {
        let (project, slug) = args.target.resolve(global)?;
        let factory = global.factory()?;
        let client = factory.project_client();

        let tasks = match args.page.range()? {
            Some(range) => {
                client
                    .get_pull_request_tasks(&project, &slug, args.id, range)
                    .await?
                    .values
            }
            None => {
                client
                    .get_all_pull_request_tasks(&project, &slug, args.id)
                    .await?
            }
        };

        global.output().write_list(&tasks)
    }
}

impl TableRow for PullRequest {
    fn headers() -> Vec<&'static str> {
        vec!["ID", "TITLE", "STATE", "AUTHOR", "BRANCH", "APPROVALS", "UPDATED"]
    }

    fn row(&self, color: bool) -> Vec<String> {
        let id = if color {
            style(format!("#{}", self.id)).cyan().to_string()
        } else {
            format!("#{}", self.id)
        };

        vec![
            id,
            truncate(&self.title, 50),
            format_status(self.state.as_str(), color),
            self.author.user.display_name.clone(),
            format!("{} -> {}", self.from_ref.display_id, self.to_ref.display_id),
            format!("{}/{}", self.approvals(), self.reviewers.len()),
            format_time(self.updated_at()),
        ]
    }
}

impl TableRow for PullRequestChange {
    fn headers() -> Vec<&'static str> {
        vec!["TYPE", "PATH", "FROM"]
    }

    fn row(&self, color: bool) -> Vec<String> {
        let change_type = if color {
            match self.change_type.as_str() {
                "ADD" => style(&self.change_type).green().to_string(),
                "DELETE" => style(&self.change_type).red().to_string(),
                _ => style(&self.change_type).yellow().to_string(),
            }
        } else {
            self.change_type.clone()
        };

        vec![
            change_type,
            self.path.full.clone(),
            self.src_path
                .as_ref()
                .map(|p| p.full.clone())
                .unwrap_or_else(|| "-".to_string()),
        ]
    }
}

impl TableRow for PullRequestActivity {
    fn headers() -> Vec<&'static str> {
        vec!["ID", "WHEN", "USER", "ACTION", "COMMENT"]
    }

    fn row(&self, _color: bool) -> Vec<String> {
        let action = match &self.comment_action {
            Some(comment_action) => format!("{} ({})", self.action, comment_action),
            None => self.action.clone(),
        };

        vec![
            self.id.to_string(),
            format_time(self.created_at()),
            self.user.display_name.clone(),
            action,
            self.comment
                .as_ref()
                .map(|c| truncate(&c.text, 50))
                .unwrap_or_else(|| "-".to_string()),
        ]
    }
}

impl TableRow for Task {
    fn headers() -> Vec<&'static str> {
        vec!["ID", "STATE", "AUTHOR", "TEXT"]
    }

    fn row(&self, color: bool) -> Vec<String> {
        let state = if self.is_open() { "OPEN" } else { "RESOLVED" };

        vec![
            self.id.to_string(),
            format_status(state, color),
            self.author
                .as_ref()
                .map(|a| a.display_name.clone())
                .unwrap_or_else(|| "-".to_string()),
            truncate(self.text.as_deref().unwrap_or("-"), 60),
        ]
    }
}
