//
//  bitbucket-rest-client
//  cli/build.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Build status commands
//!
//! Build results are attached to commits by CI servers. These commands read
//! them back, either as counts per commit or as the individual builds.

use anyhow::Result;
use clap::{Args, Subcommand};
use serde::Serialize;

use super::{GlobalOptions, PageArgs};
use crate::api::server::{BuildStatsSummary, BuildStatus};
use crate::output::{
    format_status, format_time, print_field, print_header, truncate, TableOutput, TableRow,
};

/// Inspect build results of commits
#[derive(Args, Debug)]
pub struct BuildCommand {
    #[command(subcommand)]
    pub command: BuildSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum BuildSubcommand {
    /// Build counts for several commits in one request
    Summary(SummaryArgs),

    /// Build counts for one commit
    Stats(CommitArgs),

    /// List the builds reported for a commit
    #[command(visible_alias = "ls")]
    List(ListArgs),
}

#[derive(Args, Debug)]
pub struct SummaryArgs {
    /// Commit hashes
    #[arg(required = true)]
    pub commits: Vec<String>,
}

#[derive(Args, Debug)]
pub struct CommitArgs {
    /// Commit hash
    pub commit: String,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Commit hash
    pub commit: String,

    #[command(flatten)]
    pub page: PageArgs,
}

/// Build counts of one commit, as shown by `build summary`.
#[derive(Debug, Serialize)]
struct CommitSummary {
    commit: String,
    #[serde(flatten)]
    stats: BuildStatsSummary,
}

impl BuildCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            BuildSubcommand::Summary(args) => self.summary(args, global).await,
            BuildSubcommand::Stats(args) => self.stats(args, global).await,
            BuildSubcommand::List(args) => self.list(args, global).await,
        }
    }

    async fn summary(&self, args: &SummaryArgs, global: &GlobalOptions) -> Result<()> {
        let factory = global.factory()?;
        let summaries = factory
            .build_status_client()
            .get_build_summaries(&args.commits)
            .await?;

        let output = global.output();
        if global.json {
            return output.write_json(&summaries);
        }

        let rows: Vec<CommitSummary> = summaries
            .into_iter()
            .map(|(commit, stats)| CommitSummary { commit, stats })
            .collect();
        output.write_list(&rows)
    }

    async fn stats(&self, args: &CommitArgs, global: &GlobalOptions) -> Result<()> {
        let factory = global.factory()?;
        let stats = factory
            .build_status_client()
            .get_build_stats(&args.commit)
            .await?;

        let summary = CommitSummary {
            commit: args.commit.clone(),
            stats,
        };
        global.output().write(&summary)
    }

    async fn list(&self, args: &ListArgs, global: &GlobalOptions) -> Result<()> {
        let factory = global.factory()?;
        let client = factory.build_status_client();

        let statuses = match args.page.range()? {
            Some(range) => client.get_build_statuses(&args.commit, range).await?.values,
            None => client.get_all_build_statuses(&args.commit).await?,
        };

        global.output().write_list(&statuses)
    }
}

fn count(value: Option<u64>) -> String {
    value.map_or_else(|| "-".to_string(), |n| n.to_string())
}

impl TableRow for CommitSummary {
    fn headers() -> Vec<&'static str> {
        vec!["COMMIT", "SUCCESSFUL", "IN PROGRESS", "FAILED"]
    }

    fn row(&self, _color: bool) -> Vec<String> {
        vec![
            self.commit.clone(),
            count(self.stats.successful),
            count(self.stats.in_progress),
            count(self.stats.failed),
        ]
    }
}

impl TableOutput for CommitSummary {
    fn print_table(&self, color: bool) {
        print_header(&self.commit, color);
        if self.stats.is_unset() {
            println!("  No builds reported");
            return;
        }
        print_field("Successful", &count(self.stats.successful), color);
        print_field("In progress", &count(self.stats.in_progress), color);
        print_field("Failed", &count(self.stats.failed), color);
    }
}

impl TableRow for BuildStatus {
    fn headers() -> Vec<&'static str> {
        vec!["STATE", "KEY", "NAME", "ADDED", "URL"]
    }

    fn row(&self, color: bool) -> Vec<String> {
        vec![
            format_status(&self.state.to_string(), color),
            self.key.clone(),
            truncate(self.name.as_deref().unwrap_or("-"), 40),
            format_time(self.added_at()),
            self.url.clone(),
        ]
    }
}
