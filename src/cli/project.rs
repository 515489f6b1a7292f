//
//  bitbucket-rest-client
//  cli/project.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Project commands
//!
//! Projects are the primary organizational unit of Bitbucket Server: every
//! repository lives in exactly one project.

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use console::style;

use crate::api::common::ApiError;
use crate::api::server::{Project, ProjectType, Repository};
use crate::output::{format_bool, print_field, print_header, truncate, TableOutput, TableRow};

use super::{GlobalOptions, PageArgs};

/// Manage projects
#[derive(Args, Debug)]
pub struct ProjectCommand {
    #[command(subcommand)]
    pub command: ProjectSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ProjectSubcommand {
    /// List projects
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// View project details
    View(ViewArgs),

    /// Create a project
    Create(CreateArgs),

    /// Delete a project
    Delete(DeleteArgs),

    /// List repositories in project
    Repos(ReposArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub page: PageArgs,
}

#[derive(Args, Debug)]
pub struct ViewArgs {
    /// Project key (defaults to default_project from the config file)
    pub project: Option<String>,
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Project key (uppercase)
    #[arg(long, short = 'k')]
    pub key: String,

    /// Project name
    #[arg(long, short = 'n')]
    pub name: String,

    /// Project description
    #[arg(long, short = 'd')]
    pub description: Option<String>,

    /// Create a personal project
    #[arg(long)]
    pub personal: bool,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Project key
    pub project: String,

    /// Skip confirmation
    #[arg(long)]
    pub confirm: bool,
}

#[derive(Args, Debug)]
pub struct ReposArgs {
    /// Project key (defaults to default_project from the config file)
    pub project: Option<String>,

    #[command(flatten)]
    pub page: PageArgs,
}

impl ProjectCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            ProjectSubcommand::List(args) => self.list(args, global).await,
            ProjectSubcommand::View(args) => self.view(args, global).await,
            ProjectSubcommand::Create(args) => self.create(args, global).await,
            ProjectSubcommand::Delete(args) => self.delete(args, global).await,
            ProjectSubcommand::Repos(args) => self.repos(args, global).await,
        }
    }

    async fn list(&self, args: &ListArgs, global: &GlobalOptions) -> Result<()> {
        let factory = global.factory()?;
        let client = factory.project_client();

        let projects = match args.page.range()? {
            Some(range) => client.get_projects(range).await?.values,
            None => client.get_all_projects().await?,
        };

        global.output().write_list(&projects)
    }

    async fn view(&self, args: &ViewArgs, global: &GlobalOptions) -> Result<()> {
        let key = global.project_or_default(args.project.as_deref())?;
        let factory = global.factory()?;

        let project = factory
            .project_client()
            .get_project(&key)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("project {}", key)))?;

        global.output().write(&project)
    }

    async fn create(&self, args: &CreateArgs, global: &GlobalOptions) -> Result<()> {
        let project_type = if args.personal {
            ProjectType::Personal
        } else {
            ProjectType::Normal
        };

        let factory = global.factory()?;
        let project = factory
            .project_client()
            .create_project(
                &args.key,
                &args.name,
                project_type,
                args.description.as_deref(),
            )
            .await?;

        let output = global.output();
        output.write_success(&format!("Created project {}", project.key));
        output.write(&project)
    }

    async fn delete(&self, args: &DeleteArgs, global: &GlobalOptions) -> Result<()> {
        if !args.confirm {
            bail!(
                "Deleting project {} cannot be undone. Re-run with --confirm to proceed",
                args.project
            );
        }

        let factory = global.factory()?;
        factory.project_client().delete_project(&args.project).await?;

        global
            .output()
            .write_success(&format!("Deleted project {}", args.project));
        Ok(())
    }

    async fn repos(&self, args: &ReposArgs, global: &GlobalOptions) -> Result<()> {
        let key = global.project_or_default(args.project.as_deref())?;
        let factory = global.factory()?;
        let client = factory.project_client();

        let repos = match args.page.range()? {
            Some(range) => client.get_project_repositories(&key, range).await?.values,
            None => client.get_all_project_repositories(&key).await?,
        };

        global.output().write_list(&repos)
    }
}

impl TableRow for Project {
    fn headers() -> Vec<&'static str> {
        vec!["KEY", "NAME", "TYPE", "PUBLIC", "DESCRIPTION"]
    }

    fn row(&self, color: bool) -> Vec<String> {
        let key = if color {
            style(&self.key).cyan().bold().to_string()
        } else {
            self.key.clone()
        };

        vec![
            key,
            self.name.clone(),
            self.project_type.to_string(),
            format_bool(self.is_public),
            truncate(self.description.as_deref().unwrap_or("-"), 40),
        ]
    }
}

impl TableOutput for Project {
    fn print_table(&self, color: bool) {
        print_header(&format!("{} ({})", self.name, self.key), color);
        print_field("ID", &self.id.to_string(), color);
        print_field("Type", self.project_type.as_str(), color);
        print_field("Public", &format_bool(self.is_public), color);
        if let Some(description) = &self.description {
            print_field("Description", description, color);
        }
        if let Some(url) = self.links.web_url() {
            print_field("URL", url, color);
        }
    }
}

impl TableRow for Repository {
    fn headers() -> Vec<&'static str> {
        vec!["PROJECT", "SLUG", "NAME", "STATE", "PUBLIC", "FORKABLE"]
    }

    fn row(&self, color: bool) -> Vec<String> {
        let slug = if color {
            style(&self.slug).bold().to_string()
        } else {
            self.slug.clone()
        };

        vec![
            self.project.key.clone(),
            slug,
            self.name.clone(),
            self.state.clone(),
            format_bool(self.is_public),
            format_bool(self.forkable),
        ]
    }
}
