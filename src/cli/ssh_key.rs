//
//  bitbucket-rest-client
//  cli/ssh_key.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! SSH key commands
//!
//! User keys authenticate people; access keys grant a key read or write
//! access to a single project or repository.

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};
use console::style;

use super::{GlobalOptions, PageArgs, RepoTarget};
use crate::api::server::{AccessKey, SshKey};
use crate::output::{truncate, TableRow};

/// Manage SSH keys
#[derive(Args, Debug)]
pub struct SshKeyCommand {
    #[command(subcommand)]
    pub command: SshKeySubcommand,
}

#[derive(Subcommand, Debug)]
pub enum SshKeySubcommand {
    /// List SSH keys
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// Add an SSH key
    Add(AddArgs),

    /// Delete an SSH key
    Delete(DeleteArgs),

    /// List access keys of a project
    ProjectKeys(ProjectKeysArgs),

    /// List access keys of a repository
    RepoKeys(RepoKeysArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// List another user's keys (requires admin permission)
    #[arg(long)]
    pub user: Option<String>,

    #[command(flatten)]
    pub page: PageArgs,
}

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Public key file path or key content
    #[arg(long, short = 'k')]
    pub key: String,

    /// Key label
    #[arg(long, short = 't')]
    pub label: Option<String>,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Key ID
    pub id: u64,

    /// Skip confirmation
    #[arg(long, short = 'y')]
    pub confirm: bool,
}

#[derive(Args, Debug)]
pub struct ProjectKeysArgs {
    /// Project key (defaults to default_project from the config file)
    pub project: Option<String>,

    #[command(flatten)]
    pub page: PageArgs,
}

#[derive(Args, Debug)]
pub struct RepoKeysArgs {
    #[command(flatten)]
    pub target: RepoTarget,

    #[command(flatten)]
    pub page: PageArgs,
}

impl SshKeyCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            SshKeySubcommand::List(args) => self.list(args, global).await,
            SshKeySubcommand::Add(args) => self.add(args, global).await,
            SshKeySubcommand::Delete(args) => self.delete(args, global).await,
            SshKeySubcommand::ProjectKeys(args) => self.project_keys(args, global).await,
            SshKeySubcommand::RepoKeys(args) => self.repo_keys(args, global).await,
        }
    }

    async fn list(&self, args: &ListArgs, global: &GlobalOptions) -> Result<()> {
        let factory = global.factory()?;
        let client = factory.ssh_client();
        let user = args.user.as_deref();

        let keys = match args.page.range()? {
            Some(range) => client.get_user_keys(user, range).await?.values,
            None => client.get_all_user_keys(user).await?,
        };

        global.output().write_list(&keys)
    }

    async fn add(&self, args: &AddArgs, global: &GlobalOptions) -> Result<()> {
        let text = read_key(&args.key)?;
        let factory = global.factory()?;

        let key = factory
            .ssh_client()
            .add_user_key(&text, args.label.as_deref())
            .await?;

        let output = global.output();
        output.write_success(&format!("Added SSH key {}", key.id));
        if global.json {
            output.write_json(&key)?;
        }
        Ok(())
    }

    async fn delete(&self, args: &DeleteArgs, global: &GlobalOptions) -> Result<()> {
        if !args.confirm {
            bail!(
                "Deleting SSH key {} cannot be undone. Re-run with --confirm to proceed",
                args.id
            );
        }

        let factory = global.factory()?;
        factory.ssh_client().delete_user_key(args.id).await?;

        global
            .output()
            .write_success(&format!("Deleted SSH key {}", args.id));
        Ok(())
    }

    async fn project_keys(&self, args: &ProjectKeysArgs, global: &GlobalOptions) -> Result<()> {
        let project = global.project_or_default(args.project.as_deref())?;
        let factory = global.factory()?;
        let client = factory.ssh_client();

        let keys = match args.page.range()? {
            Some(range) => client.get_project_access_keys(&project, range).await?.values,
            None => client.get_all_project_access_keys(&project).await?,
        };

        global.output().write_list(&keys)
    }

    async fn repo_keys(&self, args: &RepoKeysArgs, global: &GlobalOptions) -> Result<()> {
        let (project, slug) = args.target.resolve(global)?;
        let factory = global.factory()?;
        let client = factory.ssh_client();

        let keys = match args.page.range()? {
            Some(range) => {
                client
                    .get_repository_access_keys(&project, &slug, range)
                    .await?
                    .values
            }
            None => client.get_all_repository_access_keys(&project, &slug).await?,
        };

        global.output().write_list(&keys)
    }
}

/// Reads the key from a file when `key` names one, otherwise uses it as is.
fn read_key(key: &str) -> Result<String> {
    let path = std::path::Path::new(key);
    let text = if path.is_file() {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read key file {}", path.display()))?
    } else {
        key.to_string()
    };

    let text = text.trim();
    if text.is_empty() {
        bail!("SSH key is empty");
    }
    Ok(text.to_string())
}

impl TableRow for SshKey {
    fn headers() -> Vec<&'static str> {
        vec!["ID", "LABEL", "KEY"]
    }

    fn row(&self, color: bool) -> Vec<String> {
        let id = if color {
            style(self.id).cyan().to_string()
        } else {
            self.id.to_string()
        };

        vec![
            id,
            self.label.clone().unwrap_or_else(|| "-".to_string()),
            truncate(&self.text, 40),
        ]
    }
}

impl TableRow for AccessKey {
    fn headers() -> Vec<&'static str> {
        vec!["ID", "LABEL", "PERMISSION", "RESOURCE"]
    }

    fn row(&self, _color: bool) -> Vec<String> {
        let resource = match (&self.repository, &self.project) {
            (Some(repo), _) => format!("{}/{}", repo.project.key, repo.slug),
            (None, Some(project)) => project.key.clone(),
            (None, None) => "-".to_string(),
        };

        vec![
            self.key.id.to_string(),
            self.key.label.clone().unwrap_or_else(|| "-".to_string()),
            self.permission.clone(),
            resource,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_key_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("id_ed25519.pub");
        std::fs::write(&path, "ssh-ed25519 AAAA jdoe@host\n").unwrap();

        let text = read_key(path.to_str().unwrap()).unwrap();
        assert_eq!(text, "ssh-ed25519 AAAA jdoe@host");
    }

    #[test]
    fn test_read_key_inline() {
        assert_eq!(read_key("ssh-rsa AAAA").unwrap(), "ssh-rsa AAAA");
        assert!(read_key("   ").is_err());
    }
}
