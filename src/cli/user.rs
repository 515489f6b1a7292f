//
//  bitbucket-rest-client
//  cli/user.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use anyhow::Result;
use clap::{Args, Subcommand};
use console::style;

use super::{GlobalOptions, PageArgs};
use crate::api::server::User;
use crate::output::{format_bool, TableRow};

/// List users
#[derive(Args, Debug)]
pub struct UserCommand {
    #[command(subcommand)]
    pub command: UserSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum UserSubcommand {
    /// List users visible to the caller
    #[command(visible_alias = "ls")]
    List(ListArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub page: PageArgs,
}

impl UserCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            UserSubcommand::List(args) => self.list(args, global).await,
        }
    }

    async fn list(&self, args: &ListArgs, global: &GlobalOptions) -> Result<()> {
        let factory = global.factory()?;
        let client = factory.project_client();

        let users = match args.page.range()? {
            Some(range) => client.get_users(range).await?.values,
            None => client.get_all_users().await?,
        };

        global.output().write_list(&users)
    }
}

impl TableRow for User {
    fn headers() -> Vec<&'static str> {
        vec!["USERNAME", "NAME", "EMAIL", "ACTIVE"]
    }

    fn row(&self, color: bool) -> Vec<String> {
        let name = if color {
            style(&self.name).bold().to_string()
        } else {
            self.name.clone()
        };

        vec![
            name,
            self.display_name.clone(),
            self.email_address.clone().unwrap_or_else(|| "-".to_string()),
            format_bool(self.active),
        ]
    }
}
