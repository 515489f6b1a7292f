//
//  bitbucket-rest-client
//  cli/server.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use anyhow::Result;
use clap::{Args, Subcommand};

use super::GlobalOptions;
use crate::output::{print_field, print_header};

/// Show information about the server
#[derive(Args, Debug)]
pub struct ServerCommand {
    #[command(subcommand)]
    pub command: ServerSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ServerSubcommand {
    /// Show version and build information
    Info,
}

impl ServerCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            ServerSubcommand::Info => self.info(global).await,
        }
    }

    async fn info(&self, global: &GlobalOptions) -> Result<()> {
        let factory = global.factory()?;
        let properties = factory.project_client().get_application_properties().await?;

        let output = global.output();
        if global.json {
            return output.write_json(&properties);
        }

        let color = console::colors_enabled();
        let title = properties
            .get("displayName")
            .map(String::as_str)
            .unwrap_or("Bitbucket Server");
        print_header(title, color);
        for (key, value) in &properties {
            print_field(key, value, color);
        }
        Ok(())
    }
}
