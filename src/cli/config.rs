//
//  bitbucket-rest-client
//  cli/config.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! CLI configuration commands
//!
//! Reads and edits the TOML configuration file. Secrets are not stored here;
//! use `BBREST_TOKEN` or `BBREST_PASSWORD` instead.

use anyhow::Result;
use clap::{Args, Subcommand};
use console::style;

use crate::config::{Config, VALID_KEYS};

use super::GlobalOptions;

/// Manage CLI configuration
#[derive(Args, Debug)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigSubcommand {
    /// Get a configuration value
    Get(KeyArgs),

    /// Set a configuration value
    Set(SetArgs),

    /// Unset a configuration value
    Unset(KeyArgs),

    /// List all configuration values
    #[command(visible_alias = "ls")]
    List,

    /// Show configuration file path
    Path,
}

#[derive(Args, Debug)]
pub struct KeyArgs {
    /// Configuration key
    pub key: String,
}

#[derive(Args, Debug)]
pub struct SetArgs {
    /// Configuration key
    pub key: String,

    /// Configuration value
    pub value: String,
}

impl ConfigCommand {
    pub fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            ConfigSubcommand::Get(args) => self.get(args, global),
            ConfigSubcommand::Set(args) => self.set(args, global),
            ConfigSubcommand::Unset(args) => self.unset(args, global),
            ConfigSubcommand::List => self.list(global),
            ConfigSubcommand::Path => self.path(global),
        }
    }

    fn get(&self, args: &KeyArgs, global: &GlobalOptions) -> Result<()> {
        let value = global.load_config()?.get(&args.key)?;

        if global.json {
            return global.output().write_json(&serde_json::json!({
                "key": args.key,
                "value": value,
            }));
        }

        match value {
            Some(value) => println!("{}", value),
            None => println!("{} is not set", args.key),
        }
        Ok(())
    }

    fn set(&self, args: &SetArgs, global: &GlobalOptions) -> Result<()> {
        let path = global.config_path()?;
        let mut config = Config::load_from(&path)?;
        config.set(&args.key, &args.value)?;
        config.save_to(&path)?;

        global
            .output()
            .write_success(&format!("Set {} in {}", args.key, path.display()));
        Ok(())
    }

    fn unset(&self, args: &KeyArgs, global: &GlobalOptions) -> Result<()> {
        let path = global.config_path()?;
        let mut config = Config::load_from(&path)?;
        config.unset(&args.key)?;
        config.save_to(&path)?;

        global
            .output()
            .write_success(&format!("Unset {}", args.key));
        Ok(())
    }

    fn list(&self, global: &GlobalOptions) -> Result<()> {
        let config = global.load_config()?;

        if global.json {
            return global.output().write_json(&config);
        }

        let color = console::colors_enabled();
        for key in VALID_KEYS {
            let value = config.get(key)?.unwrap_or_else(|| "-".to_string());
            if color {
                println!("{} = {}", style(key).cyan(), value);
            } else {
                println!("{} = {}", key, value);
            }
        }
        Ok(())
    }

    fn path(&self, global: &GlobalOptions) -> Result<()> {
        println!("{}", global.config_path()?.display());
        Ok(())
    }
}
