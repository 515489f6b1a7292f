//
//  bitbucket-rest-client
//  cli/completion.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Shell completion commands

use std::io::Write;

use anyhow::Result;
use clap::{Args, CommandFactory};
use clap_complete::{generate, Shell};

use super::Cli;

/// Generate shell completion scripts
#[derive(Args, Debug)]
pub struct CompletionCommand {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

impl CompletionCommand {
    pub fn run(&self) -> Result<()> {
        let mut stdout = std::io::stdout();
        self.write_to(&mut stdout);
        stdout.flush()?;
        Ok(())
    }

    fn write_to(&self, out: &mut dyn Write) {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(self.shell, &mut cmd, name, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bash_script_names_the_binary() {
        let mut buf = Vec::new();
        CompletionCommand { shell: Shell::Bash }.write_to(&mut buf);

        let script = String::from_utf8(buf).unwrap();
        assert!(script.contains("bbrest"));
        assert!(script.contains("ssh-key"));
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }
}
