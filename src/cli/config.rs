//! Configuration-related CLI commands.

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::data::to_yaml;
use crate::wip::{Configuration, CONFIG_PATH};

/// Configuration operations.
#[derive(Parser)]
pub struct ConfigCommand {
    /// Configuration subcommand to execute.
    #[command(subcommand)]
    pub command: ConfigSubcommands,
}

/// Configuration subcommands.
#[derive(Subcommand)]
pub enum ConfigSubcommands {
    /// Shows the built-in default configuration.
    Default(DefaultCommand),
    /// Shows where the repository configuration file is read from.
    Path(PathCommand),
}

/// Default command options.
#[derive(Parser)]
pub struct DefaultCommand {}

/// Path command options.
#[derive(Parser)]
pub struct PathCommand {}

impl ConfigCommand {
    /// Executes the config command.
    pub fn execute(self) -> Result<()> {
        match self.command {
            ConfigSubcommands::Default(default_cmd) => default_cmd.execute(),
            ConfigSubcommands::Path(path_cmd) => path_cmd.execute(),
        }
    }
}

impl DefaultCommand {
    /// Prints the default configuration as YAML.
    pub fn execute(self) -> Result<()> {
        print!("{}", to_yaml(&Configuration::default())?);
        Ok(())
    }
}

impl PathCommand {
    /// Prints the repository-relative configuration path.
    pub fn execute(self) -> Result<()> {
        println!("{CONFIG_PATH}");
        Ok(())
    }
}
