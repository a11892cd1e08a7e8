//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `check`: Report `env()` calls whose key is missing from the env file
//! - `fix`: Append missing keys to the env file
//! - `init`: Initialize envlens configuration file
//! - `serve`: Start MCP server for AI integration

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Check(cmd)) => cmd.common.verbose,
            Some(Command::Fix(cmd)) => cmd.common.verbose,
            Some(Command::Init) | Some(Command::Serve) | None => false,
        }
    }
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Project root directory
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Env file name relative to the project root (overrides config file)
    #[arg(long)]
    pub env_file: Option<String>,

    /// Example env file name relative to the project root (overrides config file)
    #[arg(long)]
    pub example_file: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct CheckCommand {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct FixCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Actually write to the env file (default is dry-run)
    #[arg(long)]
    pub apply: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check PHP sources for env keys missing from the env file
    Check(CheckCommand),
    /// Append missing keys to the env file, copying values from the example file
    Fix(FixCommand),
    /// Initialize a new .envlensrc.json configuration file
    Init,
    /// Start MCP server for AI coding agents
    Serve,
}
