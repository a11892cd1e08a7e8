//! Command-line interface layer.

mod args;
mod commands;
mod exit_status;
mod report;

use anyhow::{Result, bail};

pub use args::{Arguments, CheckCommand, Command, CommonArgs, FixCommand};
pub use exit_status::ExitStatus;

use commands::{check::check, fix::fix, init::init};

pub fn run_cli(args: Arguments) -> Result<ExitStatus> {
    let Some(args) = args.with_command_or_help() else {
        return Ok(ExitStatus::Success);
    };

    match args.command {
        Some(Command::Check(cmd)) => check(cmd),
        Some(Command::Fix(cmd)) => fix(cmd),
        Some(Command::Init) => init(),
        Some(Command::Serve) => bail!("Serve command should be handled before run_cli()"),
        None => bail!("No command provided. Use --help to see available commands."),
    }
}
