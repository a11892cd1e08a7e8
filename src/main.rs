use std::process::ExitCode;

use clap::Parser;
use envlens::cli::{Arguments, Command, ExitStatus};
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "ENVLENS_LOG";

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let args = Arguments::parse();
    init_tracing(args.verbose());

    if matches!(args.command, Some(Command::Serve)) {
        if let Err(err) = envlens::mcp::run_server() {
            eprintln!("Error: {}", err);
            return ExitStatus::Error.into();
        }
        return ExitStatus::Success.into();
    }

    match envlens::cli::run_cli(args) {
        Ok(status) => status.into(),
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitStatus::Error.into()
        }
    }
}
