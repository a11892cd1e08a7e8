use std::process::ExitCode;

/// Exit status for CLI commands.
///
/// - `Success` (0): nothing to report
/// - `Failure` (1): undefined keys were found
/// - `Error` (2): the command could not run (unreadable env file, bad config)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
