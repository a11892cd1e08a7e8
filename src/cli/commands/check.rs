use anyhow::Result;

use super::super::{args::CheckCommand, exit_status::ExitStatus, report};
use super::context::{CheckContext, Findings};
use crate::provider::Severity;

pub fn check(cmd: CheckCommand) -> Result<ExitStatus> {
    let ctx = CheckContext::new(&cmd.common)?;
    let Findings {
        findings,
        parse_error_count,
    } = ctx.collect_findings();

    if findings.is_empty() {
        report::print_success(ctx.files.len());
    } else {
        report::report(&findings);
    }
    report::print_parse_warning(parse_error_count, cmd.common.verbose);

    let has_errors = findings
        .iter()
        .any(|f| f.diagnostic.severity == Severity::Error);
    Ok(if has_errors {
        ExitStatus::Failure
    } else {
        ExitStatus::Success
    })
}
