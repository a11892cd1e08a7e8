//! Fix command - Append undefined keys to the env file.
//!
//! Each key reported by `check` is appended once, using the value from the
//! example file when it defines the key and an empty value otherwise.
//!
//! Use `--apply` to actually write the env file (default is dry-run mode).

use std::{
    collections::{BTreeMap, HashSet},
    fs::{self, OpenOptions},
    io::Write,
};

use anyhow::{Context, Result};
use colored::Colorize;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use super::super::{
    args::FixCommand,
    exit_status::ExitStatus,
    report::{self, SUCCESS_MARK},
};
use super::context::{CheckContext, Finding, Findings};
use crate::{
    php::SourceFile,
    provider::{CodeAction, QuickFix},
};

pub fn fix(cmd: FixCommand) -> Result<ExitStatus> {
    let ctx = CheckContext::new(&cmd.common)?;
    let Findings {
        findings,
        parse_error_count,
    } = ctx.collect_findings();

    if findings.is_empty() {
        report::print_success(ctx.files.len());
        report::print_parse_warning(parse_error_count, cmd.common.verbose);
        return Ok(ExitStatus::Success);
    }

    let actions = plan(&ctx, &findings);
    let env_file = &ctx.config.env_file;

    if cmd.apply {
        append(&ctx, &actions)?;
        println!(
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Appended {} key(s) to {}", actions.len(), env_file).green()
        );
    } else {
        preview(&ctx, &actions);
        println!("Run with {} to write these keys.", "--apply".cyan());
    }
    report::print_parse_warning(parse_error_count, cmd.common.verbose);

    Ok(ExitStatus::Success)
}

/// Pick the preferred quick fix for every undefined key, once per key.
fn plan(ctx: &CheckContext, findings: &[Finding]) -> Vec<CodeAction> {
    let cancel = CancellationToken::new();

    let mut by_file: BTreeMap<&str, Vec<&Finding>> = BTreeMap::new();
    for finding in findings {
        by_file.entry(finding.file_path.as_str()).or_default().push(finding);
    }

    let mut seen = HashSet::new();
    let mut planned = Vec::new();
    for (file_path, findings) in by_file {
        let file = match SourceFile::read(&ctx.root.join(file_path)) {
            Ok(file) => file,
            Err(e) => {
                warn!(error = %e, "skipping source file");
                continue;
            }
        };

        for finding in findings {
            let key = &finding.diagnostic.key;
            if seen.contains(key) {
                continue;
            }
            let preferred = ctx
                .provider
                .code_actions(&file, finding.diagnostic.range, &cancel)
                .unwrap_or_default()
                .into_iter()
                .filter(|action| &action.key == key)
                .min_by_key(|action| action.fix);
            if let Some(action) = preferred {
                seen.insert(key.clone());
                planned.push(action);
            }
        }
    }
    planned
}

fn preview(ctx: &CheckContext, actions: &[CodeAction]) {
    let Some(first) = actions.first() else {
        return;
    };
    println!(
        "{} {} key(s) to {} at line {}:",
        "Would append".yellow().bold(),
        actions.len(),
        ctx.config.env_file,
        first.line + 1
    );
    for action in actions {
        match action.fix {
            QuickFix::CopyFromExample => println!(
                "  {} {} {}",
                "+".green(),
                action.text,
                format!("(from {})", ctx.config.example_file).dimmed()
            ),
            QuickFix::AddEmpty => println!("  {} {}", "+".green(), action.text),
        }
    }
}

fn append(ctx: &CheckContext, actions: &[CodeAction]) -> Result<()> {
    let path = ctx.provider.env_path();
    let existing = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let mut text = String::new();
    if !existing.is_empty() && !existing.ends_with('\n') {
        text.push('\n');
    }
    for action in actions {
        text.push_str(&action.edit_text());
    }

    let mut file = OpenOptions::new()
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;
    file.write_all(text.as_bytes())
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
