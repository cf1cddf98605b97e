//! `strategy-digest build` — scan the report folder and write the digest.

use crate::cli::output::{self, Styled};
use crate::config::DigestConfig;
use crate::digest::{self, DigestError, FileStatus, RunEvent, RunSummary};
use anyhow::{Context, Result};
use std::path::Path;

/// Run the build command.
///
/// A missing input folder is reported and still returns `Ok(())`; per-file
/// failures never change the result.
pub fn run(config: &DigestConfig) -> Result<()> {
    let s = Styled::new();
    let human = !output::is_quiet() && !output::is_json();
    let verbose = output::is_verbose();

    let result = digest::run(config, |event| {
        if !human {
            return;
        }
        if let Some(line) = event_line(&s, &event, verbose) {
            eprintln!("{line}");
        }
    });

    let summary = match result {
        Ok(summary) => summary,
        Err(DigestError::MissingInputDir(dir)) => {
            if output::is_json() {
                output::print_json(&missing_dir_json(&dir));
            } else if !output::is_quiet() {
                eprintln!("{}", missing_dir_line(&s, &dir));
            }
            return Ok(());
        }
        Err(e) => return Err(e).context("building strategy digest"),
    };

    if output::is_json() {
        output::print_json(&serde_json::to_value(&summary)?);
    } else if human {
        eprintln!();
        for line in completion_lines(&s, &summary) {
            eprintln!("{line}");
        }
    }

    Ok(())
}

/// Console line for a progress event. Skipped files only show when verbose.
fn event_line(s: &Styled, event: &RunEvent<'_>, verbose: bool) -> Option<String> {
    match event {
        RunEvent::Scanning { input_dir, files } => Some(format!(
            "  Scanning '{}'... Found {files} files.",
            input_dir.display()
        )),
        RunEvent::File(outcome) => match &outcome.status {
            FileStatus::Parsed { name } => Some(format!("  {} Parsed: {name}", s.ok_sym())),
            FileStatus::Failed { error } => Some(format!(
                "  {} Error: {} {}",
                s.fail_sym(),
                error,
                s.dim(&format!("({})", outcome.filename))
            )),
            FileStatus::Skipped if verbose => Some(format!(
                "  {}",
                s.dim(&format!("Skipped {} (no stats)", outcome.filename))
            )),
            FileStatus::Skipped => None,
        },
    }
}

fn completion_lines(s: &Styled, summary: &RunSummary) -> Vec<String> {
    let mut lines = vec![format!(
        "  {} Digest updated: {} strategies written to {}",
        s.ok_sym(),
        summary.written,
        summary.output_path.display()
    )];
    if !summary.failures.is_empty() {
        lines.push(format!(
            "  {} {} file(s) failed to parse.",
            s.warn_sym(),
            summary.failures.len()
        ));
    }
    lines
}

fn missing_dir_line(s: &Styled, dir: &Path) -> String {
    format!(
        "  {} Error: Folder '{}' not found.",
        s.fail_sym(),
        dir.display()
    )
}

fn missing_dir_json(dir: &Path) -> serde_json::Value {
    serde_json::json!({
        "error": "input_not_found",
        "message": format!("Folder '{}' not found", dir.display()),
    })
}
