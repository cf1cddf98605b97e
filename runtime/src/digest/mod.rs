//! Build the strategy digest: scan a report folder, extract every report,
//! and write the records as one JSON array.

pub mod summary;

use crate::config::DigestConfig;
use crate::report::{self, ExtractError, StrategyRecord};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::collections::HashSet;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that end a run. Per-file problems never surface here.
#[derive(Debug, Error)]
pub enum DigestError {
    #[error("input folder '{}' not found", .0.display())]
    MissingInputDir(PathBuf),

    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to serialize digest: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to parse digest {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl DigestError {
    fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// What happened to one report file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileStatus {
    /// A record was produced for the named symbol.
    Parsed { name: String },
    /// No stat markers; not a strategy report.
    Skipped,
    /// Extraction failed with the given message.
    Failed { error: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOutcome {
    pub filename: String,
    pub status: FileStatus,
}

/// Progress notifications emitted while a run is in flight.
#[derive(Debug)]
pub enum RunEvent<'a> {
    Scanning { input_dir: &'a Path, files: usize },
    File(&'a FileOutcome),
}

/// Records and per-file outcomes, both in processing order.
#[derive(Debug, Default)]
pub struct Digest {
    pub records: Vec<StrategyRecord>,
    pub outcomes: Vec<FileOutcome>,
}

impl Digest {
    pub fn failed(&self) -> impl Iterator<Item = &FileOutcome> {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, FileStatus::Failed { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.status == FileStatus::Skipped)
            .count()
    }
}

/// Result of a completed run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub input_dir: PathBuf,
    pub output_path: PathBuf,
    pub scanned: usize,
    pub written: usize,
    pub skipped: usize,
    pub failures: Vec<FailedFile>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FailedFile {
    pub filename: String,
    pub error: String,
}

/// Extract every page into a digest.
///
/// `pages` yields `(filename, contents)` pairs; a read error counts as a
/// failure for that file only.
pub fn build_digest<I, F>(pages: I, mut on_outcome: F) -> Digest
where
    I: IntoIterator<Item = (String, io::Result<String>)>,
    F: FnMut(&FileOutcome),
{
    let mut digest = Digest::default();
    let mut seen_ids = HashSet::new();

    for (filename, contents) in pages {
        let extracted = contents
            .map_err(ExtractError::from)
            .and_then(|html| report::extract(&html, &filename));

        let status = match extracted {
            Ok(Some(record)) => {
                info!(
                    file = %filename,
                    name = %record.name,
                    category = %record.category,
                    "parsed report"
                );
                if !seen_ids.insert(record.id.clone()) {
                    warn!(file = %filename, id = %record.id, "duplicate strategy id");
                }
                let name = record.name.clone();
                digest.records.push(record);
                FileStatus::Parsed { name }
            }
            Ok(None) => {
                debug!(file = %filename, "no stat markers, skipping");
                FileStatus::Skipped
            }
            Err(e) => {
                warn!(file = %filename, error = %e, "failed to extract report");
                FileStatus::Failed {
                    error: e.to_string(),
                }
            }
        };

        let outcome = FileOutcome { filename, status };
        on_outcome(&outcome);
        digest.outcomes.push(outcome);
    }

    digest
}

/// Serialize records as a JSON array with four-space indentation.
pub fn render_json(records: &[StrategyRecord]) -> Result<Vec<u8>, serde_json::Error> {
    let mut buf = Vec::new();
    let mut ser =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    records.serialize(&mut ser)?;
    Ok(buf)
}

/// Replace `path` with the rendered digest.
///
/// Writes a uniquely named temp file next to `path` and renames it into
/// place, so readers never observe a half-written digest. The temp file is
/// removed if the rename fails.
pub fn write_digest(records: &[StrategyRecord], path: &Path) -> Result<(), DigestError> {
    let json = render_json(records)?;

    let parent = match path.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(parent) => {
            fs::create_dir_all(parent).map_err(|e| DigestError::io(parent, e))?;
            parent
        }
        None => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(parent).map_err(|e| DigestError::io(parent, e))?;
    // Temp files are created owner-only; the digest is served to readers.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tmp.as_file()
            .set_permissions(fs::Permissions::from_mode(0o644))
            .map_err(|e| DigestError::io(tmp.path(), e))?;
    }
    tmp.write_all(&json)
        .map_err(|e| DigestError::io(tmp.path(), e))?;
    tmp.persist(path)
        .map_err(|e| DigestError::io(path, e.error))?;
    Ok(())
}

/// Read a previously written digest.
pub fn load_digest(path: &Path) -> Result<Vec<StrategyRecord>, DigestError> {
    let raw = fs::read_to_string(path).map_err(|e| DigestError::io(path, e))?;
    serde_json::from_str(&raw).map_err(|source| DigestError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// List report filenames (`*.html`) in `dir`, sorted.
pub fn list_reports(dir: &Path) -> Result<Vec<String>, DigestError> {
    let entries = fs::read_dir(dir).map_err(|e| DigestError::io(dir, e))?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| DigestError::io(dir, e))?;
        match entry.file_name().into_string() {
            Ok(name) if name.ends_with(".html") => names.push(name),
            Ok(_) => {}
            Err(raw) => warn!(name = ?raw, "skipping non UTF-8 filename"),
        }
    }
    names.sort();
    Ok(names)
}

/// Run a full extraction from `config.input_dir` into `config.output_path`.
///
/// A missing input folder aborts before anything is written. Once scanning
/// starts the run always reaches the final write, whatever happens to the
/// individual files.
pub fn run<F>(config: &DigestConfig, mut on_event: F) -> Result<RunSummary, DigestError>
where
    F: FnMut(RunEvent<'_>),
{
    let input_dir = config.input_dir.as_path();
    if !input_dir.exists() {
        return Err(DigestError::MissingInputDir(input_dir.to_path_buf()));
    }

    let files = list_reports(input_dir)?;
    info!(dir = %input_dir.display(), files = files.len(), "scanning reports");
    on_event(RunEvent::Scanning {
        input_dir,
        files: files.len(),
    });

    let scanned = files.len();
    let pages = files.into_iter().map(|name| {
        let contents = fs::read_to_string(input_dir.join(&name));
        (name, contents)
    });
    let digest = build_digest(pages, |outcome| on_event(RunEvent::File(outcome)));

    write_digest(&digest.records, &config.output_path)?;
    info!(
        path = %config.output_path.display(),
        records = digest.records.len(),
        "digest written"
    );

    Ok(RunSummary {
        input_dir: config.input_dir.clone(),
        output_path: config.output_path.clone(),
        scanned,
        written: digest.records.len(),
        skipped: digest.skipped(),
        failures: digest
            .outcomes
            .iter()
            .filter_map(|o| match &o.status {
                FileStatus::Failed { error } => Some(FailedFile {
                    filename: o.filename.clone(),
                    error: error.clone(),
                }),
                _ => None,
            })
            .collect(),
    })
}
