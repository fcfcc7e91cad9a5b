//! Splitting `.log.txt` files into an errors sink and a warnings sink.
//!
//! Lines are handled as raw bytes, one at a time, and written out exactly as
//! read (terminator included), so memory stays proportional to the longest
//! line and non-UTF-8 content passes through untouched.

use crate::catalog;
use crate::error::{HousekeepError, Result};
use crate::output::{Event, Reporter};
use crate::provision;
use memchr::memmem;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Suffix a file must carry to be scanned.
pub const LOG_SUFFIX: &str = ".log.txt";
pub const ERRORS_SINK: &str = "errors.log";
pub const WARNINGS_SINK: &str = "warnings.log";

const ERROR_MARKER: &[u8] = b"ERROR";
const WARNING_MARKER: &[u8] = b"WARNING";

/// Where a single line goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClass {
    Error,
    Warning,
    Ignored,
}

/// Routes one line. `ERROR` is checked before `WARNING`, so a line carrying
/// both is an error.
pub fn classify_line(line: &[u8]) -> LineClass {
    if contains(line, ERROR_MARKER) {
        LineClass::Error
    } else if contains(line, WARNING_MARKER) {
        LineClass::Warning
    } else {
        LineClass::Ignored
    }
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    memmem::find(haystack, needle).is_some()
}

/// Outcome of a [`classify`] run.
#[derive(Debug, Default)]
pub struct ClassifyReport {
    pub errors_path: PathBuf,
    pub warnings_path: PathBuf,
    /// Log files that were read to the end.
    pub files_scanned: Vec<PathBuf>,
    pub error_lines: usize,
    pub warning_lines: usize,
    /// Log files that could not be read; their lines written before the
    /// failure stay in the sinks.
    pub failures: Vec<(PathBuf, HousekeepError)>,
}

struct Sinks {
    errors: BufWriter<File>,
    warnings: BufWriter<File>,
}

impl Sinks {
    fn create(errors_path: &Path, warnings_path: &Path) -> Result<Self> {
        let open = |path: &Path| {
            File::create(path)
                .map(BufWriter::new)
                .map_err(|e| HousekeepError::io(path, "create sink", e))
        };
        Ok(Self {
            errors: open(errors_path)?,
            warnings: open(warnings_path)?,
        })
    }
}

/// Per-file line counts.
#[derive(Debug, Default, Clone, Copy)]
struct Tally {
    errors: usize,
    warnings: usize,
}

enum ScanError {
    /// Reading the source failed; the run continues with the next file.
    Source(HousekeepError),
    /// Writing a sink failed; the run stops.
    Sink(HousekeepError),
}

/// Scans every `.log.txt` file in `logs_dir` and writes its `ERROR` and
/// `WARNING` lines into `target_dir/errors.log` and `target_dir/warnings.log`.
///
/// Both sinks are truncated once at the start, so lines from all source files
/// accumulate in them in scan order. Sinks are flushed before this returns.
///
/// # Errors
///
/// * `Creation` if `target_dir` cannot be provisioned
/// * `NotFound` if `logs_dir` does not exist (the sinks have already been
///   truncated at that point)
/// * `Io` if a sink cannot be created or written
///
/// A source file that cannot be read is recorded in the report and skipped.
pub fn classify(
    logs_dir: &Path,
    target_dir: &Path,
    reporter: &mut dyn Reporter,
) -> Result<ClassifyReport> {
    provision::ensure(target_dir, reporter)?;

    let mut report = ClassifyReport {
        errors_path: target_dir.join(ERRORS_SINK),
        warnings_path: target_dir.join(WARNINGS_SINK),
        ..Default::default()
    };
    let mut sinks = Sinks::create(&report.errors_path, &report.warnings_path)?;

    let candidates = catalog::search(logs_dir, &catalog::FilenamePattern::suffix(LOG_SUFFIX))?;
    for name in candidates {
        let path = logs_dir.join(&name);
        if !path.is_file() {
            tracing::debug!(path = %path.display(), "skipping non-file log entry");
            continue;
        }

        match scan_file(&path, &mut sinks, &report) {
            Ok(tally) => {
                report.error_lines += tally.errors;
                report.warning_lines += tally.warnings;
                reporter.report(Event::LogScanned {
                    path: path.clone(),
                    errors: tally.errors,
                    warnings: tally.warnings,
                });
                report.files_scanned.push(path);
            }
            Err(ScanError::Source(e)) => {
                tracing::warn!(path = %path.display(), error = %e, "could not read log file");
                reporter.report(Event::LogFailed {
                    path: path.clone(),
                    reason: e.to_string(),
                });
                report.failures.push((path, e));
            }
            Err(ScanError::Sink(e)) => return Err(e),
        }
    }

    sinks
        .errors
        .flush()
        .map_err(|e| HousekeepError::io(&report.errors_path, "flush sink", e))?;
    sinks
        .warnings
        .flush()
        .map_err(|e| HousekeepError::io(&report.warnings_path, "flush sink", e))?;

    tracing::info!(
        logs = %logs_dir.display(),
        target = %target_dir.display(),
        files = report.files_scanned.len(),
        errors = report.error_lines,
        warnings = report.warning_lines,
        "classified log files"
    );
    Ok(report)
}

fn scan_file(
    path: &Path,
    sinks: &mut Sinks,
    report: &ClassifyReport,
) -> std::result::Result<Tally, ScanError> {
    let file = File::open(path)
        .map_err(|e| ScanError::Source(HousekeepError::io(path, "open log file", e)))?;
    let mut reader = BufReader::new(file);
    let mut line = Vec::new();
    let mut tally = Tally::default();

    loop {
        line.clear();
        let read = reader
            .read_until(b'\n', &mut line)
            .map_err(|e| ScanError::Source(HousekeepError::io(path, "read log file", e)))?;
        if read == 0 {
            break;
        }

        match classify_line(&line) {
            LineClass::Error => {
                sinks.errors.write_all(&line).map_err(|e| {
                    ScanError::Sink(HousekeepError::io(&report.errors_path, "write sink", e))
                })?;
                tally.errors += 1;
            }
            LineClass::Warning => {
                sinks.warnings.write_all(&line).map_err(|e| {
                    ScanError::Sink(HousekeepError::io(&report.warnings_path, "write sink", e))
                })?;
                tally.warnings += 1;
            }
            LineClass::Ignored => {}
        }
    }

    Ok(tally)
}
