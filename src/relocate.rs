/// Moving files and whole directory contents between directories.
///
/// Moves go through `fs::rename`. When source and destination sit on
/// different filesystems a regular file is copied and the original removed;
/// if the original cannot be removed the copy is deleted again so the file
/// exists in one place only. Directories are not copied across filesystems
/// and fail with `Relocation`. An existing destination entry is never
/// overwritten.
use crate::catalog;
use crate::error::{HousekeepError, Result};
use crate::output::{Event, Reporter};
use crate::provision;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Outcome of a multi-entry move.
///
/// Failures do not stop the batch: every entry is attempted and the ones that
/// could not be moved are collected here with their error.
#[derive(Debug, Default)]
pub struct RelocationReport {
    /// `(from, to)` for every entry that was moved.
    pub moved: Vec<(PathBuf, PathBuf)>,
    /// Entries that could not be moved.
    pub failures: Vec<(PathBuf, HousekeepError)>,
}

impl RelocationReport {
    /// Returns the total number of entries attempted.
    pub fn total_processed(&self) -> usize {
        self.moved.len() + self.failures.len()
    }

    /// Returns true if every attempted entry was moved.
    pub fn is_complete_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Moves `from` to `to`, reporting and recording the outcome.
    pub(crate) fn attempt(&mut self, from: PathBuf, to: PathBuf, reporter: &mut dyn Reporter) {
        match move_entry(&from, &to) {
            Ok(()) => {
                reporter.report(Event::Moved {
                    from: from.clone(),
                    to: to.clone(),
                });
                self.moved.push((from, to));
            }
            Err(e) => {
                tracing::warn!(from = %from.display(), error = %e, "move failed");
                reporter.report(Event::MoveFailed {
                    from: from.clone(),
                    reason: e.to_string(),
                });
                self.failures.push((from, e));
            }
        }
    }
}

/// Moves `source_dir/filename` to `dest_dir/filename`.
///
/// The destination directory must already exist; it is not created here.
///
/// # Errors
///
/// * `NotFound` if the source entry or the destination directory is missing
/// * `Relocation` if the move itself fails, including when the destination
///   name is already taken
///
/// # Examples
///
/// ```no_run
/// use housekeep::output::Silent;
/// use housekeep::relocate::move_one;
/// use std::path::Path;
///
/// let moved = move_one(
///     Path::new("/path/to/inbox"),
///     "invoice.pdf",
///     Path::new("/path/to/archive"),
///     &mut Silent,
/// );
///
/// match moved {
///     Ok(to) => println!("Moved to {}", to.display()),
///     Err(e) => eprintln!("Move failed: {}", e),
/// }
/// ```
pub fn move_one(
    source_dir: &Path,
    filename: &str,
    dest_dir: &Path,
    reporter: &mut dyn Reporter,
) -> Result<PathBuf> {
    let from = source_dir.join(filename);
    if fs::symlink_metadata(&from).is_err() {
        return Err(HousekeepError::not_found(&from));
    }
    if !dest_dir.is_dir() {
        return Err(HousekeepError::not_found(dest_dir));
    }

    let to = dest_dir.join(filename);
    move_entry(&from, &to)?;

    tracing::info!(from = %from.display(), to = %to.display(), "moved file");
    reporter.report(Event::Moved {
        from,
        to: to.clone(),
    });
    Ok(to)
}

/// Moves every entry directly inside `source_dir` into `dest_dir`.
///
/// `dest_dir` is provisioned first. If `source_dir` turns out to be missing
/// the freshly created `dest_dir` stays behind.
///
/// # Errors
///
/// `NotFound` if `source_dir` does not exist, `Creation` if `dest_dir` cannot
/// be provisioned. Per-entry failures land in the report instead.
pub fn move_all(
    source_dir: &Path,
    dest_dir: &Path,
    reporter: &mut dyn Reporter,
) -> Result<RelocationReport> {
    provision::ensure(dest_dir, reporter)?;
    let entries = catalog::list(source_dir)?;

    let mut report = RelocationReport::default();
    reporter.report(Event::BatchStarted {
        total: entries.len(),
    });
    for name in entries {
        let from = source_dir.join(&name);
        // Destination nested inside the source: leave it where it is.
        if from == dest_dir {
            continue;
        }
        report.attempt(from, dest_dir.join(&name), reporter);
    }
    reporter.report(Event::BatchFinished);

    tracing::info!(
        source = %source_dir.display(),
        destination = %dest_dir.display(),
        moved = report.moved.len(),
        failed = report.failures.len(),
        "moved directory contents"
    );
    Ok(report)
}

/// Moves a departed user's documents out of `base/user_folder` into
/// `base/temp_folder`.
pub fn retire_user(
    base: &Path,
    user_folder: &str,
    temp_folder: &str,
    reporter: &mut dyn Reporter,
) -> Result<RelocationReport> {
    move_all(&base.join(user_folder), &base.join(temp_folder), reporter)
}

/// The move primitive shared by every relocation.
pub(crate) fn move_entry(from: &Path, to: &Path) -> Result<()> {
    let relocation = |source: io::Error| HousekeepError::Relocation {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source,
    };

    if fs::symlink_metadata(to).is_ok() {
        return Err(relocation(io::Error::new(
            io::ErrorKind::AlreadyExists,
            "destination already exists",
        )));
    }

    match fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::CrossesDevices && from.is_file() => {
            tracing::debug!(from = %from.display(), "cross-device move, copying");
            copy_then_remove(from, to).map_err(relocation)
        }
        Err(e) => Err(relocation(e)),
    }
}

/// Copies `from` to `to` and removes `from`. If the removal fails the copy is
/// deleted again and the removal error returned.
fn copy_then_remove(from: &Path, to: &Path) -> io::Result<()> {
    fs::copy(from, to)?;
    if let Err(e) = fs::remove_file(from) {
        if let Err(cleanup) = fs::remove_file(to) {
            tracing::warn!(to = %to.display(), error = %cleanup, "could not remove copy");
        }
        return Err(e);
    }
    Ok(())
}
