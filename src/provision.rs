//! Idempotent "make sure this directory exists".
use crate::error::{HousekeepError, Result};
use crate::output::{Event, Reporter};
use std::fs;
use std::path::Path;

/// What [`ensure`] found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provisioned {
    Created,
    AlreadyExists,
}

/// Creates `path` and any missing parents, or leaves an existing entry alone.
///
/// Calling this twice in a row never fails on the second call and changes
/// nothing after the first. Whatever already sits at `path` counts as
/// present, even a regular file; a later step that needs a directory there
/// fails on its own.
///
/// # Errors
///
/// `Creation` if the directory cannot be created.
pub fn ensure(path: &Path, reporter: &mut dyn Reporter) -> Result<Provisioned> {
    if path.exists() {
        if !path.is_dir() {
            tracing::warn!(path = %path.display(), "path exists but is not a directory");
        }
        tracing::debug!(path = %path.display(), "already present");
        reporter.report(Event::FolderExists(path.to_path_buf()));
        return Ok(Provisioned::AlreadyExists);
    }

    fs::create_dir_all(path).map_err(|e| HousekeepError::Creation {
        path: path.to_path_buf(),
        source: e,
    })?;

    tracing::info!(path = %path.display(), "created directory");
    reporter.report(Event::FolderCreated(path.to_path_buf()));
    Ok(Provisioned::Created)
}

/// Ensures a folder called `folder_name` exists inside `directory`.
pub fn create_folder(
    directory: &Path,
    folder_name: &str,
    reporter: &mut dyn Reporter,
) -> Result<Provisioned> {
    ensure(&directory.join(folder_name), reporter)
}
