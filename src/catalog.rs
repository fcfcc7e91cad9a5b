//! Directory listing and filename matching.
//!
//! Listings are read fresh on every call and returned in whatever order the
//! operating system enumerates entries. Nothing is cached between calls.
//!
//! Names are kept as `OsString` so they can be joined back onto the directory
//! even when they are not valid UTF-8. Patterns see the lossy UTF-8 form.

use crate::error::{HousekeepError, Result};
use glob::Pattern;
use regex::Regex;
use std::ffi::{OsStr, OsString};
use std::fs;
use std::path::Path;

/// Names of the entries directly inside one directory.
pub type DirectoryListing = Vec<OsString>;

/// Printable form of each name, with invalid UTF-8 replaced by `U+FFFD`.
pub fn display_names(listing: &[OsString]) -> Vec<String> {
    listing
        .iter()
        .map(|name| name.to_string_lossy().into_owned())
        .collect()
}

/// A predicate over entry names.
#[derive(Debug, Clone)]
pub enum FilenamePattern {
    /// Name ends with this literal text.
    Suffix(String),
    /// Regex found anywhere in the name.
    Regex(Regex),
    /// Shell glob matched against the whole name.
    Glob(Pattern),
}

impl FilenamePattern {
    pub fn suffix(suffix: impl Into<String>) -> Self {
        Self::Suffix(suffix.into())
    }

    /// Compiles a regular expression.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPattern` with the compiler's reason if `pattern` is not
    /// a valid regex.
    pub fn regex(pattern: &str) -> Result<Self> {
        Regex::new(pattern)
            .map(Self::Regex)
            .map_err(|e| HousekeepError::InvalidPattern {
                pattern: pattern.to_string(),
                reason: e.to_string(),
            })
    }

    /// Compiles a glob such as `*.log.txt` or `report-??.csv`.
    pub fn glob(pattern: &str) -> Result<Self> {
        Pattern::new(pattern)
            .map(Self::Glob)
            .map_err(|e| HousekeepError::InvalidPattern {
                pattern: pattern.to_string(),
                reason: e.msg.to_string(),
            })
    }

    /// Matches against the lossy UTF-8 form of `name`.
    pub fn matches_os(&self, name: &OsStr) -> bool {
        self.matches(&name.to_string_lossy())
    }

    pub fn matches(&self, name: &str) -> bool {
        match self {
            Self::Suffix(suffix) => name.ends_with(suffix.as_str()),
            Self::Regex(regex) => regex.is_match(name),
            Self::Glob(pattern) => pattern.matches(name),
        }
    }

    /// The pattern as the user wrote it.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Suffix(suffix) => suffix,
            Self::Regex(regex) => regex.as_str(),
            Self::Glob(pattern) => pattern.as_str(),
        }
    }
}

/// Lists the names of every entry directly inside `directory`.
///
/// # Errors
///
/// `NotFound` if `directory` does not exist, `Io` for any other failure to
/// read it (not a directory, permission denied).
pub fn list(directory: &Path) -> Result<DirectoryListing> {
    let entries = fs::read_dir(directory)
        .map_err(|e| HousekeepError::io(directory, "read directory", e))?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| HousekeepError::io(directory, "read directory", e))?;
        names.push(entry.file_name());
    }

    tracing::debug!(directory = %directory.display(), entries = names.len(), "listed directory");
    Ok(names)
}

/// Lists `directory` and keeps only the entries whose name matches `pattern`.
pub fn search(directory: &Path, pattern: &FilenamePattern) -> Result<DirectoryListing> {
    let matches: DirectoryListing = list(directory)?
        .into_iter()
        .filter(|name| pattern.matches_os(name))
        .collect();

    tracing::debug!(
        directory = %directory.display(),
        pattern = pattern.as_str(),
        matches = matches.len(),
        "searched directory"
    );
    Ok(matches)
}
