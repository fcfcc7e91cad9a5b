//! Sorting a directory's files into category folders by filename suffix.
//!
//! # Examples
//!
//! ```
//! use housekeep::sorter::CategoryTable;
//!
//! let table = CategoryTable::default();
//! assert_eq!(table.folder_for("app.log.txt"), Some("logs"));
//! assert_eq!(table.folder_for("inbox.mail"), Some("mail"));
//! assert_eq!(table.folder_for("notes.txt"), None);
//! ```

use crate::catalog;
use crate::error::{HousekeepError, Result};
use crate::output::{Event, Reporter};
use crate::provision;
use crate::relocate::RelocationReport;
use std::ffi::OsString;
use std::path::Path;

/// Sends names ending in `suffix` to the subfolder `folder`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRule {
    pub suffix: String,
    pub folder: String,
}

impl CategoryRule {
    pub fn new(suffix: impl Into<String>, folder: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
            folder: folder.into(),
        }
    }
}

/// Ordered suffix → folder rules. The first rule that matches wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTable {
    rules: Vec<CategoryRule>,
}

impl CategoryTable {
    pub fn new(rules: Vec<CategoryRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[CategoryRule] {
        &self.rules
    }

    /// Returns the folder for `name`, checking rules in order.
    pub fn folder_for(&self, name: &str) -> Option<&str> {
        self.rules
            .iter()
            .find(|rule| name.ends_with(rule.suffix.as_str()))
            .map(|rule| rule.folder.as_str())
    }
}

impl Default for CategoryTable {
    /// `.log.txt` files go to `logs`, `.mail` files go to `mail`.
    fn default() -> Self {
        Self::new(vec![
            CategoryRule::new(".log.txt", "logs"),
            CategoryRule::new(".mail", "mail"),
        ])
    }
}

/// Outcome of sorting one directory.
#[derive(Debug, Default)]
pub struct SortReport {
    pub relocation: RelocationReport,
    /// Entries that matched no rule and were left in place.
    pub untouched: Vec<OsString>,
}

/// Sorts `directory` with the default table.
pub fn sort(directory: &Path, reporter: &mut dyn Reporter) -> Result<SortReport> {
    sort_with(directory, &CategoryTable::default(), reporter)
}

/// Sorts the entries directly inside `directory` into the table's folders.
///
/// Every category folder is provisioned up front, whether or not anything
/// ends up in it. Entries are taken from one listing read before the first
/// move, so files landing in a category folder are not looked at again.
///
/// # Errors
///
/// `NotFound` if `directory` does not exist, `Creation` if a category folder
/// cannot be made. Failed moves are collected in the report.
pub fn sort_with(
    directory: &Path,
    table: &CategoryTable,
    reporter: &mut dyn Reporter,
) -> Result<SortReport> {
    if !directory.is_dir() {
        return Err(HousekeepError::not_found(directory));
    }

    for rule in table.rules() {
        provision::ensure(&directory.join(&rule.folder), reporter)?;
    }

    let snapshot = catalog::list(directory)?;
    let mut report = SortReport::default();

    reporter.report(Event::BatchStarted {
        total: snapshot.len(),
    });
    for name in snapshot {
        match table.folder_for(&name.to_string_lossy()) {
            Some(folder) => {
                tracing::debug!(entry = %name.to_string_lossy(), folder, "sorting entry");
                let from = directory.join(&name);
                let to = directory.join(folder).join(&name);
                report.relocation.attempt(from, to, reporter);
            }
            None => report.untouched.push(name),
        }
    }
    reporter.report(Event::BatchFinished);

    tracing::info!(
        directory = %directory.display(),
        moved = report.relocation.moved.len(),
        failed = report.relocation.failures.len(),
        untouched = report.untouched.len(),
        "sorted directory"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_default_table_order() {
        let table = CategoryTable::default();
        let suffixes: Vec<_> = table.rules().iter().map(|r| r.suffix.as_str()).collect();
        assert_eq!(suffixes, vec![".log.txt", ".mail"]);
    }

    #[test]
    fn test_first_listed_rule_wins() {
        let table = CategoryTable::new(vec![
            CategoryRule::new(".txt", "text"),
            CategoryRule::new(".log.txt", "logs"),
        ]);
        assert_eq!(table.folder_for("a.log.txt"), Some("text"));
    }

    #[test]
    fn test_sort_moves_matching_and_leaves_others() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base = temp_dir.path();
        fs::write(base.join("x.log.txt"), "log").unwrap();
        fs::write(base.join("y.mail"), "mail").unwrap();
        fs::write(base.join("z.txt"), "plain").unwrap();

        let report = sort(base, &mut Vec::new()).unwrap();

        assert!(base.join("logs").join("x.log.txt").is_file());
        assert!(base.join("mail").join("y.mail").is_file());
        assert_eq!(fs::read_to_string(base.join("z.txt")).unwrap(), "plain");
        assert_eq!(report.relocation.moved.len(), 2);
        assert!(report.untouched.iter().any(|name| name == "z.txt"));
    }

    #[test]
    fn test_sort_creates_folders_even_when_empty() {
        let temp_dir = TempDir::new().unwrap();
        let mut events = Vec::new();

        sort(temp_dir.path(), &mut events).unwrap();

        assert!(temp_dir.path().join("logs").is_dir());
        assert!(temp_dir.path().join("mail").is_dir());
        assert!(events.contains(&Event::FolderCreated(temp_dir.path().join("logs"))));
    }

    #[test]
    fn test_sort_missing_directory_creates_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing");

        let err = sort(&missing, &mut Vec::new()).unwrap_err();
        assert!(err.is_not_found());
        assert!(!missing.exists());
    }

    #[test]
    fn test_sort_with_file_in_place_of_category_folder() {
        let temp_dir = TempDir::new().unwrap();
        let base = temp_dir.path();
        fs::write(base.join("logs"), "not a folder").unwrap();
        fs::write(base.join("a.log.txt"), "log").unwrap();
        fs::write(base.join("b.mail"), "mail").unwrap();

        let report = sort(base, &mut Vec::new()).unwrap();

        assert_eq!(report.relocation.failures.len(), 1);
        assert!(matches!(
            report.relocation.failures[0].1,
            HousekeepError::Relocation { .. }
        ));
        assert!(base.join("a.log.txt").is_file());
        assert!(base.join("mail").join("b.mail").is_file());
    }

    #[cfg(unix)]
    #[test]
    fn test_sort_moves_non_utf8_names() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let temp_dir = TempDir::new().unwrap();
        let raw = OsStr::from_bytes(b"r\xe9port.log.txt");
        fs::write(temp_dir.path().join(raw), "log").unwrap();

        let report = sort(temp_dir.path(), &mut Vec::new()).unwrap();

        assert!(report.relocation.is_complete_success());
        assert_eq!(report.relocation.moved.len(), 1);
        assert!(temp_dir.path().join("logs").join(raw).is_file());
        assert!(!temp_dir.path().join(raw).exists());
    }

    #[test]
    fn test_sort_twice_is_stable() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("a.log.txt"), "").unwrap();

        sort(temp_dir.path(), &mut Vec::new()).unwrap();
        let second = sort(temp_dir.path(), &mut Vec::new()).unwrap();

        assert!(second.relocation.moved.is_empty());
        assert!(temp_dir.path().join("logs").join("a.log.txt").exists());
    }
}
