//! Counting directory entries per requested extension.
use crate::catalog;
use crate::error::Result;
use serde::Serialize;
use std::path::Path;

/// Per-extension counts in the order the extensions were requested.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtensionTally {
    counts: Vec<(String, usize)>,
}

impl ExtensionTally {
    /// Starts every requested extension at zero, dropping repeats but keeping
    /// the position of each extension's first occurrence.
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut counts: Vec<(String, usize)> = Vec::new();
        for ext in extensions {
            let ext = ext.into();
            if !counts.iter().any(|(seen, _)| *seen == ext) {
                counts.push((ext, 0));
            }
        }
        Self { counts }
    }

    /// Adds one to every extension `name` ends with.
    pub fn record(&mut self, name: &str) {
        for (ext, count) in &mut self.counts {
            if name.ends_with(ext.as_str()) {
                *count += 1;
            }
        }
    }

    pub fn get(&self, extension: &str) -> Option<usize> {
        self.counts
            .iter()
            .find(|(ext, _)| ext == extension)
            .map(|(_, count)| *count)
    }

    pub fn rows(&self) -> &[(String, usize)] {
        &self.counts
    }
}

/// Counts the entries of `directory` ending with each of `extensions`.
///
/// Counts are not exclusive: `notes.txt.bak` counts toward both `.bak` and
/// `.txt.bak` when both are requested.
pub fn count<S: AsRef<str>>(directory: &Path, extensions: &[S]) -> Result<ExtensionTally> {
    let mut tally = ExtensionTally::new(extensions.iter().map(|e| e.as_ref().to_string()));
    for name in catalog::list(directory)? {
        tally.record(&name.to_string_lossy());
    }

    tracing::debug!(directory = %directory.display(), ?tally, "counted extensions");
    Ok(tally)
}

/// Splits a comma-separated extension list such as `.txt, .log`.
///
/// Blank items are dropped, since an empty extension would match everything.
pub fn parse_extensions(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|ext| !ext.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn setup(names: &[&str]) -> TempDir {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        for name in names {
            fs::write(temp_dir.path().join(name), "").unwrap();
        }
        temp_dir
    }

    #[test]
    fn test_count_per_extension() {
        let temp_dir = setup(&["a.txt", "b.txt", "c.md"]);

        let tally = count(temp_dir.path(), &[".txt", ".md"]).unwrap();

        assert_eq!(
            tally.rows(),
            &[(".txt".to_string(), 2), (".md".to_string(), 1)]
        );
    }

    #[test]
    fn test_unmatched_extension_stays_zero() {
        let temp_dir = setup(&["a.txt"]);
        let tally = count(temp_dir.path(), &[".pdf"]).unwrap();
        assert_eq!(tally.get(".pdf"), Some(0));
    }

    #[test]
    fn test_overlapping_extensions_each_count() {
        let temp_dir = setup(&["notes.txt.bak", "plain.txt"]);

        let tally = count(temp_dir.path(), &[".txt", ".txt.bak", ".bak"]).unwrap();

        assert_eq!(tally.get(".txt"), Some(1));
        assert_eq!(tally.get(".txt.bak"), Some(1));
        assert_eq!(tally.get(".bak"), Some(1));
    }

    #[test]
    fn test_duplicates_are_collapsed_in_order() {
        let tally = ExtensionTally::new([".md", ".txt", ".md"]);
        let exts: Vec<_> = tally.rows().iter().map(|(e, _)| e.as_str()).collect();
        assert_eq!(exts, vec![".md", ".txt"]);
    }

    #[test]
    fn test_count_missing_directory_is_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let err = count(&temp_dir.path().join("nope"), &[".txt"]).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_count_is_repeatable() {
        let temp_dir = setup(&["a.txt", "b.log"]);
        let first = count(temp_dir.path(), &[".txt", ".log"]).unwrap();
        let second = count(temp_dir.path(), &[".txt", ".log"]).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_parse_extensions_trims_and_drops_blanks() {
        assert_eq!(
            parse_extensions(" .txt, .log ,, "),
            vec![".txt".to_string(), ".log".to_string()]
        );
    }

    #[test]
    fn test_tally_serializes_as_rows() {
        let mut tally = ExtensionTally::new([".txt"]);
        tally.record("a.txt");
        let json = serde_json::to_value(&tally).unwrap();
        assert_eq!(json, serde_json::json!({ "counts": [[".txt", 1]] }));
    }
}
