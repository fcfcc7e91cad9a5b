//! Feedback channel between operations and whoever is presenting them.
//!
//! Operations never print. They push [`Event`]s into a [`Reporter`] handed to
//! them by the caller: the CLI passes a [`ConsoleReporter`], tests pass a
//! `Vec<Event>` and assert on what was recorded.

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;

/// Something an operation wants the user to know about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A directory was created.
    FolderCreated(PathBuf),
    /// A directory was already present; nothing was changed.
    FolderExists(PathBuf),
    /// A multi-entry move is about to process `total` entries.
    BatchStarted { total: usize },
    /// One entry was moved.
    Moved { from: PathBuf, to: PathBuf },
    /// One entry could not be moved; the batch carries on.
    MoveFailed { from: PathBuf, reason: String },
    /// The current multi-entry move is over.
    BatchFinished,
    /// A log file was scanned and its matching lines routed.
    LogScanned {
        path: PathBuf,
        errors: usize,
        warnings: usize,
    },
    /// A log file could not be read; the remaining files are still scanned.
    LogFailed { path: PathBuf, reason: String },
}

/// Receives events from operations.
pub trait Reporter {
    fn report(&mut self, event: Event);
}

impl Reporter for Vec<Event> {
    fn report(&mut self, event: Event) {
        self.push(event);
    }
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl Reporter for Silent {
    fn report(&mut self, _event: Event) {}
}

/// Renders events and results on the terminal with consistent styling.
///
/// Success lines are green with ✓, errors red with ✗ on stderr, notices
/// yellow with ⚠ and informational lines cyan. Batches of moves drive a
/// progress bar when `progress` is enabled.
pub struct ConsoleReporter {
    progress: bool,
    bar: Option<ProgressBar>,
}

impl ConsoleReporter {
    pub fn new(progress: bool) -> Self {
        Self {
            progress,
            bar: None,
        }
    }

    /// Prints a success message in green with a checkmark.
    pub fn success(&self, message: &str) {
        self.emit(format!("{} {}", "✓".green(), message.green()));
    }

    /// Prints an error message in red with an X mark.
    pub fn error(&self, message: &str) {
        let line = format!("{} {}", "✗".red(), message.red());
        match &self.bar {
            Some(bar) => bar.suspend(|| eprintln!("{line}")),
            None => eprintln!("{line}"),
        }
    }

    /// Prints a notice in yellow with a warning symbol.
    pub fn warning(&self, message: &str) {
        self.emit(format!("{} {}", "⚠".yellow(), message.yellow()));
    }

    /// Prints an info message in cyan.
    pub fn info(&self, message: &str) {
        self.emit(message.cyan().to_string());
    }

    /// Prints a regular message without styling.
    pub fn plain(&self, message: &str) {
        self.emit(message.to_string());
    }

    /// Prints a section header.
    pub fn header(&self, header: &str) {
        self.emit(format!("\n{}", header.bold()));
    }

    /// Prints a single-column table of entry names under a title.
    pub fn listing(&self, title: &str, column: &str, entries: &[String]) {
        self.header(title);
        let width = entries
            .iter()
            .map(|name| name.chars().count())
            .max()
            .unwrap_or(0)
            .max(column.len());

        println!("{}", column.bold());
        println!("{}", "-".repeat(width));
        for entry in entries {
            println!("{}", entry.dimmed());
        }
        println!("{}", "-".repeat(width));
        let noun = if entries.len() == 1 { "entry" } else { "entries" };
        println!("{} {}", entries.len().to_string().green(), noun);
    }

    /// Prints one `extension | count` row per tallied extension.
    pub fn tally(&self, rows: &[(String, usize)]) {
        self.header("FILE TYPES");

        let width = rows
            .iter()
            .map(|(ext, _)| ext.chars().count())
            .max()
            .unwrap_or(0)
            .max(9); // "Extension"

        println!(
            "{:<width$} | {}",
            "Extension".bold(),
            "Files".bold(),
            width = width
        );
        println!("{}", "-".repeat(width + 10));
        for (ext, count) in rows {
            println!(
                "{:<width$} | {}",
                ext.green(),
                count.to_string().yellow(),
                width = width
            );
        }
    }

    fn emit(&self, line: String) {
        match &self.bar {
            Some(bar) => bar.println(line),
            None => println!("{line}"),
        }
    }

    fn start_bar(&mut self, total: usize) {
        if !self.progress || total == 0 {
            return;
        }
        let bar = ProgressBar::new(total as u64);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓░");
        bar.set_style(style);
        self.bar = Some(bar);
    }

    fn tick(&self) {
        if let Some(bar) = &self.bar {
            bar.inc(1);
        }
    }
}

impl Reporter for ConsoleReporter {
    fn report(&mut self, event: Event) {
        match event {
            Event::FolderCreated(path) => {
                self.success(&format!("{} created successfully.", path.display()));
            }
            Event::FolderExists(path) => {
                self.warning(&format!("{} already exists.", path.display()));
            }
            Event::BatchStarted { total } => self.start_bar(total),
            Event::Moved { from, to } => {
                self.tick();
                let name = from
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| from.display().to_string());
                let dest = to.parent().unwrap_or(&to);
                self.emit(format!(
                    "{} {} moved to {}",
                    "✓".green(),
                    name.green().bold(),
                    dest.display().to_string().blue().bold()
                ));
            }
            Event::MoveFailed { from, reason } => {
                self.tick();
                self.error(&format!("{}: {}", from.display(), reason));
            }
            Event::BatchFinished => {
                if let Some(bar) = self.bar.take() {
                    bar.finish_and_clear();
                }
            }
            Event::LogScanned {
                path,
                errors,
                warnings,
            } => {
                self.info(&format!(
                    "{}: {} error line(s), {} warning line(s)",
                    path.display(),
                    errors,
                    warnings
                ));
            }
            Event::LogFailed { path, reason } => {
                self.error(&format!("Could not read {}: {}", path.display(), reason));
            }
        }
    }
}
