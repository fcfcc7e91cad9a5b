//! Command-line interface module for housekeep.
//!
//! This module handles all CLI-related functionality including:
//! - Argument parsing (one subcommand per housekeeping operation)
//! - The interactive menu used when no subcommand is given
//! - Rendering operation results through the console reporter
//! - Catching every operation error so the menu loop keeps running

use crate::config::HousekeepConfig;
use crate::counter::{self, ExtensionTally};
use crate::error::Result;
use crate::output::ConsoleReporter;
use crate::relocate::RelocationReport;
use crate::{catalog, log_classifier, logging, provision, relocate, sorter};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

/// Routine filesystem housekeeping.
///
/// Run without a subcommand for the interactive menu.
#[derive(Debug, Parser)]
#[command(name = "housekeep", version, about)]
pub struct Cli {
    /// Configuration file to use instead of the default search locations
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print debug diagnostics on stderr
    #[arg(long, global = true)]
    pub debug: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// A single housekeeping operation with all of its parameters.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// List the entries of a directory
    List {
        directory: PathBuf,
        #[arg(long)]
        json: bool,
    },
    /// Move one file into an existing directory
    Move {
        directory: PathBuf,
        file: String,
        target: PathBuf,
    },
    /// List entries whose name matches a pattern (regex by default)
    Search {
        directory: PathBuf,
        pattern: String,
        /// Treat the pattern as a shell glob matched against the whole name
        #[arg(long, conflicts_with = "suffix")]
        glob: bool,
        /// Treat the pattern as a literal filename suffix
        #[arg(long)]
        suffix: bool,
        #[arg(long)]
        json: bool,
    },
    /// Create a folder inside a directory if it is not already there
    Mkdir { directory: PathBuf, name: String },
    /// Move a departed user's documents into the temporary folder
    Retire {
        user_folder: String,
        /// Temporary folder name (defaults to the configured one, "temp")
        #[arg(long)]
        temp: Option<String>,
        /// Directory holding both the user folder and the temporary folder
        #[arg(long, default_value = ".")]
        base: PathBuf,
    },
    /// Sort .log.txt files into logs/ and .mail files into mail/
    Sort { directory: PathBuf },
    /// Copy ERROR and WARNING lines of .log.txt files into errors.log and warnings.log
    Logs {
        logs_directory: PathBuf,
        target_directory: PathBuf,
    },
    /// Count entries per extension
    Count {
        directory: PathBuf,
        /// Extensions to count, e.g. --ext .txt,.log
        #[arg(long = "ext", value_delimiter = ',')]
        extensions: Vec<String>,
        #[arg(long)]
        json: bool,
    },
}

/// Runs the CLI application with already-parsed arguments.
///
/// A subcommand runs once and exits with code 1 if it failed. Without a
/// subcommand the interactive menu reads from stdin until the user exits.
///
/// # Examples
///
/// ```no_run
/// use clap::Parser;
/// use housekeep::cli::{Cli, run_cli};
///
/// let code = run_cli(Cli::parse_from(["housekeep", "sort", "/path/to/inbox"]));
/// ```
pub fn run_cli(cli: Cli) -> ExitCode {
    let config = match HousekeepConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    logging::init(cli.debug, config.logging.level.as_deref());
    if cli.no_color || !config.output.color {
        colored::control::set_override(false);
    }

    let mut reporter = ConsoleReporter::new(config.output.progress);
    match cli.command {
        Some(command) => match execute(&command, &config, &mut reporter) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                reporter.error(&e.to_string());
                ExitCode::FAILURE
            }
        },
        None => {
            let stdin = io::stdin();
            run_interactive(stdin.lock(), &config, &mut reporter);
            ExitCode::SUCCESS
        }
    }
}

/// Runs one operation and renders its result.
pub fn execute(
    command: &Command,
    config: &HousekeepConfig,
    reporter: &mut ConsoleReporter,
) -> Result<()> {
    tracing::debug!(?command, "executing");
    match command {
        Command::List { directory, json } => {
            let entries = catalog::display_names(&catalog::list(directory)?);
            if *json {
                print_json(reporter, &entries);
            } else {
                let title = format!("Files in {}", directory.display());
                reporter.listing(&title, "File Name", &entries);
            }
        }
        Command::Move {
            directory,
            file,
            target,
        } => {
            relocate::move_one(directory, file, target, reporter)?;
        }
        Command::Search {
            directory,
            pattern,
            glob,
            suffix,
            json,
        } => {
            let pattern = if *glob {
                catalog::FilenamePattern::glob(pattern)?
            } else if *suffix {
                catalog::FilenamePattern::suffix(pattern.as_str())
            } else {
                catalog::FilenamePattern::regex(pattern)?
            };
            let matches = catalog::display_names(&catalog::search(directory, &pattern)?);
            if *json {
                print_json(reporter, &matches);
            } else {
                let title = format!(
                    "Files in {} matching {}",
                    directory.display(),
                    pattern.as_str()
                );
                reporter.listing(&title, "Matching File Name", &matches);
            }
        }
        Command::Mkdir { directory, name } => {
            provision::create_folder(directory, name, reporter)?;
        }
        Command::Retire {
            user_folder,
            temp,
            base,
        } => {
            let temp = temp.as_deref().unwrap_or(&config.general.temp_folder);
            let report = relocate::retire_user(base, user_folder, temp, reporter)?;
            summarize_relocation(reporter, &report);
            if report.is_complete_success() {
                reporter.success(&format!(
                    "All documents from {} have been moved to the temporary folder {}.",
                    user_folder, temp
                ));
            }
        }
        Command::Sort { directory } => {
            let report = sorter::sort(directory, reporter)?;
            summarize_relocation(reporter, &report.relocation);
            reporter.info(&format!(
                "{} entr{} left in place.",
                report.untouched.len(),
                if report.untouched.len() == 1 { "y" } else { "ies" }
            ));
        }
        Command::Logs {
            logs_directory,
            target_directory,
        } => {
            let report = log_classifier::classify(logs_directory, target_directory, reporter)?;
            if !report.failures.is_empty() {
                reporter.warning(&format!(
                    "{} log file(s) could not be read.",
                    report.failures.len()
                ));
            }
            reporter.success(&format!(
                "Log files parsed. Errors and warnings have been written to {}.",
                target_directory.display()
            ));
        }
        Command::Count {
            directory,
            extensions,
            json,
        } => {
            let extensions = if extensions.is_empty() {
                &config.count.extensions
            } else {
                extensions
            };
            if extensions.is_empty() {
                reporter.warning(
                    "No extensions to count. Pass --ext .txt,.log or set [count] extensions.",
                );
                return Ok(());
            }
            let tally: ExtensionTally = counter::count(directory, extensions.as_slice())?;
            if *json {
                print_json(reporter, &tally);
            } else {
                reporter.tally(tally.rows());
            }
        }
    }
    Ok(())
}

fn summarize_relocation(reporter: &ConsoleReporter, report: &RelocationReport) {
    if report.is_complete_success() {
        let moved = report.moved.len();
        reporter.success(&format!(
            "{} entr{} moved.",
            moved,
            if moved == 1 { "y" } else { "ies" }
        ));
        return;
    }

    // Each failure was already reported as it happened.
    reporter.warning(&format!(
        "{} of {} entries could not be moved.",
        report.failures.len(),
        report.total_processed()
    ));
}

fn print_json<T: Serialize>(reporter: &ConsoleReporter, value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => reporter.error(&format!("Could not serialize output: {}", e)),
    }
}

const MENU: &str = "\n1. List files\n2. Move file\n3. Search files\n4. Create folder\n5. Retire user\n6. Sort documents\n7. Parse logs\n8. Count file types\n9. Exit";

/// Menu entry picked when the user just presses enter.
const DEFAULT_CHOICE: &str = "4";

/// Runs the interactive menu until the user picks Exit or input ends.
///
/// Every operation error is reported and the menu is shown again.
pub fn run_interactive<R: BufRead>(
    mut input: R,
    config: &HousekeepConfig,
    reporter: &mut ConsoleReporter,
) {
    loop {
        reporter.plain(MENU);
        let Some(choice) = prompt(&mut input, &format!("Choose a task [{}]", DEFAULT_CHOICE))
        else {
            break;
        };
        let choice = if choice.is_empty() {
            DEFAULT_CHOICE.to_string()
        } else {
            choice
        };

        if choice == "9" {
            break;
        }

        let command = match read_command(&mut input, &choice, config) {
            Ok(Some(command)) => command,
            Ok(None) => {
                reporter.warning(&format!("'{}' is not a menu option.", choice));
                continue;
            }
            // Input ended halfway through the questions.
            Err(()) => break,
        };

        if let Err(e) = execute(&command, config, reporter) {
            reporter.error(&e.to_string());
        }
    }
}

/// Asks the questions for menu entry `choice`.
///
/// `Ok(None)` for an unknown choice, `Err(())` when input runs out.
fn read_command<R: BufRead>(
    input: &mut R,
    choice: &str,
    config: &HousekeepConfig,
) -> std::result::Result<Option<Command>, ()> {
    let mut ask = |question: &str| prompt(&mut *input, question).ok_or(());

    let command = match choice {
        "1" => Command::List {
            directory: ask("Enter the directory to list files")?.into(),
            json: false,
        },
        "2" => Command::Move {
            directory: ask("Enter the current directory of the file")?.into(),
            file: ask("Enter the file to move")?,
            target: ask("Enter the target directory to move the file to")?.into(),
        },
        "3" => Command::Search {
            directory: ask("Enter the directory to search files")?.into(),
            pattern: ask("Enter the regex pattern to search for")?,
            glob: false,
            suffix: false,
            json: false,
        },
        "4" => Command::Mkdir {
            directory: ask("Enter the directory where the folder will be created")?.into(),
            name: ask("Enter the name of the folder to create")?,
        },
        "5" => Command::Retire {
            user_folder: ask("Enter the departed user's folder name")?,
            temp: Some(config.general.temp_folder.clone()),
            base: PathBuf::from("."),
        },
        "6" => Command::Sort {
            directory: ask("Enter the directory to sort documents in")?.into(),
        },
        "7" => Command::Logs {
            logs_directory: ask("Enter the logs directory")?.into(),
            target_directory: ask("Enter the target directory for errors and warnings logs")?
                .into(),
        },
        "8" => Command::Count {
            directory: ask("Enter the directory to count file types in")?.into(),
            extensions: counter::parse_extensions(&ask(
                "Enter the file extensions to count, separated by commas (e.g., .txt,.log)",
            )?),
            json: false,
        },
        _ => return Ok(None),
    };
    Ok(Some(command))
}

/// Prints `question` and reads one trimmed line. `None` at end of input.
fn prompt<R: BufRead>(input: &mut R, question: &str) -> Option<String> {
    print!("{}: ", question);
    if let Err(e) = io::stdout().flush() {
        tracing::debug!(error = %e, "could not flush prompt");
    }

    let mut line = String::new();
    match input.read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line.trim().to_string()),
    }
}
