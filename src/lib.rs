//! housekeep - routine filesystem housekeeping
//!
//! This library lists and searches directories, moves files and whole
//! directory contents, provisions folders, sorts files into category folders
//! by suffix, splits `.log.txt` files into error and warning sinks, and counts
//! entries per extension. Every operation reports progress through an injected
//! [`Reporter`] and returns a structured result.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod counter;
pub mod error;
pub mod log_classifier;
pub mod logging;
pub mod output;
pub mod provision;
pub mod relocate;
pub mod sorter;

pub use catalog::{DirectoryListing, FilenamePattern};
pub use config::HousekeepConfig;
pub use counter::ExtensionTally;
pub use error::{HousekeepError, Result};
pub use log_classifier::{ClassifyReport, LineClass};
pub use output::{ConsoleReporter, Event, Reporter};
pub use provision::Provisioned;
pub use relocate::RelocationReport;
pub use sorter::{CategoryRule, CategoryTable, SortReport};

pub use cli::{Cli, Command, run_cli};
