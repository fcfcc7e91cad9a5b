use clap::Parser;
use housekeep::cli::{Cli, run_cli};
use std::process::ExitCode;

fn main() -> ExitCode {
    run_cli(Cli::parse())
}
