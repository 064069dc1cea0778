//! Execution of a parsed [`Cli`].
//!
//! Builds the rotation configuration, optionally echoes it and waits for
//! confirmation, runs the rotation and prints one line per affected file.

use std::io::{self, BufRead};

use crate::cli::Cli;
use crate::error::{Result, RotateError};
use crate::logging::Logger;
use crate::rotate::{FileEntry, FolderRotate, OrderBy};
use crate::timestamp::system_time_to_millis;

/// Execute the rotation described by the CLI arguments, reading the
/// confirmation for `--wait` from stdin.
pub fn execute(cli: &Cli) -> Result<()> {
    let stdin = io::stdin();
    let files = execute_with_input(cli, &mut stdin.lock())?;

    for file in &files {
        println!("{}", format_entry(file, cli.order_by()));
    }

    Ok(())
}

/// Execute the rotation, reading the confirmation for `--wait` from `input`.
///
/// Returns the files that were deleted (or would have been when simulating)
/// without printing them.
pub fn execute_with_input(cli: &Cli, input: &mut dyn BufRead) -> Result<Vec<FileEntry>> {
    let log = Logger::new(cli.verbose(), cli.quiet());
    let config = cli.to_config()?;

    if !cli.simulate() {
        log.info(
            "Simulation is DISABLED. folder-rotate is going to ACTUALLY DELETE the files you are \
             selecting!",
        );
    }
    if cli.print_config() {
        log.info("The configuration, as understood from folder-rotate:");
        log.info(&config);
    }

    if cli.wait() {
        wait_for_confirmation(input, log)?;
    }

    FolderRotate::new(config)
        .with_logger(log)
        .rotate(cli.simulate())
}

/// Block until a line (or end of input) arrives on `input`.
fn wait_for_confirmation(input: &mut dyn BufRead, log: Logger) -> Result<()> {
    // the prompt is needed even in quiet mode, otherwise the wait is silent
    if log.quiet() {
        eprintln!("Press Enter to continue.");
    } else {
        log.info("Press Enter to continue.");
    }

    let mut line = String::new();
    input.read_line(&mut line).map_err(RotateError::Prompt)?;
    Ok(())
}

/// Format an affected file as its path followed by the value it was ordered
/// by.
pub fn format_entry(file: &FileEntry, order_by: &str) -> String {
    let stat = file.stat();
    let suffix = match order_by.parse::<OrderBy>() {
        Ok(OrderBy::Size) => Some(format!("{} bytes", stat.size())),
        Ok(OrderBy::AccessTime) => Some(system_time_to_millis(stat.accessed()).to_string()),
        Ok(OrderBy::ModifiedTime) => Some(system_time_to_millis(stat.modified()).to_string()),
        Ok(OrderBy::ChangedTime) => Some(system_time_to_millis(stat.changed()).to_string()),
        Ok(OrderBy::BirthTime) => Some(system_time_to_millis(stat.birth_time()).to_string()),
        Ok(OrderBy::Name) | Err(_) => None,
    };

    match suffix {
        Some(suffix) => format!("{} ({suffix})", file.path().display()),
        None => file.path().display().to_string(),
    }
}
