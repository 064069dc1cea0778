//! # folder-rotate CLI
//!
//! Restricts a directory to a size or file-count budget by deleting the
//! files at the end of a configurable ordering.
//!
//! ## Quick Start
//!
//! ```bash
//! # See which logs would go to keep the directory under 100 MB
//! folder-rotate --path ./logs --order-by date_mtime --order-dir desc \
//!     --max-size 100 --rotation-unit mb --simulate
//! ```
//!
//! ## Environment Variables
//!
//! - `FOLDER_ROTATE_PATH`: Directory to rotate
//! - `FOLDER_ROTATE_REGEX`: File-name filter as `/pattern/flags`
//! - `FOLDER_ROTATE_ORDER_BY` / `FOLDER_ROTATE_ORDER_DIR`: Ordering
//! - `FOLDER_ROTATE_MAX_SIZE` / `FOLDER_ROTATE_ROTATION_UNIT`: Budget
//! - `FOLDER_ROTATE_SIMULATE`: Dry run
//! - `FOLDER_ROTATE_VERBOSE` / `FOLDER_ROTATE_QUIET`: Output level

use std::io::IsTerminal;

use folder_rotate::cli::Cli;

fn main() -> miette::Result<()> {
    miette::set_panic_hook();

    // Plain output when stderr is redirected (cron, CI, log files)
    if std::io::stderr().is_terminal() {
        miette::set_hook(Box::new(|_| {
            Box::new(
                miette::GraphicalReportHandler::new()
                    .with_theme(miette::GraphicalTheme::unicode_nocolor())
                    .with_context_lines(3),
            )
        }))?;
    } else {
        miette::set_hook(Box::new(|_| {
            Box::new(
                miette::GraphicalReportHandler::new()
                    .with_theme(miette::GraphicalTheme::none())
                    .with_context_lines(0),
            )
        }))?;
    }

    let cli = Cli::parse_args();

    folder_rotate::commands::execute(&cli).map_err(Into::into)
}
