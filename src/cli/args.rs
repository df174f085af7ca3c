//! Command-line argument parsing for the reinstall-guard CLI.

use std::path::PathBuf;

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Print the stored launch mark and verdict without writing anything
    Status,
    /// Print what a run would purge without deleting or recording
    DryRun,
    /// Run the guard (default)
    Run,
}

/// Parsed command plus options.
#[derive(Debug, Clone, PartialEq)]
pub struct CliArgs {
    pub command: CliCommand,
    /// Overrides the data directory of the file stores
    pub data_dir: Option<PathBuf>,
}

/// Parse command-line arguments.
///
/// The first argument (program name) is skipped. Unknown flags are ignored.
///
/// # Examples
///
/// ```
/// use reinstall_guard::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["reinstall-guard".to_string(), "--status".to_string()];
/// assert_eq!(parse_args(args.into_iter()).command, CliCommand::Status);
/// ```
pub fn parse_args<I>(args: I) -> CliArgs
where
    I: Iterator<Item = String>,
{
    let mut command = CliCommand::Run;
    let mut data_dir = None;

    let mut args = args.skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-V" => {
                return CliArgs {
                    command: CliCommand::Version,
                    data_dir,
                }
            }
            "--status" => command = CliCommand::Status,
            "--dry-run" | "-n" => command = CliCommand::DryRun,
            "--data-dir" => data_dir = args.next().map(PathBuf::from),
            other => {
                if let Some(dir) = other.strip_prefix("--data-dir=") {
                    data_dir = Some(PathBuf::from(dir));
                }
            }
        }
    }

    CliArgs { command, data_dir }
}
