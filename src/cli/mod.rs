//! CLI for running the guard outside a host app.
//!
//! - `reinstall-guard` runs the check against the platform stores
//! - `--status` prints the stored mark and the verdict
//! - `--dry-run` prints the keys a purge would delete if this start looks
//!   like a reinstall
//! - `--version` prints the version
//!
//! `--data-dir <path>` points the file stores somewhere else.

pub mod args;
pub mod version;

pub use args::{parse_args, CliArgs, CliCommand};
pub use version::{version_line, VERSION};

use chrono::{DateTime, Utc};
use color_eyre::{eyre::WrapErr, Result};

use crate::startup::{GuardConfig, ReinstallGuard, StartupOutcome};

/// Execute a parsed command.
///
/// `Run` always succeeds; its failures are printed, not returned.
pub fn run_cli_command(args: CliArgs) -> Result<()> {
    if args.command == CliCommand::Version {
        println!("{}", version_line());
        return Ok(());
    }

    let mut config = GuardConfig::from_env();
    if let Some(dir) = args.data_dir {
        config = config.with_data_dir(dir);
    }
    let guard = ReinstallGuard::with_platform_stores(&config);

    match args.command {
        CliCommand::Run => {
            let outcome = guard.run(Utc::now());
            println!("{}", describe_outcome(&outcome));
            Ok(())
        }
        CliCommand::Status => {
            let status = guard
                .status(Utc::now())
                .wrap_err("Failed to read guard status")?;
            println!("{}", serde_json::to_string_pretty(&status)?);
            Ok(())
        }
        CliCommand::DryRun => {
            println!("{}", dry_run_report(&guard, Utc::now())?);
            Ok(())
        }
        CliCommand::Version => Ok(()),
    }
}

/// What a run at `now` would purge, without deleting or recording anything.
///
/// The plan is only printed when the stored mark is stale.
pub fn dry_run_report(guard: &ReinstallGuard, now: DateTime<Utc>) -> Result<String> {
    let status = guard
        .status(now)
        .wrap_err("Failed to evaluate launch mark")?;

    match status.plan {
        Some(plan) if status.would_purge => Ok(serde_json::to_string_pretty(&plan)?),
        _ => Ok("Continuing install: nothing would be purged".to_string()),
    }
}

/// Human-readable summary of a run.
pub fn describe_outcome(outcome: &StartupOutcome) -> String {
    let mut lines = Vec::new();

    match &outcome.purge {
        Some(report) => {
            lines.push(format!(
                "Fresh install detected: removed {} preference key(s), secure store {}",
                report.preferences.deleted.len(),
                if report.secure_store.is_cleared() {
                    "cleared"
                } else {
                    "not cleared"
                }
            ));
        }
        None => lines.push("Continuing install: nothing purged".to_string()),
    }

    if !outcome.mark_recorded {
        lines.push("Warning: launch mark was not recorded".to_string());
    }
    if !outcome.detection_sound {
        lines.push(
            "Warning: secure store survives uninstall here, reinstall detection is unreliable"
                .to_string(),
        );
    }
    for err in &outcome.errors {
        lines.push(format!("Error: {}", err));
    }

    lines.join("\n")
}
