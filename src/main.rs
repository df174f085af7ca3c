use reinstall_guard::cli::{parse_args, run_cli_command};

use color_eyre::Result;
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    color_eyre::install()?;
    init_logging();

    run_cli_command(parse_args(std::env::args()))
}
