use anyhow::Result;
use std::io;
use tracing::debug;
use tracing_subscriber::{fmt, EnvFilter};

mod cli;
mod config;
mod models;
mod remote;
mod runner;

use cli::Cli;
use remote::IcommandsAccess;

fn main() -> Result<()> {
    // Setup logging, silent on success unless RUST_LOG says otherwise
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_ansi(false)
        .with_writer(io::stderr)
        .init();

    debug!("Starting {} {}", config::PROGRAM_NAME, env!("CARGO_PKG_VERSION"));

    let res = Cli::parse_args(std::env::args_os())
        .map_err(anyhow::Error::from)
        .and_then(|cli| {
            let access = IcommandsAccess::default();
            cli::run(&cli, &access, &mut io::stdout().lock(), &mut io::stderr().lock())
        });

    // Exit status stays 0 even when the run fails
    if let Err(err) = res {
        eprintln!("Error: {}", err);
    }

    Ok(())
}
