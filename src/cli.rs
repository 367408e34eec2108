use anyhow::{Context, Result};
use clap::Parser;
use std::ffi::OsString;
use std::io::Write;

use crate::config;
use crate::models::ConnectionParameters;
use crate::remote::RemoteAccess;
use crate::runner::ConnectionTestRunner;

/// Open one file on the storage grid with the built-in account and report
/// any failure on stderr.
///
/// Every argument is positional: the first one is the target path even when
/// it looks like a flag. Logging is controlled through `RUST_LOG`.
#[derive(Debug, Parser)]
#[command(
    name = "gridprobe",
    disable_help_flag = true,
    disable_version_flag = true
)]
pub struct Cli {
    /// Remote path of the file to open
    pub filename: Option<String>,

    /// Anything after the filename is ignored
    pub ignored: Vec<String>,
}

impl Cli {
    /// Parse raw process arguments, program name first.
    ///
    /// A `--` is inserted ahead of the user arguments so clap never reads
    /// them as options, and non UTF-8 arguments are converted lossily.
    pub fn parse_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let mut args = args
            .into_iter()
            .map(|arg| arg.into().to_string_lossy().into_owned());
        let program = args
            .next()
            .unwrap_or_else(|| config::PROGRAM_NAME.to_string());

        Self::try_parse_from(
            std::iter::once(program)
                .chain(std::iter::once("--".to_string()))
                .chain(args),
        )
    }
}

/// Print usage when no filename is given, otherwise open the file once.
///
/// An open failure only shows up on `diag`; it is never returned.
pub fn run<A, O, D>(cli: &Cli, access: &A, out: &mut O, diag: &mut D) -> Result<()>
where
    A: RemoteAccess,
    O: Write + ?Sized,
    D: Write + ?Sized,
{
    let Some(target) = cli.filename.as_deref() else {
        writeln!(out, "{} filename", config::PROGRAM_NAME).context("Failed to write usage")?;
        return Ok(());
    };

    if !cli.ignored.is_empty() {
        tracing::debug!("Ignoring extra arguments: {:?}", cli.ignored);
    }

    let params = ConnectionParameters::default();
    tracing::debug!(
        "Connection parameters: {}",
        serde_json::to_string(&params.redacted())
            .context("Failed to serialize connection parameters")?
    );

    let _runner = ConnectionTestRunner::construct(target, params, access, diag);

    Ok(())
}
