use anyhow::{anyhow, Context, Result};
use std::borrow::Cow;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{RemoteAccess, RemoteFile};
use crate::models::ConnectionParameters;

static SCRATCH_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Remote access through the grid's command-line client.
///
/// Login goes through `iinit`, the object lookup through `ils`. Both are
/// resolved on `PATH` unless other programs are given.
#[derive(Debug, Clone)]
pub struct IcommandsAccess {
    iinit: PathBuf,
    ils: PathBuf,
}

impl Default for IcommandsAccess {
    fn default() -> Self {
        Self {
            iinit: PathBuf::from("iinit"),
            ils: PathBuf::from("ils"),
        }
    }
}

impl IcommandsAccess {
    #[allow(dead_code)]
    pub fn with_programs(iinit: impl Into<PathBuf>, ils: impl Into<PathBuf>) -> Self {
        Self {
            iinit: iinit.into(),
            ils: ils.into(),
        }
    }
}

impl RemoteAccess for IcommandsAccess {
    type File = IcommandsFile;

    fn bind(&self, params: &ConnectionParameters, path: &str) -> IcommandsFile {
        let auth_file = std::env::temp_dir().join(format!(
            "gridprobe-{}-{}.irodsA",
            std::process::id(),
            SCRATCH_COUNTER.fetch_add(1, Ordering::Relaxed)
        ));

        IcommandsFile {
            params: params.clone(),
            path: path.to_string(),
            iinit: self.iinit.clone(),
            ils: self.ils.clone(),
            auth_file,
            open_attempted: false,
        }
    }
}

#[derive(Debug)]
pub struct IcommandsFile {
    params: ConnectionParameters,
    path: String,
    iinit: PathBuf,
    ils: PathBuf,
    // Per-handle credential cache, keeps the user's ~/.irods untouched
    auth_file: PathBuf,
    open_attempted: bool,
}

impl IcommandsFile {
    #[allow(dead_code)]
    pub fn auth_file(&self) -> &Path {
        &self.auth_file
    }

    fn command(&self, program: &Path) -> Command {
        let mut cmd = Command::new(program);
        cmd.env("IRODS_HOST", self.params.host())
            .env("IRODS_PORT", self.params.port().to_string())
            .env("IRODS_USER_NAME", self.params.user_name())
            .env("IRODS_ZONE_NAME", self.params.zone())
            .env("IRODS_HOME", self.params.home_directory())
            .env("IRODS_DEFAULT_RESOURCE", self.params.default_storage_resource())
            .env("IRODS_AUTHENTICATION_FILE", &self.auth_file)
            .stdin(Stdio::null());
        cmd
    }

    fn run_client(&self, program: &Path, args: &[&str]) -> Result<Output> {
        let output = self
            .command(program)
            .args(args)
            .output()
            .with_context(|| format!("Failed to execute {}", program.display()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(anyhow!(
                "{} exited with {}: {}",
                program.display(),
                output.status,
                stderr.trim()
            ));
        }

        Ok(output)
    }
}

impl RemoteFile for IcommandsFile {
    fn open(&mut self) -> Result<()> {
        if self.open_attempted {
            return Err(anyhow!("handle for {} already opened", self.path));
        }
        self.open_attempted = true;

        tracing::debug!("Logging in as {}", self.params.endpoint());
        self.run_client(&self.iinit, &[self.params.password()])
            .with_context(|| format!("Login to {} failed", self.params.endpoint()))?;

        tracing::debug!("Resolving {}", self.path);
        let lookup = lookup_arg(&self.path);
        let listing = self
            .run_client(&self.ils, &["-l", &*lookup])
            .with_context(|| format!("Failed to resolve {}", self.path))?;
        tracing::debug!("ils: {}", String::from_utf8_lossy(&listing.stdout).trim());

        Ok(())
    }

    fn close(&mut self) {
        match fs::remove_file(&self.auth_file) {
            Ok(()) => tracing::debug!("Removed auth cache {:?}", self.auth_file),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => tracing::warn!("Failed to remove auth cache {:?}: {}", self.auth_file, e),
        }
    }
}

/// `ils` has no `--` terminator, so a leading `-` is anchored to the
/// working collection instead of being read as an option.
fn lookup_arg(path: &str) -> Cow<'_, str> {
    if path.starts_with('-') {
        Cow::Owned(format!("./{}", path))
    } else {
        Cow::Borrowed(path)
    }
}
