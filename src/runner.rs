use anyhow::{Context, Result};
use std::io::Write;

use crate::models::ConnectionParameters;
use crate::remote::{RemoteAccess, RemoteFile};

/// Opens one remote file once and reports, but never propagates, a failure.
///
/// The handle is released when the runner is dropped.
pub struct ConnectionTestRunner<F: RemoteFile> {
    params: ConnectionParameters,
    target_path: String,
    handle: F,
}

impl<F: RemoteFile> ConnectionTestRunner<F> {
    /// Bind `target_path` with `params` and open it.
    ///
    /// The path is passed through untouched. If the open fails, the full
    /// error chain is written to `diag` and construction still succeeds.
    pub fn construct<A, W>(
        target_path: &str,
        params: ConnectionParameters,
        access: &A,
        diag: &mut W,
    ) -> Self
    where
        A: RemoteAccess<File = F>,
        W: Write + ?Sized,
    {
        tracing::info!("Binding {:?} on {}", target_path, params.endpoint());
        let handle = access.bind(&params, target_path);

        let mut runner = Self {
            params,
            target_path: target_path.to_string(),
            handle,
        };

        match runner.open_remote() {
            Ok(()) => tracing::info!("Opened {:?}", runner.target_path),
            Err(err) => report_failure(diag, &err),
        }

        runner
    }

    fn open_remote(&mut self) -> Result<()> {
        self.handle.open().with_context(|| {
            format!(
                "Failed to open {:?} on {} (zone {}, resource {})",
                self.target_path,
                self.params.endpoint(),
                self.params.zone(),
                self.params.default_storage_resource()
            )
        })
    }
}

impl<F: RemoteFile> Drop for ConnectionTestRunner<F> {
    fn drop(&mut self) {
        tracing::debug!("Releasing handle for {:?}", self.target_path);
        self.handle.close();
    }
}

fn report_failure<W: Write + ?Sized>(diag: &mut W, err: &anyhow::Error) {
    // Best effort, a closed stderr only loses the trace
    if writeln!(diag, "Error: {:?}", err).is_err() {
        tracing::error!("Could not write open failure: {:#}", err);
    }
}
