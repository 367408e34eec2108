mod icommands;

use anyhow::Result;

use crate::models::ConnectionParameters;

pub use icommands::IcommandsAccess;

/// Entry point into a remote-access library.
pub trait RemoteAccess {
    type File: RemoteFile;

    /// Bind a handle to `path`. Nothing is contacted until [`RemoteFile::open`].
    fn bind(&self, params: &ConnectionParameters, path: &str) -> Self::File;
}

/// A file on the grid, bound to a path and a parameter set.
pub trait RemoteFile {
    fn open(&mut self) -> Result<()>;

    /// Release whatever `open` acquired. Safe to call more than once.
    fn close(&mut self);
}
