//! Filesystem collaborator
//!
//! The resolver only ever reads through an [`AssetSource`]. Failures are
//! classified into [`SourceError::NotFound`] or [`SourceError::Other`] right
//! here, where the `std::io::Error` is produced.

use std::future::Future;
use std::io;
use std::path::Path;
use std::time::SystemTime;
use thiserror::Error;
use tokio::fs;

/// Raw file contents plus its modification time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    pub bytes: Vec<u8>,
    /// `None` when the platform or filesystem does not report mtime
    pub modified: Option<SystemTime>,
}

/// Classified read failure
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("entry does not exist")]
    NotFound,

    #[error(transparent)]
    Other(io::Error),
}

impl From<io::Error> for SourceError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => Self::NotFound,
            _ => Self::Other(err),
        }
    }
}

/// Read-only access to servable files
pub trait AssetSource: Send + Sync {
    /// Load the file at `path`, already joined with the static root
    fn load(&self, path: &Path) -> impl Future<Output = Result<Asset, SourceError>> + Send;
}

/// [`AssetSource`] backed by the local filesystem via `tokio::fs`
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFs;

impl AssetSource for LocalFs {
    async fn load(&self, path: &Path) -> Result<Asset, SourceError> {
        // Metadata is only needed on success, so both calls can run together
        let (bytes, metadata) = tokio::join!(fs::read(path), fs::metadata(path));
        let bytes = bytes?;
        let modified = metadata.ok().and_then(|m| m.modified().ok());
        Ok(Asset { bytes, modified })
    }
}
