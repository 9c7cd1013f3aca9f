//! File-backed session vault implementation.

use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;

use jobscope_core::error::{JobscopeError, Result};
use jobscope_core::session::Session;
use jobscope_core::vault::SessionVault;

use crate::paths::JobscopePaths;
use crate::storage::AtomicFile;

/// Stores the session snapshot as a single TOML file.
///
/// Writes run through `spawn_blocking` so the UI loop never waits on disk;
/// the cold-start read is deliberately synchronous (see [`SessionVault`]).
pub struct FileSessionVault {
    file: Arc<AtomicFile<Session>>,
}

impl FileSessionVault {
    /// Creates a vault at the default platform location
    /// (`<config dir>/jobscope/session.toml`).
    pub fn default_location() -> Result<Self> {
        let path = JobscopePaths::session_file()
            .map_err(|e| JobscopeError::storage(format!("Failed to resolve session path: {}", e)))?;
        Ok(Self::new(path))
    }

    /// Creates a vault backed by an explicit file path.
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: Arc::new(AtomicFile::new(path)),
        }
    }
}

#[async_trait]
impl SessionVault for FileSessionVault {
    fn load(&self) -> Result<Option<Session>> {
        match self.file.load() {
            Ok(snapshot) => Ok(snapshot),
            // A corrupt snapshot must not brick startup; treat it as absent.
            Err(JobscopeError::Serialization { format, message }) => {
                tracing::warn!(
                    "Discarding unreadable session snapshot ({}): {}",
                    format,
                    message
                );
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    async fn save(&self, session: &Session) -> Result<()> {
        let file = self.file.clone();
        let session = session.clone();
        tokio::task::spawn_blocking(move || file.save(&session))
            .await
            .map_err(|e| JobscopeError::internal(format!("Failed to join task: {}", e)))?
    }

    async fn clear(&self) -> Result<()> {
        let file = self.file.clone();
        tokio::task::spawn_blocking(move || file.remove())
            .await
            .map_err(|e| JobscopeError::internal(format!("Failed to join task: {}", e)))?
    }
}
