//! Session vault trait.

use async_trait::async_trait;

use crate::error::Result;
use crate::session::Session;

/// Durable storage for the session snapshot.
///
/// The vault is read synchronously once at startup so a returning user is
/// authenticated before the first render; writes happen on login and
/// profile update, and the snapshot is destroyed on logout.
#[async_trait]
pub trait SessionVault: Send + Sync {
    /// Reads the persisted snapshot, if any. Synchronous so cold-start
    /// restoration can happen before the UI loop starts.
    fn load(&self) -> Result<Option<Session>>;

    /// Persists the snapshot, replacing any previous one.
    async fn save(&self, session: &Session) -> Result<()>;

    /// Removes the snapshot.
    async fn clear(&self) -> Result<()>;
}
