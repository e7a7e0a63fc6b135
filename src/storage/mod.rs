//! Token cache backends.
//!
//! Provides the [`TokenStore`] trait and implementations:
//! - [`FileTokenStore`] - JSON file with 0600 permissions
//! - [`MemoryTokenStore`] - In-memory (testing)

mod file;
mod memory;

use async_trait::async_trait;

pub use file::FileTokenStore;
pub use memory::MemoryTokenStore;

use crate::error::Result;
use crate::models::Token;

/// Trait for token cache backends.
///
/// The coordinator assumes a single account, so the store holds at most one
/// token set. A cache miss is `Ok(None)`, not an error; errors are reserved
/// for I/O and serialization failures, and the flow controller treats both
/// outcomes as non-fatal.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Load the cached token, if any.
    async fn load(&self) -> Result<Option<Token>>;

    /// Save the token, replacing any cached value.
    async fn save(&self, token: &Token) -> Result<()>;

    /// Remove the cached token.
    async fn clear(&self) -> Result<()>;

    /// Name of this storage backend.
    fn name(&self) -> &str {
        "unknown"
    }
}

/// Blanket impl for `Arc<T>`.
#[async_trait]
impl<T: TokenStore + ?Sized> TokenStore for std::sync::Arc<T> {
    async fn load(&self) -> Result<Option<Token>> {
        (**self).load().await
    }
    async fn save(&self, token: &Token) -> Result<()> {
        (**self).save(token).await
    }
    async fn clear(&self) -> Result<()> {
        (**self).clear().await
    }
    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Blanket impl for `Box<T>`.
#[async_trait]
impl<T: TokenStore + ?Sized> TokenStore for Box<T> {
    async fn load(&self) -> Result<Option<Token>> {
        (**self).load().await
    }
    async fn save(&self, token: &Token) -> Result<()> {
        (**self).save(token).await
    }
    async fn clear(&self) -> Result<()> {
        (**self).clear().await
    }
    fn name(&self) -> &str {
        (**self).name()
    }
}
