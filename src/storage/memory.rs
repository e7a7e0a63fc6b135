//! In-memory token cache for testing.

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::TokenStore;
use crate::error::Result;
use crate::models::Token;

/// In-memory token cache, primarily for testing.
#[derive(Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<Token>>,
}

impl MemoryTokenStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with a token.
    pub fn with_token(token: Token) -> Self {
        Self {
            token: RwLock::new(Some(token)),
        }
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn load(&self) -> Result<Option<Token>> {
        Ok(self.token.read().await.clone())
    }

    async fn save(&self, token: &Token) -> Result<()> {
        *self.token.write().await = Some(token.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        *self.token.write().await = None;
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
