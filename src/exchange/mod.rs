//! Authorization-code and refresh-token exchange.

mod http;

use async_trait::async_trait;

pub use http::{HttpTokenExchange, HttpTokenExchangeBuilder};

use crate::error::Result;
use crate::models::Token;

/// Trait for exchanging credentials with the identity provider's token
/// endpoint.
///
/// Both operations may fail with transport or provider errors; the flow
/// controller catches these at the sequence boundary and degrades to the
/// interactive flow rather than propagating them.
#[async_trait]
pub trait TokenExchange: Send + Sync {
    /// Exchange an authorization code for a token set.
    async fn exchange_code(&self, code: &str) -> Result<Token>;

    /// Obtain a new token set from a refresh token.
    async fn refresh(&self, token: &Token) -> Result<Token>;
}

/// Blanket impl for `Arc<T>`.
#[async_trait]
impl<T: TokenExchange + ?Sized> TokenExchange for std::sync::Arc<T> {
    async fn exchange_code(&self, code: &str) -> Result<Token> {
        (**self).exchange_code(code).await
    }
    async fn refresh(&self, token: &Token) -> Result<Token> {
        (**self).refresh(token).await
    }
}
