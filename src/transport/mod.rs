//! Transport collaborators for interactive authentication.
//!
//! The coordinator never talks to a browser or webview directly; it drives
//! these traits. Host applications supply implementations bound to their UI
//! toolkit, and tests supply mocks.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;

/// Decision returned by a navigation interceptor for a single request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationDecision {
    /// Let the navigation proceed.
    Allow,
    /// Block the navigation.
    Prevent,
}

/// Synchronous per-navigation predicate installed on an embedded surface.
///
/// Invoked once per navigation request with the target URL. Must stay cheap:
/// it runs on the surface's callback path.
pub type NavigationInterceptor = Arc<dyn Fn(&str) -> NavigationDecision + Send + Sync>;

/// System/external browser authentication session.
#[async_trait]
pub trait ExternalBrowserAuth: Send + Sync {
    /// Run an authentication session in the system browser context and
    /// return the redirect URL the provider sent the user back to.
    ///
    /// `callback_scheme` is the URL scheme the session watches for;
    /// `ephemeral` requests a non-persistent session (no shared cookies).
    /// Implementations map user cancellation and launch failures into
    /// [`Error::Transport`](crate::Error::Transport).
    async fn authenticate(&self, url: &str, callback_scheme: &str, ephemeral: bool)
        -> Result<String>;
}

/// Embedded in-app web surface.
#[async_trait]
pub trait EmbeddedWebView: Send + Sync {
    /// Load `url` into the embedded surface, routing every navigation
    /// request through `interceptor`. Returns once the surface is up, or
    /// [`Error::NoPresentationContext`](crate::Error::NoPresentationContext)
    /// when no presentation context is available.
    ///
    /// Implementations must drop the interceptor when the surface goes away
    /// (user back-navigation included) so that a pending acquisition can
    /// observe abandonment instead of hanging.
    async fn present(&self, url: &str, interceptor: NavigationInterceptor) -> Result<()>;

    /// Dismiss the surface if it is still showing. Idempotent.
    async fn dismiss(&self);
}

/// Cookie jar shared with the embedded transport's redirect-URI context.
///
/// Cleared on logout, independently of the token cache.
#[async_trait]
pub trait CookieStore: Send + Sync {
    /// Remove all cookies from the jar.
    async fn clear(&self) -> Result<()>;
}

/// Pluggable platform policy for forcing the external transport.
#[async_trait]
pub trait PlatformPolicy: Send + Sync {
    /// True when the platform cannot host the embedded transport and the
    /// external browser must be used. Failures are treated as `false` by
    /// the caller.
    async fn requires_external_transport(&self) -> Result<bool>;
}

/// Fixed-answer platform policy.
///
/// The platform rules that force the external browser are environment
/// specific; hosts with real detection needs supply their own
/// [`PlatformPolicy`].
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticPlatformPolicy {
    requires_external: bool,
}

impl StaticPlatformPolicy {
    /// Policy with a fixed answer.
    pub fn new(requires_external: bool) -> Self {
        Self { requires_external }
    }
}

#[async_trait]
impl PlatformPolicy for StaticPlatformPolicy {
    async fn requires_external_transport(&self) -> Result<bool> {
        Ok(self.requires_external)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_policy() {
        assert!(!StaticPlatformPolicy::default()
            .requires_external_transport()
            .await
            .unwrap());
        assert!(StaticPlatformPolicy::new(true)
            .requires_external_transport()
            .await
            .unwrap());
    }
}
