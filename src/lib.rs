//! # authcode-flow
//!
//! OAuth 2.0 authorization-code flow coordinator: obtains, caches,
//! refreshes, and invalidates access tokens, acquiring the initial
//! authorization code through either a system browser session or an
//! embedded in-app webview.
//!
//! Two components:
//!
//! - [`CodeAcquirer`] obtains a single authorization code per call through
//!   exactly one transport, chosen by policy, with no cross-transport
//!   fallback.
//! - [`AuthFlowController`] is a finite-state machine over
//!   [`AuthEvent`]s that drives the token lifecycle against pluggable
//!   [`TokenStore`], [`TokenExchange`], and [`CookieStore`] collaborators.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use authcode_flow::{
//!     AuthEvent, AuthFlowController, AuthState, FileTokenStore, HttpTokenExchange, Result,
//! };
//! # use authcode_flow::CookieStore;
//! # struct NoCookies;
//! # #[async_trait::async_trait]
//! # impl CookieStore for NoCookies {
//! #     async fn clear(&self) -> Result<()> { Ok(()) }
//! # }
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let exchange = HttpTokenExchange::builder()
//!         .token_endpoint("https://idp.example/oauth/token")
//!         .client_id("my-client")
//!         .redirect_uri("myapp://callback")
//!         .build()?;
//!
//!     let controller = AuthFlowController::builder()
//!         .store(Arc::new(FileTokenStore::default_path()?))
//!         .exchange(Arc::new(exchange))
//!         .cookies(Arc::new(NoCookies))
//!         .build()?;
//!
//!     match controller.handle(AuthEvent::LoginRequested).await {
//!         AuthState::Authenticated { .. } => println!("signed in"),
//!         AuthState::FullFlowRequired => println!("interactive login needed"),
//!         other => println!("login ended in {:?}", other),
//!     }
//!     Ok(())
//! }
//! ```

pub mod acquire;
pub mod config;
pub mod error;
pub mod exchange;
pub mod flow;
pub mod models;
pub mod storage;
pub mod transport;

// Re-exports for ergonomic usage
pub use acquire::{AcquireOptions, CodeAcquirer, RedirectOutcome, TransportChoice};
pub use error::{Error, Result};
pub use exchange::{HttpTokenExchange, TokenExchange};
pub use flow::{AuthEvent, AuthFlowController, AuthState};
pub use models::{AuthorizationRequest, Token};
pub use storage::{FileTokenStore, MemoryTokenStore, TokenStore};
pub use transport::{
    CookieStore, EmbeddedWebView, ExternalBrowserAuth, NavigationDecision, NavigationInterceptor,
    PlatformPolicy, StaticPlatformPolicy,
};
