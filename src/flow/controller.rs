//! Flow controller: event reducer plus state owner.

use std::sync::Arc;

use tokio::sync::{watch, RwLock};
use tracing::{debug, info, warn};

use super::{AuthEvent, AuthState};
use crate::acquire::{parse_redirect, RedirectOutcome};
use crate::error::{Error, Result};
use crate::exchange::TokenExchange;
use crate::models::Token;
use crate::storage::TokenStore;
use crate::transport::CookieStore;

/// Drives the token lifecycle as a finite-state machine.
///
/// Owns the single current [`AuthState`]. Each [`handle`](Self::handle) call
/// reduces `(state, event)` to the next state, runs any collaborator calls
/// the transition requires, and publishes the result to observers.
///
/// Collaborator failures never escape `handle`: recoverable ones degrade to
/// [`AuthState::FullFlowRequired`], interactive ones surface as
/// [`AuthState::AuthenticationFailed`].
pub struct AuthFlowController {
    state: RwLock<AuthState>,
    observers: watch::Sender<AuthState>,
    store: Arc<dyn TokenStore>,
    exchange: Arc<dyn TokenExchange>,
    cookies: Arc<dyn CookieStore>,
}

impl AuthFlowController {
    /// Create a builder for configuring the controller.
    pub fn builder() -> AuthFlowControllerBuilder {
        AuthFlowControllerBuilder::default()
    }

    /// Create a controller over the given collaborators, starting at
    /// [`AuthState::Initial`].
    pub fn new(
        store: Arc<dyn TokenStore>,
        exchange: Arc<dyn TokenExchange>,
        cookies: Arc<dyn CookieStore>,
    ) -> Self {
        let (observers, _) = watch::channel(AuthState::Initial);
        Self {
            state: RwLock::new(AuthState::Initial),
            observers,
            store,
            exchange,
            cookies,
        }
    }

    /// Snapshot of the current state.
    pub async fn state(&self) -> AuthState {
        self.state.read().await.clone()
    }

    /// Subscribe to state changes.
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.observers.subscribe()
    }

    /// Feed one event through the state machine and return the next state.
    ///
    /// Events are serialized: a second `handle` call waits until the first
    /// has run to completion.
    pub async fn handle(&self, event: AuthEvent) -> AuthState {
        let mut state = self.state.write().await;
        debug!(current = ?*state, event = ?event, "Handling auth event");

        let next = self.reduce(&state, event).await;
        // State transitions are the unit of observable behavior: a no-op
        // reduction must not wake subscribers
        if next != *state {
            info!(next = ?next, "Auth state transition");
            *state = next.clone();
            let _ = self.observers.send(next.clone());
        }
        next
    }

    async fn reduce(&self, current: &AuthState, event: AuthEvent) -> AuthState {
        match event {
            AuthEvent::LoginRequested => {
                if current.is_terminal() {
                    debug!("Resetting terminal state before login");
                }
                self.login().await
            }
            AuthEvent::TokenRefreshRequested => match current.token() {
                Some(token) => self.refresh(&token.clone()).await,
                None => AuthState::FullFlowRequired,
            },
            AuthEvent::LogoutRequested => self.logout().await,
            AuthEvent::RedirectObserved { url } => self.redirect(current, &url).await,
            AuthEvent::ErrorObserved { description } => {
                warn!(description = %description, "Error observed");
                AuthState::InternalError { description }
            }
            AuthEvent::DebugTokenInjected { token } => {
                if let Err(e) = self.store.save(&token).await {
                    warn!(error = %e, "Failed to persist injected token");
                }
                AuthState::Authenticated { token }
            }
        }
    }

    /// Login sequence: cache lookup, then silent refresh, then full flow.
    async fn login(&self) -> AuthState {
        let cached = match self.store.load().await {
            Ok(cached) => cached,
            Err(e) => {
                warn!(store = self.store.name(), error = %e, "Token cache load failed");
                None
            }
        };

        match cached {
            Some(token) if token.has_valid_access_token() => {
                debug!("Cached access token is valid");
                AuthState::Authenticated { token }
            }
            Some(token) if token.has_refresh_token() => self.refresh(&token).await,
            _ => AuthState::FullFlowRequired,
        }
    }

    /// Refresh sequence shared by login and explicit refresh requests.
    ///
    /// Every path that cannot produce a valid access token collapses to
    /// `FullFlowRequired`; the cache is cleared only when the provider
    /// itself returned an unusable token, not on transport failures.
    async fn refresh(&self, token: &Token) -> AuthState {
        match self.exchange.refresh(token).await {
            Ok(new_token) if new_token.has_valid_access_token() => {
                if let Err(e) = self.store.save(&new_token).await {
                    warn!(error = %e, "Failed to persist refreshed token");
                }
                AuthState::Authenticated { token: new_token }
            }
            Ok(_) => {
                info!("Provider returned token without usable access token, clearing cache");
                if let Err(e) = self.store.clear().await {
                    warn!(error = %e, "Failed to clear token cache");
                }
                AuthState::FullFlowRequired
            }
            Err(e) => {
                warn!(error = %e, "Silent refresh failed");
                AuthState::FullFlowRequired
            }
        }
    }

    async fn logout(&self) -> AuthState {
        if let Err(e) = self.cookies.clear().await {
            warn!(error = %e, "Failed to clear transport cookies");
        }
        if let Err(e) = self.store.clear().await {
            warn!(error = %e, "Failed to clear token cache");
        }
        info!("Signed out");
        AuthState::SignedOut
    }

    async fn redirect(&self, current: &AuthState, url: &str) -> AuthState {
        match parse_redirect(url) {
            RedirectOutcome::Denied { error, description } => {
                warn!(error = %error, description = ?description, "Provider denied authorization");
                AuthState::AuthenticationFailed
            }
            RedirectOutcome::Code(code) => match self.exchange_code(&code).await {
                Ok(token) => AuthState::Authenticated { token },
                Err(e) => {
                    warn!(error = %e, "Code exchange did not produce a usable token");
                    AuthState::AuthenticationFailed
                }
            },
            RedirectOutcome::Empty => {
                // Intermediate navigation carrying neither code nor error
                debug!(url = %url, "Redirect without code or error, state unchanged");
                current.clone()
            }
        }
    }

    async fn exchange_code(&self, code: &str) -> Result<Token> {
        let token = self.exchange.exchange_code(code).await?;
        if !token.has_valid_access_token() {
            return Err(Error::ExchangeFailed(
                "provider returned token without usable access token".into(),
            ));
        }
        if let Err(e) = self.store.save(&token).await {
            warn!(error = %e, "Failed to persist exchanged token");
        }
        Ok(token)
    }
}

/// Builder for [`AuthFlowController`].
#[derive(Default)]
pub struct AuthFlowControllerBuilder {
    store: Option<Arc<dyn TokenStore>>,
    exchange: Option<Arc<dyn TokenExchange>>,
    cookies: Option<Arc<dyn CookieStore>>,
}

impl AuthFlowControllerBuilder {
    /// Set the token cache backend (required).
    pub fn store(mut self, store: Arc<dyn TokenStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Set the token exchange collaborator (required).
    pub fn exchange(mut self, exchange: Arc<dyn TokenExchange>) -> Self {
        self.exchange = Some(exchange);
        self
    }

    /// Set the cookie store cleared on logout (required).
    pub fn cookies(mut self, cookies: Arc<dyn CookieStore>) -> Self {
        self.cookies = Some(cookies);
        self
    }

    /// Build the controller.
    pub fn build(self) -> Result<AuthFlowController> {
        let store = self
            .store
            .ok_or_else(|| Error::Config("token store is required".into()))?;
        let exchange = self
            .exchange
            .ok_or_else(|| Error::Config("token exchange is required".into()))?;
        let cookies = self
            .cookies
            .ok_or_else(|| Error::Config("cookie store is required".into()))?;
        Ok(AuthFlowController::new(store, exchange, cookies))
    }
}
