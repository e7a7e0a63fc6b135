//! Authentication flow state machine.

mod controller;

pub use controller::{AuthFlowController, AuthFlowControllerBuilder};

use crate::models::Token;

/// Events driving the flow state machine.
///
/// Transient: each event is consumed by exactly one
/// [`AuthFlowController::handle`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthEvent {
    /// The user asked to sign in.
    LoginRequested,
    /// The host asked for a silent token refresh.
    TokenRefreshRequested,
    /// The user asked to sign out.
    LogoutRequested,
    /// A redirect URL was observed (from either transport or deep link).
    RedirectObserved { url: String },
    /// An unexpected host-side error was observed.
    ErrorObserved { description: String },
    /// A token injected for debugging, bypassing the interactive flow.
    DebugTokenInjected { token: Token },
}

/// Externally observable authentication state.
///
/// Exactly one state is current at any time; every event replaces it
/// wholesale. [`AuthState::Authenticated`] is the only variant carrying a
/// usable token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    /// Nothing has happened yet.
    Initial,
    /// No cached or refreshable credentials: the caller must run the
    /// interactive flow.
    FullFlowRequired,
    /// Signed in with a usable token.
    Authenticated { token: Token },
    /// Signed out; cache and cookies cleared.
    SignedOut,
    /// An interactive attempt failed (provider denial, missing code,
    /// exchange failure).
    AuthenticationFailed,
    /// An unexpected internal error.
    InternalError { description: String },
}

impl AuthState {
    /// The token carried by the current state, if any.
    pub fn token(&self) -> Option<&Token> {
        match self {
            Self::Authenticated { token } => Some(token),
            _ => None,
        }
    }

    /// True for states a login attempt resets before running.
    pub(crate) fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::SignedOut | Self::InternalError { .. } | Self::AuthenticationFailed
        )
    }
}
