//! Authorization-code acquisition.
//!
//! [`CodeAcquirer`] obtains a single authorization code per call through
//! exactly one of two transports: an external system-browser session or an
//! embedded webview. The transport is chosen once, up front. A failure never
//! falls back to the other transport: the two contexts do not share cookie
//! or session state, so a mixed-transport retry would split the session.

pub mod redirect;

use std::sync::{Arc, Mutex};

use tokio::sync::oneshot;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{Error, Result};
use crate::transport::{
    EmbeddedWebView, ExternalBrowserAuth, NavigationDecision, NavigationInterceptor,
    PlatformPolicy,
};

pub use redirect::{parse_redirect, RedirectOutcome};

/// Which transport an acquisition attempt uses.
///
/// Computed once per [`CodeAcquirer::acquire_code`] call and fixed for its
/// duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportChoice {
    /// System/external browser session.
    ExternalBrowser,
    /// Embedded in-app webview.
    EmbeddedView,
}

/// Per-call acquisition options.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcquireOptions {
    /// Force the external browser transport regardless of platform policy.
    pub prefer_external: bool,
}

/// Obtains authorization codes through a policy-selected transport.
pub struct CodeAcquirer {
    external: Arc<dyn ExternalBrowserAuth>,
    embedded: Arc<dyn EmbeddedWebView>,
    platform: Arc<dyn PlatformPolicy>,
}

impl CodeAcquirer {
    /// Create an acquirer over the given transport collaborators.
    pub fn new(
        external: Arc<dyn ExternalBrowserAuth>,
        embedded: Arc<dyn EmbeddedWebView>,
        platform: Arc<dyn PlatformPolicy>,
    ) -> Self {
        Self {
            external,
            embedded,
            platform,
        }
    }

    /// Acquire one authorization code.
    ///
    /// `request_url` is the fully rendered authorization request;
    /// `redirect_uri` is the registered callback the provider redirects to.
    /// The chosen transport's failure is terminal for this call.
    pub async fn acquire_code(
        &self,
        request_url: &str,
        redirect_uri: &str,
        options: AcquireOptions,
    ) -> Result<String> {
        let choice = self.choose_transport(options).await;
        info!(?choice, "Starting authorization code acquisition");

        match choice {
            TransportChoice::ExternalBrowser => {
                self.acquire_external(request_url, redirect_uri).await
            }
            TransportChoice::EmbeddedView => self.acquire_embedded(request_url, redirect_uri).await,
        }
    }

    async fn choose_transport(&self, options: AcquireOptions) -> TransportChoice {
        let platform_requires = match self.platform.requires_external_transport().await {
            Ok(required) => required,
            Err(e) => {
                // Fail safe toward the embedded transport
                warn!(error = %e, "Platform policy check failed, assuming embedded is allowed");
                false
            }
        };
        if options.prefer_external || platform_requires {
            TransportChoice::ExternalBrowser
        } else {
            TransportChoice::EmbeddedView
        }
    }

    async fn acquire_external(&self, request_url: &str, redirect_uri: &str) -> Result<String> {
        let callback_scheme = Url::parse(redirect_uri)
            .map(|u| u.scheme().to_string())
            .map_err(|e| Error::InvalidRedirectUri {
                uri: redirect_uri.to_string(),
                reason: e.to_string(),
            })?;

        let result_url = self
            .external
            .authenticate(request_url, &callback_scheme, true)
            .await?;

        debug!("External browser session completed");
        code_from_redirect(&result_url)
    }

    async fn acquire_embedded(&self, request_url: &str, redirect_uri: &str) -> Result<String> {
        let (tx, rx) = oneshot::channel::<Result<String>>();
        // First signal wins: the sender is taken out of the slot exactly once.
        let slot = Arc::new(Mutex::new(Some(tx)));
        let redirect_prefix = redirect_uri.to_string();

        let interceptor: NavigationInterceptor = Arc::new(move |target: &str| {
            if !target.starts_with(redirect_prefix.as_str()) {
                return NavigationDecision::Allow;
            }
            let sender = slot.lock().ok().and_then(|mut guard| guard.take());
            if let Some(sender) = sender {
                let _ = sender.send(code_from_redirect(target));
            }
            NavigationDecision::Prevent
        });

        self.embedded.present(request_url, interceptor).await?;

        // Sender dropped without a signal means the surface went away
        let outcome = rx.await.unwrap_or(Err(Error::Dismissed));
        self.embedded.dismiss().await;
        outcome
    }
}

/// Apply the error/code extraction rules to a final redirect URL.
fn code_from_redirect(url: &str) -> Result<String> {
    match parse_redirect(url) {
        RedirectOutcome::Code(code) => Ok(code),
        RedirectOutcome::Denied { error, description } => {
            Err(Error::ProviderDenied { error, description })
        }
        RedirectOutcome::Empty => Err(Error::NoCodeInResponse),
    }
}
