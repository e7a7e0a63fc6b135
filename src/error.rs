//! Crate-wide error type.

use std::path::Path;

/// Convenience alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors surfaced by the flow coordinator and its collaborators.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The identity provider denied the authorization request.
    #[error("authorization denied by provider: {error}{}", format_description(.description))]
    ProviderDenied {
        /// Machine-readable `error` query parameter.
        error: String,
        /// Optional human-readable `error_description`.
        description: Option<String>,
    },

    /// The redirect URL carried neither an error nor an authorization code.
    #[error("no authorization code in provider response")]
    NoCodeInResponse,

    /// The embedded transport has no presentation context to attach to.
    #[error("no presentation context available for embedded login")]
    NoPresentationContext,

    /// The authentication surface was dismissed before a result arrived.
    #[error("authentication surface dismissed before completion")]
    Dismissed,

    /// Transport-level failure (browser launch, network, webview load).
    #[error("transport failure: {0}")]
    Transport(String),

    /// Redirect URI could not be parsed into a callback scheme.
    #[error("invalid redirect URI '{uri}': {reason}")]
    InvalidRedirectUri { uri: String, reason: String },

    /// Token storage I/O failure.
    #[error("storage error at {path}: {reason}")]
    StorageIo { path: String, reason: String },

    /// Token storage (de)serialization failure.
    #[error("storage serialization error: {0}")]
    StorageSerialization(String),

    /// Authorization-code exchange failed.
    #[error("code exchange failed: {0}")]
    ExchangeFailed(String),

    /// Silent token refresh failed.
    #[error("token refresh failed: {0}")]
    RefreshFailed(String),

    /// Configuration problem (endpoints, paths).
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Build a [`Error::StorageIo`] from a path and reason.
    pub fn storage_io(path: impl AsRef<Path>, reason: impl Into<String>) -> Self {
        Self::StorageIo {
            path: path.as_ref().display().to_string(),
            reason: reason.into(),
        }
    }
}

fn format_description(description: &Option<String>) -> String {
    match description {
        Some(d) => format!(" ({d})"),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_denial_formats_description() {
        let err = Error::ProviderDenied {
            error: "access_denied".into(),
            description: Some("user cancelled".into()),
        };
        assert_eq!(
            err.to_string(),
            "authorization denied by provider: access_denied (user cancelled)"
        );
    }

    #[test]
    fn test_provider_denial_without_description() {
        let err = Error::ProviderDenied {
            error: "access_denied".into(),
            description: None,
        };
        assert_eq!(err.to_string(), "authorization denied by provider: access_denied");
    }
}
