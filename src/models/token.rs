//! Token value type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An immutable OAuth token set.
///
/// Every field is optional: a token loaded from cache may carry only a
/// refresh token, and a provider response may omit expiry. Refresh never
/// mutates a `Token`; it produces a new value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// OAuth access token, if one has been issued.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    /// OAuth refresh token, if one has been issued.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    /// When the access token expires. `None` means no known expiry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl Token {
    /// Create a token carrying only a refresh token.
    pub fn from_refresh_token(refresh_token: impl Into<String>) -> Self {
        Self {
            access_token: None,
            refresh_token: Some(refresh_token.into()),
            expires_at: None,
        }
    }

    /// Create a fully populated token.
    pub fn new(
        access_token: impl Into<String>,
        refresh_token: Option<String>,
        expires_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            access_token: Some(access_token.into()),
            refresh_token,
            expires_at,
        }
    }

    /// True iff an access token is present, non-empty, and not expired
    /// (within the safety margin).
    #[must_use]
    pub fn has_valid_access_token(&self) -> bool {
        let present = self
            .access_token
            .as_deref()
            .is_some_and(|t| !t.is_empty());
        present && !self.is_expired()
    }

    /// True iff a non-empty refresh token is present.
    #[must_use]
    pub fn has_refresh_token(&self) -> bool {
        self.refresh_token.as_deref().is_some_and(|t| !t.is_empty())
    }

    /// Check the access token expiry against the safety margin.
    ///
    /// A token without a recorded expiry is treated as non-expiring.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires_at) => {
                let margin =
                    chrono::Duration::seconds(crate::config::EXPIRY_SAFETY_MARGIN.as_secs() as i64);
                expires_at <= Utc::now() + margin
            }
            None => false,
        }
    }
}
