//! Authorization request parameters.

use std::collections::BTreeMap;

use crate::config::url_encode;

/// An immutable authorization request: endpoint plus query parameters.
///
/// Constructed by the caller (client id, scope, PKCE values and friends are
/// its concern); the coordinator only ever consumes the rendered URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationRequest {
    endpoint: String,
    params: BTreeMap<String, String>,
}

impl AuthorizationRequest {
    /// Create a request against the given authorization endpoint.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            params: BTreeMap::new(),
        }
    }

    /// Add a query parameter, replacing any previous value for the key.
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// The authorization endpoint without parameters.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Render the full request URL with percent-encoded parameters.
    pub fn url(&self) -> String {
        if self.params.is_empty() {
            return self.endpoint.clone();
        }
        let query: Vec<String> = self
            .params
            .iter()
            .map(|(k, v)| format!("{}={}", url_encode(k), url_encode(v)))
            .collect();
        format!("{}?{}", self.endpoint, query.join("&"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_without_params() {
        let request = AuthorizationRequest::new("https://idp.example/authorize");
        assert_eq!(request.url(), "https://idp.example/authorize");
    }

    #[test]
    fn test_url_encodes_params() {
        let request = AuthorizationRequest::new("https://idp.example/authorize")
            .param("redirect_uri", "https://app.example/cb")
            .param("scope", "openid profile");
        let url = request.url();
        assert!(url.starts_with("https://idp.example/authorize?"));
        assert!(url.contains("redirect_uri=https%3A%2F%2Fapp.example%2Fcb"));
        assert!(url.contains("scope=openid%20profile"));
    }

    #[test]
    fn test_param_replaces_previous_value() {
        let request = AuthorizationRequest::new("https://idp.example/authorize")
            .param("state", "a")
            .param("state", "b");
        assert_eq!(request.url(), "https://idp.example/authorize?state=b");
    }
}
