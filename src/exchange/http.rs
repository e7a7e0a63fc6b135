//! HTTP token-endpoint client.

use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;
use tracing::{debug, info};

use super::TokenExchange;
use crate::error::{Error, Result};
use crate::models::Token;

/// Response from the provider's token endpoint.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    expires_in: Option<i64>,
}

/// Token-endpoint client using form-encoded grants per RFC 6749.
///
/// POST `{token_endpoint}` with `grant_type=authorization_code` or
/// `grant_type=refresh_token`.
pub struct HttpTokenExchange {
    client: reqwest::Client,
    token_endpoint: String,
    client_id: String,
    redirect_uri: String,
}

impl HttpTokenExchange {
    /// Create a builder for configuring the exchange client.
    pub fn builder() -> HttpTokenExchangeBuilder {
        HttpTokenExchangeBuilder::default()
    }

    async fn post_grant(&self, grant: &str, params: &[(&str, &str)]) -> Result<Token> {
        let wrap = |msg: String| match grant {
            "authorization_code" => Error::ExchangeFailed(msg),
            _ => Error::RefreshFailed(msg),
        };

        let response = self
            .client
            .post(&self.token_endpoint)
            .form(params)
            .send()
            .await
            .map_err(|e| wrap(format!("token endpoint request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(wrap(format!("token endpoint returned {}: {}", status, body)));
        }

        let data: TokenResponse = response
            .json()
            .await
            .map_err(|e| wrap(format!("failed to parse token response: {}", e)))?;

        if data.access_token.is_empty() {
            return Err(wrap("response does not contain access_token".into()));
        }

        let expires_at = data
            .expires_in
            .map(|secs| Utc::now() + chrono::Duration::seconds(secs));

        debug!(grant, "Token obtained from endpoint");
        Ok(Token::new(data.access_token, data.refresh_token, expires_at))
    }
}

#[async_trait]
impl TokenExchange for HttpTokenExchange {
    async fn exchange_code(&self, code: &str) -> Result<Token> {
        if code.is_empty() {
            return Err(Error::ExchangeFailed("empty authorization code".into()));
        }
        info!("Exchanging authorization code for tokens");
        self.post_grant(
            "authorization_code",
            &[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("client_id", &self.client_id),
                ("redirect_uri", &self.redirect_uri),
            ],
        )
        .await
    }

    async fn refresh(&self, token: &Token) -> Result<Token> {
        let refresh_token = token
            .refresh_token
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| Error::RefreshFailed("no refresh token available".into()))?;
        info!("Refreshing tokens");
        self.post_grant(
            "refresh_token",
            &[
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token),
                ("client_id", &self.client_id),
            ],
        )
        .await
    }
}

/// Builder for [`HttpTokenExchange`].
#[derive(Default)]
pub struct HttpTokenExchangeBuilder {
    client: Option<reqwest::Client>,
    token_endpoint: Option<String>,
    client_id: Option<String>,
    redirect_uri: Option<String>,
}

impl HttpTokenExchangeBuilder {
    /// Set the token endpoint URL (required).
    pub fn token_endpoint(mut self, url: impl Into<String>) -> Self {
        self.token_endpoint = Some(url.into());
        self
    }

    /// Set the OAuth client id (required).
    pub fn client_id(mut self, id: impl Into<String>) -> Self {
        self.client_id = Some(id.into());
        self
    }

    /// Set the redirect URI sent with code exchanges (required).
    pub fn redirect_uri(mut self, uri: impl Into<String>) -> Self {
        self.redirect_uri = Some(uri.into());
        self
    }

    /// Set the HTTP client (useful for testing or custom TLS config).
    pub fn client(mut self, client: reqwest::Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Build the exchange client.
    pub fn build(self) -> Result<HttpTokenExchange> {
        let token_endpoint = self
            .token_endpoint
            .ok_or_else(|| Error::Config("token_endpoint is required".into()))?;
        let client_id = self
            .client_id
            .ok_or_else(|| Error::Config("client_id is required".into()))?;
        let redirect_uri = self
            .redirect_uri
            .ok_or_else(|| Error::Config("redirect_uri is required".into()))?;
        let client = match self.client {
            Some(client) => client,
            None => reqwest::Client::builder()
                .connect_timeout(crate::config::CONNECT_TIMEOUT)
                .timeout(crate::config::REQUEST_TIMEOUT)
                .build()
                .map_err(|e| Error::Config(format!("failed to build HTTP client: {}", e)))?,
        };
        Ok(HttpTokenExchange {
            client,
            token_endpoint,
            client_id,
            redirect_uri,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_requires_endpoint() {
        let result = HttpTokenExchange::builder().client_id("c").redirect_uri("r").build();
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[tokio::test]
    async fn test_refresh_without_refresh_token() {
        let exchange = HttpTokenExchange::builder()
            .token_endpoint("https://idp.example/token")
            .client_id("client")
            .redirect_uri("app://cb")
            .build()
            .unwrap();
        let result = exchange.refresh(&Token::default()).await;
        assert!(matches!(result, Err(Error::RefreshFailed(_))));
    }

    #[tokio::test]
    async fn test_exchange_rejects_empty_code() {
        let exchange = HttpTokenExchange::builder()
            .token_endpoint("https://idp.example/token")
            .client_id("client")
            .redirect_uri("app://cb")
            .build()
            .unwrap();
        let result = exchange.exchange_code("").await;
        assert!(matches!(result, Err(Error::ExchangeFailed(_))));
    }
}
