use crate::clickup::client::{ClickUpClient, Result};
use crate::error::FetchError;
use crate::model::OAuthConfig;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    access_token: Option<String>,
}

pub trait ClickUpOAuth {
    /// Trades an authorization code for an access token.
    async fn exchange_code(&self, oauth: &OAuthConfig, code: &str) -> Result<String>;
}

impl ClickUpOAuth for ClickUpClient {
    async fn exchange_code(&self, oauth: &OAuthConfig, code: &str) -> Result<String> {
        let form = [
            ("client_id", oauth.client_id.as_str()),
            ("client_secret", oauth.client_secret.as_str()),
            ("code", code),
            ("redirect_uri", oauth.redirect_uri.as_str()),
        ];
        let response: TokenResponse = self.post_form("oauth/token", &form).await?;
        response
            .access_token
            .filter(|token| !token.is_empty())
            .ok_or_else(|| FetchError::InvalidPayload {
                url: self.url("oauth/token"),
                reason: "response has no access_token".to_string(),
            })
    }
}
