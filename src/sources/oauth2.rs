use reqwest::Client;
use secrecy::ExposeSecret;
use serde_json::Value;
use tracing::debug;

use crate::config::settings::Configuration;
use crate::error::{Result, TokenResponseError};
use crate::sources::credentials::{ClientCredentials, UserCredentials};
use crate::utils::constants::USER_AGENT;

/// Token endpoint client for the resource owner password credentials grant
#[derive(Debug, Clone)]
pub struct OAuth2Source {
    pub url: String,
    pub client: Client,
}

/// Validated token endpoint response
#[derive(Debug, Clone, PartialEq)]
pub struct TokenResponse {
    pub access_token: String,
    pub expires_in: i64,
    pub raw: Value,
}

impl OAuth2Source {
    /// Build a client with the timeouts of the current configuration
    pub fn new(config: &Configuration) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout()?)
            .read_timeout(config.read_timeout()?)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            url: config.token_endpoint_url.clone(),
            client,
        })
    }

    pub async fn fetch_token(
        &self,
        user: &UserCredentials,
        client: &ClientCredentials,
        scope: &str,
    ) -> Result<TokenResponse> {
        let form = [
            ("grant_type", "password"),
            ("username", user.username.as_str()),
            ("password", user.password.expose_secret().as_str()),
            ("scope", scope),
        ];

        let response = self
            .client
            .post(&self.url)
            .basic_auth(&client.client_id, Some(client.client_secret.expose_secret()))
            .form(&form)
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;
        debug!("token endpoint answered with {} bytes", body.len());
        Ok(parse_token_response(&body)?)
    }
}

/// The body must be a JSON object with a numeric `expires_in` and a
/// non-empty string `access_token`.
pub fn parse_token_response(body: &str) -> Result<TokenResponse, TokenResponseError> {
    let raw: Value = serde_json::from_str(body)?;

    let expires_in = raw
        .get("expires_in")
        .ok_or(TokenResponseError::MissingKey("expires_in"))?;
    let expires_in = expires_in
        .as_i64()
        .or_else(|| expires_in.as_f64().filter(|secs| secs.is_finite()).map(|secs| secs as i64))
        .ok_or(TokenResponseError::InvalidValue("expires_in"))?;

    let access_token = raw
        .get("access_token")
        .ok_or(TokenResponseError::MissingKey("access_token"))?
        .as_str()
        .ok_or(TokenResponseError::InvalidValue("access_token"))?;
    if access_token.is_empty() {
        return Err(TokenResponseError::EmptyAccessToken);
    }

    Ok(TokenResponse {
        access_token: access_token.to_owned(),
        expires_in,
        raw,
    })
}
