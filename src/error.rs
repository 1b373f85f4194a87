//! Error types returned by the token store

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::utils::constants::{ENV_ACCESS_TOKEN_URL, ENV_ACCESS_TOKEN_URL_LEGACY};

pub type Result<T, E = TokenError> = std::result::Result<T, E>;

/// Root error type for token lookups and refreshes.
#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid OAuth credentials: {0}")]
    InvalidCredentials(#[from] CredentialsError),

    #[error("Invalid token response: {0}")]
    InvalidTokenResponse(#[from] TokenResponseError),

    #[error("Token endpoint request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to read token file {}: {source}", .path.display())]
    TokenFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Access token \"{0}\" is not managed")]
    NotManaged(String),
}

/// Coarse classification of [`TokenError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    InvalidCredentials,
    InvalidTokenResponse,
    Transport,
    NotManaged,
}

impl TokenError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Configuration(_) => ErrorKind::Configuration,
            Self::InvalidCredentials(_) => ErrorKind::InvalidCredentials,
            Self::InvalidTokenResponse(_) => ErrorKind::InvalidTokenResponse,
            Self::Http(_) | Self::TokenFile { .. } => ErrorKind::Transport,
            Self::NotManaged(_) => ErrorKind::NotManaged,
        }
    }

    pub(crate) fn missing_token_url() -> Self {
        Self::Configuration(format!(
            "Missing OAuth access token URL. Either set {} (or the legacy {}) or use configure(token_endpoint_url=..).",
            ENV_ACCESS_TOKEN_URL, ENV_ACCESS_TOKEN_URL_LEGACY
        ))
    }
}

/// Problems with `user.json` / `client.json` or with file-only token lookup.
#[derive(Error, Debug)]
pub enum CredentialsError {
    #[error("Failed to read {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Missing key: '{0}'")]
    MissingKey(&'static str),

    #[error("Failed to read token \"{name}\" from {}.", .dir.display())]
    NoTokenFile { name: String, dir: PathBuf },
}

/// Problems with the body returned by the token endpoint.
#[derive(Error, Debug)]
pub enum TokenResponseError {
    #[error("Expected a JSON object with keys \"expires_in\" and \"access_token\": {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Expected a JSON object with keys \"expires_in\" and \"access_token\": missing '{0}'")]
    MissingKey(&'static str),

    #[error("Expected a JSON object with keys \"expires_in\" and \"access_token\": invalid '{0}' value")]
    InvalidValue(&'static str),

    #[error("Empty \"access_token\" value")]
    EmptyAccessToken,
}
