use std::path::{Path, PathBuf};

use secrecy::SecretString;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::{CredentialsError, Result};
use crate::utils::constants::{CLIENT_CREDENTIALS_FILE, USER_CREDENTIALS_FILE};

/// Resource owner credentials from `user.json`
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub username: String,
    pub password: SecretString,
}

/// OAuth client credentials from `client.json`
#[derive(Debug, Clone)]
pub struct ClientCredentials {
    pub client_id: String,
    pub client_secret: SecretString,
}

#[derive(Debug, Deserialize)]
struct UserFile {
    application_username: Option<String>,
    application_password: Option<SecretString>,
}

#[derive(Debug, Deserialize)]
struct ClientFile {
    client_id: Option<String>,
    client_secret: Option<SecretString>,
}

/// Read `user.json` and `client.json` from `dir`.
///
/// Both files are read on every call since they may be rotated on disk.
/// Each file is checked on its own so the error names the broken one.
pub async fn read_credentials(dir: &Path) -> Result<(UserCredentials, ClientCredentials)> {
    let user: UserFile = read_json(dir.join(USER_CREDENTIALS_FILE)).await?;
    let client: ClientFile = read_json(dir.join(CLIENT_CREDENTIALS_FILE)).await?;

    let user = UserCredentials {
        username: user
            .application_username
            .ok_or(CredentialsError::MissingKey("application_username"))?,
        password: user
            .application_password
            .ok_or(CredentialsError::MissingKey("application_password"))?,
    };
    let client = ClientCredentials {
        client_id: client.client_id.ok_or(CredentialsError::MissingKey("client_id"))?,
        client_secret: client
            .client_secret
            .ok_or(CredentialsError::MissingKey("client_secret"))?,
    };
    Ok((user, client))
}

async fn read_json<T: DeserializeOwned>(path: PathBuf) -> Result<T, CredentialsError> {
    let content = match tokio::fs::read_to_string(&path).await {
        Ok(content) => content,
        Err(source) => return Err(CredentialsError::Unreadable { path, source }),
    };
    serde_json::from_str(&content).map_err(|e| CredentialsError::Unreadable {
        path,
        source: e.into(),
    })
}
