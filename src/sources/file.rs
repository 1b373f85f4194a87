use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::cache::token::TokenRecord;
use crate::error::{Result, TokenError};
use crate::helpers::time::expires_in;
use crate::utils::constants::{FILE_TOKEN_VALIDITY_SECS, TOKEN_SECRET_FILE_SUFFIX};

pub fn token_secret_path(dir: &Path, token_name: &str) -> PathBuf {
    dir.join(format!("{}{}", token_name, TOKEN_SECRET_FILE_SUFFIX))
}

/// Read `<dir>/<token_name>-token-secret`.
///
/// A missing or blank file means no file based token is available. The
/// returned token is only trusted for a short window so the file, which
/// may be rotated externally, is consulted again soon.
pub async fn read_token_from_file(dir: &Path, token_name: &str) -> Result<Option<TokenRecord>> {
    let path = token_secret_path(dir, token_name);
    let content = match tokio::fs::read_to_string(&path).await {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(source) => return Err(TokenError::TokenFile { path, source }),
    };

    let access_token = content.trim();
    if access_token.is_empty() {
        debug!("token file {} is empty", path.display());
        return Ok(None);
    }

    info!("Using access token \"{}\" from {}", token_name, path.display());
    Ok(Some(TokenRecord {
        name: token_name.to_owned(),
        access_token: Some(access_token.to_owned()),
        expires_at: expires_in(FILE_TOKEN_VALIDITY_SECS),
        ..TokenRecord::default()
    }))
}
