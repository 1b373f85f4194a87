use tracing::info;

use crate::cache::token::TokenRecord;
use crate::cache::token_store::TokenStore;
use crate::error::{CredentialsError, Result, TokenError};
use crate::helpers::time::expires_in;
use crate::sources::credentials::read_credentials;
use crate::sources::file::read_token_from_file;
use crate::sources::oauth2::OAuth2Source;

impl TokenStore {
    /// Refresh `name` now, regardless of how fresh the cached token is.
    pub async fn refresh(&self, name: &str) -> Result<TokenRecord> {
        let entry = self.entry(name).await?;
        let mut record = entry.lock().await;
        self.refresh_record(&mut record).await?;
        Ok(record.clone())
    }

    /// One refresh attempt. The record is only touched on success.
    pub(crate) async fn refresh_record(&self, record: &mut TokenRecord) -> Result<()> {
        let config = self.config().await;

        // a secret file always wins over the token endpoint
        if let Some(from_file) = read_token_from_file(&config.credentials_dir, &record.name).await? {
            record.access_token = from_file.access_token;
            record.expires_at = from_file.expires_at;
            record.last_response = None;
            return Ok(());
        }
        if config.from_file_only {
            return Err(CredentialsError::NoTokenFile {
                name: record.name.clone(),
                dir: config.credentials_dir.clone(),
            }
            .into());
        }

        info!("Refreshing access token \"{}\"..", record.name);
        if config.token_endpoint_url.is_empty() {
            return Err(TokenError::missing_token_url());
        }

        let (user, client) = read_credentials(&config.credentials_dir).await?;
        let source = OAuth2Source::new(&config)?;
        let response = source.fetch_token(&user, &client, &record.scope_param()).await?;

        record.access_token = Some(response.access_token);
        record.expires_at = expires_in(response.expires_in);
        record.last_response = Some(response.raw);
        Ok(())
    }
}
