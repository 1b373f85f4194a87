use tracing::{debug, warn};

use crate::cache::token::TokenRecord;
use crate::cache::token_store::TokenStore;
use crate::error::{Result, TokenResponseError};
use crate::helpers::time::now_i64;

/// How a failed refresh is handled for a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    /// old token is expired by less than the tolerance window
    StillValid,
    /// old token is expired but the record ignores expiration
    IgnoringExpiration,
    /// no usable old token, the refresh error goes to the caller
    Propagate,
}

/// Decide what a failed refresh of `record` means at `now`
pub fn fallback_for(record: &TokenRecord, now: i64) -> Fallback {
    if record.within_tolerance(now) {
        Fallback::StillValid
    } else if record.cached_token().is_some() && record.ignore_expiration {
        Fallback::IgnoringExpiration
    } else {
        Fallback::Propagate
    }
}

impl TokenStore {
    /// Return the access token for `name`, refreshing it first when it is
    /// missing or about to expire.
    ///
    /// Concurrent callers for the same name wait for a single refresh.
    pub async fn get(&self, name: &str) -> Result<String> {
        let entry = self.entry(name).await?;
        let mut record = entry.lock().await;

        if !record.needs_refresh(now_i64()) {
            if let Some(token) = record.cached_token() {
                debug!("cached access token \"{}\" is fresh", name);
                return Ok(token.to_owned());
            }
        }

        match self.refresh_record(&mut record).await {
            Ok(()) => record
                .cached_token()
                .map(str::to_owned)
                .ok_or_else(|| TokenResponseError::EmptyAccessToken.into()),
            Err(err) => {
                let previous = record.cached_token().map(str::to_owned);
                match (fallback_for(&record, now_i64()), previous) {
                    (Fallback::StillValid, Some(token)) => {
                        warn!(token = name, error = %err, "Failed to refresh access token (but it is still valid)");
                        Ok(token)
                    }
                    (Fallback::IgnoringExpiration, Some(token)) => {
                        warn!(token = name, error = %err, "Failed to refresh access token (ignoring expiration)");
                        Ok(token)
                    }
                    _ => Err(err),
                }
            }
        }
    }
}
