use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use tracing::debug;

use crate::cache::token::{dedup_scopes, TokenRecord};
use crate::config::settings::{Configuration, ConfigurationPatch};
use crate::error::{Result, TokenError};

/// One managed record; the lock is held for the duration of a refresh
pub(crate) type TokenEntry = Arc<Mutex<TokenRecord>>;

/// Token name -> token state, plus the configuration refreshes run with.
///
/// Cloning is cheap and every clone shares the same records.
#[derive(Debug, Clone, Default)]
pub struct TokenStore {
    config: Arc<RwLock<Configuration>>,
    records: Arc<RwLock<HashMap<String, TokenEntry>>>,
}

impl TokenStore {
    pub fn new(config: Configuration) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
            records: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Store seeded from the process environment, fixed tokens included
    pub async fn from_env() -> Self {
        let store = Self::new(Configuration::from_env());
        store.init_fixed_tokens_from_env().await;
        store
    }

    /// Merge the given fields into the current configuration
    pub async fn configure(&self, patch: ConfigurationPatch) {
        self.config.write().await.merge(patch);
    }

    /// Snapshot of the current configuration
    pub async fn config(&self) -> Configuration {
        self.config.read().await.clone()
    }

    /// Register a token name. Re-registering resets scopes and flags
    /// but keeps an already fetched access token.
    pub async fn manage<I, S>(&self, name: &str, scopes: I, ignore_expiration: bool)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let scopes = dedup_scopes(scopes.into_iter().map(Into::into).collect());
        let existing = {
            let mut records = self.records.write().await;
            match records.get(name) {
                Some(entry) => Some(entry.clone()),
                None => {
                    let record = TokenRecord::new(name, scopes.clone(), ignore_expiration);
                    records.insert(name.to_owned(), Arc::new(Mutex::new(record)));
                    None
                }
            }
        };
        if let Some(entry) = existing {
            let mut record = entry.lock().await;
            record.scopes = scopes;
            record.ignore_expiration = ignore_expiration;
        }
        debug!("managing access token \"{}\"", name);
        self.init_fixed_tokens_from_env().await;
    }

    /// Reserved for background refresh; refreshes currently happen inline in `get`.
    pub fn start(&self) {}

    /// Drop every record
    pub async fn reset(&self) {
        self.records.write().await.clear();
    }

    /// Replace the record stored under `record.name`
    pub async fn insert_record(&self, record: TokenRecord) {
        self.records
            .write()
            .await
            .insert(record.name.clone(), Arc::new(Mutex::new(record)));
    }

    /// Snapshot of a managed record
    pub async fn record(&self, name: &str) -> Result<TokenRecord> {
        let entry = self.entry(name).await?;
        let record = entry.lock().await;
        Ok(record.clone())
    }

    /// Names of all managed tokens, sorted
    pub async fn managed(&self) -> Vec<String> {
        let mut names: Vec<String> = self.records.read().await.keys().cloned().collect();
        names.sort();
        names
    }

    /// Store the value and expiry of `token`, creating the record if needed.
    /// Scopes and flags of an existing record are kept; an endpoint payload
    /// from an earlier refresh no longer describes the value and is dropped.
    pub(crate) async fn merge_token(&self, token: TokenRecord) {
        let existing = {
            let mut records = self.records.write().await;
            match records.get(&token.name) {
                Some(entry) => Some(entry.clone()),
                None => {
                    records.insert(token.name.clone(), Arc::new(Mutex::new(token.clone())));
                    None
                }
            }
        };
        if let Some(entry) = existing {
            let mut record = entry.lock().await;
            record.access_token = token.access_token;
            record.expires_at = token.expires_at;
            record.last_response = None;
        }
    }

    pub(crate) async fn entry(&self, name: &str) -> Result<TokenEntry> {
        self.records
            .read()
            .await
            .get(name)
            .cloned()
            .ok_or_else(|| TokenError::NotManaged(name.to_owned()))
    }
}
