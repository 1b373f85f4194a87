use std::collections::HashMap;
use std::env;

use tracing::{info, warn};

use crate::cache::token::TokenRecord;
use crate::cache::token_store::TokenStore;
use crate::helpers::time::expires_in;
use crate::utils::constants::{ENV_FIXED_ACCESS_TOKENS, ONE_YEAR_SECS};

/// Parse `name1=value1,name2=value2` into long lived tokens.
///
/// Empty segments are skipped; a later segment wins over an earlier one
/// with the same name.
pub fn load_fixed_tokens(env_value: &str) -> HashMap<String, TokenRecord> {
    let mut tokens = HashMap::new();
    for part in env_value.split(',').filter(|part| !part.is_empty()) {
        let Some((name, value)) = part.split_once('=') else {
            warn!("Skipping fixed access token without value: \"{}\"", part);
            continue;
        };
        if name.is_empty() {
            warn!("Skipping fixed access token without name");
            continue;
        }
        tokens.insert(
            name.to_owned(),
            TokenRecord {
                name: name.to_owned(),
                access_token: Some(value.to_owned()),
                expires_at: expires_in(ONE_YEAR_SECS),
                ..TokenRecord::default()
            },
        );
    }
    tokens
}

impl TokenStore {
    /// Apply fixed tokens from `OAUTH2_ACCESS_TOKENS`
    pub async fn init_fixed_tokens_from_env(&self) {
        let env_value = env::var(ENV_FIXED_ACCESS_TOKENS).unwrap_or_default();
        self.init_fixed_tokens(&env_value).await;
    }

    /// Apply fixed tokens from a `name=value[,name=value]*` list
    pub async fn init_fixed_tokens(&self, value: &str) {
        for (name, token) in load_fixed_tokens(value) {
            info!("Using fixed access token \"{}\"..", name);
            self.merge_token(token).await;
        }
    }
}
