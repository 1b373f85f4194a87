use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use regex::Regex;
use serde::Deserialize;
use tracing::{debug, error};

use crate::config::settings::{ConfigurationPatch, LoggingConfig};

/// ================================
/// CLI configuration file
/// ================================
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub settings: ConfigurationPatch,
    pub logging: Option<LoggingConfig>,
    #[serde(default)]
    pub tokens: HashMap<String, ManagedTokenConfig>,
}

/// Token registered at startup
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct ManagedTokenConfig {
    #[serde(default)]
    pub scopes: Vec<String>,
    #[serde(default)]
    pub ignore_expiration: bool,
}

/// Load config from YAML file
pub async fn file_to_config(path: &Path) -> Result<FileConfig> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read config {}", path.display()))?;
    parse_config(&content)
}

pub fn parse_config(content: &str) -> Result<FileConfig> {
    let expanded = expand_env_vars(content)?;
    let config: FileConfig = serde_yaml::from_str(&expanded)
        .inspect_err(|e| error!("parse config error: {}", e))?;
    debug!("config loaded, {} token(s) declared", config.tokens.len());
    Ok(config)
}

/// Replace `${VAR}` and `${VAR:default}` with environment values
fn expand_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{(\w+)(?::([^\}]+))?\}")?;
    let expanded = re.replace_all(input, |caps: &regex::Captures| {
        let var = &caps[1];
        let default = caps.get(2).map(|m| m.as_str()).unwrap_or("");
        std::env::var(var).unwrap_or_else(|_| default.to_string())
    });
    Ok(expanded.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::LogFormat;
    use serial_test::serial;
    use std::path::PathBuf;

    #[test]
    #[serial]
    fn parses_full_config_with_env_expansion() {
        std::env::set_var("TOKENS_TEST_URL", "https://auth.example.org/oauth2/access_token");
        std::env::remove_var("TOKENS_TEST_MISSING");
        let yaml = r#"
settings:
  token_endpoint_url: ${TOKENS_TEST_URL}
  credentials_dir: ${TOKENS_TEST_MISSING:/meta/credentials}
  read_timeout_seconds: 3.5
logging:
  level: debug
  format: json
tokens:
  uid:
    scopes: [uid, cn]
  legacy:
    ignore_expiration: true
"#;
        let config = parse_config(yaml).unwrap();
        std::env::remove_var("TOKENS_TEST_URL");

        assert_eq!(
            config.settings.token_endpoint_url.as_deref(),
            Some("https://auth.example.org/oauth2/access_token")
        );
        assert_eq!(config.settings.credentials_dir, Some(PathBuf::from("/meta/credentials")));
        assert_eq!(config.settings.read_timeout_seconds, Some(3.5));
        assert_eq!(config.settings.connect_timeout_seconds, None);
        assert_eq!(config.logging.unwrap().format, LogFormat::Json);
        assert_eq!(config.tokens["uid"].scopes, vec!["uid", "cn"]);
        assert!(!config.tokens["uid"].ignore_expiration);
        assert!(config.tokens["legacy"].ignore_expiration);
        assert!(config.tokens["legacy"].scopes.is_empty());
    }

    #[test]
    fn empty_document_sections_default() {
        let config = parse_config("tokens: {}\n").unwrap();
        assert_eq!(config.settings, ConfigurationPatch::default());
        assert!(config.logging.is_none());
    }

    #[test]
    fn unknown_settings_are_rejected() {
        assert!(parse_config("settings:\n  url: https://example.org\n").is_err());
    }
}
