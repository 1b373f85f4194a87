// tests/common/mod.rs
pub use httpmock::Method::POST;
pub use httpmock::{Mock, MockServer};
pub use serde_json::json;

use std::fs;
use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use tempfile::TempDir;

use crate::cache::token::TokenRecord;
use crate::cache::token_store::TokenStore;
use crate::config::settings::Configuration;
use crate::utils::constants::USER_AGENT;

pub const TOKEN_PATH: &str = "/oauth2/access_token";

pub fn write_file(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).expect("write test file");
}

/// Temp dir holding valid `user.json` and `client.json`
pub fn credentials_dir() -> TempDir {
    let dir = tempfile::tempdir().expect("temp dir");
    write_file(
        dir.path(),
        "user.json",
        &json!({"application_username": "app", "application_password": "pass"}).to_string(),
    );
    write_file(
        dir.path(),
        "client.json",
        &json!({"client_id": "cid", "client_secret": "sec"}).to_string(),
    );
    dir
}

/// Store pointed at the mock token endpoint and the given credentials dir
pub fn store_for(server: &MockServer, dir: &Path) -> TokenStore {
    TokenStore::new(Configuration {
        token_endpoint_url: server.url(TOKEN_PATH),
        credentials_dir: dir.to_path_buf(),
        ..Configuration::default()
    })
}

/// Token endpoint answering every well formed password grant with `token`
pub async fn token_endpoint<'a>(server: &'a MockServer, token: &str, expires_in: i64) -> Mock<'a> {
    let authorization = format!("Basic {}", STANDARD.encode("cid:sec"));
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path(TOKEN_PATH)
                .header("authorization", authorization.as_str())
                .header("user-agent", USER_AGENT)
                .form_urlencoded_tuple("grant_type", "password")
                .form_urlencoded_tuple("username", "app")
                .form_urlencoded_tuple("password", "pass");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(json!({
                    "access_token": token,
                    "expires_in": expires_in,
                    "token_type": "Bearer"
                }));
        })
        .await
}

/// Token endpoint that always fails with a server error
pub async fn failing_endpoint(server: &MockServer) -> Mock<'_> {
    server
        .mock_async(|when, then| {
            when.method(POST).path(TOKEN_PATH);
            then.status(503).body("FAIL");
        })
        .await
}

pub fn cached(name: &str, token: &str, expires_at: i64, ignore_expiration: bool) -> TokenRecord {
    TokenRecord {
        access_token: Some(token.to_owned()),
        expires_at,
        ..TokenRecord::new(name, vec!["myscope".to_owned()], ignore_expiration)
    }
}
