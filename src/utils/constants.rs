//! Shared constants and invariants

pub const ONE_YEAR_SECS: i64 = 3600 * 24 * 365;
/// Grace period past nominal expiry during which a stale token is still served
pub const EXPIRATION_TOLERANCE_SECS: i64 = 60;
/// Lead time before expiry at which a cached token is considered stale
pub const REFRESH_BEFORE_SECS_LEFT: i64 = 20 * 60;
/// Tokens read from secret files are re-checked this often
pub const FILE_TOKEN_VALIDITY_SECS: i64 = 120;

pub const DEFAULT_HTTP_CONNECT_TIMEOUT_SECS: f64 = 1.25;
pub const DEFAULT_HTTP_READ_TIMEOUT_SECS: f64 = 2.25;

// Environment variables
pub const ENV_ACCESS_TOKEN_URL: &str = "OAUTH2_ACCESS_TOKEN_URL";
pub const ENV_ACCESS_TOKEN_URL_LEGACY: &str = "OAUTH_ACCESS_TOKEN_URL";
pub const ENV_CREDENTIALS_DIR: &str = "CREDENTIALS_DIR";
pub const ENV_FIXED_ACCESS_TOKENS: &str = "OAUTH2_ACCESS_TOKENS";

// Credentials directory layout
pub const USER_CREDENTIALS_FILE: &str = "user.json";
pub const CLIENT_CREDENTIALS_FILE: &str = "client.json";
pub const TOKEN_SECRET_FILE_SUFFIX: &str = "-token-secret";

pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));
