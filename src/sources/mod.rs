//! Token sources: secret files, fixed tokens and the OAuth2 token endpoint,
//! plus the refresh and access paths built on top of them.

pub mod credentials;
pub mod executor;
pub mod file;
pub mod fixed;
pub mod oauth2;
