//! # OAuth2 Access Token Cache
//!
//! Manages named OAuth2 access tokens on the client side: tokens are fetched
//! lazily with the resource owner password credentials grant, read from
//! secret files, or fixed through the environment, and served from memory
//! until they get close to expiry.
//!
//! Modules:
//! - `config` — store configuration and the CLI config file
//! - `cache` — token records and the token store
//! - `sources` — secret files, fixed tokens, credentials and the token endpoint
//! - `error` — error types

pub mod cache;
pub mod config;
pub mod error;
pub mod helpers;
pub mod sources;
pub mod utils;

#[cfg(test)]
mod tests;

pub use crate::cache::token::TokenRecord;
pub use crate::cache::token_store::TokenStore;
pub use crate::config::settings::{Configuration, ConfigurationPatch};
pub use crate::error::{CredentialsError, ErrorKind, TokenError, TokenResponseError};
pub use crate::sources::credentials::{read_credentials, ClientCredentials, UserCredentials};
pub use crate::sources::executor::token_access::{fallback_for, Fallback};
pub use crate::sources::fixed::load_fixed_tokens;
