pub mod token_access;
pub mod token_refresh;
