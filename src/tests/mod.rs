pub mod common;

mod credentials;
