//! AItopia Auth Core - Bearer token verification
//!
//! Account identity is established by an external identity system that
//! signs HS256 JWTs with a shared secret. This crate verifies those tokens
//! and resolves the account they name.

pub mod config;
pub mod error;
pub mod token;

pub use config::AuthConfig;
pub use error::AuthError;
pub use token::{AccessClaims, TokenValidator};
