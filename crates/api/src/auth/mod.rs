//! Authentication building blocks.
//!
//! - [`jwt`] -- access-token generation/validation and refresh-token helpers.
//! - [`password`] -- Argon2id password hashing and verification.

pub mod jwt;
pub mod password;
