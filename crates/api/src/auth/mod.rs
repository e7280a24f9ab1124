//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`session`] -- in-memory session store with opaque bearer tokens.

pub mod password;
pub mod session;
