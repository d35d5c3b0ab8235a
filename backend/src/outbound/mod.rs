//! Outbound adapters implementing the driven ports.
//!
//! - **persistence**: PostgreSQL repositories on Diesel
//! - **memory**: process-local repositories for development and tests
//! - **security**: HMAC access tokens and Argon2 password hashing
//!
//! Adapters translate between domain values and infrastructure types and hold
//! no business rules.

pub mod memory;
pub mod persistence;
pub mod security;
