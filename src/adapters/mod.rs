//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `auth` - JWT token issuing and validation
//! - `http` - axum routes, extractors and error mapping
//! - `memory` - in-memory repositories
//! - `postgres` - sqlx repositories
//! - `security` - argon2 password hashing
//! - `storage` - image blob storage (local disk, in-memory)

pub mod auth;
pub mod http;
pub mod memory;
pub mod postgres;
pub mod security;
pub mod storage;
