//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed ledgers and repositories using Diesel
//! - **security**: argon2 password hashing and JWT bearer tokens
//! - **catalog**: message catalog loading from disk
//!
//! Adapters translate between domain types and infrastructure
//! representations. They contain no business logic.

pub mod catalog;
pub mod persistence;
pub mod security;
