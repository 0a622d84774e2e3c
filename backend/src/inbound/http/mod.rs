//! HTTP inbound adapter exposing the REST endpoints.
//!
//! Handlers parse path, query and body input, resolve the matching use case
//! from [`state::HttpState`] and render its [`crate::domain::ResponseEnvelope`]
//! in the caller's language.

pub mod auth;
pub mod error;
pub mod foods;
pub mod health;
pub mod language;
pub mod requests;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

pub use error::{EnvelopeError, reply};
