//! Ports for password hashing and bearer tokens.
//!
//! Both are CPU-bound and synchronous; adapters own their secrets.

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::domain::{IssuedToken, TokenSubject};

use super::define_port_error;

define_port_error! {
    /// Errors raised by credential adapters.
    pub enum CredentialError {
        /// Password could not be hashed or a stored hash could not be parsed.
        Hashing { message: String } => "password hashing failed: {message}",
        /// Token could not be signed.
        Signing { message: String } => "token signing failed: {message}",
        /// Token is malformed, expired or signed with another key.
        InvalidToken { message: String } => "token not valid: {message}",
    }
}

/// Hashes and verifies account passwords.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Produce a self-describing hash of `password`.
    fn hash(&self, password: &str) -> Result<String, CredentialError>;

    /// Whether `password` matches `hash`.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, CredentialError>;
}

/// Issues bearer tokens for authenticated users.
#[cfg_attr(test, mockall::automock)]
pub trait TokenIssuer: Send + Sync {
    /// Sign a token for `subject` valid from `now`.
    fn issue(&self, subject: TokenSubject, now: DateTime<Utc>)
    -> Result<IssuedToken, CredentialError>;
}

/// Verifies bearer tokens presented by clients.
#[cfg_attr(test, mockall::automock)]
pub trait TokenVerifier: Send + Sync {
    /// Decode and check a token, returning the identity it carries.
    fn verify(&self, token: &str) -> Result<TokenSubject, CredentialError>;
}

/// Reversible stand-in hasher for running without real credentials.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePasswordHasher;

const FIXTURE_HASH_PREFIX: &str = "fixture$";

impl PasswordHasher for FixturePasswordHasher {
    fn hash(&self, password: &str) -> Result<String, CredentialError> {
        Ok(format!("{FIXTURE_HASH_PREFIX}{password}"))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, CredentialError> {
        let stored = hash
            .strip_prefix(FIXTURE_HASH_PREFIX)
            .ok_or_else(|| CredentialError::hashing("not a fixture hash"))?;
        Ok(stored == password)
    }
}

/// Unsigned tokens whose payload is the user id.
///
/// Only suitable for tests and local smoke runs.
#[derive(Debug, Clone, Copy)]
pub struct FixtureTokens {
    ttl: Duration,
}

impl Default for FixtureTokens {
    fn default() -> Self {
        Self {
            ttl: Duration::minutes(120),
        }
    }
}

impl TokenIssuer for FixtureTokens {
    fn issue(
        &self,
        subject: TokenSubject,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, CredentialError> {
        Ok(IssuedToken::bearer(subject.id_user.to_string(), now + self.ttl))
    }
}

impl TokenVerifier for FixtureTokens {
    fn verify(&self, token: &str) -> Result<TokenSubject, CredentialError> {
        let id_user =
            Uuid::parse_str(token).map_err(|err| CredentialError::invalid_token(err.to_string()))?;
        Ok(TokenSubject { id_user })
    }
}
