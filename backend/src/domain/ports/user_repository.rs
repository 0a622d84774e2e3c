//! Port abstraction for account persistence adapters and their errors.
use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::{User, UserCredentials};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// Another account already uses the email.
        DuplicateEmail { email: String } => "email {email} is already registered",
    }
}

/// Port for storing and reading accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new account.
    async fn create(&self, credentials: &UserCredentials) -> Result<(), UserPersistenceError>;

    /// Fetch an account and its password hash by email.
    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserCredentials>, UserPersistenceError>;

    /// List accounts ordered by name.
    async fn list(&self, page: PageRequest) -> Result<Page<User>, UserPersistenceError>;
}

/// Fixture implementation for running without a database.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUserRepository;

#[async_trait]
impl UserRepository for FixtureUserRepository {
    async fn create(&self, _credentials: &UserCredentials) -> Result<(), UserPersistenceError> {
        Ok(())
    }

    async fn find_by_email(
        &self,
        _email: &str,
    ) -> Result<Option<UserCredentials>, UserPersistenceError> {
        Ok(None)
    }

    async fn list(&self, page: PageRequest) -> Result<Page<User>, UserPersistenceError> {
        Ok(Page::new(Vec::new(), page, 0))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[tokio::test]
    async fn fixture_finds_nobody() {
        let repo = FixtureUserRepository;
        let found = repo
            .find_by_email("ada@example.com")
            .await
            .expect("fixture lookup succeeds");
        assert!(found.is_none());
    }

    #[rstest]
    fn duplicate_email_formats_message() {
        let err = UserPersistenceError::duplicate_email("ada@example.com");
        assert_eq!(err.to_string(), "email ada@example.com is already registered");
    }
}
