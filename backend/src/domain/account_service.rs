//! Registration, login and account listing.
//!
//! Password hashing is CPU-bound, so it runs on the blocking pool rather
//! than on the request's worker thread.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{info, warn};
use uuid::Uuid;
use zeroize::Zeroizing;

use crate::domain::error_chain::{ErrorChain, ErrorEvent, codes};
use crate::domain::messages::{errors, events};
use crate::domain::ports::{
    CredentialError, ListUsersInput, LoginInput, PasswordHasher, RegisterInput, TokenIssuer,
    UseCase, UserPersistenceError, UserRepository,
};
use crate::domain::{IssuedToken, LoginCredentials, ResponseEnvelope, TokenSubject, settle};

const USER_REPOSITORY: &str = "user_repository";
const CREDENTIALS: &str = "credentials";

fn map_repository_error(event: &str, message: &str, error: &UserPersistenceError) -> ErrorChain {
    let inner = ErrorEvent::new(USER_REPOSITORY).wrap(error.to_string());
    ErrorEvent::new(event).with_message(message).wrap(inner)
}

fn map_credential_error(event: &str, error: &CredentialError) -> ErrorChain {
    let inner = ErrorEvent::new(CREDENTIALS).wrap(error.to_string());
    ErrorEvent::new(event).wrap(inner)
}

fn invalid_credentials() -> ErrorChain {
    ErrorEvent::new(events::LOGIN)
        .with_code(codes::UNAUTHORIZED)
        .wrap(errors::INVALID_CREDENTIALS)
}

/// Service implementing the account use cases.
#[derive(Clone)]
pub struct AccountService<R> {
    users: Arc<R>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenIssuer>,
    clock: Arc<dyn Clock>,
}

impl<R> AccountService<R> {
    /// Create a new service over the user repository and credential ports.
    pub fn new(
        users: Arc<R>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenIssuer>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            users,
            hasher,
            tokens,
            clock,
        }
    }
}

impl<R> AccountService<R>
where
    R: UserRepository,
{
    async fn hash_password(&self, password: Zeroizing<String>) -> Result<String, ErrorChain> {
        let hasher = Arc::clone(&self.hasher);
        tokio::task::spawn_blocking(move || hasher.hash(password.as_str()))
            .await
            .map_err(|err| {
                ErrorEvent::new(events::REGISTER_USER)
                    .wrap(ErrorEvent::new(CREDENTIALS).wrap(err.to_string()))
            })?
            .map_err(|err| map_credential_error(events::REGISTER_USER, &err))
    }

    async fn verify_password(
        &self,
        password: Zeroizing<String>,
        hash: String,
    ) -> Result<bool, ErrorChain> {
        let hasher = Arc::clone(&self.hasher);
        tokio::task::spawn_blocking(move || hasher.verify(password.as_str(), &hash))
            .await
            .map_err(|err| {
                ErrorEvent::new(events::LOGIN)
                    .wrap(ErrorEvent::new(CREDENTIALS).wrap(err.to_string()))
            })?
            .map_err(|err| map_credential_error(events::LOGIN, &err))
    }

    fn issue(&self, event: &str, id_user: Uuid) -> Result<IssuedToken, ErrorChain> {
        self.tokens
            .issue(TokenSubject { id_user }, self.clock.utc())
            .map_err(|err| map_credential_error(event, &err))
    }

    async fn register(&self, input: RegisterInput) -> Result<ResponseEnvelope, ErrorChain> {
        let event = events::REGISTER_USER;
        let registration = input.registration;
        registration.validate().map_err(|fields| {
            ErrorEvent::new(event)
                .with_code(codes::UNPROCESSABLE_ENTITY)
                .wrap(fields)
        })?;

        let password_hash = self.hash_password(registration.password.clone()).await?;
        let credentials = registration.into_credentials(Uuid::new_v4(), password_hash);
        self.users
            .create(&credentials)
            .await
            .map_err(|err| match err {
                UserPersistenceError::DuplicateEmail { .. } => ErrorEvent::new(event)
                    .with_code(codes::UNPROCESSABLE_ENTITY)
                    .wrap(errors::EMAIL_ALREADY_REGISTERED),
                other => map_repository_error(event, errors::REGISTER_USER_ERROR, &other),
            })?;

        let token = self.issue(event, credentials.user.id_user)?;
        info!(id_user = %credentials.user.id_user, "user registered");
        Ok(ResponseEnvelope::success_with(event, codes::CREATED, &token))
    }

    async fn login(&self, input: LoginInput) -> Result<ResponseEnvelope, ErrorChain> {
        let event = events::LOGIN;
        let credentials = LoginCredentials::try_from_parts(&input.email, input.password.as_str())
            .map_err(|err| {
                ErrorEvent::new(event)
                    .with_code(codes::UNPROCESSABLE_ENTITY)
                    .wrap(err.field_error())
            })?;

        let Some(stored) = self
            .users
            .find_by_email(credentials.email())
            .await
            .map_err(|err| map_repository_error(event, errors::LOGIN_ERROR, &err))?
        else {
            warn!("login for unknown email");
            return Err(invalid_credentials());
        };

        let matches = self
            .verify_password(input.password, stored.password_hash)
            .await?;
        if !matches {
            warn!(id_user = %stored.user.id_user, "login with wrong password");
            return Err(invalid_credentials());
        }

        let token = self.issue(event, stored.user.id_user)?;
        Ok(ResponseEnvelope::success_with(event, codes::OK, &token))
    }

    async fn list(&self, input: ListUsersInput) -> Result<ResponseEnvelope, ErrorChain> {
        let event = events::LIST_USERS;
        let page = self
            .users
            .list(input.page)
            .await
            .map_err(|err| map_repository_error(event, errors::LIST_USERS_ERROR, &err))?;
        let (items, pagination) = page.into_parts();
        Ok(ResponseEnvelope::success_with(event, codes::OK, &items).with_pagination(pagination))
    }
}

#[async_trait]
impl<R: UserRepository> UseCase<RegisterInput> for AccountService<R> {
    async fn resolve(&self, input: RegisterInput) -> ResponseEnvelope {
        settle(events::REGISTER_USER, self.register(input).await)
    }
}

#[async_trait]
impl<R: UserRepository> UseCase<LoginInput> for AccountService<R> {
    async fn resolve(&self, input: LoginInput) -> ResponseEnvelope {
        settle(events::LOGIN, self.login(input).await)
    }
}

#[async_trait]
impl<R: UserRepository> UseCase<ListUsersInput> for AccountService<R> {
    async fn resolve(&self, input: ListUsersInput) -> ResponseEnvelope {
        settle(events::LIST_USERS, self.list(input).await)
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;
