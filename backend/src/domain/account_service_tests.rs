//! Tests for registration, login and account listing.

use std::sync::Arc;

use pagination::{Page, PageRequest};
use rstest::{fixture, rstest};
use serde_json::json;
use uuid::Uuid;
use zeroize::Zeroizing;

use super::*;
use crate::domain::ports::{FixturePasswordHasher, FixtureTokens, MockUserRepository};
use crate::domain::test_clock::{fixture_clock, fixture_timestamp};
use crate::domain::{Registration, User, UserCredentials};

#[fixture]
fn registration() -> Registration {
    Registration {
        name: "Ada Lovelace".to_owned(),
        email: "ada@example.com".to_owned(),
        password: Zeroizing::new("s3cret".to_owned()),
        phone_number: "08123456789".to_owned(),
        image_url: String::new(),
    }
}

fn stored_account(password: &str) -> UserCredentials {
    UserCredentials {
        user: User {
            id_user: Uuid::new_v4(),
            name: "Ada Lovelace".to_owned(),
            email: "ada@example.com".to_owned(),
            phone_number: "08123456789".to_owned(),
            image_url: String::new(),
        },
        password_hash: format!("fixture${password}"),
    }
}

fn service(users: MockUserRepository) -> AccountService<MockUserRepository> {
    AccountService::new(
        Arc::new(users),
        Arc::new(FixturePasswordHasher),
        Arc::new(FixtureTokens::default()),
        fixture_clock(),
    )
}

fn login(password: &str) -> LoginInput {
    LoginInput {
        email: "ada@example.com".to_owned(),
        password: Zeroizing::new(password.to_owned()),
    }
}

#[rstest]
#[tokio::test]
async fn register_stores_hashed_password_and_returns_token(registration: Registration) {
    let mut users = MockUserRepository::new();
    users
        .expect_create()
        .withf(|credentials| {
            credentials.password_hash == "fixture$s3cret"
                && credentials.user.email == "ada@example.com"
        })
        .times(1)
        .return_once(|_| Ok(()));

    let envelope = service(users).resolve(RegisterInput { registration }).await;

    assert_eq!(envelope.code(), codes::CREATED);
    assert_eq!(envelope.state(), "registerUserSuccess");
    let data = envelope.data().expect("token");
    assert_eq!(data.get("type"), Some(&json!("bearer")));
    let expected_expiry = fixture_timestamp() + chrono::Duration::minutes(120);
    assert_eq!(data.get("expired_at"), Some(&json!(expected_expiry)));
}

#[rstest]
#[tokio::test]
async fn register_reports_every_invalid_field(mut registration: Registration) {
    registration.name = "ab".to_owned();
    registration.phone_number = "12".to_owned();
    let mut users = MockUserRepository::new();
    users.expect_create().times(0);

    let envelope = service(users).resolve(RegisterInput { registration }).await;

    assert_eq!(envelope.code(), codes::UNPROCESSABLE_ENTITY);
    let fields: Vec<&str> = envelope
        .errors()
        .and_then(ErrorChain::field_errors)
        .expect("field errors")
        .iter()
        .map(|error| error.field.as_str())
        .collect();
    assert_eq!(fields, vec!["name", "phone_number"]);
}

#[rstest]
#[case(UserPersistenceError::duplicate_email("ada@example.com"), codes::UNPROCESSABLE_ENTITY)]
#[case(UserPersistenceError::connection("refused"), codes::INTERNAL_SERVER_ERROR)]
#[tokio::test]
async fn register_maps_repository_failures(
    registration: Registration,
    #[case] failure: UserPersistenceError,
    #[case] expected: u16,
) {
    let mut users = MockUserRepository::new();
    users
        .expect_create()
        .times(1)
        .return_once(move |_| Err(failure));

    let envelope = service(users).resolve(RegisterInput { registration }).await;

    assert_eq!(envelope.code(), expected);
}

#[rstest]
#[tokio::test]
async fn login_with_correct_password_issues_token() {
    let account = stored_account("s3cret");
    let id_user = account.user.id_user;
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_email()
        .withf(|email| email == "ada@example.com")
        .times(1)
        .return_once(move |_| Ok(Some(account)));

    let envelope = service(users).resolve(login("s3cret")).await;

    assert_eq!(envelope.code(), codes::OK);
    assert_eq!(
        envelope.data().and_then(|data| data.get("token")),
        Some(&json!(id_user.to_string()))
    );
}

#[rstest]
#[case(Some("other"))]
#[case(None)]
#[tokio::test]
async fn login_failures_are_unauthorized(#[case] stored_password: Option<&'static str>) {
    let account = stored_password.map(stored_account);
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_email()
        .times(1)
        .return_once(move |_| Ok(account));

    let envelope = service(users).resolve(login("s3cret")).await;

    assert_eq!(envelope.code(), codes::UNAUTHORIZED);
    assert_eq!(envelope.state(), "loginError");
    let chain = envelope.errors().expect("error chain");
    assert_eq!(chain.to_string(), "invalid credentials");
}

#[rstest]
#[tokio::test]
async fn login_requires_both_fields() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_email().times(0);

    let envelope = service(users).resolve(login("")).await;

    assert_eq!(envelope.code(), codes::UNPROCESSABLE_ENTITY);
    let fields = envelope
        .errors()
        .and_then(ErrorChain::field_errors)
        .expect("field errors");
    assert_eq!(fields[0].field, "password");
}

#[rstest]
#[tokio::test]
async fn list_users_is_paginated() {
    let account = stored_account("s3cret");
    let mut users = MockUserRepository::new();
    users
        .expect_list()
        .times(1)
        .return_once(move |page| Ok(Page::new(vec![account.user], page, 1)));

    let envelope = service(users)
        .resolve(ListUsersInput {
            page: PageRequest::default(),
        })
        .await;

    assert_eq!(envelope.code(), codes::OK);
    let data = envelope.data().and_then(|data| data.as_array()).expect("users");
    assert_eq!(data.len(), 1);
    assert!(data[0].get("password_hash").is_none());
}
