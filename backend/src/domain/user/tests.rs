//! Tests for account registration rules.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

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

fn invalid_fields(registration: &Registration) -> Vec<String> {
    registration
        .validate()
        .err()
        .unwrap_or_default()
        .into_iter()
        .map(|error| error.field)
        .collect()
}

#[rstest]
fn valid_registration_passes(registration: Registration) {
    assert!(registration.validate().is_ok());
}

#[rstest]
#[case("ab")]
#[case(&"a".repeat(NAME_MAX + 1))]
fn name_length_is_bounded(mut registration: Registration, #[case] name: &str) {
    registration.name = name.to_owned();
    assert_eq!(invalid_fields(&registration), vec!["name"]);
}

#[rstest]
#[case("a@b")]
#[case("no-at-sign.example.com")]
#[case("two@@example.com")]
#[case("@example.com")]
#[case("ada@example")]
#[case("ada lovelace@example.com")]
fn email_must_look_like_an_address(mut registration: Registration, #[case] email: &str) {
    registration.email = email.to_owned();
    assert_eq!(invalid_fields(&registration), vec!["email"]);
}

#[rstest]
fn short_password_is_rejected(mut registration: Registration) {
    registration.password = Zeroizing::new("abc".to_owned());
    assert_eq!(invalid_fields(&registration), vec!["password"]);
}

#[rstest]
#[case("12345")]
#[case("123456789012345")]
#[case("+62812345678")]
#[case("0812-3456")]
fn phone_number_must_be_digits(mut registration: Registration, #[case] phone: &str) {
    registration.phone_number = phone.to_owned();
    assert_eq!(invalid_fields(&registration), vec!["phone_number"]);
}

#[rstest]
fn every_invalid_field_is_reported(mut registration: Registration) {
    registration.name = String::new();
    registration.email = "x".to_owned();
    registration.password = Zeroizing::new(String::new());
    registration.phone_number = "abc".to_owned();
    assert_eq!(
        invalid_fields(&registration),
        vec!["name", "email", "password", "phone_number"]
    );
}

#[rstest]
fn registration_deserializes_from_json() {
    let parsed: Registration = serde_json::from_value(json!({
        "name": "Ada Lovelace",
        "email": "ada@example.com",
        "password": "s3cret",
        "phone_number": "08123456789"
    }))
    .expect("valid registration json");
    assert_eq!(parsed.image_url, "");
    assert_eq!(parsed.password.as_str(), "s3cret");
}

#[rstest]
fn user_view_never_serializes_a_password(registration: Registration) {
    let credentials = registration.into_credentials(Uuid::nil(), "$argon2id$hash".to_owned());
    let value = serde_json::to_value(&credentials.user).expect("serialize user");
    assert!(value.get("password").is_none());
    assert_eq!(value.get("email"), Some(&json!("ada@example.com")));
}
