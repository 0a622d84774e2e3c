//! User accounts and registration input.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use zeroize::Zeroizing;

use super::error_chain::FieldError;

/// Minimum length for a user name.
pub const NAME_MIN: usize = 3;
/// Maximum length for a user name.
pub const NAME_MAX: usize = 50;
/// Minimum length for an email address.
pub const EMAIL_MIN: usize = 4;
/// Maximum length for an email address.
pub const EMAIL_MAX: usize = 50;
/// Minimum length for a password.
pub const PASSWORD_MIN: usize = 4;
/// Minimum number of digits in a phone number.
pub const PHONE_MIN: usize = 6;
/// Maximum number of digits in a phone number.
pub const PHONE_MAX: usize = 14;

/// Public view of an account. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    /// Account identifier.
    pub id_user: Uuid,
    /// Display name, 3 to 50 characters.
    pub name: String,
    /// Unique login email.
    pub email: String,
    /// Digits only, 6 to 14 long.
    pub phone_number: String,
    /// Avatar URL, may be empty.
    pub image_url: String,
}

/// An account together with its stored password hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserCredentials {
    /// Public account fields.
    pub user: User,
    /// Argon2 PHC string.
    pub password_hash: String,
}

/// Registration payload.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct Registration {
    /// Display name, 3 to 50 characters.
    pub name: String,
    /// Unique login email.
    pub email: String,
    /// Plain password, at least 4 characters; wiped on drop.
    #[schema(value_type = String)]
    pub password: Zeroizing<String>,
    /// Digits only, 6 to 14 long.
    pub phone_number: String,
    /// Avatar URL, may be empty.
    #[serde(default)]
    pub image_url: String,
}

fn is_email_shaped(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !email.chars().any(char::is_whitespace)
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
}

impl Registration {
    /// Check the payload, collecting every offending field.
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();

        let name_length = self.name.trim().chars().count();
        if !(NAME_MIN..=NAME_MAX).contains(&name_length) {
            errors.push(FieldError::new(
                "name",
                format!("name must be between {NAME_MIN} and {NAME_MAX} characters"),
            ));
        }

        let email_length = self.email.chars().count();
        if !(EMAIL_MIN..=EMAIL_MAX).contains(&email_length) {
            errors.push(FieldError::new(
                "email",
                format!("email must be between {EMAIL_MIN} and {EMAIL_MAX} characters"),
            ));
        } else if !is_email_shaped(&self.email) {
            errors.push(FieldError::new("email", "email must be a valid email"));
        }

        if self.password.chars().count() < PASSWORD_MIN {
            errors.push(FieldError::new(
                "password",
                format!("password must be at least {PASSWORD_MIN} characters"),
            ));
        }

        let phone = self.phone_number.as_str();
        if !phone.chars().all(|c| c.is_ascii_digit())
            || !(PHONE_MIN..=PHONE_MAX).contains(&phone.len())
        {
            errors.push(FieldError::new(
                "phone_number",
                format!("phone number must be {PHONE_MIN} to {PHONE_MAX} digits"),
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Build the account record once the password has been hashed.
    pub fn into_credentials(self, id_user: Uuid, password_hash: String) -> UserCredentials {
        UserCredentials {
            user: User {
                id_user,
                name: self.name.trim().to_owned(),
                email: self.email,
                phone_number: self.phone_number,
                image_url: self.image_url,
            },
            password_hash,
        }
    }
}

#[cfg(test)]
#[path = "user/tests.rs"]
mod tests;
