//! HS256 bearer tokens carrying the account id.
//!
//! Claims are `{ "id_user": <uuid>, "exp": <unix seconds> }`. Expiry is
//! checked by `jsonwebtoken` against the system clock on verification.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use zeroize::Zeroizing;

use crate::domain::ports::{CredentialError, TokenIssuer, TokenVerifier};
use crate::domain::{IssuedToken, TokenSubject};

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    id_user: Uuid,
    exp: i64,
}

/// Signs and verifies tokens with a shared secret.
#[derive(Clone)]
pub struct JwtTokens {
    secret: Zeroizing<String>,
    ttl: Duration,
}

impl fmt::Debug for JwtTokens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtTokens")
            .field("secret", &"<redacted>")
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl JwtTokens {
    /// Tokens signed with `secret` and valid for `ttl` after issue.
    pub fn new(secret: Zeroizing<String>, ttl: Duration) -> Self {
        Self { secret, ttl }
    }

    fn validation() -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp"]);
        validation
    }
}

impl TokenIssuer for JwtTokens {
    fn issue(
        &self,
        subject: TokenSubject,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, CredentialError> {
        let expired_at = now + self.ttl;
        let claims = Claims {
            id_user: subject.id_user,
            exp: expired_at.timestamp(),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|err| CredentialError::signing(err.to_string()))?;
        Ok(IssuedToken::bearer(token, expired_at))
    }
}

impl TokenVerifier for JwtTokens {
    fn verify(&self, token: &str) -> Result<TokenSubject, CredentialError> {
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Self::validation(),
        )
        .map_err(|err| CredentialError::invalid_token(err.to_string()))?;
        Ok(TokenSubject {
            id_user: data.claims.id_user,
        })
    }
}
