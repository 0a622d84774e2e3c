//! Bearer token authentication for handlers.
//!
//! `Authorization: Bearer <token>` is verified through the `TokenVerifier`
//! port held in [`HttpState`]. The verified account id is the only actor
//! identity handlers ever see.

use std::future::{Ready, ready};

use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use tracing::{error, warn};
use uuid::Uuid;

use crate::domain::messages::{errors, events};
use crate::domain::{ErrorEvent, ResponseEnvelope, codes, settle};

use super::error::EnvelopeError;
use super::language::negotiate;
use super::state::HttpState;

const BEARER_PREFIX: &str = "Bearer ";

/// Authenticated caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    id_user: Uuid,
}

impl Actor {
    /// Account id carried by the verified token.
    pub fn id_user(&self) -> Uuid {
        self.id_user
    }
}

fn bearer_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix(BEARER_PREFIX)
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

fn unauthorized(message: &str) -> ResponseEnvelope {
    settle(
        events::VALIDATE_BEARER_TOKEN,
        Err(ErrorEvent::new(events::VALIDATE_BEARER_TOKEN)
            .with_code(codes::UNAUTHORIZED)
            .wrap(message)),
    )
}

fn authenticate(req: &HttpRequest) -> Result<Actor, EnvelopeError> {
    let Some(state) = req.app_data::<web::Data<HttpState>>() else {
        error!("http state missing; cannot verify bearer tokens");
        return Err(EnvelopeError::unlocalized(settle(
            events::VALIDATE_BEARER_TOKEN,
            Err(ErrorEvent::new(events::VALIDATE_BEARER_TOKEN).into_chain()),
        )));
    };
    let language = negotiate(
        req.headers()
            .get(actix_web::http::header::ACCEPT_LANGUAGE)
            .and_then(|value| value.to_str().ok()),
        &state.catalog,
    );
    let reject = |message: &str| EnvelopeError::new(unauthorized(message), &state.catalog, &language);

    let token = bearer_token(req).ok_or_else(|| reject(errors::UNAUTHORIZED))?;
    let subject = state.tokens.verify(token).map_err(|err| {
        warn!(error = %err, "bearer token rejected");
        reject(errors::TOKEN_NOT_VALID)
    })?;
    Ok(Actor {
        id_user: subject.id_user,
    })
}

impl FromRequest for Actor {
    type Error = EnvelopeError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}
