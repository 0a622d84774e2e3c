//! Request language negotiation from `Accept-Language`.
//!
//! Only the first listed tag is considered. `id-ID` falls back to `id`, then
//! to the catalog default when neither has entries.

use std::convert::Infallible;
use std::future::{Ready, ready};

use actix_web::http::header::ACCEPT_LANGUAGE;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};

use crate::domain::MessageCatalog;

use super::state::HttpState;

const FALLBACK_LANGUAGE: &str = "en";

/// Language chosen for localising the response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLanguage(String);

impl RequestLanguage {
    /// Language tag, always one the catalog can answer in.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// First tag of an `Accept-Language` value, without its quality weight.
pub fn first_tag(header: &str) -> Option<&str> {
    header
        .split(',')
        .next()
        .and_then(|tag| tag.split(';').next())
        .map(str::trim)
        .filter(|tag| !tag.is_empty() && *tag != "*")
}

/// Resolve a header value against the catalog.
pub fn negotiate(header: Option<&str>, catalog: &MessageCatalog) -> String {
    let Some(tag) = header.and_then(first_tag) else {
        return catalog.default_language().to_owned();
    };
    if catalog.supports(tag) {
        return tag.to_owned();
    }
    let primary = tag.split('-').next();
    catalog.resolve_language(primary)
}

pub(crate) fn language_of(req: &HttpRequest) -> String {
    let header = req
        .headers()
        .get(ACCEPT_LANGUAGE)
        .and_then(|value| value.to_str().ok());
    match req.app_data::<web::Data<HttpState>>() {
        Some(state) => negotiate(header, &state.catalog),
        None => FALLBACK_LANGUAGE.to_owned(),
    }
}

impl FromRequest for RequestLanguage {
    type Error = Infallible;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(Self(language_of(req))))
    }
}
