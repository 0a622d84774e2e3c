//! Shared parsing helpers for inbound HTTP adapters.
//!
//! Malformed path, query or body input never reaches a use case; each helper
//! answers with a 422 chain under the caller's event instead.

use actix_web::web;
use pagination::PageRequest;
use serde::Deserialize;
use tracing::warn;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::domain::messages::errors;
use crate::domain::ports::UseCase;
use crate::domain::{ErrorChain, ErrorEvent, FieldError, ResponseEnvelope, codes, settle};

/// `?page=&limit=` listing parameters.
#[derive(Debug, Clone, Copy, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// One-based page number. Defaults to 1.
    pub page: Option<u32>,
    /// Items per page, clamped to 1..=100. Defaults to 20.
    pub limit: Option<u32>,
}

fn unprocessable(event: &str, field: FieldError) -> ErrorChain {
    ErrorEvent::new(event)
        .with_code(codes::UNPROCESSABLE_ENTITY)
        .wrap(field)
}

/// Parse a path identifier, reporting a field error on `id`.
pub(crate) fn parse_id(event: &str, raw: &str) -> Result<Uuid, ErrorChain> {
    Uuid::parse_str(raw).map_err(|_| unprocessable(event, FieldError::new("id", errors::ID_NOT_VALID)))
}

/// Turn optional listing parameters into a page request.
pub(crate) fn page_request(
    event: &str,
    query: Result<web::Query<PageQuery>, actix_web::Error>,
) -> Result<PageRequest, ErrorChain> {
    let query = query.map_err(|err| {
        warn!(event, error = %err, "malformed pagination query");
        unprocessable(
            event,
            FieldError::new("page", "page and limit must be positive integers"),
        )
    })?;
    Ok(PageRequest::from_query(query.page, query.limit))
}

/// Chain for a JSON body that failed to deserialize.
pub(crate) fn malformed_body(event: &str, message: &str, error: &actix_web::Error) -> ErrorChain {
    warn!(event, error = %error, "malformed request body");
    ErrorEvent::new(event)
        .with_code(codes::UNPROCESSABLE_ENTITY)
        .wrap(message)
}

/// Run `use_case` on parsed input, or settle the parse failure under `event`.
pub(crate) async fn resolve_parsed<I>(
    use_case: &dyn UseCase<I>,
    event: &str,
    input: Result<I, ErrorChain>,
) -> ResponseEnvelope
where
    I: Send + 'static,
{
    match input {
        Ok(input) => use_case.resolve(input).await,
        Err(chain) => settle(event, Err(chain)),
    }
}
