//! Request lifecycle HTTP handlers.
//!
//! ```text
//! POST /foods/request/{id}          {"quantity": 2}
//! GET  /my-foods/request
//! GET  /my-foods/request/{id}
//! POST /my-foods/request/action     {"id_request": "...", "action": "accept"}
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::messages::{errors, events};
use crate::domain::ports::{
    CreateRequestInput, ListRequestsForFoodInput, ListRequestsForUserInput, RequestActionInput,
};
use crate::domain::{RequestDraft, ResponseEnvelope};

use super::auth::Actor;
use super::error::reply;
use super::language::RequestLanguage;
use super::state::HttpState;
use super::validation::{PageQuery, malformed_body, page_request, parse_id, resolve_parsed};

/// Owner decision on a pending request.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct RequestActionBody {
    /// Pending request to resolve.
    pub id_request: Uuid,
    /// `accept` or `reject`.
    pub action: String,
}

/// Accept or reject a pending request on one of the caller's foods.
#[utoipa::path(
    post,
    path = "/my-foods/request/action",
    request_body = RequestActionBody,
    responses(
        (status = 200, description = "Request resolved", body = ResponseEnvelope),
        (status = 401, description = "Missing or invalid token", body = ResponseEnvelope),
        (status = 403, description = "Caller does not own the food", body = ResponseEnvelope),
        (status = 422, description = "Invalid action, insufficient stock or already resolved", body = ResponseEnvelope),
        (status = 500, description = "Persistence failure", body = ResponseEnvelope)
    ),
    tags = ["requests"],
    operation_id = "requestAction"
)]
#[post("/my-foods/request/action")]
pub async fn request_action(
    state: web::Data<HttpState>,
    actor: Actor,
    language: RequestLanguage,
    payload: Result<web::Json<RequestActionBody>, actix_web::Error>,
) -> HttpResponse {
    let input = payload
        .map(|body| {
            let RequestActionBody { id_request, action } = body.into_inner();
            RequestActionInput {
                actor: actor.id_user(),
                id_request,
                action,
            }
        })
        .map_err(|err| malformed_body(events::REQUEST_ACTION, errors::CREATE_REQUEST_ERROR, &err));
    let envelope =
        resolve_parsed(state.requests.action.as_ref(), events::REQUEST_ACTION, input).await;
    reply(envelope, &state.catalog, language.as_str())
}

/// Ask for part of a food.
#[utoipa::path(
    post,
    path = "/foods/request/{id}",
    params(("id" = Uuid, Path, description = "Food identifier")),
    request_body = RequestDraft,
    responses(
        (status = 201, description = "Request stored as pending", body = ResponseEnvelope),
        (status = 400, description = "Food not found", body = ResponseEnvelope),
        (status = 401, description = "Missing or invalid token", body = ResponseEnvelope),
        (status = 422, description = "Invalid quantity or not enough stock", body = ResponseEnvelope)
    ),
    tags = ["requests"],
    operation_id = "createRequest"
)]
#[post("/foods/request/{id}")]
pub async fn create_request(
    state: web::Data<HttpState>,
    actor: Actor,
    language: RequestLanguage,
    path: web::Path<String>,
    payload: Result<web::Json<RequestDraft>, actix_web::Error>,
) -> HttpResponse {
    let input = parse_id(events::CREATE_REQUEST, &path).and_then(|id_food| {
        let draft = payload.map_err(|err| {
            malformed_body(events::CREATE_REQUEST, errors::CREATE_REQUEST_ERROR, &err)
        })?;
        Ok(CreateRequestInput {
            actor: actor.id_user(),
            id_food,
            draft: draft.into_inner(),
        })
    });
    let envelope =
        resolve_parsed(state.requests.create.as_ref(), events::CREATE_REQUEST, input).await;
    reply(envelope, &state.catalog, language.as_str())
}

/// List requests made against one of the caller's foods.
#[utoipa::path(
    get,
    path = "/my-foods/request/{id}",
    params(("id" = Uuid, Path, description = "Food identifier"), PageQuery),
    responses(
        (status = 200, description = "Requests for the food", body = ResponseEnvelope),
        (status = 403, description = "Caller does not own the food", body = ResponseEnvelope),
        (status = 404, description = "Food not found", body = ResponseEnvelope)
    ),
    tags = ["requests"],
    operation_id = "listRequestsForFood"
)]
#[get("/my-foods/request/{id}")]
pub async fn list_requests_for_food(
    state: web::Data<HttpState>,
    actor: Actor,
    language: RequestLanguage,
    path: web::Path<String>,
    query: Result<web::Query<PageQuery>, actix_web::Error>,
) -> HttpResponse {
    let event = events::LIST_REQUESTS_FOOD;
    let input = parse_id(event, &path).and_then(|id_food| {
        Ok(ListRequestsForFoodInput {
            actor: actor.id_user(),
            id_food,
            page: page_request(event, query)?,
        })
    });
    let envelope = resolve_parsed(state.requests.list_for_food.as_ref(), event, input).await;
    reply(envelope, &state.catalog, language.as_str())
}

/// List the caller's own requests.
#[utoipa::path(
    get,
    path = "/my-foods/request",
    params(PageQuery),
    responses(
        (status = 200, description = "Caller's requests", body = ResponseEnvelope),
        (status = 401, description = "Missing or invalid token", body = ResponseEnvelope)
    ),
    tags = ["requests"],
    operation_id = "listMyRequests"
)]
#[get("/my-foods/request")]
pub async fn list_requests_for_user(
    state: web::Data<HttpState>,
    actor: Actor,
    language: RequestLanguage,
    query: Result<web::Query<PageQuery>, actix_web::Error>,
) -> HttpResponse {
    let event = events::LIST_REQUESTS_USER;
    let input = page_request(event, query).map(|page| ListRequestsForUserInput {
        actor: actor.id_user(),
        page,
    });
    let envelope = resolve_parsed(state.requests.list_for_user.as_ref(), event, input).await;
    reply(envelope, &state.catalog, language.as_str())
}

#[cfg(test)]
#[path = "requests_tests.rs"]
mod tests;
