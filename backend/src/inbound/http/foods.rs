//! Food listing HTTP handlers.
//!
//! ```text
//! GET    /foods
//! POST   /foods
//! GET    /foods/{id}
//! GET    /my-foods
//! GET    /my-foods/{id}
//! PUT    /my-foods/{id}
//! DELETE /my-foods/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use uuid::Uuid;

use crate::domain::messages::{errors, events};
use crate::domain::ports::{
    CreateFoodInput, DeleteFoodInput, FoodDetailInput, ListFoodsInput, ListMyFoodsInput,
    MyFoodDetailInput, UpdateFoodInput,
};
use crate::domain::{ErrorChain, FoodDraft, ResponseEnvelope};

use super::auth::Actor;
use super::error::reply;
use super::language::RequestLanguage;
use super::state::HttpState;
use super::validation::{PageQuery, malformed_body, page_request, parse_id, resolve_parsed};

/// List live foods, newest first.
#[utoipa::path(
    get,
    path = "/foods",
    params(PageQuery),
    responses(
        (status = 200, description = "Live foods", body = ResponseEnvelope),
        (status = 401, description = "Missing or invalid token", body = ResponseEnvelope)
    ),
    tags = ["foods"],
    operation_id = "listFoods"
)]
#[get("/foods")]
pub async fn list_foods(
    state: web::Data<HttpState>,
    _actor: Actor,
    language: RequestLanguage,
    query: Result<web::Query<PageQuery>, actix_web::Error>,
) -> HttpResponse {
    let event = events::GET_FOODS;
    let input = page_request(event, query).map(|page| ListFoodsInput { page });
    let envelope = resolve_parsed(state.foods.list.as_ref(), event, input).await;
    reply(envelope, &state.catalog, language.as_str())
}

/// Publish a food.
#[utoipa::path(
    post,
    path = "/foods",
    request_body = FoodDraft,
    responses(
        (status = 201, description = "Food published", body = ResponseEnvelope),
        (status = 422, description = "Invalid fields", body = ResponseEnvelope)
    ),
    tags = ["foods"],
    operation_id = "createFood"
)]
#[post("/foods")]
pub async fn create_food(
    state: web::Data<HttpState>,
    actor: Actor,
    language: RequestLanguage,
    payload: Result<web::Json<FoodDraft>, actix_web::Error>,
) -> HttpResponse {
    let event = events::CREATE_FOOD;
    let input = payload
        .map(|draft| CreateFoodInput {
            actor: actor.id_user(),
            draft: draft.into_inner(),
        })
        .map_err(|err| malformed_body(event, errors::CREATE_FOOD_ERROR, &err));
    let envelope = resolve_parsed(state.foods.create.as_ref(), event, input).await;
    reply(envelope, &state.catalog, language.as_str())
}

/// Public detail of a live food.
#[utoipa::path(
    get,
    path = "/foods/{id}",
    params(("id" = Uuid, Path, description = "Food identifier")),
    responses(
        (status = 200, description = "Food detail", body = ResponseEnvelope),
        (status = 404, description = "Food not found", body = ResponseEnvelope)
    ),
    tags = ["foods"],
    operation_id = "getFood"
)]
#[get("/foods/{id}")]
pub async fn food_detail(
    state: web::Data<HttpState>,
    _actor: Actor,
    language: RequestLanguage,
    path: web::Path<String>,
) -> HttpResponse {
    let event = events::GET_DETAIL_SHARED_FOOD;
    let input = parse_id(event, &path).map(|id_food| FoodDetailInput { id_food });
    let envelope = resolve_parsed(state.foods.detail.as_ref(), event, input).await;
    reply(envelope, &state.catalog, language.as_str())
}

/// List the caller's foods.
#[utoipa::path(
    get,
    path = "/my-foods",
    params(PageQuery),
    responses((status = 200, description = "Caller's foods", body = ResponseEnvelope)),
    tags = ["foods"],
    operation_id = "listMyFoods"
)]
#[get("/my-foods")]
pub async fn list_my_foods(
    state: web::Data<HttpState>,
    actor: Actor,
    language: RequestLanguage,
    query: Result<web::Query<PageQuery>, actix_web::Error>,
) -> HttpResponse {
    let event = events::LIST_MY_FOODS;
    let input = page_request(event, query).map(|page| ListMyFoodsInput {
        actor: actor.id_user(),
        page,
    });
    let envelope = resolve_parsed(state.foods.list_mine.as_ref(), event, input).await;
    reply(envelope, &state.catalog, language.as_str())
}

fn owned_food(event: &str, actor: Actor, path: &str) -> Result<(Uuid, Uuid), ErrorChain> {
    parse_id(event, path).map(|id_food| (actor.id_user(), id_food))
}

/// Detail of a food the caller owns.
#[utoipa::path(
    get,
    path = "/my-foods/{id}",
    params(("id" = Uuid, Path, description = "Food identifier")),
    responses(
        (status = 200, description = "Food detail", body = ResponseEnvelope),
        (status = 403, description = "Caller does not own the food", body = ResponseEnvelope),
        (status = 404, description = "Food not found", body = ResponseEnvelope)
    ),
    tags = ["foods"],
    operation_id = "getMyFood"
)]
#[get("/my-foods/{id}")]
pub async fn my_food_detail(
    state: web::Data<HttpState>,
    actor: Actor,
    language: RequestLanguage,
    path: web::Path<String>,
) -> HttpResponse {
    let event = events::GET_DETAIL_MY_FOOD;
    let input = owned_food(event, actor, &path)
        .map(|(actor, id_food)| MyFoodDetailInput { actor, id_food });
    let envelope = resolve_parsed(state.foods.my_detail.as_ref(), event, input).await;
    reply(envelope, &state.catalog, language.as_str())
}

/// Edit a food the caller owns.
#[utoipa::path(
    put,
    path = "/my-foods/{id}",
    params(("id" = Uuid, Path, description = "Food identifier")),
    request_body = FoodDraft,
    responses(
        (status = 200, description = "Updated food", body = ResponseEnvelope),
        (status = 403, description = "Caller does not own the food", body = ResponseEnvelope),
        (status = 422, description = "Invalid fields", body = ResponseEnvelope)
    ),
    tags = ["foods"],
    operation_id = "updateMyFood"
)]
#[put("/my-foods/{id}")]
pub async fn update_my_food(
    state: web::Data<HttpState>,
    actor: Actor,
    language: RequestLanguage,
    path: web::Path<String>,
    payload: Result<web::Json<FoodDraft>, actix_web::Error>,
) -> HttpResponse {
    let event = events::UPDATE_MY_FOODS;
    let input = owned_food(event, actor, &path).and_then(|(actor, id_food)| {
        let draft =
            payload.map_err(|err| malformed_body(event, errors::UPDATE_FOOD_ERROR, &err))?;
        Ok(UpdateFoodInput {
            actor,
            id_food,
            draft: draft.into_inner(),
        })
    });
    let envelope = resolve_parsed(state.foods.update.as_ref(), event, input).await;
    reply(envelope, &state.catalog, language.as_str())
}

/// Soft-delete a food the caller owns.
#[utoipa::path(
    delete,
    path = "/my-foods/{id}",
    params(("id" = Uuid, Path, description = "Food identifier")),
    responses(
        (status = 200, description = "Food removed", body = ResponseEnvelope),
        (status = 403, description = "Caller does not own the food", body = ResponseEnvelope),
        (status = 404, description = "Food not found", body = ResponseEnvelope)
    ),
    tags = ["foods"],
    operation_id = "deleteMyFood"
)]
#[delete("/my-foods/{id}")]
pub async fn delete_my_food(
    state: web::Data<HttpState>,
    actor: Actor,
    language: RequestLanguage,
    path: web::Path<String>,
) -> HttpResponse {
    let event = events::DELETE_MY_FOOD;
    let input = owned_food(event, actor, &path)
        .map(|(actor, id_food)| DeleteFoodInput { actor, id_food });
    let envelope = resolve_parsed(state.foods.delete.as_ref(), event, input).await;
    reply(envelope, &state.catalog, language.as_str())
}
