//! Account HTTP handlers.
//!
//! ```text
//! POST /user/register {"name":"Ayu","email":"ayu@example.com","password":"...","phone_number":"0812"}
//! POST /user/login {"email":"ayu@example.com","password":"..."}
//! GET  /users
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;
use utoipa::ToSchema;
use zeroize::Zeroizing;

use crate::domain::messages::{errors, events};
use crate::domain::ports::{ListUsersInput, LoginInput, RegisterInput};
use crate::domain::{Registration, ResponseEnvelope};

use super::auth::Actor;
use super::error::reply;
use super::language::RequestLanguage;
use super::state::HttpState;
use super::validation::{PageQuery, malformed_body, page_request, resolve_parsed};

/// Login request body for `POST /user/login`.
#[derive(Deserialize, ToSchema)]
pub struct LoginBody {
    /// Registered email address.
    pub email: String,
    /// Plain-text password; wiped from memory once checked.
    #[schema(value_type = String)]
    pub password: Zeroizing<String>,
}

impl From<LoginBody> for LoginInput {
    fn from(body: LoginBody) -> Self {
        Self {
            email: body.email,
            password: body.password,
        }
    }
}

/// Create an account.
#[utoipa::path(
    post,
    path = "/user/register",
    request_body = Registration,
    responses(
        (status = 201, description = "Account created", body = ResponseEnvelope),
        (status = 422, description = "Invalid fields or email taken", body = ResponseEnvelope)
    ),
    tags = ["users"],
    operation_id = "registerUser",
    security([])
)]
#[post("/user/register")]
pub async fn register(
    state: web::Data<HttpState>,
    language: RequestLanguage,
    payload: Result<web::Json<Registration>, actix_web::Error>,
) -> HttpResponse {
    let event = events::REGISTER_USER;
    let input = payload
        .map(|registration| RegisterInput {
            registration: registration.into_inner(),
        })
        .map_err(|err| malformed_body(event, errors::REGISTER_USER_ERROR, &err));
    let envelope = resolve_parsed(state.accounts.register.as_ref(), event, input).await;
    reply(envelope, &state.catalog, language.as_str())
}

/// Exchange credentials for a bearer token.
#[utoipa::path(
    post,
    path = "/user/login",
    request_body = LoginBody,
    responses(
        (status = 200, description = "Bearer token issued", body = ResponseEnvelope),
        (status = 401, description = "Invalid credentials", body = ResponseEnvelope)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/user/login")]
pub async fn login(
    state: web::Data<HttpState>,
    language: RequestLanguage,
    payload: Result<web::Json<LoginBody>, actix_web::Error>,
) -> HttpResponse {
    let event = events::LOGIN;
    let input = payload
        .map(|body| LoginInput::from(body.into_inner()))
        .map_err(|err| malformed_body(event, errors::LOGIN_ERROR, &err));
    let envelope = resolve_parsed(state.accounts.login.as_ref(), event, input).await;
    reply(envelope, &state.catalog, language.as_str())
}

/// List registered accounts.
#[utoipa::path(
    get,
    path = "/users",
    params(PageQuery),
    responses(
        (status = 200, description = "Accounts", body = ResponseEnvelope),
        (status = 401, description = "Missing or invalid token", body = ResponseEnvelope)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(
    state: web::Data<HttpState>,
    _actor: Actor,
    language: RequestLanguage,
    query: Result<web::Query<PageQuery>, actix_web::Error>,
) -> HttpResponse {
    let event = events::LIST_USERS;
    let input = page_request(event, query).map(|page| ListUsersInput { page });
    let envelope = resolve_parsed(state.accounts.list.as_ref(), event, input).await;
    reply(envelope, &state.catalog, language.as_str())
}
