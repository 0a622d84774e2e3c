//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every handler path, the request and response bodies,
//! and the bearer token security scheme. Swagger UI serves it in debug
//! builds.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{
    Food, FoodDraft, IssuedToken, Registration, Request, RequestDraft, RequestWithFood,
    ResponseEnvelope, User,
};
use crate::inbound::http::requests::RequestActionBody;
use crate::inbound::http::users::LoginBody;

/// Name of the bearer security scheme.
pub const BEARER_SCHEME: &str = "BearerToken";

/// Enrich the generated document with the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        let bearer = HttpBuilder::new()
            .scheme(HttpAuthScheme::Bearer)
            .bearer_format("JWT")
            .description(Some("Token issued by POST /user/login."))
            .build();
        components.add_security_scheme(BEARER_SCHEME, SecurityScheme::Http(bearer));
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Sharefood API",
        description = "Food sharing marketplace: listings, requests and their fulfilment."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerToken" = [])),
    paths(
        crate::inbound::http::users::register,
        crate::inbound::http::users::login,
        crate::inbound::http::users::list_users,
        crate::inbound::http::foods::list_foods,
        crate::inbound::http::foods::create_food,
        crate::inbound::http::foods::food_detail,
        crate::inbound::http::foods::list_my_foods,
        crate::inbound::http::foods::my_food_detail,
        crate::inbound::http::foods::update_my_food,
        crate::inbound::http::foods::delete_my_food,
        crate::inbound::http::requests::request_action,
        crate::inbound::http::requests::create_request,
        crate::inbound::http::requests::list_requests_for_food,
        crate::inbound::http::requests::list_requests_for_user,
        crate::inbound::http::health::readiness,
        crate::inbound::http::health::liveness,
    ),
    components(schemas(
        ResponseEnvelope,
        Food,
        FoodDraft,
        Request,
        RequestDraft,
        RequestWithFood,
        RequestActionBody,
        Registration,
        LoginBody,
        IssuedToken,
        User,
    )),
    tags(
        (name = "users", description = "Registration, login and account listing"),
        (name = "foods", description = "Shared food listings"),
        (name = "requests", description = "Requests for food and their resolution"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
