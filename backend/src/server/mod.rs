//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::{AppSettings, SettingsError};
pub(crate) use state_builders::{Credentials, build_http_state};

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::body::BoxBody;
use actix_web::{App, HttpServer, web};

#[cfg(debug_assertions)]
use sharefood::doc::ApiDoc;
use sharefood::domain::MessageCatalog;
use sharefood::inbound::http::foods::{
    create_food, delete_my_food, food_detail, list_foods, list_my_foods, my_food_detail,
    update_my_food,
};
use sharefood::inbound::http::health::{HealthState, liveness, readiness};
use sharefood::inbound::http::requests::{
    create_request, list_requests_for_food, list_requests_for_user, request_action,
};
use sharefood::inbound::http::state::HttpState;
use sharefood::inbound::http::users::{list_users, login, register};
use sharefood::middleware::{CatchPanic, Trace};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// Listener settings resolved from [`AppSettings`].
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) client_request_timeout: Duration,
}

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    catalog: Arc<MessageCatalog>,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<BoxBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        catalog,
    } = deps;

    // `/my-foods/request` must be registered before `/my-foods/{id}`.
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(CatchPanic::new(catalog))
        .wrap(Trace)
        .service(register)
        .service(login)
        .service(list_users)
        .service(request_action)
        .service(list_requests_for_user)
        .service(list_requests_for_food)
        .service(create_request)
        .service(list_foods)
        .service(create_food)
        .service(food_detail)
        .service(list_my_foods)
        .service(my_food_detail)
        .service(update_my_food)
        .service(delete_my_food)
        .service(readiness)
        .service(liveness);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct the Actix HTTP server.
///
/// Readiness flips once the listener is bound.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    http_state: HttpState,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let catalog = Arc::clone(&http_state.catalog);
    let http_state = web::Data::new(http_state);
    let ServerConfig {
        bind_addr,
        client_request_timeout,
    } = config;

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            catalog: Arc::clone(&catalog),
        })
    })
    .client_request_timeout(client_request_timeout)
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}

#[cfg(test)]
mod tests {
    //! Route table coverage over fixture adapters.
    use actix_web::http::StatusCode;
    use actix_web::http::header::{ACCEPT_LANGUAGE, AUTHORIZATION};
    use actix_web::test;
    use rstest::rstest;
    use serde_json::{Value, json};
    use sharefood::domain::ports::{FixturePasswordHasher, FixtureTokens};
    use uuid::Uuid;

    use super::*;

    fn deps() -> AppDependencies {
        let catalog = Arc::new(MessageCatalog::bundled("en").expect("bundled catalog"));
        let tokens = Arc::new(FixtureTokens::default());
        let http_state = build_http_state(
            None,
            Credentials {
                hasher: Arc::new(FixturePasswordHasher),
                issuer: tokens.clone(),
                verifier: tokens,
            },
            Arc::clone(&catalog),
        );
        AppDependencies {
            health_state: web::Data::new(HealthState::new()),
            http_state: web::Data::new(http_state),
            catalog,
        }
    }

    #[rstest]
    #[case::own_requests("/my-foods/request", "listRequestsUserSuccess")]
    #[case::my_foods("/my-foods", "listMyFoodsSuccess")]
    #[case::shared_foods("/foods", "getFoodsSuccess")]
    #[case::users("/users", "listUsersSuccess")]
    #[actix_web::test]
    async fn listings_route_to_their_use_case(#[case] uri: &str, #[case] expected_state: &str) {
        let app = test::init_service(build_app(deps())).await;
        let request = test::TestRequest::get()
            .uri(uri)
            .insert_header((AUTHORIZATION, format!("Bearer {}", Uuid::new_v4())))
            .to_request();

        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("trace-id"));
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["state"], expected_state);
    }

    #[rstest]
    #[case::accept("accept")]
    #[case::reject("reject")]
    #[actix_web::test]
    async fn request_action_answers_through_the_middleware_stack(#[case] action: &str) {
        let app = test::init_service(build_app(deps())).await;
        let request = test::TestRequest::post()
            .uri("/my-foods/request/action")
            .insert_header((AUTHORIZATION, format!("Bearer {}", Uuid::new_v4())))
            .insert_header((ACCEPT_LANGUAGE, "en"))
            .set_json(json!({ "id_request": Uuid::new_v4(), "action": action }))
            .to_request();

        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let trace_id = response
            .headers()
            .get("trace-id")
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned)
            .expect("trace id header");
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["status"], "ERROR");
        assert_eq!(body["entity"], "requestAction");
        assert_eq!(body["state"], "requestActionError");
        assert_eq!(body["meta"]["transaction_id"], trace_id);
        assert!(body.get("code").is_none());
        let events: Vec<&str> = body["errors"]
            .as_array()
            .expect("error frames")
            .iter()
            .filter_map(|frame| frame["event"].as_str())
            .collect();
        assert_eq!(events, vec!["get_request_food_by_id_request", "request_action"]);
    }

    #[actix_web::test]
    async fn request_action_without_token_is_unauthorized() {
        let app = test::init_service(build_app(deps())).await;
        let request = test::TestRequest::post()
            .uri("/my-foods/request/action")
            .set_json(json!({ "id_request": Uuid::new_v4(), "action": "accept" }))
            .to_request();

        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(response.headers().contains_key("trace-id"));
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["entity"], "validateBearerTokenMiddleware");
    }

    #[actix_web::test]
    async fn probes_need_no_token() {
        let app = test::init_service(build_app(deps())).await;
        let response =
            test::call_service(&app, test::TestRequest::get().uri("/liveness").to_request()).await;
        assert_eq!(response.status(), StatusCode::OK);
    }
}
