//! Tests for request lifecycle handlers.

use actix_web::http::StatusCode;
use actix_web::http::header::{ACCEPT_LANGUAGE, AUTHORIZATION};
use actix_web::{App, test};
use pagination::PageRequest;
use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::domain::codes;
use crate::inbound::http::test_utils::{RecordingUseCase, test_state};

fn bearer(id_user: Uuid) -> (actix_web::http::header::HeaderName, String) {
    (AUTHORIZATION, format!("Bearer {id_user}"))
}

async fn send(state: HttpState, request: test::TestRequest) -> (StatusCode, Value) {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .service(request_action)
            .service(create_request)
            .service(list_requests_for_user)
            .service(list_requests_for_food),
    )
    .await;
    let response = test::call_service(&app, request.to_request()).await;
    let status = response.status();
    let body: Value = test::read_body_json(response).await;
    (status, body)
}

#[actix_web::test]
async fn action_body_reaches_the_coordinator_with_the_token_identity() {
    let actor = Uuid::new_v4();
    let id_request = Uuid::new_v4();
    let use_case = RecordingUseCase::<RequestActionInput>::answering(ResponseEnvelope::success(
        events::REQUEST_ACTION,
        codes::OK,
        None,
    ));
    let mut state = test_state();
    state.requests.action = use_case.clone();

    let (status, body) = send(
        state,
        test::TestRequest::post()
            .uri("/my-foods/request/action")
            .insert_header(bearer(actor))
            .insert_header(("idUser", Uuid::new_v4().to_string()))
            .set_json(json!({ "id_request": id_request, "action": "accept" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["state"], "requestActionSuccess");
    assert_eq!(
        use_case.calls(),
        vec![RequestActionInput {
            actor,
            id_request,
            action: "accept".to_owned(),
        }]
    );
}

#[rstest]
#[case(json!({ "action": "accept" }))]
#[case(json!({ "id_request": "nope", "action": "accept" }))]
#[case(json!([]))]
#[actix_web::test]
async fn malformed_action_bodies_are_rejected_before_the_coordinator(#[case] payload: Value) {
    let use_case = RecordingUseCase::<RequestActionInput>::answering(ResponseEnvelope::success(
        events::REQUEST_ACTION,
        codes::OK,
        None,
    ));
    let mut state = test_state();
    state.requests.action = use_case.clone();

    let (status, body) = send(
        state,
        test::TestRequest::post()
            .uri("/my-foods/request/action")
            .insert_header(bearer(Uuid::new_v4()))
            .set_json(payload),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["status"], "ERROR");
    assert_eq!(body["state"], "requestActionError");
    assert_eq!(
        body["errors"],
        json!([{ "event": "request_action", "error": "create request error" }])
    );
    assert!(use_case.calls().is_empty());
}

#[actix_web::test]
async fn action_requires_a_bearer_token() {
    let (status, body) = send(
        test_state(),
        test::TestRequest::post()
            .uri("/my-foods/request/action")
            .set_json(json!({ "id_request": Uuid::new_v4(), "action": "reject" })),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["entity"], "validateBearerTokenMiddleware");
}

#[actix_web::test]
async fn failure_messages_are_localised_from_accept_language() {
    let chain = crate::domain::ErrorEvent::new(events::REQUEST_ACTION)
        .with_code(codes::FORBIDDEN)
        .wrap(errors::FORBIDDEN);
    let mut state = test_state();
    state.requests.action = RecordingUseCase::<RequestActionInput>::answering(
        ResponseEnvelope::failed(events::REQUEST_ACTION, chain),
    );
    let expected = state
        .catalog
        .lookup("forbidden", "id")
        .map(|entry| entry.text.clone())
        .expect("indonesian text");

    let (status, body) = send(
        state,
        test::TestRequest::post()
            .uri("/my-foods/request/action")
            .insert_header(bearer(Uuid::new_v4()))
            .insert_header((ACCEPT_LANGUAGE, "id-ID,en;q=0.5"))
            .set_json(json!({ "id_request": Uuid::new_v4(), "action": "reject" })),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], expected);
}

#[actix_web::test]
async fn create_request_passes_the_path_food_and_quantity() {
    let actor = Uuid::new_v4();
    let id_food = Uuid::new_v4();
    let use_case = RecordingUseCase::<CreateRequestInput>::answering(ResponseEnvelope::success(
        events::CREATE_REQUEST,
        codes::CREATED,
        None,
    ));
    let mut state = test_state();
    state.requests.create = use_case.clone();

    let (status, _) = send(
        state,
        test::TestRequest::post()
            .uri(&format!("/foods/request/{id_food}"))
            .insert_header(bearer(actor))
            .set_json(json!({ "quantity": 3 })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        use_case.calls(),
        vec![CreateRequestInput {
            actor,
            id_food,
            draft: RequestDraft { quantity: 3 },
        }]
    );
}

#[actix_web::test]
async fn create_request_rejects_malformed_food_ids() {
    let (status, body) = send(
        test_state(),
        test::TestRequest::post()
            .uri("/foods/request/not-a-uuid")
            .insert_header(bearer(Uuid::new_v4()))
            .set_json(json!({ "quantity": 3 })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["errors"][0]["event"], "create_request");
    assert_eq!(body["errors"][0]["error"][0]["field"], "id");
}

#[actix_web::test]
async fn own_requests_listing_resolves_pagination() {
    let actor = Uuid::new_v4();
    let use_case = RecordingUseCase::<ListRequestsForUserInput>::answering(
        ResponseEnvelope::success(events::LIST_REQUESTS_USER, codes::OK, Some(json!([]))),
    );
    let mut state = test_state();
    state.requests.list_for_user = use_case.clone();

    let (status, _) = send(
        state,
        test::TestRequest::get()
            .uri("/my-foods/request?page=2&limit=500")
            .insert_header(bearer(actor)),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        use_case.calls(),
        vec![ListRequestsForUserInput {
            actor,
            page: PageRequest::from_query(Some(2), Some(500)),
        }]
    );
}

#[actix_web::test]
async fn food_listing_rejects_non_numeric_pages() {
    let (status, body) = send(
        test_state(),
        test::TestRequest::get()
            .uri(&format!("/my-foods/request/{}?page=first", Uuid::new_v4()))
            .insert_header(bearer(Uuid::new_v4())),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["state"], "listRequestsFoodError");
}

#[actix_web::test]
async fn food_listing_forwards_the_food_id() {
    let actor = Uuid::new_v4();
    let id_food = Uuid::new_v4();
    let use_case = RecordingUseCase::<ListRequestsForFoodInput>::answering(
        ResponseEnvelope::success(events::LIST_REQUESTS_FOOD, codes::OK, Some(json!([]))),
    );
    let mut state = test_state();
    state.requests.list_for_food = use_case.clone();

    let (status, _) = send(
        state,
        test::TestRequest::get()
            .uri(&format!("/my-foods/request/{id_food}"))
            .insert_header(bearer(actor)),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        use_case.calls(),
        vec![ListRequestsForFoodInput {
            actor,
            id_food,
            page: PageRequest::default(),
        }]
    );
}
