//! Tests for envelope rendering.

use actix_web::body::to_bytes;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use super::*;
use crate::domain::messages::{errors, events};
use crate::domain::{ErrorEvent, codes};

#[fixture]
fn catalog() -> MessageCatalog {
    MessageCatalog::bundled("en").expect("bundled catalog")
}

async fn body_json(response: HttpResponse) -> Value {
    let bytes = to_bytes(response.into_body()).await.expect("body");
    serde_json::from_slice(&bytes).expect("json body")
}

#[rstest]
#[case(200, StatusCode::OK)]
#[case(422, StatusCode::UNPROCESSABLE_ENTITY)]
#[case(1000, StatusCode::INTERNAL_SERVER_ERROR)]
fn status_line_follows_the_envelope_code(#[case] code: u16, #[case] expected: StatusCode) {
    assert_eq!(status_for(code), expected);
}

#[rstest]
#[actix_web::test]
async fn success_envelopes_render_without_errors(catalog: MessageCatalog) {
    let envelope = ResponseEnvelope::success(events::GET_FOODS, codes::OK, Some(json!([])));

    let response = reply(envelope, &catalog, "en");
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "SUCCESS");
    assert_eq!(body["state"], "getFoodsSuccess");
    assert!(body.get("errors").is_none());
    assert!(body.get("code").is_none());
}

#[rstest]
#[actix_web::test]
async fn failure_envelopes_carry_frames_and_localised_text(catalog: MessageCatalog) {
    let chain = ErrorEvent::new(events::LIST_REQUESTS_FOOD)
        .with_code(codes::FORBIDDEN)
        .wrap(errors::FORBIDDEN);
    let envelope = ResponseEnvelope::failed(events::LIST_REQUESTS_FOOD, chain);
    let expected_text = catalog
        .lookup("forbidden", "en")
        .map(|entry| entry.text.clone())
        .expect("forbidden entry");

    let response = reply(envelope, &catalog, "en");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let body = body_json(response).await;
    assert_eq!(body["status"], "ERROR");
    assert_eq!(body["message"], expected_text);
    assert_eq!(
        body["errors"],
        json!([{ "event": "list_requests_food", "error": "forbidden" }])
    );
}

#[rstest]
#[actix_web::test]
async fn extractor_rejections_render_their_envelope(catalog: MessageCatalog) {
    let chain = ErrorEvent::new(events::VALIDATE_BEARER_TOKEN)
        .with_code(codes::UNAUTHORIZED)
        .wrap(errors::UNAUTHORIZED);
    let rejection = EnvelopeError::new(
        ResponseEnvelope::failed(events::VALIDATE_BEARER_TOKEN, chain),
        &catalog,
        "en",
    );

    assert_eq!(rejection.status_code(), StatusCode::UNAUTHORIZED);
    let body = body_json(rejection.error_response()).await;
    assert_eq!(body["state"], "validateBearerTokenMiddlewareError");
}
