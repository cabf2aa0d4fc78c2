//! Tests for listing HTTP handlers.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::Trace;
use crate::domain::ports::{ListingsCommand, ListingsQuery, MockListingsCommand, MockListingsQuery};
use crate::domain::{Error, ListingService, TRACE_ID_HEADER};
use crate::inbound::http::{configure, not_found};
use crate::outbound::persistence::InMemoryListingRepository;

const UNKNOWN_ID: &str = "65f1c2a9b8e4d3c2b1a09f8e";

fn in_memory_state() -> HttpState {
    let service = Arc::new(ListingService::new(Arc::new(
        InMemoryListingRepository::new(),
    )));
    HttpState::new(service.clone(), service)
}

fn test_app(
    state: HttpState,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .wrap(Trace)
        .configure(configure)
        .default_service(web::to(not_found))
}

async fn create(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
    body: Value,
) -> String {
    let request = actix_test::TestRequest::post()
        .uri("/foods")
        .set_json(body)
        .to_request();
    let response: Value = actix_test::call_and_read_body_json(app, request).await;
    response["result"]["insertedId"]
        .as_str()
        .expect("inserted id")
        .to_owned()
}

#[actix_web::test]
async fn root_serves_plain_text_banner() {
    let app = actix_test::init_service(test_app(in_memory_state())).await;
    let request = actix_test::TestRequest::get().uri("/").to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = actix_test::read_body(response).await;
    assert_eq!(body.as_ref(), GREETING.as_bytes());
}

#[actix_web::test]
async fn posted_listing_round_trips_with_identifier() {
    let app = actix_test::init_service(test_app(in_memory_state())).await;
    let id = create(&app, json!({"name": "Bread", "quantity": 2})).await;
    assert_eq!(id.len(), 24);

    let request = actix_test::TestRequest::get()
        .uri(&format!("/foods/{id}"))
        .to_request();
    let listing: Value = actix_test::call_and_read_body_json(&app, request).await;
    assert_eq!(listing, json!({"_id": id, "name": "Bread", "quantity": 2}));
}

#[actix_web::test]
async fn create_acknowledges_insert() {
    let app = actix_test::init_service(test_app(in_memory_state())).await;
    let request = actix_test::TestRequest::post()
        .uri("/foods")
        .set_json(json!({"name": "Rice"}))
        .to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, request).await;

    assert_eq!(body["success"], json!(true));
    assert_eq!(body["result"]["acknowledged"], json!(true));
    assert!(body["result"]["insertedId"].is_string());
}

#[actix_web::test]
async fn client_supplied_identifier_is_ignored() {
    let app = actix_test::init_service(test_app(in_memory_state())).await;
    let id = create(&app, json!({"_id": UNKNOWN_ID, "name": "Rice"})).await;
    assert_ne!(id, UNKNOWN_ID);
}

#[actix_web::test]
async fn manage_foods_filters_by_donator_email() {
    let app = actix_test::init_service(test_app(in_memory_state())).await;
    for email in ["a@x.com", "b@x.com", "a@x.com"] {
        create(&app, json!({"donatorEmail": email})).await;
    }

    let request = actix_test::TestRequest::get()
        .uri("/manageFoods?email=a@x.com")
        .to_request();
    let listings: Vec<Value> = actix_test::call_and_read_body_json(&app, request).await;
    assert_eq!(listings.len(), 2);
    assert!(listings
        .iter()
        .all(|listing| listing["donatorEmail"] == json!("a@x.com")));
}

#[actix_web::test]
async fn manage_foods_without_email_is_empty() {
    let app = actix_test::init_service(test_app(in_memory_state())).await;
    create(&app, json!({"donatorEmail": "a@x.com"})).await;

    let request = actix_test::TestRequest::get().uri("/manageFoods").to_request();
    let listings: Vec<Value> = actix_test::call_and_read_body_json(&app, request).await;
    assert!(listings.is_empty());
}

#[actix_web::test]
async fn latest_foods_returns_six_newest() {
    let app = actix_test::init_service(test_app(in_memory_state())).await;
    for day in 10..20 {
        create(
            &app,
            json!({"day": day, "createdAt": format!("2024-03-{day}T08:00:00Z")}),
        )
        .await;
    }

    let request = actix_test::TestRequest::get().uri("/latest-foods").to_request();
    let listings: Vec<Value> = actix_test::call_and_read_body_json(&app, request).await;
    let days: Vec<i64> = listings
        .iter()
        .filter_map(|listing| listing["day"].as_i64())
        .collect();
    assert_eq!(days, vec![19, 18, 17, 16, 15, 14]);
}

#[actix_web::test]
async fn update_merges_supplied_fields() {
    let app = actix_test::init_service(test_app(in_memory_state())).await;
    let id = create(&app, json!({"a": 1, "b": 2})).await;

    let request = actix_test::TestRequest::put()
        .uri(&format!("/foodUpdate/{id}"))
        .set_json(json!({"b": 3}))
        .to_request();
    let outcome: Value = actix_test::call_and_read_body_json(&app, request).await;
    assert_eq!(
        outcome,
        json!({
            "acknowledged": true,
            "modifiedCount": 1,
            "upsertedId": null,
            "upsertedCount": 0,
            "matchedCount": 1
        })
    );

    let request = actix_test::TestRequest::get()
        .uri(&format!("/foods/{id}"))
        .to_request();
    let listing: Value = actix_test::call_and_read_body_json(&app, request).await;
    assert_eq!(listing, json!({"_id": id, "a": 1, "b": 3}));
}

#[actix_web::test]
async fn delete_is_idempotent_over_http() {
    let app = actix_test::init_service(test_app(in_memory_state())).await;
    let id = create(&app, json!({"name": "Soup"})).await;

    for expected in [1, 0] {
        let request = actix_test::TestRequest::delete()
            .uri(&format!("/foods/{id}"))
            .to_request();
        let body: Value = actix_test::call_and_read_body_json(&app, request).await;
        assert_eq!(
            body,
            json!({"success": true, "result": {"acknowledged": true, "deletedCount": expected}})
        );
    }
}

#[actix_web::test]
async fn unknown_listing_is_null() {
    let app = actix_test::init_service(test_app(in_memory_state())).await;
    let request = actix_test::TestRequest::get()
        .uri(&format!("/foods/{UNKNOWN_ID}"))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body, Value::Null);
}

#[rstest]
#[case(actix_test::TestRequest::get().uri("/foods/not-a-valid-id"))]
#[case(actix_test::TestRequest::delete().uri("/foods/not-a-valid-id"))]
#[case(actix_test::TestRequest::put().uri("/foodUpdate/xyz").set_json(json!({"a": 1})))]
#[actix_web::test]
async fn malformed_identifiers_are_rejected(#[case] request: actix_test::TestRequest) {
    let app = actix_test::init_service(test_app(in_memory_state())).await;
    let response = actix_test::call_service(&app, request.to_request()).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let trace_id = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["code"], json!("invalid_request"));
    assert_eq!(body["details"]["field"], json!("id"));
    assert_eq!(body["details"]["code"], json!("invalid_listing_id"));
    assert_eq!(body["traceId"].as_str(), trace_id.as_deref());
}

#[rstest]
#[case(json!([{"name": "Bread"}]))]
#[case(json!("Bread"))]
#[actix_web::test]
async fn non_object_bodies_are_rejected(#[case] body: Value) {
    let app = actix_test::init_service(test_app(in_memory_state())).await;
    let request = actix_test::TestRequest::post()
        .uri("/foods")
        .set_json(body)
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["details"]["code"], json!("invalid_body"));
}

#[actix_web::test]
async fn invalid_json_is_a_client_error() {
    let app = actix_test::init_service(test_app(in_memory_state())).await;
    let request = actix_test::TestRequest::post()
        .uri("/foods")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["code"], json!("invalid_request"));
    assert_eq!(body["details"]["code"], json!("invalid_json"));
}

#[actix_web::test]
async fn unknown_routes_return_json_404() {
    let app = actix_test::init_service(test_app(in_memory_state())).await;
    let request = actix_test::TestRequest::get().uri("/nope").to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["code"], json!("not_found"));
}

fn failing_state(error: fn() -> Error) -> HttpState {
    let mut query = MockListingsQuery::new();
    query.expect_list_all().returning(move || Err(error()));
    let query: Arc<dyn ListingsQuery> = Arc::new(query);
    let command: Arc<dyn ListingsCommand> = Arc::new(MockListingsCommand::new());
    HttpState::new(command, query)
}

#[actix_web::test]
async fn store_outage_maps_to_service_unavailable() {
    let state = failing_state(|| Error::service_unavailable("listing store unavailable"));
    let app = actix_test::init_service(test_app(state)).await;
    let request = actix_test::TestRequest::get().uri("/foods").to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["code"], json!("service_unavailable"));
}

#[actix_web::test]
async fn store_query_failure_is_redacted() {
    let state = failing_state(|| Error::internal("listing store error: bad sort key"));
    let app = actix_test::init_service(test_app(state)).await;
    let request = actix_test::TestRequest::get().uri("/foods").to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["message"], json!("Internal server error"));
}
