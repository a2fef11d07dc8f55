use aroya_api::{app, AppState};
use aroya_catalog::FlightDataset;
use aroya_store::ReservationStore;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn test_app() -> Router {
    app(AppState {
        store: Arc::new(ReservationStore::in_memory()),
        dataset: Arc::new(FlightDataset::builtin()),
    })
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn send_json(app: &Router, method: &str, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn valid_passenger() -> Value {
    json!({
        "name": "Dana Reyes",
        "age": 34,
        "gender": "female",
        "dob": "1992-03-14",
        "email": "dana@example.com"
    })
}

#[tokio::test]
async fn test_healthcheck() {
    let (status, body) = get(&test_app(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));
}

#[tokio::test]
async fn test_arrival_calendar_is_grouped_by_date() {
    let (status, body) = get(&test_app(), "/api/arrivals").await;
    assert_eq!(status, StatusCode::OK);

    let calendar = body["calendar"].as_array().expect("calendar days");
    assert!(!calendar.is_empty());
    for day in calendar {
        let date = day["date"].as_str().expect("day date");
        for flight in day["flights"].as_array().expect("day flights") {
            assert_eq!(flight["arrival"]["date"].as_str().unwrap(), date);
        }
    }
    assert_eq!(
        body["meta"]["total_flights"].as_u64().unwrap() as usize,
        body["flights"].as_array().unwrap().len()
    );
}

#[tokio::test]
async fn test_flight_search_by_route() {
    let (status, body) = get(
        &test_app(),
        "/api/flights?departure_city=New%20York&arrival_city=Chicago",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], json!(true));
    assert_eq!(body["code"], json!("FLIGHT_SEARCH_OK"));
    assert!(!body["data"]["flights"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_flight_search_rejects_unknown_class() {
    let (status, body) = get(&test_app(), "/api/flights?class_preference=steerage").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], json!(false));
    assert_eq!(body["code"], json!("FLIGHT_SEARCH_INVALID_INPUT"));
}

#[tokio::test]
async fn test_unknown_reservation_is_a_404_envelope() {
    let (status, body) = get(&test_app(), "/api/reservations/AR-MISSING1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["ok"], json!(false));
    assert_eq!(body["code"], json!("RESERVATION_NOT_FOUND"));
}

#[tokio::test]
async fn test_reservation_preview_reports_bill_and_next_action() {
    let app = test_app();
    let (status, body) = send_json(
        &app,
        "POST",
        "/api/reservations",
        json!({
            "flight_id": "AR-104",
            "passengers": [valid_passenger()]
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], json!("RESERVATION_PREVIEW"));
    assert_eq!(body["data"]["next_action"], json!("ask_confirmation"));
    assert_eq!(body["data"]["bill"]["total"], json!(189.0));
}

#[tokio::test]
async fn test_booking_and_seat_selection_flow() {
    let app = test_app();

    let (status, confirmed) = send_json(
        &app,
        "POST",
        "/api/reservations",
        json!({
            "flight_id": "AR-104",
            "confirm": true,
            "passengers": [valid_passenger()]
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(confirmed["code"], json!("RESERVATION_CONFIRMED"));
    let reservation_id = confirmed["data"]["reservation"]["reservation_id"]
        .as_str()
        .expect("reservation id")
        .to_string();
    assert!(confirmed["data"]["seat_map"]["meta"]["totalSeats"].is_number());

    // The reservation is fetchable afterwards
    let (status, fetched) = get(&app, &format!("/api/reservations/{}", reservation_id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["code"], json!("RESERVATION_FOUND"));
    assert_eq!(
        fetched["data"]["seat_selection"]["selected_seats"],
        json!([])
    );

    // An oversized selection is trimmed to the single-passenger limit
    let (status, updated) = send_json(
        &app,
        "PUT",
        &format!("/api/reservations/{}/seats", reservation_id),
        json!({"seats": ["12a", "12b", "14c"]}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["code"], json!("SEAT_SELECTION_UPDATED"));
    assert_eq!(
        updated["data"]["seat_selection"]["selected_seats"],
        json!(["12A"])
    );
    assert_eq!(
        updated["data"]["seat_map"]["meta"]["selectedSeats"],
        json!(1)
    );

    // The selection sticks on the next fetch
    let (_, refetched) = get(&app, &format!("/api/reservations/{}", reservation_id)).await;
    assert_eq!(
        refetched["data"]["seat_selection"]["selected_seats"],
        json!(["12A"])
    );
}

#[tokio::test]
async fn test_seat_update_for_unknown_reservation() {
    let (status, body) = send_json(
        &test_app(),
        "PUT",
        "/api/reservations/AR-MISSING1/seats",
        json!({"seats": ["1A"]}),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], json!("RESERVATION_NOT_FOUND"));
}
