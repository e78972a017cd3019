use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::{Duration, Utc};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;
use velocity_api::{app, AppState};
use velocity_store::app_config::Config;
use velocity_store::InMemoryStore;

const TEST_CONFIG: &str = r#"
[server]
port = 0

[database]
backend = "memory"
"#;

fn test_app() -> Router {
    let config = Config::from_toml(TEST_CONFIG).unwrap();
    let repos = Arc::new(InMemoryStore::new()).repositories();
    app(AppState::new(repos, &config))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body.map_or_else(Body::empty, |b| Body::from(b.to_string())))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

async fn create_hotel(app: &Router, standard: i32, deluxe: i32) -> Uuid {
    let (status, hotel) = send(
        app,
        "POST",
        "/api/hotels",
        Some(json!({
            "name": "Canal House",
            "location": "Amsterdam",
            "total_rooms": standard + deluxe,
            "room_types": { "standard": standard, "deluxe": deluxe }
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    hotel["id"].as_str().unwrap().parse().unwrap()
}

async fn seed_history(app: &Router, hotel_id: Uuid, days: i64, per_day: usize) {
    for day in 1..=days {
        let check_in = Utc::now() - Duration::days(day);
        for _ in 0..per_day {
            let (status, _) = send(
                app,
                "POST",
                "/api/bookings",
                Some(json!({
                    "hotel_id": hotel_id,
                    "room_id": Uuid::new_v4(),
                    "guest_name": "Jo Guest",
                    "guest_email": "jo@example.com",
                    "check_in_date": check_in,
                    "check_out_date": check_in + Duration::days(2),
                    "room_type": "standard",
                    "channel": "booking.com",
                    "rate": 150.0
                })),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
        }
    }
}

#[tokio::test]
async fn test_hotel_creation_provisions_rooms() {
    let app = test_app();
    let hotel_id = create_hotel(&app, 3, 2).await;

    let (status, hotel) = send(&app, "GET", &format!("/api/hotels/{}", hotel_id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(hotel["room_types"]["deluxe"], 2);

    let (_, rooms) = send(&app, "GET", &format!("/api/hotels/{}/rooms", hotel_id), None).await;
    let rooms = rooms.as_array().unwrap();
    assert_eq!(rooms.len(), 5);
    let numbers: Vec<&str> = rooms.iter().map(|r| r["room_number"].as_str().unwrap()).collect();
    assert!(numbers.contains(&"DELUXE-002"));
    assert!(numbers.contains(&"STANDARD-003"));

    let (_, hotels) = send(&app, "GET", "/api/hotels", None).await;
    assert_eq!(hotels.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_unknown_room_type_is_rejected() {
    let app = test_app();
    let (status, body) = send(
        &app,
        "POST",
        "/api/hotels",
        Some(json!({
            "name": "Nowhere Inn",
            "location": "Nowhere",
            "total_rooms": 1,
            "room_types": { "penthouse": 1 }
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("penthouse"));
}

#[tokio::test]
async fn test_missing_hotel_is_not_found() {
    let app = test_app();
    let missing = Uuid::new_v4();

    let (status, body) = send(&app, "GET", &format!("/api/hotels/{}", missing), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());

    let (status, _) = send(&app, "POST", &format!("/api/allocations/{}/optimize", missing), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "GET", &format!("/api/analytics/{}/dashboard", missing), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_forecast_without_history_is_bad_request() {
    let app = test_app();
    let hotel_id = create_hotel(&app, 10, 0).await;
    seed_history(&app, hotel_id, 3, 1).await;

    let (status, body) = send(&app, "POST", &format!("/api/forecast/{}", hotel_id), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("Insufficient historical data"));

    let (status, _) = send(&app, "POST", &format!("/api/rates/{}/optimize", hotel_id), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_full_revenue_flow() {
    let app = test_app();
    let hotel_id = create_hotel(&app, 20, 0).await;
    seed_history(&app, hotel_id, 5, 10).await;

    let (status, run) = send(&app, "POST", &format!("/api/forecast/{}?days_ahead=14", hotel_id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(run["message"], "Generated 14 demand forecasts");
    assert_eq!(run["forecasts"], 14);

    let (status, run) = send(&app, "POST", &format!("/api/allocations/{}/optimize", hotel_id), None).await;
    assert_eq!(status, StatusCode::OK);
    let allocation_count = run["allocations"].as_u64().unwrap();
    assert!(allocation_count > 0);
    assert_eq!(
        run["message"],
        format!("Optimized inventory allocation for {} entries", allocation_count)
    );

    let (_, listed) = send(&app, "GET", &format!("/api/allocations/{}", hotel_id), None).await;
    let listed = listed.as_array().unwrap();
    assert_eq!(listed.len() as u64, allocation_count);
    assert!(listed.iter().all(|a| a["channel"] != "airbnb"));

    let (status, run) = send(&app, "POST", &format!("/api/rates/{}/optimize", hotel_id), None).await;
    assert_eq!(status, StatusCode::OK);
    let recommendation_count = run["recommendations"].as_u64().unwrap();
    // The day-zero forecast may already sit just behind the new reference time
    assert!((7..=8).contains(&recommendation_count));

    let (_, listed) = send(&app, "GET", &format!("/api/rates/{}/recommendations", hotel_id), None).await;
    let listed = listed.as_array().unwrap();
    assert_eq!(listed.len() as u64, recommendation_count);
    assert!(listed
        .iter()
        .all(|r| r["reason"] == "High demand predicted - increase rate by 20%"));
    assert_eq!(listed[0]["current_rate"], 290.0);

    let (_, forecasts) = send(&app, "GET", &format!("/api/forecast/{}?days_ahead=30", hotel_id), None).await;
    assert!(forecasts.as_array().unwrap().len() >= 13);
}

#[tokio::test]
async fn test_oversized_horizon_is_bad_request() {
    let app = test_app();
    let hotel_id = create_hotel(&app, 20, 0).await;
    seed_history(&app, hotel_id, 5, 10).await;

    for days in ["3651", "100000000", "4294967295"] {
        let routes = [
            ("POST", format!("/api/forecast/{}?days_ahead={}", hotel_id, days)),
            ("GET", format!("/api/forecast/{}?days_ahead={}", hotel_id, days)),
            ("POST", format!("/api/allocations/{}/optimize?days_ahead={}", hotel_id, days)),
            ("GET", format!("/api/allocations/{}?days_ahead={}", hotel_id, days)),
            ("POST", format!("/api/rates/{}/optimize?days_ahead={}", hotel_id, days)),
            ("GET", format!("/api/rates/{}/recommendations?days_ahead={}", hotel_id, days)),
            ("GET", format!("/api/bookings?hotel_id={}&days_ahead={}", hotel_id, days)),
        ];

        for (method, uri) in routes {
            let (status, body) = send(&app, method, &uri, None).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{} {}", method, uri);
            assert!(body["error"].as_str().unwrap().contains("days_ahead"));
        }
    }
}

#[tokio::test]
async fn test_manual_allocation_and_dashboard() {
    let app = test_app();
    let hotel_id = create_hotel(&app, 4, 0).await;

    let tomorrow = Utc::now() + Duration::days(1);
    let (status, allocation) = send(
        &app,
        "POST",
        "/api/allocations",
        Some(json!({
            "hotel_id": hotel_id,
            "room_type": "standard",
            "date": tomorrow,
            "channel": "expedia",
            "allocated_rooms": 2,
            "rate": 99.5
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(allocation["channel"], "expedia");

    let (status, booking) = send(
        &app,
        "POST",
        "/api/bookings",
        Some(json!({
            "hotel_id": hotel_id,
            "room_id": Uuid::new_v4(),
            "guest_name": "Sam Guest",
            "guest_email": "sam@example.com",
            "check_in_date": tomorrow,
            "check_out_date": tomorrow + Duration::days(1),
            "room_type": "standard",
            "channel": "walk-in",
            "rate": 120.0
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(booking["status"], "confirmed");

    let (_, bookings) = send(&app, "GET", &format!("/api/bookings?hotel_id={}&days_ahead=7", hotel_id), None).await;
    assert_eq!(bookings.as_array().unwrap().len(), 1);

    let (status, dashboard) = send(&app, "GET", &format!("/api/analytics/{}/dashboard", hotel_id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(dashboard["hotel_name"], "Canal House");
    assert_eq!(dashboard["metrics"]["total_bookings"], 1);
    assert_eq!(dashboard["metrics"]["occupancy_rate"], 25.0);
    assert_eq!(dashboard["metrics"]["revpar"], 30.0);
    assert_eq!(dashboard["channel_performance"]["walk-in"]["revenue"], 120.0);
}
