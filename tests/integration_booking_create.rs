use std::sync::Arc;

use resort_booking_api::repositories::MemoryBookingRepository;
use resort_booking_api::test_helpers::spawn_booking_api;
use serde_json::{Value, json};

fn valid_booking() -> Value {
    json!({
        "name": "Jo",
        "email": "jo@x.com",
        "phone": "1234567890",
        "checkInDate": "2025-06-01",
        "checkOutDate": "2025-06-05",
        "guests": 2
    })
}

async fn post_booking(base: &str, payload: &Value) -> reqwest::Response {
    reqwest::Client::new()
        .post(format!("{}/bookings", base))
        .json(payload)
        .send()
        .await
        .expect("request failed")
}

#[tokio::test]
async fn create_booking_flow() {
    let base = spawn_booking_api(Arc::new(MemoryBookingRepository::new())).await.expect("spawn");

    let res = post_booking(&base, &valid_booking()).await;
    if res.status().as_u16() != 201 {
        let status = res.status();
        let text = res.text().await.unwrap_or_default();
        panic!("expected 201 but got {}: {}", status, text);
    }
    let body: Value = res.json().await.expect("json");
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "Booking created successfully");

    let booking = &body["data"]["booking"];
    assert!(booking["_id"].as_str().map(|id| !id.is_empty()).unwrap_or(false));
    assert_eq!(booking["guests"], 2);
    assert_eq!(booking["message"], "");
    assert_eq!(booking["checkInDate"], "2025-06-01T00:00:00Z");
    assert_eq!(booking["checkOutDate"], "2025-06-05T00:00:00Z");
    assert!(booking["createdAt"].is_string());
    assert!(booking["updatedAt"].is_string());
}

#[tokio::test]
async fn create_booking_rejects_reversed_dates() {
    let base = spawn_booking_api(Arc::new(MemoryBookingRepository::new())).await.expect("spawn");

    let mut payload = valid_booking();
    payload["checkInDate"] = json!("2025-06-05");
    payload["checkOutDate"] = json!("2025-06-01");

    let res = post_booking(&base, &payload).await;
    assert_eq!(res.status().as_u16(), 400);
    let body: Value = res.json().await.expect("json");
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "Validation failed");
    let errors = body["errors"].as_array().expect("errors array");
    assert!(errors.contains(&json!({
        "field": "checkOutDate",
        "message": "Check-out date must be after check-in date"
    })));

    // Nothing reached storage
    let list: Value = reqwest::get(format!("{}/bookings", base))
        .await
        .expect("request failed")
        .json()
        .await
        .expect("json");
    assert_eq!(list["data"]["count"], 0);
}

#[tokio::test]
async fn create_booking_validation_errors() {
    let base = spawn_booking_api(Arc::new(MemoryBookingRepository::new())).await.expect("spawn");

    let res = post_booking(&base, &json!({ "name": "", "email": "", "guests": -1 })).await;
    assert_eq!(res.status().as_u16(), 400);
    let body: Value = res.json().await.expect("json");
    assert_eq!(body["message"], "Validation failed");
    assert!(body.get("data").is_none());

    let fields: Vec<&str> = body["errors"]
        .as_array()
        .expect("errors array")
        .iter()
        .filter_map(|e| e["field"].as_str())
        .collect();
    for expected in ["name", "email", "phone", "checkInDate", "checkOutDate", "guests"] {
        assert!(fields.contains(&expected), "missing error for {expected}: {fields:?}");
    }
}

#[tokio::test]
async fn create_booking_sanitizes_strings() {
    let base = spawn_booking_api(Arc::new(MemoryBookingRepository::new())).await.expect("spawn");

    let mut payload = valid_booking();
    payload["name"] = json!("  <b>Jo</b>  ");
    payload["email"] = json!("  JO@X.COM ");
    payload["message"] = json!("<script>x</script>Sea view please ");

    let res = post_booking(&base, &payload).await;
    assert_eq!(res.status().as_u16(), 201);
    let body: Value = res.json().await.expect("json");
    let booking = &body["data"]["booking"];
    assert_eq!(booking["name"], "Jo");
    assert_eq!(booking["email"], "jo@x.com");
    assert_eq!(booking["message"], "xSea view please");
}

#[tokio::test]
async fn create_booking_sanitizes_json_suffix_media_types() {
    let base = spawn_booking_api(Arc::new(MemoryBookingRepository::new())).await.expect("spawn");

    let mut payload = valid_booking();
    payload["name"] = json!("  <b>Jo</b>  ");
    payload["message"] = json!("<script>x</script>hi");

    for content_type in ["application/vnd.api+json", "application/merge-patch+json"] {
        let res = reqwest::Client::new()
            .post(format!("{}/bookings", base))
            .header("Content-Type", content_type)
            .body(payload.to_string())
            .send()
            .await
            .expect("request failed");
        assert_eq!(res.status().as_u16(), 201, "content type {content_type}");
        let body: Value = res.json().await.expect("json");
        let booking = &body["data"]["booking"];
        assert_eq!(booking["name"], "Jo", "content type {content_type}");
        assert_eq!(booking["message"], "xhi", "content type {content_type}");
    }
}

#[tokio::test]
async fn create_booking_accepts_long_free_text() {
    let base = spawn_booking_api(Arc::new(MemoryBookingRepository::new())).await.expect("spawn");

    let mut payload = valid_booking();
    payload["name"] = json!("N".repeat(300));
    payload["phone"] = json!("9".repeat(65));

    let res = post_booking(&base, &payload).await;
    assert_eq!(res.status().as_u16(), 201);
    let body: Value = res.json().await.expect("json");
    assert_eq!(body["data"]["booking"]["phone"].as_str().map(str::len), Some(65));
}

#[tokio::test]
async fn create_booking_tag_only_name_is_rejected() {
    let base = spawn_booking_api(Arc::new(MemoryBookingRepository::new())).await.expect("spawn");

    let mut payload = valid_booking();
    payload["name"] = json!("<img src=x>");

    let res = post_booking(&base, &payload).await;
    assert_eq!(res.status().as_u16(), 400);
    let body: Value = res.json().await.expect("json");
    assert_eq!(body["errors"][0]["field"], "name");
}

#[tokio::test]
async fn create_booking_malformed_json_is_bad_input() {
    let base = spawn_booking_api(Arc::new(MemoryBookingRepository::new())).await.expect("spawn");

    let res = reqwest::Client::new()
        .post(format!("{}/bookings", base))
        .header("Content-Type", "application/json")
        .body("{\"name\": \"Jo\",")
        .send()
        .await
        .expect("request failed");
    assert_eq!(res.status().as_u16(), 400);
    let body: Value = res.json().await.expect("json");
    assert_eq!(body["status"], "error");
    assert!(body.get("errors").is_none());
}
