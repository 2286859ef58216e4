use super::common::*;
use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

use crate::testing::{json_request, read_json, EDITOR_TOKEN, VIEWER_TOKEN};

#[tokio::test]
async fn public_listing_returns_paginated_envelope() {
    let harness = harness();
    create(&harness.service, draft("Luxury Villa in Hill Station"));

    let response = router(harness.service, 10)
        .oneshot(json_request("GET", "/api/properties?limit=5&region=Western%20Area%20Urban", None, None))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["pagination"]["limit"], json!(5));
    assert_eq!(body["pagination"]["total"], json!(1));
    assert_eq!(body["data"][0]["type"], json!("RESIDENTIAL"));
}

#[tokio::test]
async fn invalid_limit_is_a_bad_request() {
    let harness = harness();
    let response = router(harness.service, 10)
        .oneshot(json_request("GET", "/api/properties?limit=500", None, None))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_property_is_not_found() {
    let harness = harness();
    let response = router(harness.service, 10)
        .oneshot(json_request("GET", "/api/properties/no-such-slug", None, None))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(read_json(response).await["error"], json!("Property not found"));
}

#[tokio::test]
async fn featured_route_is_not_shadowed_by_detail() {
    let harness = harness();
    create(&harness.service, draft("Luxury Villa in Hill Station"));
    let response = router(harness.service, 10)
        .oneshot(json_request("GET", "/api/properties/featured", None, None))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json(response).await["data"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn region_list_is_public() {
    let harness = harness();
    let response = router(harness.service, 10)
        .oneshot(json_request("GET", "/api/properties/regions", None, None))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["data"].as_array().map(Vec::len), Some(16));
    assert_eq!(body["data"][0], json!("Western Area Urban"));
}

#[tokio::test]
async fn interest_submission_validates_and_rate_limits() {
    let harness = harness();
    let property = create(&harness.service, draft("Luxury Villa in Hill Station"));
    let app = router(harness.service, 2);
    let uri = format!("/api/properties/{}/interest", property.id);

    let mut invalid = serde_json::to_value(submission()).expect("serializable");
    invalid["nin"] = json!("123");
    let response = app
        .clone()
        .oneshot(json_request("POST", &uri, None, Some(invalid)))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        read_json(response).await["error"],
        json!("NIN must be at least 8 characters")
    );

    let valid = serde_json::to_value(submission()).expect("serializable");
    let response = app
        .clone()
        .oneshot(json_request("POST", &uri, None, Some(valid.clone())))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = read_json(response).await;
    assert!(body["data"]["reference_number"]
        .as_str()
        .is_some_and(|reference| reference.starts_with("EOI-")));

    let response = app
        .oneshot(json_request("POST", &uri, None, Some(valid)))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn admin_routes_require_session_and_write_role() {
    let harness = harness();
    let app = router(harness.service, 10);
    let payload = json!({
        "title": "Government Quarters Brookfields",
        "description": "Residential compound recovered from a former procurement officer.",
        "type": "RESIDENTIAL",
        "region": "Western Area Urban",
        "estimated_value": 900000000.0,
        "publish": true
    });

    let anonymous = app
        .clone()
        .oneshot(json_request("POST", "/api/admin/properties", None, Some(payload.clone())))
        .await
        .expect("route executes");
    assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);

    let viewer = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/admin/properties",
            Some(VIEWER_TOKEN),
            Some(payload.clone()),
        ))
        .await
        .expect("route executes");
    assert_eq!(viewer.status(), StatusCode::FORBIDDEN);

    let editor = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/admin/properties",
            Some(EDITOR_TOKEN),
            Some(payload),
        ))
        .await
        .expect("route executes");
    assert_eq!(editor.status(), StatusCode::CREATED);
    let created = read_json(editor).await;
    assert_eq!(created["data"]["status"], json!("AVAILABLE"));
    assert_eq!(created["data"]["currency"], json!("SLE"));

    let listing = app
        .oneshot(json_request("GET", "/api/admin/properties", Some(VIEWER_TOKEN), None))
        .await
        .expect("route executes");
    assert_eq!(listing.status(), StatusCode::OK);
    let rows = read_json(listing).await;
    assert_eq!(rows["data"][0]["expressions_of_interest"], json!(0));
}

#[tokio::test]
async fn admin_can_attach_images_and_delete() {
    let harness = harness();
    let property = create(&harness.service, draft("Luxury Villa in Hill Station"));
    let app = router(harness.service, 10);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/api/admin/properties/{}/images", property.id),
            Some(EDITOR_TOKEN),
            Some(json!({ "url": "/uploads/properties/villa.jpg", "caption": "Front" })),
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(read_json(response).await["data"]["images"][0]["is_primary"], json!(true));

    let response = app
        .clone()
        .oneshot(json_request(
            "DELETE",
            &format!("/api/admin/properties/{}", property.id),
            Some(EDITOR_TOKEN),
            None,
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(json_request(
            "GET",
            &format!("/api/admin/properties/{}", property.id),
            Some(EDITOR_TOKEN),
            None,
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
