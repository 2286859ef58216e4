use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use axum::Router;
use serde_json::json;
use tower::ServiceExt;

use crate::memory::MemorySubscriptionRepository;
use crate::rate_limit::FixedWindowLimiter;
use crate::subscriptions::{
    subscription_admin_router, subscription_public_router, SubscribeRequest, SubscriptionOutcome,
    SubscriptionService, SubscriptionServiceError,
};
use crate::testing::{json_request, read_json, with_sessions, ADMIN_TOKEN};

fn service() -> Arc<SubscriptionService> {
    Arc::new(SubscriptionService::new(Arc::new(
        MemorySubscriptionRepository::default(),
    )))
}

fn request(email: &str) -> SubscribeRequest {
    SubscribeRequest {
        email: email.to_string(),
        name: Some("Fatmata Kamara".to_string()),
        categories: None,
    }
}

fn router(service: Arc<SubscriptionService>, max_requests: u32) -> Router {
    let limiter = Arc::new(FixedWindowLimiter::new(max_requests, Duration::from_secs(60)));
    with_sessions(
        subscription_public_router(service.clone(), limiter)
            .merge(subscription_admin_router(service)),
    )
}

#[test]
fn new_subscription_defaults_categories_and_confirms() {
    let service = service();
    let outcome = service
        .subscribe(request("Fatmata@Example.SL "))
        .expect("subscribed");
    assert_eq!(outcome, SubscriptionOutcome::Created);

    let stored = service.list().expect("list").pop().expect("one row");
    assert_eq!(stored.email, "fatmata@example.sl");
    assert_eq!(stored.categories, vec!["news", "updates"]);
    assert!(stored.confirmed_at.is_some());
}

#[test]
fn active_duplicates_fail_and_inactive_ones_reactivate() {
    let service = service();
    service.subscribe(request("fatmata@example.sl")).expect("subscribed");
    assert!(matches!(
        service.subscribe(request("fatmata@example.sl")),
        Err(SubscriptionServiceError::AlreadySubscribed)
    ));

    service.unsubscribe("FATMATA@example.sl").expect("unsubscribed");
    let cancelled = service.list().expect("list").pop().expect("row");
    assert!(!cancelled.is_active);
    assert!(cancelled.unsubscribed_at.is_some());

    let outcome = service.subscribe(request("fatmata@example.sl")).expect("again");
    assert_eq!(outcome, SubscriptionOutcome::Reactivated);
    let revived = service.list().expect("list").pop().expect("row");
    assert!(revived.is_active);
    assert!(revived.unsubscribed_at.is_none());
}

#[test]
fn unknown_unsubscribe_is_not_found() {
    assert!(matches!(
        service().unsubscribe("nobody@example.sl"),
        Err(SubscriptionServiceError::NotFound)
    ));
}

#[tokio::test]
async fn subscribe_route_validates_email() {
    let response = router(service(), 10)
        .oneshot(json_request(
            "POST",
            "/api/subscribe",
            None,
            Some(json!({ "email": "not-an-email" })),
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(read_json(response).await["error"], json!("Invalid email address"));
}

#[tokio::test]
async fn subscribe_route_is_rate_limited() {
    let app = router(service(), 1);
    let first = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/subscribe",
            None,
            Some(json!({ "email": "one@example.sl" })),
        ))
        .await
        .expect("route executes");
    assert_eq!(first.status(), StatusCode::CREATED);
    assert_eq!(
        read_json(first).await["message"],
        json!("You have been successfully subscribed to our newsletter")
    );

    let second = app
        .oneshot(json_request(
            "POST",
            "/api/subscribe",
            None,
            Some(json!({ "email": "two@example.sl" })),
        ))
        .await
        .expect("route executes");
    assert_eq!(second.status(), StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn admin_listing_requires_a_token() {
    let service = service();
    service.subscribe(request("fatmata@example.sl")).expect("subscribed");

    let anonymous = router(service.clone(), 10)
        .oneshot(json_request("GET", "/api/admin/subscriptions", None, None))
        .await
        .expect("route executes");
    assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);

    let admin = router(service, 10)
        .oneshot(json_request("GET", "/api/admin/subscriptions", Some(ADMIN_TOKEN), None))
        .await
        .expect("route executes");
    assert_eq!(admin.status(), StatusCode::OK);
    assert_eq!(read_json(admin).await["data"][0]["email"], json!("fatmata@example.sl"));
}
