use super::common::*;
use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

use crate::accounts::Role;

#[tokio::test]
async fn login_route_returns_token_and_user() {
    let (service, _) = build_service();
    create(&service, "admin@acc.gov.sl", Role::Admin);

    let response = router(service)
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            None,
            json!({ "email": "admin@acc.gov.sl", "password": "Str0ngPassw0rd" }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"]["token_type"], json!("Bearer"));
    assert_eq!(body["data"]["user"]["role"], json!("ADMIN"));
    assert!(body["data"]["user"].get("password_hash").is_none());
}

#[tokio::test]
async fn login_route_rejects_bad_credentials() {
    let (service, _) = build_service();
    create(&service, "admin@acc.gov.sl", Role::Admin);

    let response = router(service)
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            None,
            json!({ "email": "admin@acc.gov.sl", "password": "guess" }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = read_json(response).await;
    assert_eq!(body["error"], json!("Invalid email or password"));
}

#[tokio::test]
async fn login_route_is_rate_limited() {
    let (service, _) = build_service();
    let app = router(service);

    let mut last = StatusCode::OK;
    for _ in 0..4 {
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/auth/login",
                None,
                json!({ "email": "nobody@acc.gov.sl", "password": "whatever1" }),
            ))
            .await
            .expect("route executes");
        last = response.status();
    }
    assert_eq!(last, StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn me_requires_a_bearer_token() {
    let (service, _) = build_service();
    let app = router(service.clone());

    let anonymous = app
        .clone()
        .oneshot(json_request("GET", "/api/auth/me", None, json!({})))
        .await
        .expect("route executes");
    assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        read_json(anonymous).await["error"],
        json!("Authentication required")
    );

    let garbage = app
        .clone()
        .oneshot(json_request("GET", "/api/auth/me", Some("not-a-jwt"), json!({})))
        .await
        .expect("route executes");
    assert_eq!(garbage.status(), StatusCode::UNAUTHORIZED);

    let (user, token) = token_for(&service, "editor@acc.gov.sl", Role::Editor);
    let response = app
        .oneshot(json_request("GET", "/api/auth/me", Some(&token), json!({})))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json(response).await["data"]["id"], json!(user.id.0));
}

#[tokio::test]
async fn user_management_requires_admin_role() {
    let (service, _) = build_service();
    let (_, editor_token) = token_for(&service, "editor@acc.gov.sl", Role::Editor);
    let app = router(service);

    let response = app
        .oneshot(json_request(
            "GET",
            "/api/admin/users",
            Some(&editor_token),
            json!({}),
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(
        read_json(response).await["error"],
        json!("Administrator role required")
    );
}

#[tokio::test]
async fn admin_creates_updates_and_deactivates_users() {
    let (service, _) = build_service();
    let (_, admin_token) = token_for(&service, "admin@acc.gov.sl", Role::Admin);
    let app = router(service);

    let created = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/admin/users",
            Some(&admin_token),
            json!({
                "name": "Mohamed Sesay",
                "email": "m.sesay@acc.gov.sl",
                "password": "Investigat0r!",
                "role": "VIEWER"
            }),
        ))
        .await
        .expect("route executes");
    assert_eq!(created.status(), StatusCode::CREATED);
    let user_id = read_json(created).await["data"]["id"]
        .as_str()
        .expect("id present")
        .to_string();

    let duplicate = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/admin/users",
            Some(&admin_token),
            json!({
                "name": "Someone Else",
                "email": "M.Sesay@acc.gov.sl",
                "password": "Investigat0r!",
                "role": "EDITOR"
            }),
        ))
        .await
        .expect("route executes");
    assert_eq!(duplicate.status(), StatusCode::BAD_REQUEST);
    assert_eq!(read_json(duplicate).await["error"], json!("Email already in use"));

    let promoted = app
        .clone()
        .oneshot(json_request(
            "PATCH",
            &format!("/api/admin/users/{user_id}"),
            Some(&admin_token),
            json!({ "role": "EDITOR" }),
        ))
        .await
        .expect("route executes");
    assert_eq!(promoted.status(), StatusCode::OK);
    assert_eq!(read_json(promoted).await["data"]["role"], json!("EDITOR"));

    let removed = app
        .clone()
        .oneshot(json_request(
            "DELETE",
            &format!("/api/admin/users/{user_id}"),
            Some(&admin_token),
            json!({}),
        ))
        .await
        .expect("route executes");
    assert_eq!(removed.status(), StatusCode::OK);
    assert_eq!(read_json(removed).await["data"]["is_active"], json!(false));

    let missing = app
        .oneshot(json_request(
            "PATCH",
            "/api/admin/users/does-not-exist",
            Some(&admin_token),
            json!({ "name": "Nobody Here" }),
        ))
        .await
        .expect("route executes");
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn admin_cannot_patch_away_their_own_access() {
    let (service, _) = build_service();
    let (admin, admin_token) = token_for(&service, "admin@acc.gov.sl", Role::Admin);
    let app = router(service);
    let own_account = format!("/api/admin/users/{}", admin.id.0);

    let deactivated = app
        .clone()
        .oneshot(json_request(
            "PATCH",
            &own_account,
            Some(&admin_token),
            json!({ "is_active": false }),
        ))
        .await
        .expect("route executes");
    assert_eq!(deactivated.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        read_json(deactivated).await["error"],
        json!("You cannot deactivate your own account")
    );

    let demoted = app
        .clone()
        .oneshot(json_request(
            "PATCH",
            &own_account,
            Some(&admin_token),
            json!({ "role": "VIEWER" }),
        ))
        .await
        .expect("route executes");
    assert_eq!(demoted.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        read_json(demoted).await["error"],
        json!("You cannot remove your own administrator role")
    );

    let still_admin = app
        .oneshot(json_request(
            "GET",
            "/api/admin/users",
            Some(&admin_token),
            json!({}),
        ))
        .await
        .expect("route executes");
    assert_eq!(still_admin.status(), StatusCode::OK);
}
