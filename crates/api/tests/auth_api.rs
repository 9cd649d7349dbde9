//! Integration tests for login, logout and session checks.

mod common;

use axum::http::{Method, StatusCode};
use chrono::TimeDelta;
use common::{
    body_json, cookie_pair, empty_request, login, login_with, set_cookie, TestAppBuilder,
    ADMIN_FALLBACK,
};
use folio_core::clock::Clock;
use folio_core::config::{StaticConfig, ADMIN_PASSWORD, SESSION_SECRET};
use folio_core::credentials::CredentialStore;

async fn check(app: &common::TestApp, cookie: Option<&str>) -> (StatusCode, serde_json::Value) {
    let response = app
        .send(empty_request(Method::GET, "/api/auth/check", cookie))
        .await;
    let status = response.status();
    (status, body_json(response).await)
}

// ---------------------------------------------------------------------------
// Test: login -> check -> logout -> check
// ---------------------------------------------------------------------------

#[tokio::test]
async fn login_check_logout_round_trip() {
    let app = common::build_test_app();

    let response = login_with(&app, ADMIN_FALLBACK, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let raw_cookie = set_cookie(&response).unwrap();
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "Login successful");

    assert!(raw_cookie.starts_with("admin_session="));
    assert!(raw_cookie.contains("HttpOnly"));
    assert!(raw_cookie.contains("SameSite=Lax"));
    assert!(raw_cookie.contains("Path=/"));
    assert!(raw_cookie.contains("Max-Age=604800"));
    assert!(!raw_cookie.contains("Secure"));

    let cookie = cookie_pair(&raw_cookie);
    let (status, json) = check(&app, Some(&cookie)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["authenticated"], true);

    let response = app
        .send(empty_request(Method::POST, "/api/auth/logout", Some(&cookie)))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(set_cookie(&response).unwrap().contains("Max-Age=0"));
    assert_eq!(body_json(response).await["message"], "Logout successful");

    let (status, json) = check(&app, Some(&cookie)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["success"], false);
    assert_eq!(json["data"]["authenticated"], false);
}

#[tokio::test]
async fn stored_token_is_not_the_cookie_value() {
    let app = common::build_test_app();
    let cookie = login(&app).await;
    let token = cookie.trim_start_matches("admin_session=");

    assert_eq!(token.len(), 64);
    assert!(app.store.find_session(token).await.unwrap().is_none());
    assert_eq!(app.store.session_count().await, 1);
}

#[tokio::test]
async fn production_cookie_is_secure() {
    let config = common::test_config_with(StaticConfig::new().with("APP_ENV", "production"));
    let app = TestAppBuilder::new().config(config).build();

    let response = login_with(&app, ADMIN_FALLBACK, None).await;
    assert!(set_cookie(&response).unwrap().ends_with("; Secure"));

    let response = app
        .send(empty_request(Method::POST, "/api/auth/logout", None))
        .await;
    assert!(set_cookie(&response).unwrap().contains("Secure"));
}

// ---------------------------------------------------------------------------
// Test: logout is idempotent
// ---------------------------------------------------------------------------

#[tokio::test]
async fn logout_without_or_with_stale_cookie_succeeds() {
    let app = common::build_test_app();
    let cookie = login(&app).await;

    for cookie in [None, Some(cookie.as_str()), Some(cookie.as_str()), Some("admin_session=nope")] {
        let response = app
            .send(empty_request(Method::POST, "/api/auth/logout", cookie))
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(set_cookie(&response).unwrap().starts_with("admin_session=;"));
    }
    assert_eq!(app.store.session_count().await, 0);
}

// ---------------------------------------------------------------------------
// Test: expiry is enforced at exactly expires_at
// ---------------------------------------------------------------------------

#[tokio::test]
async fn session_expires_at_boundary() {
    let app = common::build_test_app();
    let cookie = login(&app).await;
    let expires_at = app.clock.now() + TimeDelta::days(7);

    app.clock.set(expires_at - TimeDelta::milliseconds(1));
    assert_eq!(check(&app, Some(&cookie)).await.0, StatusCode::OK);

    app.clock.set(expires_at);
    assert_eq!(check(&app, Some(&cookie)).await.0, StatusCode::UNAUTHORIZED);
    assert_eq!(app.store.session_count().await, 0, "expired session is removed on access");
}

// ---------------------------------------------------------------------------
// Test: credential bootstrap and wrong passwords
// ---------------------------------------------------------------------------

#[tokio::test]
async fn concurrent_first_logins_create_one_credential() {
    let app = common::build_test_app();

    let mut handles = Vec::new();
    // More logins than one client's window allows, so each uses its own address.
    for i in 0..6 {
        let router = app.router.clone();
        let client_ip = format!("198.51.100.{}", i + 1);
        handles.push(tokio::spawn(async move {
            use tower::ServiceExt;
            router
                .oneshot(common::json_request(
                    Method::POST,
                    "/api/auth/login",
                    &serde_json::json!({ "password": ADMIN_FALLBACK }),
                    None,
                    Some(&client_ip),
                ))
                .await
                .unwrap()
                .status()
        }));
    }
    for handle in handles {
        assert_eq!(handle.await.unwrap(), StatusCode::OK);
    }

    let admin = app.store.get_admin().await.unwrap().unwrap();
    assert!(admin.password_hash.starts_with("$argon2id$"));
    assert_eq!(app.store.session_count().await, 6);
}

#[tokio::test]
async fn wrong_password_after_bootstrap_is_rejected() {
    let app = common::build_test_app();
    login(&app).await;
    let before = app.store.get_admin().await.unwrap().unwrap();

    let response = login_with(&app, "definitely-wrong", None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(set_cookie(&response).is_none());
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "Invalid password");

    assert_eq!(app.store.session_count().await, 1);
    let after = app.store.get_admin().await.unwrap().unwrap();
    assert_eq!(before.password_hash, after.password_hash);
}

#[tokio::test]
async fn wrong_fallback_does_not_bootstrap() {
    let app = common::build_test_app();
    let response = login_with(&app, "not-the-fallback", None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(app.store.get_admin().await.unwrap().is_none());
}

// ---------------------------------------------------------------------------
// Test: request and configuration errors
// ---------------------------------------------------------------------------

#[tokio::test]
async fn short_password_is_a_validation_error() {
    let app = common::build_test_app();
    let response = login_with(&app, "short", None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Password must be at least 8 characters long");
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn missing_session_secret_is_a_server_error() {
    let app = TestAppBuilder::new()
        .secrets(StaticConfig::new().with(ADMIN_PASSWORD, ADMIN_FALLBACK))
        .build();

    // Checked before the password, so even an invalid one gets the 500.
    let response = login_with(&app, "short", None).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Server configuration error");
    assert!(!json.to_string().contains(SESSION_SECRET));
}

#[tokio::test]
async fn missing_fallback_password_is_a_server_error() {
    let app = TestAppBuilder::new()
        .secrets(StaticConfig::new().with(SESSION_SECRET, "s3cret"))
        .build();

    let response = login_with(&app, ADMIN_FALLBACK, None).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await["error"], "Server configuration error");
}

#[tokio::test]
async fn malformed_login_body_is_bad_request() {
    let app = common::build_test_app();
    let response = app
        .send(common::json_request(
            Method::POST,
            "/api/auth/login",
            &serde_json::json!({ "pass": "x" }),
            None,
            None,
        ))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}
