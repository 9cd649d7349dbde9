//! Integration tests for per-route gate composition and ordering.

mod common;

use std::sync::Arc;

use axum::http::{Method, StatusCode};
use common::{
    body_json, empty_request, json_request, login, multipart_request, RecordingAssetHost,
    TestAppBuilder,
};
use folio_core::clock::Clock;
use folio_core::config::StaticConfig;

const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\nnot-really-a-png";

// ---------------------------------------------------------------------------
// Test: public routes carry no gate
// ---------------------------------------------------------------------------

#[tokio::test]
async fn public_routes_have_no_rate_limit_headers() {
    let app = common::build_test_app();
    let response = app
        .send(empty_request(Method::GET, "/api/auth/check", None))
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().get("x-ratelimit-limit").is_none());

    let response = app
        .send(empty_request(Method::POST, "/api/auth/logout", None))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get("x-ratelimit-limit").is_none());
}

// ---------------------------------------------------------------------------
// Test: mutation gate runs rate limit, then session, then handler
// ---------------------------------------------------------------------------

#[tokio::test]
async fn auth_rejection_never_reaches_handler() {
    let app = common::build_test_app();
    // An invalid body would be a 400 from the handler; the 401 shows the
    // session stage answered first.
    let bad_post = serde_json::json!({ "slug": "Bad Slug", "title": "" });
    let response = app
        .send(json_request(Method::POST, "/api/posts", &bad_post, None, None))
        .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.headers()["x-ratelimit-limit"], "30");
    assert_eq!(response.headers()["x-ratelimit-remaining"], "29");
    assert_eq!(body_json(response).await["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn authenticated_mutation_reaches_handler() {
    let app = common::build_test_app();
    let cookie = login(&app).await;

    let bad_post = serde_json::json!({
        "slug": "Bad Slug",
        "title": "",
        "content": "body"
    });
    let response = app
        .send(json_request(Method::POST, "/api/posts", &bad_post, Some(&cookie), None))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response.headers()["x-ratelimit-remaining"], "29");
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "Slug must be lowercase alphanumeric with hyphens");

    let response = app
        .send(json_request(
            Method::PUT,
            "/api/posts/not-a-number",
            &serde_json::json!({}),
            Some(&cookie),
            None,
        ))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Invalid post ID");
}

#[tokio::test]
async fn rate_limit_rejects_before_session_check() {
    let config =
        common::test_config_with(StaticConfig::new().with("RATE_LIMIT_MUTATION_MAX", "1"));
    let app = TestAppBuilder::new().config(config).build();
    let cookie = login(&app).await;
    let body = serde_json::json!({});

    let first = app
        .send(json_request(Method::POST, "/api/notes", &body, None, None))
        .await;
    assert_eq!(first.status(), StatusCode::UNAUTHORIZED);

    // Without a cookie the answer is 429, not 401.
    let second = app
        .send(json_request(Method::POST, "/api/notes", &body, None, None))
        .await;
    assert_eq!(second.status(), StatusCode::TOO_MANY_REQUESTS);

    // A valid session does not bypass the limiter.
    let third = app
        .send(json_request(Method::POST, "/api/notes", &body, Some(&cookie), None))
        .await;
    assert_eq!(third.status(), StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn anonymous_policy_skips_session_stage() {
    let config = common::test_config_with(
        StaticConfig::new().with("ANONYMOUS_MUTATIONS", "learning"),
    );
    let app = TestAppBuilder::new().config(config).build();

    let response = app
        .send(json_request(
            Method::POST,
            "/api/learning",
            &serde_json::json!({ "year": 1850, "title": "Old", "skills": ["x"] }),
            None,
            None,
        ))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response.headers()["x-ratelimit-limit"], "30");
    assert_eq!(
        body_json(response).await["error"],
        "Year must be greater than 1900"
    );

    // Other resources still need a session.
    let response = app
        .send(json_request(
            Method::POST,
            "/api/projects",
            &serde_json::json!({}),
            None,
            None,
        ))
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Test: upload gate runs session first, then the upload limiter
// ---------------------------------------------------------------------------

#[tokio::test]
async fn anonymous_uploads_do_not_consume_the_window() {
    let app = common::build_test_app();

    for _ in 0..12 {
        let response = app
            .send(multipart_request("/api/upload", &[("projectId", None, b"")], None))
            .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(response.headers().get("x-ratelimit-limit").is_none());
    }

    let cookie = login(&app).await;
    let response = app
        .send(multipart_request("/api/upload", &[("projectId", None, b"")], Some(&cookie)))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response.headers()["x-ratelimit-limit"], "10");
    assert_eq!(response.headers()["x-ratelimit-remaining"], "9");
    assert_eq!(body_json(response).await["error"], "File is required");
}

#[tokio::test]
async fn upload_validates_file_then_calls_asset_host() {
    let host = Arc::new(RecordingAssetHost::default());
    let app = TestAppBuilder::new().assets(host.clone()).build();
    let cookie = login(&app).await;

    let response = app
        .send(multipart_request(
            "/api/upload",
            &[("file", Some(("doc.pdf", "application/pdf")), b"%PDF")],
            Some(&cookie),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .send(multipart_request(
            "/api/upload",
            &[("file", Some(("logo.png", "image/png")), PNG_BYTES)],
            Some(&cookie),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["width"], 640);
    assert_eq!(json["data"]["height"], 480);
    assert!(json["data"]["public_id"]
        .as_str()
        .unwrap()
        .starts_with("blog/projects/temp_"));

    let uploads = host.uploads.lock().await;
    assert_eq!(uploads.len(), 1);
    assert_eq!(uploads[0].content_type, "image/png");
    assert_eq!(uploads[0].bytes, PNG_BYTES);
}

#[tokio::test]
async fn project_upload_only_names_the_asset() {
    let host = Arc::new(RecordingAssetHost::default());
    let app = TestAppBuilder::new().assets(host.clone()).build();
    let cookie = login(&app).await;

    // The test pool points at a closed port; any project lookup would fail.
    let response = app
        .send(multipart_request(
            "/api/upload",
            &[
                ("projectId", None, b"7"),
                ("file", Some(("logo.png", "image/png")), PNG_BYTES),
            ],
            Some(&cookie),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let expected = format!("project_7_{}", app.clock.now().timestamp_millis());
    let json = body_json(response).await;
    assert_eq!(json["data"]["public_id"], format!("blog/projects/{expected}"));

    let uploads = host.uploads.lock().await;
    assert_eq!(uploads.len(), 1);
    assert_eq!(uploads[0].public_id, expected);
}

#[tokio::test]
async fn upload_without_asset_host_is_a_configuration_error() {
    let app = common::build_test_app();
    let cookie = login(&app).await;

    let response = app
        .send(multipart_request(
            "/api/upload",
            &[("file", Some(("logo.png", "image/png")), PNG_BYTES)],
            Some(&cookie),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await["error"], "Server configuration error");
}

#[tokio::test]
async fn oversized_upload_is_rejected() {
    let app = common::build_test_app();
    let cookie = login(&app).await;
    let big = vec![0u8; folio_core::content::MAX_UPLOAD_BYTES + 1];

    let response = app
        .send(multipart_request(
            "/api/upload",
            &[("file", Some(("big.png", "image/png")), &big)],
            Some(&cookie),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["error"],
        "File too large. Maximum size is 5MB"
    );
}

// ---------------------------------------------------------------------------
// Test: search input is checked before any lookup
// ---------------------------------------------------------------------------

#[tokio::test]
async fn search_rejects_blank_query_and_unknown_scope() {
    let app = common::build_test_app();

    let response = common::get(&app, "/api/search?q=%20%20").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(response.headers().get("x-ratelimit-limit").is_none());
    assert_eq!(body_json(response).await["error"], "Query is required");

    let response = common::get(&app, "/api/search?q=rust&type=pages").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}
