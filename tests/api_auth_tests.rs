// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API authentication and CORS tests.
//!
//! These tests verify that:
//! 1. Protected routes reject requests without valid session tokens
//! 2. Protected routes accept bearer tokens and the `__session` cookie
//! 3. Public routes and CORS preflight work without a token

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use tower::ServiceExt;

mod common;

#[tokio::test]
async fn test_protected_route_without_token() {
    let (app, _, _) = common::create_test_app("http://127.0.0.1:9/generate");

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/sets")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_protected_route_with_wrong_key() {
    let (app, _, _) = common::create_test_app("http://127.0.0.1:9/generate");
    let token = common::create_test_jwt("user_1", b"not_the_key_the_server_uses_!!!!");

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/sets")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_protected_route_with_bearer_token() {
    let (app, state, _) = common::create_test_app("http://127.0.0.1:9/generate");
    let token = common::create_test_jwt("user_1", &state.config.session_signing_key);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/sets")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_protected_route_with_session_cookie() {
    let (app, state, _) = common::create_test_app("http://127.0.0.1:9/generate");
    let token = common::create_test_jwt("user_1", &state.config.session_signing_key);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/sets")
                .header(header::COOKIE, format!("__session={}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_unauthenticated_request_never_reaches_storage() {
    // Offline storage would answer 503; auth must reject first.
    let (app, _) = common::create_offline_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/sets/Biology")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_public_routes() {
    let (app, _, _) = common::create_test_app("http://127.0.0.1:9/generate");

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(Request::builder().uri("/api/theme").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let theme = common::body_json(response).await;
    assert_eq!(theme["primary"], "#FF5722");
    assert_eq!(theme["background"], "#000000");
}

#[tokio::test]
async fn test_cors_preflight() {
    let (app, _, _) = common::create_test_app("http://127.0.0.1:9/generate");

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/api/sets")
                .header(header::ORIGIN, "http://localhost:3000")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "DELETE")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "http://localhost:3000"
    );
}
