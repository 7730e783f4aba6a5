mod common;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use common::{ADMIN_EMAIL, Fixture};
use orgbook::server::{AppState, create_router};

fn router(fx: Fixture) -> Router {
    create_router(Arc::new(AppState {
        resolver: fx.resolver,
        request_timeout: Duration::from_secs(5),
    }))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

fn post_json(uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::post(uri).header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get(uri: &str, token: &str) -> Request<Body> {
    Request::get(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap()
}

async fn login(app: &Router, email: &str) -> String {
    let (status, otp) = send(app, post_json("/api/v1/auth/otp", None, json!({ "email": email }))).await;
    assert_eq!(status, StatusCode::OK);
    let code = otp["data"]["token"].as_str().unwrap().to_string();

    let (status, auther) = send(
        app,
        post_json("/api/v1/auth/login", None, json!({ "email": email, "otp": code })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    auther["data"]["session_token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_health() {
    let app = router(Fixture::new());
    let response = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_missing_credentials_is_401_with_challenge() {
    let app = router(Fixture::new());
    let response = app
        .oneshot(Request::get("/api/v1/auth/me").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
        "Bearer realm=\"orgbook\""
    );
}

#[tokio::test]
async fn test_login_and_me_via_cookie() {
    let app = router(Fixture::new());
    let token = login(&app, ADMIN_EMAIL).await;

    let request = Request::get("/api/v1/auth/me")
        .header(header::COOKIE, format!("jwt={token}"))
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["email"], ADMIN_EMAIL);
    assert_eq!(body["error"], Value::Null);
}

#[tokio::test]
async fn test_register_then_list_departments() {
    let app = router(Fixture::new());
    let (status, body) = send(
        &app,
        post_json(
            "/api/v1/organizations/register",
            None,
            json!({
                "org_name": "Acme",
                "sector": "Retail",
                "first_name": "Ada",
                "last_name": "Lee",
                "email": "ada@acme.test",
                "phone": "555-0100",
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["organization"]["code"], "ORG001");

    let token = login(&app, "ada@acme.test").await;
    let (status, body) = send(
        &app,
        post_json("/api/v1/departments", Some(&token), json!({ "name": "Sales" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["code"], "DEPT-001-002");

    let (status, body) = send(&app, get("/api/v1/departments?sort_by=Alphabetical", &token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 2);
    assert_eq!(body["data"][0]["name"], "Management");

    let (status, body) = send(&app, get("/api/v1/roles", &token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["organization"]["name"], "Acme");
    assert_eq!(body["data"][0]["department"]["name"], "Management");
}

#[tokio::test]
async fn test_error_statuses() {
    let app = router(Fixture::new());
    let token = login(&app, ADMIN_EMAIL).await;

    let (status, body) = send(
        &app,
        post_json("/api/v1/organizations", Some(&token), json!({ "name": "Acme" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "organization sector is required");
    assert_eq!(body["data"], Value::Null);

    let (status, _) = send(&app, get("/api/v1/departments/999", &token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, get("/api/v1/users/lookup", &token)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "no query parameters provided");
}

#[tokio::test]
async fn test_invalid_organization_header_is_400() {
    let app = router(Fixture::new());
    let token = login(&app, ADMIN_EMAIL).await;

    let request = Request::get("/api/v1/departments")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .header("Organization", "acme")
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_permissions_catalog_is_public() {
    let app = router(Fixture::new());
    let (status, body) = send(
        &app,
        Request::get("/api/v1/permissions").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 18);
}

#[tokio::test]
async fn test_timed_out_mutation_is_408_and_rolled_back() {
    let fx = Fixture::new();
    let (_, manager) = fx.register("Acme");
    let token = manager.token.clone().unwrap();
    let before = fx.count("departments");
    let activities = fx.count("user_activities");

    let state = Arc::new(AppState {
        resolver: fx.resolver,
        request_timeout: Duration::ZERO,
    });
    let app = create_router(state.clone());

    let (status, body) = send(
        &app,
        post_json("/api/v1/departments", Some(&token), json!({ "name": "Late" })),
    )
    .await;
    assert_eq!(status, StatusCode::REQUEST_TIMEOUT);
    assert_eq!(body["error"], "request timed out");

    let count = |table: &str| -> i64 {
        state
            .resolver
            .store()
            .conn()
            .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))
            .unwrap()
    };
    assert_eq!(count("departments"), before);
    assert_eq!(count("user_activities"), activities);
}
