//! End-to-end guard behavior over the HTTP surface

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use compass_api::{AppState, create_router};
use compass_auth::{Claims, JwtCodec, TokenCodec, hash_password};
use compass_db::{Database, NewAdmin, NewCustomer, NewSalesRep, NewWorker, WorkerStatus};
use tower::ServiceExt;

const TEST_SECRET: &str = "test-secret-key";

struct TestApp {
    router: Router,
    db: Database,
    _db_file: tempfile::NamedTempFile,
}

async fn test_app() -> TestApp {
    let file = tempfile::NamedTempFile::new().unwrap();
    let url = format!("sqlite:{}?mode=rwc", file.path().display());
    let db = Database::new(&url).await.unwrap();
    let state = AppState::with_secret(db.clone(), TEST_SECRET, false);
    TestApp {
        router: create_router(state),
        db,
        _db_file: file,
    }
}

async fn seed_customer(db: &Database, email: &str, password: &str) -> i64 {
    db.insert_customer(NewCustomer {
        full_name: "Test Customer".to_string(),
        email: email.to_string(),
        password_hash: hash_password(password).unwrap(),
        phone: None,
        address: None,
    })
    .await
    .unwrap()
    .id
}

async fn seed_worker(db: &Database, email: &str, password: &str) -> i64 {
    db.insert_worker(NewWorker {
        full_name: "Test Worker".to_string(),
        email: email.to_string(),
        password_hash: hash_password(password).unwrap(),
        specialization: "plumbing".to_string(),
        status: WorkerStatus::Available,
    })
    .await
    .unwrap()
    .id
}

async fn seed_admin(db: &Database, email: &str, password: &str) -> i64 {
    db.insert_admin(NewAdmin {
        full_name: "Test Admin".to_string(),
        email: email.to_string(),
        password_hash: hash_password(password).unwrap(),
    })
    .await
    .unwrap()
    .id
}

async fn seed_sales(db: &Database, email: &str, password: &str) -> i64 {
    db.insert_sales_rep(NewSalesRep {
        full_name: "Test Rep".to_string(),
        email: email.to_string(),
        password_hash: hash_password(password).unwrap(),
        region: "north".to_string(),
    })
    .await
    .unwrap()
    .id
}

async fn post_json(router: &Router, uri: &str, body: serde_json::Value) -> axum::response::Response {
    router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

async fn get_with_cookie(router: &Router, uri: &str, cookie: &str) -> axum::response::Response {
    router
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(uri)
                .header(header::COOKIE, cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
}

async fn login(router: &Router, role: &str, email: &str, password: &str) -> (StatusCode, String) {
    let response = post_json(
        router,
        &format!("/api/v1/auth/{}/login", role),
        serde_json::json!({ "email": email, "password": password }),
    )
    .await;

    let status = response.status();
    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .map(|v| {
            let raw = v.to_str().unwrap();
            raw.split(';').next().unwrap().to_string()
        })
        .unwrap_or_default();
    (status, cookie)
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn customer_login_round_trips_through_generic_guard() {
    let app = test_app().await;
    let id = seed_customer(&app.db, "ada@example.com", "correct horse").await;

    let (status, cookie) = login(&app.router, "customer", "ada@example.com", "correct horse").await;
    assert_eq!(status, StatusCode::OK);
    assert!(cookie.starts_with("jwt_customer="));

    let response = get_with_cookie(&app.router, "/api/v1/me", &cookie).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["id"], id);
    assert_eq!(body["role"], "customer");
    assert_eq!(body["email"], "ada@example.com");
}

#[tokio::test]
async fn login_sets_http_only_strict_cookie() {
    let app = test_app().await;
    seed_admin(&app.db, "root@example.com", "letmein-longer").await;

    let response = post_json(
        &app.router,
        "/api/v1/auth/admin/login",
        serde_json::json!({ "email": "root@example.com", "password": "letmein-longer" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(set_cookie.starts_with("jwt_admin="));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("SameSite=Strict"));
    assert!(set_cookie.contains("Path=/"));
}

#[tokio::test]
async fn admin_guard_accepts_admin_cookie() {
    let app = test_app().await;
    seed_admin(&app.db, "root@example.com", "letmein-longer").await;
    seed_worker(&app.db, "w@example.com", "worker-pass-1").await;

    let (status, cookie) = login(&app.router, "admin", "root@example.com", "letmein-longer").await;
    assert_eq!(status, StatusCode::OK);

    let response = get_with_cookie(&app.router, "/api/v1/admin/workers", &cookie).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["email"], "w@example.com");
    assert!(body[0].get("password_hash").is_none());
}

#[tokio::test]
async fn admin_guard_ignores_other_role_cookies() {
    let app = test_app().await;
    seed_worker(&app.db, "w@example.com", "worker-pass-1").await;

    let (status, cookie) = login(&app.router, "worker", "w@example.com", "worker-pass-1").await;
    assert_eq!(status, StatusCode::OK);
    assert!(cookie.starts_with("jwt_worker="));

    // A valid worker session is not a token for the admin guard: only the
    // jwt_admin cookie is consulted, so this is missing-token, not forbidden.
    let response = get_with_cookie(&app.router, "/api/v1/admin/workers", &cookie).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn customer_guard_accepts_customer_cookie() {
    let app = test_app().await;
    let id = seed_customer(&app.db, "ada@example.com", "correct horse").await;

    let (status, cookie) = login(&app.router, "customer", "ada@example.com", "correct horse").await;
    assert_eq!(status, StatusCode::OK);

    let response = get_with_cookie(&app.router, "/api/v1/customer/profile", &cookie).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["id"], id);
    assert_eq!(body["email"], "ada@example.com");
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn customer_guard_ignores_other_role_cookies() {
    let app = test_app().await;
    seed_admin(&app.db, "root@example.com", "letmein-longer").await;

    let (status, cookie) = login(&app.router, "admin", "root@example.com", "letmein-longer").await;
    assert_eq!(status, StatusCode::OK);
    assert!(cookie.starts_with("jwt_admin="));

    // The customer guard consults the jwt_customer cookie only; a valid
    // admin session is missing-token here.
    let response = get_with_cookie(&app.router, "/api/v1/customer/profile", &cookie).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn login_failure_does_not_reveal_account_existence() {
    let app = test_app().await;
    seed_worker(&app.db, "known@example.com", "worker-pass-1").await;

    let wrong_password = post_json(
        &app.router,
        "/api/v1/auth/worker/login",
        serde_json::json!({ "email": "known@example.com", "password": "wrong-password" }),
    )
    .await;
    let unknown_email = post_json(
        &app.router,
        "/api/v1/auth/worker/login",
        serde_json::json!({ "email": "unknown@example.com", "password": "wrong-password" }),
    )
    .await;

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);

    let a = body_json(wrong_password).await;
    let b = body_json(unknown_email).await;
    assert_eq!(a, b);
    assert!(!a.to_string().contains("email"));
}

#[tokio::test]
async fn worker_is_forbidden_from_assigning_tasks() {
    let app = test_app().await;
    seed_worker(&app.db, "w@example.com", "worker-pass-1").await;

    let (_, cookie) = login(&app.router, "worker", "w@example.com", "worker-pass-1").await;

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/tasks")
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::COOKIE, &cookie)
                .body(Body::from(
                    serde_json::json!({ "worker_id": 1, "title": "Fix sink" }).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    // Authenticated but not allowlisted: 403, not 401
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn sales_assigns_task_through_generic_guard() {
    let app = test_app().await;
    let worker_id = seed_worker(&app.db, "w@example.com", "worker-pass-1").await;
    // Burn sales id 1 so the rep under test cannot collide with the worker
    // in the cascading resolver.
    seed_sales(&app.db, "decoy@example.com", "decoy-pass-1").await;
    seed_sales(&app.db, "rep@example.com", "sales-pass-1").await;

    let (status, sales_cookie) = login(&app.router, "sales", "rep@example.com", "sales-pass-1").await;
    assert_eq!(status, StatusCode::OK);
    assert!(sales_cookie.starts_with("jwt_sales="));

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/tasks")
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::COOKIE, &sales_cookie)
                .body(Body::from(
                    serde_json::json!({ "worker_id": worker_id, "title": "Install boiler" })
                        .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    // The worker sees the task and can complete it
    let (_, worker_cookie) = login(&app.router, "worker", "w@example.com", "worker-pass-1").await;
    let response = get_with_cookie(&app.router, "/api/v1/worker/tasks", &worker_cookie).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["title"], "Install boiler");
    let task_id = body[0]["id"].as_i64().unwrap();

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/api/v1/worker/tasks/{}/complete", task_id))
                .header(header::COOKIE, &worker_cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn expired_admin_cookie_is_rejected_not_passed_through() {
    let app = test_app().await;
    let admin_id = seed_admin(&app.db, "root@example.com", "letmein-longer").await;

    // Correctly signed but an hour past expiry
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: admin_id.to_string(),
        exp: now - 3600,
        iat: now - 7200,
    };
    let token = jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &claims,
        &jsonwebtoken::EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .unwrap();

    let cookie = format!("jwt_admin={}", token);
    let response = get_with_cookie(&app.router, "/api/v1/admin/workers", &cookie).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn logout_without_cookie_is_idempotent() {
    let app = test_app().await;

    for _ in 0..2 {
        let response = post_json(
            &app.router,
            "/api/v1/auth/customer/logout",
            serde_json::json!({}),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }
}

#[tokio::test]
async fn logout_clears_the_role_cookie() {
    let app = test_app().await;
    seed_customer(&app.db, "ada@example.com", "correct horse").await;

    let (_, cookie) = login(&app.router, "customer", "ada@example.com", "correct horse").await;

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/auth/customer/logout")
                .header(header::COOKIE, &cookie)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(set_cookie.starts_with("jwt_customer="));
}

#[tokio::test]
async fn protected_routes_require_a_cookie() {
    let app = test_app().await;

    for uri in ["/api/v1/me", "/api/v1/products", "/api/v1/worker/tasks"] {
        let response = app
            .router
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{}", uri);
    }
}

#[tokio::test]
async fn generic_guard_checks_highest_precedence_cookie_only() {
    let app = test_app().await;
    seed_admin(&app.db, "root@example.com", "letmein-longer").await;

    let (_, admin_cookie) = login(&app.router, "admin", "root@example.com", "letmein-longer").await;

    // A garbage legacy cookie outranks the valid admin cookie; the guard
    // must not fall back to the lower-precedence cookie.
    let combined = format!("jwt=garbage-token; {}", admin_cookie);
    let response = get_with_cookie(&app.router, "/api/v1/me", &combined).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Without the legacy cookie the admin session resolves through the cascade
    let response = get_with_cookie(&app.router, "/api/v1/me", &admin_cookie).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["role"], "admin");
}

#[tokio::test]
async fn valid_token_for_missing_record_is_unauthorized() {
    let app = test_app().await;

    let codec = JwtCodec::new(TEST_SECRET);
    let token = codec.issue(9999).unwrap();

    let response = get_with_cookie(&app.router, "/api/v1/me", &format!("jwt={}", token)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn signup_then_login_and_browse_catalog() {
    let app = test_app().await;
    app.db
        .insert_product(compass_db::NewProduct {
            name: "Boiler".to_string(),
            description: Some("Wall-mounted".to_string()),
            price_cents: 129_900,
        })
        .await
        .unwrap();

    let response = post_json(
        &app.router,
        "/api/v1/auth/customer/signup",
        serde_json::json!({
            "full_name": "Ada Lovelace",
            "email": "ada@example.com",
            "password": "correct horse",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let (status, cookie) = login(&app.router, "customer", "ada@example.com", "correct horse").await;
    assert_eq!(status, StatusCode::OK);

    let response = get_with_cookie(&app.router, "/api/v1/products", &cookie).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body[0]["name"], "Boiler");
    assert_eq!(body[0]["price"], "1299.00");
}

#[tokio::test]
async fn duplicate_signup_conflicts() {
    let app = test_app().await;
    seed_customer(&app.db, "ada@example.com", "correct horse").await;

    let response = post_json(
        &app.router,
        "/api/v1/auth/customer/signup",
        serde_json::json!({
            "full_name": "Ada Again",
            "email": "ada@example.com",
            "password": "another-pass",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn unknown_role_segment_is_bad_request() {
    let app = test_app().await;

    let response = post_json(
        &app.router,
        "/api/v1/auth/superuser/login",
        serde_json::json!({ "email": "a@b.c", "password": "x" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
