use actix_web::http::{header, StatusCode};
use actix_web::middleware::Logger;
use actix_web::{test, web, App};
use chrono::{Duration, Utc};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;
use taskkeep::auth::token::issue_token_at;
use taskkeep::auth::{AuthResponse, RegisterResponse};
use taskkeep::routes::{self, health};
use taskkeep::store::MemoryStore;
use taskkeep::{AppState, SigningSecret};
use uuid::Uuid;

const SECRET: &str = "integration-test-secret";

fn test_state() -> web::Data<AppState> {
    web::Data::new(AppState::new(
        Arc::new(MemoryStore::new()),
        SigningSecret::new(SECRET),
    ))
}

#[test_log::test(actix_rt::test)]
async fn test_register_and_login_flow() {
    let app = test::init_service(
        App::new()
            .wrap(Logger::default())
            .service(health::health)
            .service(web::scope("/api").configure(routes::config(test_state()))),
    )
    .await;

    let register_payload = json!({ "email": "a@x.com", "password": "pw1" });
    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(&register_payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let registered: RegisterResponse = test::read_body_json(resp).await;

    // Registration does not hand out a token.
    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(&register_payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Email already registered");

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(&register_payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let login: AuthResponse = test::read_body_json(resp).await;
    assert_eq!(login.user_id, registered.id);
    assert_eq!(login.token.split('.').count(), 3);

    let req = test::TestRequest::get()
        .uri("/api/tasks")
        .insert_header((header::AUTHORIZATION, format!("Bearer {}", login.token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_rt::test]
async fn test_login_failures_share_one_response() {
    let app = test::init_service(
        App::new().service(web::scope("/api").configure(routes::config(test_state()))),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({ "email": "known@example.com", "password": "Password123!" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

    let mut bodies = Vec::new();
    for payload in [
        json!({ "email": "known@example.com", "password": "WrongPassword123!" }),
        json!({ "email": "unknown@example.com", "password": "Password123!" }),
    ] {
        let req = test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(&payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        bodies.push(test::read_body(resp).await);
    }

    assert_eq!(bodies[0], bodies[1]);
}

#[actix_rt::test]
async fn test_invalid_registration_inputs() {
    let app = test::init_service(
        App::new().service(web::scope("/api").configure(routes::config(test_state()))),
    )
    .await;

    let test_cases = vec![
        (
            json!({ "password": "Password123!" }),
            StatusCode::BAD_REQUEST,
            "missing email",
        ),
        (
            json!({ "email": "test@example.com" }),
            StatusCode::BAD_REQUEST,
            "missing password",
        ),
        (
            json!({ "email": "invalid-email", "password": "Password123!" }),
            StatusCode::UNPROCESSABLE_ENTITY,
            "invalid email format",
        ),
        (
            json!({ "email": "test@example.com", "password": "" }),
            StatusCode::UNPROCESSABLE_ENTITY,
            "empty password",
        ),
        (
            json!({ "email": "test@example.com", "password": "a".repeat(73) }),
            StatusCode::UNPROCESSABLE_ENTITY,
            "password over 72 bytes",
        ),
    ];

    for (payload, expected_status, description) in test_cases {
        let req = test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(&payload)
            .to_request();

        let resp = test::call_service(&app, req).await;
        let status = resp.status();
        let body_bytes = test::read_body(resp).await;

        assert_eq!(
            status,
            expected_status,
            "Test case failed: {}. Body: {:?}",
            description,
            String::from_utf8_lossy(&body_bytes)
        );
    }
}

#[actix_rt::test]
async fn test_gate_rejections() {
    let app = test::init_service(
        App::new().service(web::scope("/api").configure(routes::config(test_state()))),
    )
    .await;

    let expired = issue_token_at(
        Uuid::new_v4(),
        &SigningSecret::new(SECRET),
        Utc::now() - Duration::hours(25),
    )
    .unwrap();
    let foreign = issue_token_at(
        Uuid::new_v4(),
        &SigningSecret::new("some-other-secret"),
        Utc::now(),
    )
    .unwrap();

    let test_cases = vec![
        (None, "Authorization header required", "missing header"),
        (Some("Bearer".to_string()), "Invalid token format", "scheme only"),
        (
            Some(format!("Basic {}", expired)),
            "Invalid token format",
            "wrong scheme",
        ),
        (
            Some(format!("Bearer {}", expired)),
            "Invalid token: token expired",
            "expired token",
        ),
        (
            Some(format!("Bearer {}", foreign)),
            "Invalid token: signature mismatch",
            "foreign secret",
        ),
    ];

    for (authorization, expected_error, description) in test_cases {
        let mut req = test::TestRequest::get().uri("/api/tasks");
        if let Some(value) = authorization {
            req = req.insert_header((header::AUTHORIZATION, value));
        }

        let resp = test::call_service(&app, req.to_request()).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "{}", description);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], expected_error, "{}", description);
    }
}
