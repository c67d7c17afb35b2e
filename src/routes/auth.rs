use crate::{
    auth::{flow, AuthResponse, LoginRequest, RegisterRequest, RegisterResponse},
    error::AppError,
    state::AppState,
};
use actix_web::{post, web, HttpResponse, Responder};
use validator::Validate;

/// Register a new user
///
/// Creates a new account and returns its identity. No token is issued; the
/// client logs in separately.
///
/// ## Responses:
/// - `201 Created`: `{"id": "<uuid>", "message": "..."}`.
/// - `400 Bad Request`: Body is not valid JSON or misses a field.
/// - `409 Conflict`: The email is already registered.
/// - `422 Unprocessable Entity`: Email is malformed, or password is empty or over 72 bytes.
#[post("/register")]
pub async fn register(
    state: web::Data<AppState>,
    register_data: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    register_data.validate()?;

    let id = flow::register(
        state.store.as_ref(),
        &register_data.email,
        &register_data.password,
    )
    .await?;

    Ok(HttpResponse::Created().json(RegisterResponse {
        id,
        message: "User registered successfully".into(),
    }))
}

/// Login user
///
/// Verifies credentials and returns a bearer token valid for 24 hours.
///
/// ## Responses:
/// - `200 OK`: `{"token": "...", "user_id": "<uuid>"}`.
/// - `401 Unauthorized`: Unknown email or wrong password (indistinguishable).
/// - `422 Unprocessable Entity`: Email is malformed or password is empty.
#[post("/login")]
pub async fn login(
    state: web::Data<AppState>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    login_data.validate()?;

    let outcome = flow::login(
        state.store.as_ref(),
        &login_data.email,
        &login_data.password,
        &state.secret,
    )
    .await?;

    Ok(HttpResponse::Ok().json(AuthResponse {
        token: outcome.token,
        user_id: outcome.user_id,
    }))
}
