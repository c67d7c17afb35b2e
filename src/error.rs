//!
//! # Custom Error Handling
//!
//! This module defines `AppError`, the single error type surfaced by the
//! authentication core and the HTTP handlers built on top of it. Every failure
//! path produces a distinguishable variant so the boundary can map it to a
//! status code.
//!
//! `AppError` implements `actix_web::error::ResponseError`, rendering a JSON
//! body of the form `{"error": "<message>"}`. Internal failures (store,
//! hashing, token issuance) are logged with their detail and rendered with a
//! generic message.

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

use crate::auth::token::TokenError;
use crate::store::StoreError;

/// Represents all possible errors that can occur within the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// Registration attempted with an email that already has an account (HTTP 409).
    DuplicateAccount,
    /// Unknown email or wrong password. Deliberately identical for both (HTTP 401).
    InvalidCredentials,
    /// The password hashing primitive failed or a stored hash is malformed (HTTP 500).
    HashingError(String),
    /// The record store failed for a reason other than "not found" (HTTP 500).
    StoreError(String),
    /// A token could not be signed (HTTP 500).
    TokenIssuanceError(String),
    /// The `Authorization` header is absent or empty (HTTP 401).
    MissingAuthHeader,
    /// The `Authorization` header is not `Bearer <token>` (HTTP 401).
    MalformedAuthHeader,
    /// The bearer token failed verification (HTTP 401).
    Unauthorized(TokenError),
    /// The authenticated subject does not own the addressed resource (HTTP 403).
    Forbidden,
    /// The addressed resource does not exist (HTTP 404).
    NotFound(String),
    /// The request could not be parsed (HTTP 400).
    BadRequest(String),
    /// The request parsed but failed input validation (HTTP 422).
    ValidationError(String),
}

impl AppError {
    fn is_internal(&self) -> bool {
        matches!(
            self,
            AppError::HashingError(_) | AppError::StoreError(_) | AppError::TokenIssuanceError(_)
        )
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::DuplicateAccount => write!(f, "Email already registered"),
            AppError::InvalidCredentials => write!(f, "Invalid credentials"),
            AppError::HashingError(msg) => write!(f, "Hashing Error: {}", msg),
            AppError::StoreError(msg) => write!(f, "Store Error: {}", msg),
            AppError::TokenIssuanceError(msg) => write!(f, "Token Issuance Error: {}", msg),
            AppError::MissingAuthHeader => write!(f, "Authorization header required"),
            AppError::MalformedAuthHeader => write!(f, "Invalid token format"),
            AppError::Unauthorized(reason) => write!(f, "Invalid token: {}", reason),
            AppError::Forbidden => write!(f, "Not authorized to access this task"),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::DuplicateAccount => StatusCode::CONFLICT,
            AppError::InvalidCredentials
            | AppError::MissingAuthHeader
            | AppError::MalformedAuthHeader
            | AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::ValidationError(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::HashingError(_)
            | AppError::StoreError(_)
            | AppError::TokenIssuanceError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = if self.is_internal() {
            log::error!("{}", self);
            "Internal server error".to_string()
        } else {
            self.to_string()
        };
        HttpResponse::build(self.status_code()).json(json!({ "error": message }))
    }
}

/// `NotFound` keeps its meaning; every other store failure becomes `StoreError`.
/// Callers that give `DuplicateKey` a domain meaning match on it before converting.
impl From<StoreError> for AppError {
    fn from(error: StoreError) -> AppError {
        match error {
            StoreError::NotFound => AppError::NotFound("Record not found".into()),
            other => AppError::StoreError(other.to_string()),
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::ValidationError(error.to_string())
    }
}

impl From<TokenError> for AppError {
    fn from(error: TokenError) -> AppError {
        AppError::Unauthorized(error)
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::HashingError(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_responses() {
        let cases = [
            (AppError::DuplicateAccount, 409),
            (AppError::InvalidCredentials, 401),
            (AppError::MissingAuthHeader, 401),
            (AppError::MalformedAuthHeader, 401),
            (AppError::Unauthorized(TokenError::Expired), 401),
            (AppError::Forbidden, 403),
            (AppError::NotFound("Task not found".into()), 404),
            (AppError::BadRequest("Invalid input".into()), 400),
            (AppError::ValidationError("title".into()), 422),
            (AppError::HashingError("boom".into()), 500),
            (AppError::StoreError("boom".into()), 500),
            (AppError::TokenIssuanceError("boom".into()), 500),
        ];

        for (error, status) in cases {
            assert_eq!(error.error_response().status(), status, "{:?}", error);
        }
    }

    #[actix_rt::test]
    async fn test_internal_detail_is_not_exposed() {
        let response = AppError::StoreError("connection refused on 10.0.0.3".into()).error_response();
        let body = actix_web::body::to_bytes(response.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(json["error"], "Internal server error");
    }

    #[test]
    fn test_store_error_conversion() {
        assert!(matches!(
            AppError::from(StoreError::NotFound),
            AppError::NotFound(_)
        ));
        assert!(matches!(
            AppError::from(StoreError::Backend("down".into())),
            AppError::StoreError(_)
        ));
    }
}
