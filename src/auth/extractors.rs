use actix_web::dev::Payload;
use actix_web::{Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};
use uuid::Uuid;

use crate::error::AppError;

/// The subject identity the `AuthMiddleware` verified for this request.
///
/// Only meaningful on routes wrapped by the middleware; anywhere else the
/// extractor fails with `MissingAuthHeader`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser(pub Uuid);

impl FromRequest for AuthenticatedUser {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedUser>().copied() {
            Some(user) => ready(Ok(user)),
            None => {
                log::warn!("No authenticated subject on {}; is AuthMiddleware applied?", req.path());
                ready(Err(AppError::MissingAuthHeader.into()))
            }
        }
    }
}
