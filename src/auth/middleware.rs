use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::{self, HeaderValue},
    Error, HttpMessage, ResponseError,
};
use futures::future::{ready, LocalBoxFuture, Ready};
use uuid::Uuid;

use crate::auth::extractors::AuthenticatedUser;
use crate::auth::token::verify_token;
use crate::config::SigningSecret;
use crate::error::AppError;

const BEARER_SCHEME: &str = "Bearer";

/// Resolves an `Authorization` header value to the authenticated subject.
///
/// Absent or empty header is `MissingAuthHeader`. Anything other than exactly
/// `Bearer <token>` (split on a single space) is `MalformedAuthHeader`. A token
/// that fails verification is `Unauthorized`.
pub fn authenticate_header(
    header: Option<&HeaderValue>,
    secret: &SigningSecret,
) -> Result<Uuid, AppError> {
    let raw = match header {
        None => return Err(AppError::MissingAuthHeader),
        Some(value) if value.is_empty() => return Err(AppError::MissingAuthHeader),
        Some(value) => value.to_str().map_err(|_| AppError::MalformedAuthHeader)?,
    };

    let parts: Vec<&str> = raw.split(' ').collect();
    let token = match parts.as_slice() {
        [scheme, token] if *scheme == BEARER_SCHEME && !token.is_empty() => *token,
        _ => return Err(AppError::MalformedAuthHeader),
    };

    Ok(verify_token(token, secret)?)
}

/// Gate in front of protected routes.
///
/// On success the subject is attached to the request as [`AuthenticatedUser`];
/// on failure the request is answered directly and the wrapped service never runs.
#[derive(Clone)]
pub struct AuthMiddleware {
    secret: SigningSecret,
}

impl AuthMiddleware {
    pub fn new(secret: SigningSecret) -> Self {
        Self { secret }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service,
            secret: self.secret.clone(),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
    secret: SigningSecret,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let outcome = authenticate_header(req.headers().get(header::AUTHORIZATION), &self.secret);

        match outcome {
            Ok(subject) => {
                req.extensions_mut().insert(AuthenticatedUser(subject));
                let fut = self.service.call(req);
                Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
            }
            Err(app_err) => {
                log::debug!("Rejected {} {}: {}", req.method(), req.path(), app_err);
                let response = req
                    .into_response(app_err.error_response())
                    .map_into_right_body();
                Box::pin(async move { Ok(response) })
            }
        }
    }
}
