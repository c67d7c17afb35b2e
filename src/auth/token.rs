use crate::config::SigningSecret;
use crate::error::AppError;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// How long an issued token stays valid.
pub const TOKEN_LIFETIME_HOURS: i64 = 24;

/// Represents the claims encoded within a JWT (JSON Web Token).
///
/// Decoding fails closed: a missing `sub` or `exp`, or a `sub` that is not a
/// UUID, rejects the token as malformed.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Subject of the token, the account's identity.
    pub sub: Uuid,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// Issued-at timestamp (seconds since epoch). Optional on decode.
    #[serde(default)]
    pub iat: i64,
}

/// Why a presented token was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    InvalidSignature,
    Expired,
    Malformed,
}

impl fmt::Display for TokenError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TokenError::InvalidSignature => write!(f, "signature mismatch"),
            TokenError::Expired => write!(f, "token expired"),
            TokenError::Malformed => write!(f, "malformed token"),
        }
    }
}

impl std::error::Error for TokenError {}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(error: jsonwebtoken::errors::Error) -> TokenError {
        match error.kind() {
            ErrorKind::InvalidSignature => TokenError::InvalidSignature,
            ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => {
                log::debug!("Rejecting malformed token: {}", error);
                TokenError::Malformed
            }
        }
    }
}

/// Issues an HS256 token for `subject`, valid for [`TOKEN_LIFETIME_HOURS`] from now.
pub fn issue_token(subject: Uuid, secret: &SigningSecret) -> Result<String, AppError> {
    issue_token_at(subject, secret, Utc::now())
}

/// Same as [`issue_token`] with an explicit issuance instant.
pub fn issue_token_at(
    subject: Uuid,
    secret: &SigningSecret,
    issued_at: DateTime<Utc>,
) -> Result<String, AppError> {
    let expires_at = issued_at
        .checked_add_signed(Duration::hours(TOKEN_LIFETIME_HOURS))
        .ok_or_else(|| AppError::TokenIssuanceError("Expiry out of range".into()))?;

    let claims = Claims {
        sub: subject,
        exp: expires_at.timestamp(),
        iat: issued_at.timestamp(),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::TokenIssuanceError(format!("Failed to generate token: {}", e)))
}

/// Checks signature and expiry and returns the embedded subject.
///
/// The subject is not looked up in the store; a valid signature is trusted.
pub fn verify_token(token: &str, secret: &SigningSecret) -> Result<Uuid, TokenError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation(),
    )
    .map(|data| data.claims.sub)
    .map_err(TokenError::from)
}

fn validation() -> Validation {
    let mut validation = Validation::new(Algorithm::HS256);
    // The token dies the instant `exp` passes.
    validation.leeway = 0;
    validation.set_required_spec_claims(&["exp", "sub"]);
    validation
}
