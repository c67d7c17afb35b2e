pub mod extractors;
pub mod flow;
pub mod middleware;
pub mod ownership;
pub mod password;
pub mod token;

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

// Re-export necessary items
pub use extractors::AuthenticatedUser;
pub use middleware::AuthMiddleware;
pub use ownership::{ensure_owner, Owned};
pub use password::{hash_password, verify_password};
pub use token::{issue_token, verify_token, Claims, TokenError};

/// Represents the payload for a user login request.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// User's email address.
    /// Must be a valid email format.
    #[validate(email)]
    pub email: String,
    /// User's password. Must not be empty.
    #[validate(length(min = 1))]
    pub password: String,
}

/// Represents the payload for a new user registration request.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Email address for the new account.
    /// Must be a valid email format; uniqueness is checked case-sensitively.
    #[validate(email)]
    pub email: String,
    /// Password for the new account. Must not be empty and must fit in
    /// [`password::MAX_PASSWORD_BYTES`] bytes.
    #[validate(length(min = 1), custom = "validate_password_bytes")]
    pub password: String,
}

fn validate_password_bytes(value: &str) -> Result<(), ValidationError> {
    if value.len() > password::MAX_PASSWORD_BYTES {
        return Err(ValidationError::new("password_too_long"));
    }
    Ok(())
}

/// Response after a successful registration. No token is issued at this point.
#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub id: Uuid,
    pub message: String,
}

/// Response after a successful login.
/// Contains the JWT access token and the ID of the authenticated user.
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    /// The JWT (JSON Web Token) for bearer authentication.
    pub token: String,
    /// The unique identifier of the authenticated user.
    pub user_id: Uuid,
}
