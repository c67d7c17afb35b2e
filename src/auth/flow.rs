//! Registration and login.
//!
//! Both operations assume the request layer has already validated the email
//! syntax and checked that the password is non-empty.

use uuid::Uuid;

use crate::auth::password::{
    hash_password_blocking, verify_decoy_blocking, verify_password_blocking,
};
use crate::auth::token::issue_token;
use crate::config::SigningSecret;
use crate::error::AppError;
use crate::models::Account;
use crate::store::{Store, StoreError};

/// A successful login.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub token: String,
    pub user_id: Uuid,
}

/// Creates an account and returns its identity. No token is issued.
pub async fn register(store: &dyn Store, email: &str, password: &str) -> Result<Uuid, AppError> {
    if store
        .find_account_by_email(email)
        .await
        .map_err(|e| AppError::StoreError(e.to_string()))?
        .is_some()
    {
        return Err(AppError::DuplicateAccount);
    }

    let password_hash = hash_password_blocking(password).await?;
    let account = Account::new(email.to_owned(), password_hash);

    // A concurrent registration can win between the lookup and the insert;
    // the store's uniqueness check has the final word.
    match store.create_account(&account).await {
        Ok(()) => {
            log::info!("Registered account {}", account.id);
            Ok(account.id)
        }
        Err(StoreError::DuplicateKey) => Err(AppError::DuplicateAccount),
        Err(e) => Err(AppError::StoreError(e.to_string())),
    }
}

/// Verifies credentials and issues a bearer token bound to the account.
///
/// An unknown email and a wrong password fail identically, and both run one
/// bcrypt verification.
pub async fn login(
    store: &dyn Store,
    email: &str,
    password: &str,
    secret: &SigningSecret,
) -> Result<LoginOutcome, AppError> {
    let account = match store
        .find_account_by_email(email)
        .await
        .map_err(|e| AppError::StoreError(e.to_string()))?
    {
        Some(account) => account,
        None => {
            verify_decoy_blocking(password).await?;
            return Err(AppError::InvalidCredentials);
        }
    };

    if !verify_password_blocking(password, &account.password_hash).await? {
        return Err(AppError::InvalidCredentials);
    }

    let token = issue_token(account.id, secret)?;
    log::debug!("Issued token for account {}", account.id);

    Ok(LoginOutcome {
        token,
        user_id: account.id,
    })
}
