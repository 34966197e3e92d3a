/**
 * Account Operations
 *
 * Registration and credential checks on top of the document store.
 * Usernames and emails are unique case-insensitively; emails are stored
 * lower-cased and passwords are bcrypt-hashed.
 */

use bcrypt::{hash, verify, DEFAULT_COST};
use thiserror::Error;
use uuid::Uuid;

use crate::backend::store::{DocumentStore, StoreError};
use crate::shared::messaging::{User, SELF_LABEL};

/// Fields supplied at registration
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: String,
    pub bio: String,
    pub email: String,
    pub password: String,
    pub avatar: String,
}

/// Account operation failures
#[derive(Debug, Error)]
pub enum AccountError {
    #[error("Username already taken")]
    UsernameTaken,

    #[error("Username is reserved")]
    ReservedUsername,

    #[error("Email already taken")]
    EmailTaken,

    #[error("Invalid email")]
    UnknownEmail,

    #[error("Invalid email or password")]
    WrongPassword,

    #[error("Password hashing failed: {0}")]
    Hashing(#[from] bcrypt::BcryptError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Create a user document for a new account
///
/// # Arguments
/// * `store` - Document store
/// * `account` - Registration fields
///
/// # Returns
/// The stored document
///
/// # Errors
/// `ReservedUsername` for the self label used in group member lists,
/// `UsernameTaken` / `EmailTaken` when either is already registered,
/// including when a concurrent registration wins the insert.
pub async fn register_user(
    store: &dyn DocumentStore,
    account: NewAccount,
) -> Result<User, AccountError> {
    let email = account.email.trim().to_lowercase();

    if account.username.trim().eq_ignore_ascii_case(SELF_LABEL) {
        return Err(AccountError::ReservedUsername);
    }
    if store.find_by_username(&account.username).await?.is_some() {
        return Err(AccountError::UsernameTaken);
    }
    if store.find_by_email(&email).await?.is_some() {
        return Err(AccountError::EmailTaken);
    }

    let password_hash = hash(&account.password, DEFAULT_COST)?;

    let mut user = User::new(
        &Uuid::new_v4().to_string(),
        &account.username,
        &email,
        &password_hash,
    );
    user.bio = account.bio;
    user.avatar = account.avatar;

    match store.insert_user(user.clone()).await {
        Ok(()) => Ok(user),
        Err(StoreError::Conflict(message)) if message.starts_with("Email") => {
            Err(AccountError::EmailTaken)
        }
        Err(StoreError::Conflict(_)) => Err(AccountError::UsernameTaken),
        Err(e) => Err(e.into()),
    }
}

/// Check an email and password pair
///
/// # Returns
/// The matching user document
///
/// # Errors
/// `UnknownEmail` when no account has this email, `WrongPassword` when the
/// password does not match the stored hash.
pub async fn authenticate(
    store: &dyn DocumentStore,
    email: &str,
    password: &str,
) -> Result<User, AccountError> {
    let email = email.trim().to_lowercase();
    let user = store
        .find_by_email(&email)
        .await?
        .ok_or(AccountError::UnknownEmail)?;

    if !verify(password, &user.password_hash)? {
        return Err(AccountError::WrongPassword);
    }
    Ok(user)
}
