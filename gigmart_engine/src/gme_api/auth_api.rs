use std::fmt::Debug;

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use log::*;
use rand_core::OsRng;
use serde::{Deserialize, Serialize};

use crate::{
    db_types::{NewUser, User},
    gme_api::errors::AuthApiError,
    traits::AuthManagement,
};

/// A registration request, before the password has been hashed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterUser {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub is_seller: bool,
    #[serde(default)]
    pub img: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Account management: registration, credential checks and profile lookup. Token issuance is a
/// server concern; this API only establishes who the caller is.
pub struct AuthApi<B> {
    db: B,
}

impl<B> Debug for AuthApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AuthApi")
    }
}

impl<B> AuthApi<B> {
    pub fn new(db: B) -> Self {
        Self { db }
    }
}

impl<B> AuthApi<B>
where B: AuthManagement
{
    /// Creates an account, hashing the password with argon2.
    pub async fn register(&self, registration: RegisterUser) -> Result<User, AuthApiError> {
        let RegisterUser { username, email, password, is_seller, img, country, description } = registration;
        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AuthApiError::HashingError(e.to_string()))?
            .to_string();
        let user = self
            .db
            .insert_user(NewUser { username, email, password_hash, is_seller, img, country, description })
            .await?;
        info!("👤️ New {} account [{}] registered: {}", if user.is_seller { "seller" } else { "buyer" }, user.id, user.username);
        Ok(user)
    }

    /// Verifies a username/password pair. The same error covers unknown usernames and wrong
    /// passwords, so the response doesn't reveal which accounts exist.
    pub async fn login(&self, username: &str, password: &str) -> Result<User, AuthApiError> {
        let user = self
            .db
            .fetch_user_by_username(username)
            .await?
            .ok_or(AuthApiError::InvalidCredentials)?;
        let parsed = PasswordHash::new(&user.password_hash).map_err(|e| AuthApiError::HashingError(e.to_string()))?;
        Argon2::default().verify_password(password.as_bytes(), &parsed).map_err(|_| {
            debug!("👤️ Failed login attempt for {username}");
            AuthApiError::InvalidCredentials
        })?;
        Ok(user)
    }

    pub async fn fetch_user(&self, id: i64) -> Result<User, AuthApiError> {
        self.db.fetch_user_by_id(id).await?.ok_or(AuthApiError::UserNotFound(id))
    }
}
