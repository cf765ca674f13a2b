use crate::{
    db_types::{NewUser, User},
    AuthApiError,
};

/// Account storage behaviour.
#[allow(async_fn_in_trait)]
pub trait AuthManagement {
    /// Persists a new account. Fails with [`AuthApiError::UsernameTaken`] when the username or
    /// email is already registered.
    async fn insert_user(&self, user: NewUser) -> Result<User, AuthApiError>;

    async fn fetch_user_by_username(&self, username: &str) -> Result<Option<User>, AuthApiError>;

    async fn fetch_user_by_id(&self, id: i64) -> Result<Option<User>, AuthApiError>;
}
