use thiserror::Error;

use crate::db_types::{NewUser, User, UserSummary};

#[derive(Debug, Clone, Error)]
pub enum AuthApiError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("A user with this email is already registered")]
    EmailTaken,
    #[error("Invalid email or password")]
    InvalidCredentials,
}

impl From<sqlx::Error> for AuthApiError {
    fn from(e: sqlx::Error) -> Self {
        AuthApiError::DatabaseError(e.to_string())
    }
}

/// The `AuthManagement` trait defines behaviour for managing storefront users.
///
/// Email uniqueness is a schema-level constraint, not just an application check. Two concurrent
/// registrations for the same email can both pass [`email_is_registered`]; the second insert will
/// then fail at the storage layer and the backend must surface it as [`AuthApiError::EmailTaken`].
///
/// [`email_is_registered`]: AuthManagement::email_is_registered
#[allow(async_fn_in_trait)]
pub trait AuthManagement {
    /// Inserts a new user record, returning the stored row. Fails with [`AuthApiError::EmailTaken`]
    /// when the email is already registered.
    async fn register_user(&self, user: NewUser) -> Result<User, AuthApiError>;

    /// Checks whether any user exists with the given email. The function succeeds if the query
    /// succeeds, returning existence as a boolean.
    async fn email_is_registered(&self, email: &str) -> Result<bool, AuthApiError>;

    /// Fetches the user matching the given email/password pair, or `None` when no pair matches.
    /// Credentials are compared verbatim; the storefront stores passwords in the clear.
    async fn fetch_user_by_credentials(&self, email: &str, password: &str) -> Result<Option<User>, AuthApiError>;

    /// Lists all registered users, without their passwords.
    async fn fetch_all_users(&self) -> Result<Vec<UserSummary>, AuthApiError>;
}
