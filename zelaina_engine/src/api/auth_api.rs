use std::fmt::Debug;

use log::*;

use crate::{
    db_types::{NewUser, User, UserSummary},
    traits::{AuthApiError, AuthManagement},
};

/// `AuthApi` wraps a backend with the storefront's registration and login semantics.
pub struct AuthApi<B> {
    db: B,
}

impl<B: Debug> Debug for AuthApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AuthApi ({:?})", self.db)
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
    /// Registers a new user.
    ///
    /// The pre-check and the insert are deliberately not coupled in a transaction. A concurrent
    /// registration with the same email can slip between them; the unique constraint on the email
    /// column catches it and the backend reports [`AuthApiError::EmailTaken`] either way.
    pub async fn register(&self, user: NewUser) -> Result<User, AuthApiError> {
        if self.db.email_is_registered(&user.email).await? {
            debug!("🔑️ Registration rejected. {} is already registered.", user.email);
            return Err(AuthApiError::EmailTaken);
        }
        let user = self.db.register_user(user).await?;
        debug!("🔑️ New user #{} registered as {} <{}>", user.id, user.name, user.email);
        Ok(user)
    }

    /// Fetches the user matching the credential pair, or [`AuthApiError::InvalidCredentials`]
    /// when none does.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, AuthApiError> {
        match self.db.fetch_user_by_credentials(email, password).await? {
            Some(user) => {
                debug!("🔑️ User #{} ({}) logged in", user.id, user.email);
                Ok(user)
            },
            None => {
                debug!("🔑️ Login rejected for {email}");
                Err(AuthApiError::InvalidCredentials)
            },
        }
    }

    pub async fn users(&self) -> Result<Vec<UserSummary>, AuthApiError> {
        self.db.fetch_all_users().await
    }
}
