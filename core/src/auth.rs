//! Identity provider seam.
//!
//! Authentication is delegated to a hosted identity provider; this module
//! only defines the operations the panel uses (email/password sign-in and
//! the settings page's profile/password updates) as a dyn-compatible trait,
//! so the web layer can be wired against the real provider's client or the
//! deterministic fake in `lunamart-testing`.

use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Future type returned by [`AuthGateway`] methods.
pub type AuthFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, AuthError>> + Send + 'a>>;

/// The signed-in user as the provider reports it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Sign-in email.
    pub email: String,
    /// Display name, if set.
    #[serde(default)]
    pub display_name: Option<String>,
    /// Profile picture URL, if set.
    #[serde(default)]
    pub photo_url: Option<String>,
}

/// Partial profile update; absent fields are left untouched.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ProfileUpdate {
    /// New display name.
    #[serde(default)]
    pub display_name: Option<String>,
    /// New profile picture URL.
    #[serde(default)]
    pub photo_url: Option<String>,
}

impl ProfileUpdate {
    /// Whether the update would change anything.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.display_name.is_none() && self.photo_url.is_none()
    }
}

/// Errors from the identity provider.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Unknown email or wrong password - also raised by the password change
    /// when re-authentication with the current password fails.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// An operation that needs a signed-in user was called without one.
    #[error("no user is signed in")]
    NotSignedIn,

    /// The provider failed the request.
    #[error("identity provider error: {0}")]
    Provider(String),
}

/// Hosted identity provider operations used by the panel.
pub trait AuthGateway: Send + Sync {
    /// Signs in with email and password.
    ///
    /// # Errors
    ///
    /// [`AuthError::InvalidCredentials`] on a bad pair,
    /// [`AuthError::Provider`] on transport failure.
    fn sign_in(&self, email: String, password: String) -> AuthFuture<'_, UserProfile>;

    /// The currently signed-in user, if any.
    ///
    /// # Errors
    ///
    /// [`AuthError::Provider`] on transport failure.
    fn current_user(&self) -> AuthFuture<'_, Option<UserProfile>>;

    /// Applies a partial profile update and returns the updated profile.
    ///
    /// # Errors
    ///
    /// [`AuthError::NotSignedIn`] without a session,
    /// [`AuthError::Provider`] on transport failure.
    fn update_profile(&self, update: ProfileUpdate) -> AuthFuture<'_, UserProfile>;

    /// Changes the password. The provider re-authenticates with the current
    /// password first; the whole operation fails if that does not match.
    ///
    /// # Errors
    ///
    /// [`AuthError::NotSignedIn`] without a session,
    /// [`AuthError::InvalidCredentials`] if `current` does not match,
    /// [`AuthError::Provider`] on transport failure.
    fn change_password(&self, current: String, new: String) -> AuthFuture<'_, ()>;
}
