//! Identity service for linkshelf.
//!
//! [`IdentityProvider`] answers "who is signed in"; [`LocalIdentity`] keeps
//! the answer in memory for a single session.

use std::cell::RefCell;

use async_trait::async_trait;
use tracing::info;

use crate::types::errors::AuthError;
use crate::types::session::UserSession;

#[async_trait(?Send)]
pub trait IdentityProvider {
    /// The signed-in user, or `None` when the visitor must go through login.
    async fn current_user(&self) -> Option<UserSession>;
}

/// Resolves the current user or fails with [`AuthError::NotAuthenticated`].
pub async fn require_user(identity: &dyn IdentityProvider) -> Result<UserSession, AuthError> {
    identity
        .current_user()
        .await
        .ok_or(AuthError::NotAuthenticated)
}

/// In-memory identity for one session.
#[derive(Default)]
pub struct LocalIdentity {
    session: RefCell<Option<UserSession>>,
}

impl LocalIdentity {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an identity that is already signed in as `user_id`.
    pub fn signed_in(user_id: &str, email: Option<&str>) -> Self {
        let identity = Self::new();
        identity.sign_in(user_id, email);
        identity
    }

    pub fn sign_in(&self, user_id: &str, email: Option<&str>) -> UserSession {
        let session = UserSession {
            user_id: user_id.to_string(),
            email: email.map(str::to_string),
        };
        info!(user_id, "signed in");
        *self.session.borrow_mut() = Some(session.clone());
        session
    }

    pub fn sign_out(&self) {
        if let Some(session) = self.session.borrow_mut().take() {
            info!(user_id = %session.user_id, "signed out");
        }
    }
}

#[async_trait(?Send)]
impl IdentityProvider for LocalIdentity {
    async fn current_user(&self) -> Option<UserSession> {
        self.session.borrow().clone()
    }
}
