//! Current-user session.

use tokio::sync::watch;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Supplies the signed-in user, if any.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait SessionProvider: Send + Sync {
    fn current_user_id(&self) -> Option<String>;
}

/// Session fixed at construction (CLI runs, tests).
#[derive(Debug, Clone, Default)]
pub struct StaticSession {
    user_id: Option<String>,
}

impl StaticSession {
    pub fn signed_in(user_id: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
        }
    }

    pub fn anonymous() -> Self {
        Self { user_id: None }
    }
}

impl From<Option<String>> for StaticSession {
    fn from(user_id: Option<String>) -> Self {
        Self { user_id }
    }
}

impl SessionProvider for StaticSession {
    fn current_user_id(&self) -> Option<String> {
        self.user_id.clone()
    }
}

/// Session that can change while the application runs.
pub struct UserSession {
    user_id: watch::Sender<Option<String>>,
}

impl Default for UserSession {
    fn default() -> Self {
        Self::new()
    }
}

impl UserSession {
    pub fn new() -> Self {
        let (user_id, _) = watch::channel(None);
        Self { user_id }
    }

    pub fn sign_in(&self, user_id: impl Into<String>) {
        let user_id = user_id.into();
        tracing::info!(user_id = %user_id, "User signed in");
        self.user_id.send_replace(Some(user_id));
    }

    pub fn sign_out(&self) {
        if let Some(previous) = self.user_id.send_replace(None) {
            tracing::info!(user_id = %previous, "User signed out");
        }
    }

    /// Observe sign-in and sign-out.
    pub fn subscribe(&self) -> watch::Receiver<Option<String>> {
        self.user_id.subscribe()
    }
}

impl SessionProvider for UserSession {
    fn current_user_id(&self) -> Option<String> {
        self.user_id.borrow().clone()
    }
}
