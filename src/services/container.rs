//! Service Container - wires collaborators once, hands out services.
//!
//! The store, session and navigator are shared. Every call to
//! [`ServiceContainer::interviews`] builds a fresh [`InterviewManager`]
//! with its own view state, so each consuming view gets independent
//! `interviews` / `interview` / `is_loading` / filter state.

use std::sync::Arc;

use super::{InterviewManager, InterviewService};
use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::{DocumentStore, FileStore, LogNavigator, Navigator, SessionProvider, StaticSession};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Service container trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    /// New interview service with empty view state
    fn interviews(&self) -> Arc<dyn InterviewService>;
}

/// Concrete implementation of ServiceContainer
#[derive(Clone)]
pub struct Services {
    store: Arc<dyn DocumentStore>,
    session: Arc<dyn SessionProvider>,
    navigator: Arc<dyn Navigator>,
}

impl Services {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        session: Arc<dyn SessionProvider>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            store,
            session,
            navigator,
        }
    }

    /// File-backed store, fixed session from config, logging navigator.
    pub async fn from_config(config: &Config) -> AppResult<Self> {
        let store = FileStore::open(&config.data_file).await?;
        tracing::debug!(path = %store.path().display(), "Document store opened");

        if config.user_id.is_none() {
            tracing::warn!("No user configured; interview data is unavailable");
        }

        Ok(Self::new(
            Arc::new(store),
            Arc::new(StaticSession::from(config.user_id.clone())),
            Arc::new(LogNavigator),
        ))
    }
}

impl ServiceContainer for Services {
    fn interviews(&self) -> Arc<dyn InterviewService> {
        Arc::new(InterviewManager::new(
            self.store.clone(),
            self.session.clone(),
            self.navigator.clone(),
        ))
    }
}
