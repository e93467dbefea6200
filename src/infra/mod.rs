//! Infrastructure layer - External systems integration
//!
//! This module handles the collaborators the interview service talks to:
//! - Document stores (in-memory and JSON-file backed)
//! - The current-user session
//! - View navigation

pub mod navigation;
pub mod session;
pub mod store;

pub use navigation::{HistoryNavigator, LogNavigator, Navigator};
pub use session::{SessionProvider, StaticSession, UserSession};
pub use store::{CollectionPath, Direction, DocumentStore, FileStore, MemoryStore, Query};

#[cfg(any(test, feature = "test-utils"))]
pub use navigation::MockNavigator;
#[cfg(any(test, feature = "test-utils"))]
pub use session::MockSessionProvider;
#[cfg(any(test, feature = "test-utils"))]
pub use store::MockDocumentStore;
