//! Navigation between views.

use tokio::sync::watch;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Moves the active view to a path.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait Navigator: Send + Sync {
    fn push(&self, path: &str);
}

/// Emits a tracing event instead of switching views.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn push(&self, path: &str) {
        tracing::info!(path = %path, "Navigate");
    }
}

/// Records every visited path.
pub struct HistoryNavigator {
    history: watch::Sender<Vec<String>>,
}

impl Default for HistoryNavigator {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryNavigator {
    pub fn new() -> Self {
        let (history, _) = watch::channel(Vec::new());
        Self { history }
    }

    pub fn current(&self) -> Option<String> {
        self.history.borrow().last().cloned()
    }

    pub fn history(&self) -> Vec<String> {
        self.history.borrow().clone()
    }
}

impl Navigator for HistoryNavigator {
    fn push(&self, path: &str) {
        tracing::debug!(path = %path, "Navigate");
        self.history.send_modify(|h| h.push(path.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_records_paths() {
        let nav = HistoryNavigator::new();
        assert_eq!(nav.current(), None);

        nav.push("/list");
        nav.push("/interview/abc");
        assert_eq!(nav.current().as_deref(), Some("/interview/abc"));
        assert_eq!(nav.history(), vec!["/list".to_string(), "/interview/abc".to_string()]);
    }
}
