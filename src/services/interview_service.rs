//! Interview service - reads and writes interviews for the signed-in user.
//!
//! Each manager owns its own view state (`interviews`, `interview`,
//! `is_loading`, `selected_filter_result`), published through
//! `tokio::sync::watch` channels so presentation layers can subscribe.
//!
//! Operations may run concurrently; their state writes are not ordered,
//! and the last one to finish wins. `is_loading` is a plain busy flag.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::watch;
use uuid::Uuid;

use crate::config::{FIELD_CREATED_AT, FIELD_ID, FIELD_RESULT, LIST_VIEW_PATH};
use crate::domain::{Interview, InterviewFields, InterviewResult, Value};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::{CollectionPath, Direction, DocumentStore, Navigator, Query, SessionProvider};

/// Interview service trait for dependency injection.
#[async_trait]
pub trait InterviewService: Send + Sync {
    /// All interviews of the current user, newest first.
    ///
    /// With `filtered`, only those whose result equals the selected filter.
    /// Does not touch view state.
    async fn get_all_interviews(&self, filtered: bool) -> AppResult<Vec<Interview>>;

    /// Create an interview with a fresh id, `createdAt = now` and result
    /// `Refusal`, then navigate to the list view.
    ///
    /// Fails with `NotAuthenticated` (nothing written) without a user.
    async fn add_new_interview(&self, payload: InterviewFields) -> AppResult<Interview>;

    /// Load one interview into `interview`.
    ///
    /// Fails with `NotFound` and leaves `interview` unchanged when missing.
    async fn get_interview_by_id(&self, id: &str) -> AppResult<Interview>;

    /// Merge `data` into the stored interview, then reload it.
    async fn save_interview(&self, id: &str, data: InterviewFields) -> AppResult<Interview>;

    /// Replace `interviews` with the filtered list.
    async fn submit_filter(&self) -> AppResult<()>;

    /// Replace `interviews` with the unfiltered list. Keeps the selection.
    async fn clear_filter(&self) -> AppResult<()>;

    /// Delete an interview and reload the unfiltered list.
    async fn remove_interview(&self, id: &str) -> AppResult<()>;

    fn interviews(&self) -> Vec<Interview>;
    fn interview(&self) -> Option<Interview>;
    fn is_loading(&self) -> bool;
    fn selected_filter_result(&self) -> Option<InterviewResult>;
    fn set_selected_filter_result(&self, result: Option<InterviewResult>);

    fn subscribe_interviews(&self) -> watch::Receiver<Vec<Interview>>;
    fn subscribe_interview(&self) -> watch::Receiver<Option<Interview>>;
    fn subscribe_loading(&self) -> watch::Receiver<bool>;
}

struct ViewState {
    interviews: watch::Sender<Vec<Interview>>,
    interview: watch::Sender<Option<Interview>>,
    is_loading: watch::Sender<bool>,
    selected_filter_result: watch::Sender<Option<InterviewResult>>,
}

impl ViewState {
    fn new() -> Self {
        Self {
            interviews: watch::channel(Vec::new()).0,
            interview: watch::channel(None).0,
            is_loading: watch::channel(false).0,
            selected_filter_result: watch::channel(None).0,
        }
    }
}

/// Raises the busy flag; lowers it when dropped, on every exit path.
struct Busy<'a> {
    flag: &'a watch::Sender<bool>,
}

impl<'a> Busy<'a> {
    fn start(flag: &'a watch::Sender<bool>) -> Self {
        flag.send_replace(true);
        Self { flag }
    }
}

impl Drop for Busy<'_> {
    fn drop(&mut self) {
        self.flag.send_replace(false);
    }
}

/// Concrete implementation of InterviewService.
pub struct InterviewManager {
    store: Arc<dyn DocumentStore>,
    session: Arc<dyn SessionProvider>,
    navigator: Arc<dyn Navigator>,
    state: ViewState,
}

impl InterviewManager {
    /// Create a manager with empty view state
    pub fn new(
        store: Arc<dyn DocumentStore>,
        session: Arc<dyn SessionProvider>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            store,
            session,
            navigator,
            state: ViewState::new(),
        }
    }

    /// Collection of the signed-in user
    fn collection(&self) -> AppResult<CollectionPath> {
        self.session
            .current_user_id()
            .map(|user_id| CollectionPath::user_interviews(&user_id))
            .ok_or(AppError::NotAuthenticated)
    }
}

#[async_trait]
impl InterviewService for InterviewManager {
    async fn get_all_interviews(&self, filtered: bool) -> AppResult<Vec<Interview>> {
        let collection = self.collection()?;

        let mut query = Query::new().order_by(FIELD_CREATED_AT, Direction::Descending);
        if filtered {
            if let Some(result) = self.selected_filter_result() {
                query = query.where_eq(FIELD_RESULT, &result);
            }
        }

        let documents = self.store.query(&collection, &query).await?;
        tracing::debug!(
            collection = %collection,
            filtered,
            count = documents.len(),
            "Interviews listed"
        );

        documents.into_iter().map(Interview::from_document).collect()
    }

    async fn add_new_interview(&self, payload: InterviewFields) -> AppResult<Interview> {
        let _busy = Busy::start(&self.state.is_loading);

        let mut document = payload.into_document();
        let id = Uuid::new_v4().to_string();
        document.insert(FIELD_ID.to_string(), Value::from(id.clone()));
        document.insert(FIELD_CREATED_AT.to_string(), Value::from(Utc::now()));
        document.insert(FIELD_RESULT.to_string(), Value::from(&InterviewResult::Refusal));

        let collection = match self.collection() {
            Ok(collection) => collection,
            Err(e) => {
                tracing::warn!("Interview not created: no signed-in user");
                return Err(e);
            }
        };

        self.store.set(&collection, &id, document.clone()).await?;
        tracing::info!(collection = %collection, id = %id, "Interview created");

        self.navigator.push(LIST_VIEW_PATH);
        Interview::from_document(document)
    }

    async fn get_interview_by_id(&self, id: &str) -> AppResult<Interview> {
        let _busy = Busy::start(&self.state.is_loading);
        let collection = self.collection()?;

        let document = self
            .store
            .get(&collection, id)
            .await?
            .ok_or_not_found()
            .inspect_err(|_| {
                tracing::debug!(collection = %collection, id = %id, "Interview not found")
            })?;

        let interview = Interview::from_document(document)?;
        self.state.interview.send_replace(Some(interview.clone()));
        Ok(interview)
    }

    async fn save_interview(&self, id: &str, data: InterviewFields) -> AppResult<Interview> {
        let _busy = Busy::start(&self.state.is_loading);
        let collection = self.collection()?;

        self.store.update(&collection, id, data.into_document()).await?;
        tracing::info!(collection = %collection, id = %id, "Interview updated");

        self.get_interview_by_id(id).await
    }

    async fn submit_filter(&self) -> AppResult<()> {
        let _busy = Busy::start(&self.state.is_loading);
        let interviews = self.get_all_interviews(true).await?;
        self.state.interviews.send_replace(interviews);
        Ok(())
    }

    async fn clear_filter(&self) -> AppResult<()> {
        let _busy = Busy::start(&self.state.is_loading);
        let interviews = self.get_all_interviews(false).await?;
        self.state.interviews.send_replace(interviews);
        Ok(())
    }

    async fn remove_interview(&self, id: &str) -> AppResult<()> {
        let _busy = Busy::start(&self.state.is_loading);
        let collection = self.collection()?;

        self.store.delete(&collection, id).await?;
        tracing::info!(collection = %collection, id = %id, "Interview removed");

        let interviews = self.get_all_interviews(false).await?;
        self.state.interviews.send_replace(interviews);
        Ok(())
    }

    fn interviews(&self) -> Vec<Interview> {
        self.state.interviews.borrow().clone()
    }

    fn interview(&self) -> Option<Interview> {
        self.state.interview.borrow().clone()
    }

    fn is_loading(&self) -> bool {
        *self.state.is_loading.borrow()
    }

    fn selected_filter_result(&self) -> Option<InterviewResult> {
        self.state.selected_filter_result.borrow().clone()
    }

    fn set_selected_filter_result(&self, result: Option<InterviewResult>) {
        self.state.selected_filter_result.send_replace(result);
    }

    fn subscribe_interviews(&self) -> watch::Receiver<Vec<Interview>> {
        self.state.interviews.subscribe()
    }

    fn subscribe_interview(&self) -> watch::Receiver<Option<Interview>> {
        self.state.interview.subscribe()
    }

    fn subscribe_loading(&self) -> watch::Receiver<bool> {
        self.state.is_loading.subscribe()
    }
}
