mod bookmarks;
mod form;
mod outcomes;
mod session;

pub(crate) use bookmarks::{remove_optimistic, DELETE_CONFIRMATION};
pub(crate) use form::{BookmarkFormController, FormCommand};
pub(crate) use outcomes::{
    apply_create_result, apply_delete_result, apply_load_result, apply_resolved_session,
    apply_update_result, Followup,
};
pub(crate) use session::resolve_session;

use crate::api::ApiClient;
use crate::models::{Bookmark, SessionUser};
use leptos::prelude::*;

#[derive(Clone, Copy)]
pub(crate) struct AppState {
    pub api_client: RwSignal<ApiClient>,

    /// Set once the dashboard has resolved the session with the backend.
    pub current_user: RwSignal<Option<SessionUser>>,

    /// Local projection of the user's bookmarks, newest first after load.
    pub bookmarks: RwSignal<Vec<Bookmark>>,
    pub bookmarks_loading: RwSignal<bool>,
    pub bookmarks_error: RwSignal<Option<String>>,

    pub search_query: RwSignal<String>,

    /// Bumped on every reset. Async work captures it up front and drops its
    /// result when the session it started under is gone.
    pub session_epoch: RwSignal<u64>,
}

impl AppState {
    pub fn new() -> Self {
        Self::with_client(ApiClient::load_from_storage())
    }

    pub fn with_client(api_client: ApiClient) -> Self {
        Self {
            api_client: RwSignal::new(api_client),
            current_user: RwSignal::new(None),
            bookmarks: RwSignal::new(vec![]),
            bookmarks_loading: RwSignal::new(false),
            bookmarks_error: RwSignal::new(None),
            search_query: RwSignal::new(String::new()),
            session_epoch: RwSignal::new(0),
        }
    }

    pub fn epoch(&self) -> u64 {
        self.session_epoch.get_untracked()
    }

    pub fn is_current(&self, epoch: u64) -> bool {
        self.epoch() == epoch
    }

    /// Back to the signed-out state. The API client keeps its config but
    /// loses its session.
    pub fn reset(&self) {
        self.api_client.update(|c| c.session = None);
        self.current_user.set(None);
        self.bookmarks.set(vec![]);
        self.bookmarks_loading.set(false);
        self.bookmarks_error.set(None);
        self.search_query.set(String::new());
        self.session_epoch.update(|e| *e = e.wrapping_add(1));
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Copy)]
pub(crate) struct AppContext(pub AppState);
