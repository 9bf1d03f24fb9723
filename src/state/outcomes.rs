//! Applying backend results to the dashboard state.
//!
//! Each function takes the epoch captured when its request started. A result
//! that arrives after a reset belongs to a session that no longer exists and
//! is dropped without touching any signal.

use super::bookmarks::{apply_changes, prepend_created, restore_removed, PendingRemoval};
use super::{AppState, BookmarkFormController};
use crate::api::{ApiClient, ApiResult};
use crate::models::{Bookmark, BookmarkChanges, SessionUser};
use leptos::logging::{log, warn};
use leptos::prelude::*;

/// What the page still has to do after a result was applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Followup {
    Nothing,
    LoadBookmarks,
    EndSession,
}

pub(crate) fn apply_resolved_session(
    state: &AppState,
    epoch: u64,
    client: ApiClient,
    user: Option<SessionUser>,
) -> Followup {
    if !state.is_current(epoch) {
        return Followup::Nothing;
    }

    match user {
        Some(user) => {
            state.api_client.set(client);
            state.current_user.set(Some(user));
            Followup::LoadBookmarks
        }
        None => Followup::EndSession,
    }
}

/// A failed load keeps whatever list is already shown.
pub(crate) fn apply_load_result(
    state: &AppState,
    epoch: u64,
    result: ApiResult<Vec<Bookmark>>,
) -> Followup {
    if !state.is_current(epoch) {
        return Followup::Nothing;
    }
    state.bookmarks_loading.set(false);

    match result {
        Ok(list) => {
            log!("loaded {} bookmarks", list.len());
            state.bookmarks.set(list);
            Followup::Nothing
        }
        Err(e) if e.is_unauthorized() => Followup::EndSession,
        Err(e) => {
            leptos::logging::error!("failed to load bookmarks: {}", e);
            state
                .bookmarks_error
                .set(Some(format!("Could not load bookmarks: {e}")));
            Followup::Nothing
        }
    }
}

pub(crate) fn apply_create_result(
    state: &AppState,
    form: &BookmarkFormController,
    epoch: u64,
    result: ApiResult<Bookmark>,
) -> Followup {
    if !state.is_current(epoch) {
        return Followup::Nothing;
    }

    let result = result.map(|created| state.bookmarks.update(|list| prepend_created(list, created)));
    finish_submit(form, result)
}

pub(crate) fn apply_update_result(
    state: &AppState,
    form: &BookmarkFormController,
    epoch: u64,
    id: &str,
    changes: &BookmarkChanges,
    result: ApiResult<()>,
) -> Followup {
    if !state.is_current(epoch) {
        return Followup::Nothing;
    }

    let result = result.map(|()| {
        state.bookmarks.update(|list| {
            if !apply_changes(list, id, changes) {
                warn!("updated bookmark {} is not in the local list", id);
            }
        })
    });
    finish_submit(form, result)
}

// Failures leave the form open with its fields so the user can retry.
fn finish_submit(form: &BookmarkFormController, result: ApiResult<()>) -> Followup {
    form.loading.set(false);

    match result {
        Ok(()) => {
            form.close();
            Followup::Nothing
        }
        Err(e) if e.is_unauthorized() => {
            form.close();
            Followup::EndSession
        }
        Err(e) => {
            leptos::logging::error!("failed to save bookmark ({:?}): {}", e.kind, e);
            form.error.set(Some(e.to_string()));
            Followup::Nothing
        }
    }
}

/// The row was already taken out of the list; a rejected delete puts it back
/// where it was.
pub(crate) fn apply_delete_result(
    state: &AppState,
    epoch: u64,
    removal: PendingRemoval,
    result: ApiResult<()>,
) -> Followup {
    if !state.is_current(epoch) {
        return Followup::Nothing;
    }

    match result {
        Ok(()) => Followup::Nothing,
        Err(e) if e.is_unauthorized() => Followup::EndSession,
        Err(e) => {
            leptos::logging::error!("failed to delete bookmark {}: {}", removal.bookmark.id, e);
            let title = removal.bookmark.title.clone();
            state.bookmarks.update(|list| restore_removed(list, removal));
            state
                .bookmarks_error
                .set(Some(format!("Could not delete \"{title}\": {e}")));
            Followup::Nothing
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiError, ApiErrorKind, EnvConfig};
    use crate::state::remove_optimistic;

    fn bm(id: &str, title: &str) -> Bookmark {
        Bookmark {
            id: id.to_string(),
            title: title.to_string(),
            url: format!("https://{}.io", title.to_lowercase()),
            user_id: "u1".to_string(),
            created_at: String::new(),
        }
    }

    fn state_with(list: Vec<Bookmark>) -> AppState {
        let state = AppState::with_client(ApiClient::new(EnvConfig::from_parts(None, None, None)));
        state.bookmarks.set(list);
        state
    }

    fn user(id: &str) -> SessionUser {
        serde_json::from_value(serde_json::json!({"id": id, "email": "a@b.io"})).expect("user")
    }

    fn offline() -> ApiError {
        ApiError {
            kind: ApiErrorKind::Network,
            message: "offline".to_string(),
        }
    }

    fn titles(state: &AppState) -> Vec<String> {
        state
            .bookmarks
            .with_untracked(|l| l.iter().map(|b| b.title.clone()).collect())
    }

    #[test]
    fn test_resolved_user_is_stored_and_triggers_load() {
        Owner::new().with(|| {
            let state = state_with(vec![]);
            let next = apply_resolved_session(
                &state,
                state.epoch(),
                ApiClient::new(EnvConfig::from_parts(None, None, None)),
                Some(user("u1")),
            );
            assert_eq!(next, Followup::LoadBookmarks);
            assert_eq!(
                state.current_user.with_untracked(|u| u.as_ref().map(|u| u.id.clone())),
                Some("u1".to_string())
            );
        });
    }

    #[test]
    fn test_missing_user_ends_session() {
        Owner::new().with(|| {
            let state = state_with(vec![]);
            let client = ApiClient::new(EnvConfig::from_parts(None, None, None));
            assert_eq!(
                apply_resolved_session(&state, state.epoch(), client, None),
                Followup::EndSession
            );
            assert!(state.current_user.get_untracked().is_none());
        });
    }

    #[test]
    fn test_resolution_after_sign_out_is_dropped() {
        Owner::new().with(|| {
            let state = state_with(vec![]);
            let epoch = state.epoch();
            state.reset();

            let client = ApiClient::new(EnvConfig::from_parts(None, None, None));
            assert_eq!(
                apply_resolved_session(&state, epoch, client, Some(user("u1"))),
                Followup::Nothing
            );
            assert!(state.current_user.get_untracked().is_none());
        });
    }

    #[test]
    fn test_load_success_replaces_list() {
        Owner::new().with(|| {
            let state = state_with(vec![bm("old", "Old")]);
            state.bookmarks_loading.set(true);

            let next = apply_load_result(
                &state,
                state.epoch(),
                Ok(vec![bm("b", "B"), bm("a", "A")]),
            );
            assert_eq!(next, Followup::Nothing);
            assert_eq!(titles(&state), vec!["B", "A"]);
            assert!(!state.bookmarks_loading.get_untracked());
            assert!(state.bookmarks_error.get_untracked().is_none());
        });
    }

    #[test]
    fn test_load_failure_keeps_list_and_shows_banner() {
        Owner::new().with(|| {
            let state = state_with(vec![bm("a", "A")]);
            state.bookmarks_loading.set(true);

            let next = apply_load_result(&state, state.epoch(), Err(offline()));
            assert_eq!(next, Followup::Nothing);
            assert_eq!(titles(&state), vec!["A"]);
            assert!(!state.bookmarks_loading.get_untracked());
            let banner = state.bookmarks_error.get_untracked().unwrap_or_default();
            assert!(banner.contains("offline"), "{banner}");
        });
    }

    #[test]
    fn test_load_unauthorized_ends_session() {
        Owner::new().with(|| {
            let state = state_with(vec![bm("a", "A")]);
            let next = apply_load_result(&state, state.epoch(), Err(ApiError::unauthorized()));
            assert_eq!(next, Followup::EndSession);
            assert!(state.bookmarks_error.get_untracked().is_none());
        });
    }

    #[test]
    fn test_load_after_sign_out_does_not_repopulate() {
        Owner::new().with(|| {
            let state = state_with(vec![]);
            let epoch = state.epoch();
            state.bookmarks_loading.set(true);
            state.reset();

            let next = apply_load_result(&state, epoch, Ok(vec![bm("a", "A")]));
            assert_eq!(next, Followup::Nothing);
            assert!(state.bookmarks.get_untracked().is_empty());
        });
    }

    #[test]
    fn test_create_success_prepends_and_closes_form() {
        Owner::new().with(|| {
            let state = state_with(vec![bm("a", "A")]);
            let form = BookmarkFormController::new();
            form.open_create();
            form.title.set("Github".to_string());
            form.url.set("https://github.com".to_string());
            form.loading.set(true);

            let next = apply_create_result(&state, &form, state.epoch(), Ok(bm("g", "Github")));
            assert_eq!(next, Followup::Nothing);
            assert_eq!(titles(&state), vec!["Github", "A"]);
            assert!(!form.open.get_untracked());
            assert!(!form.loading.get_untracked());
            assert!(form.title.get_untracked().is_empty());
        });
    }

    #[test]
    fn test_create_failure_keeps_form_open_with_fields() {
        Owner::new().with(|| {
            let state = state_with(vec![bm("a", "A")]);
            let form = BookmarkFormController::new();
            form.open_create();
            form.title.set("Github".to_string());
            form.url.set("https://github.com".to_string());
            form.loading.set(true);

            let next = apply_create_result(&state, &form, state.epoch(), Err(offline()));
            assert_eq!(next, Followup::Nothing);
            assert_eq!(titles(&state), vec!["A"]);
            assert!(form.open.get_untracked());
            assert!(!form.loading.get_untracked());
            assert_eq!(form.title.get_untracked(), "Github");
            assert_eq!(form.url.get_untracked(), "https://github.com");
            assert_eq!(form.error.get_untracked().as_deref(), Some("offline"));
        });
    }

    #[test]
    fn test_create_after_sign_out_does_not_repopulate() {
        Owner::new().with(|| {
            let state = state_with(vec![]);
            let form = BookmarkFormController::new();
            let epoch = state.epoch();
            state.reset();

            apply_create_result(&state, &form, epoch, Ok(bm("g", "Github")));
            assert!(state.bookmarks.get_untracked().is_empty());
        });
    }

    #[test]
    fn test_update_success_edits_in_place_and_closes_form() {
        Owner::new().with(|| {
            let state = state_with(vec![bm("c", "C"), bm("b", "B"), bm("a", "A")]);
            let form = BookmarkFormController::new();
            form.open_edit(&bm("b", "B"));
            form.loading.set(true);

            let changes = BookmarkChanges {
                title: "Bee".to_string(),
                url: "https://bee.io".to_string(),
            };
            let next = apply_update_result(&state, &form, state.epoch(), "b", &changes, Ok(()));
            assert_eq!(next, Followup::Nothing);
            assert_eq!(titles(&state), vec!["C", "Bee", "A"]);
            assert!(!form.open.get_untracked());
            assert!(!form.is_editing());
        });
    }

    #[test]
    fn test_update_unauthorized_closes_form_and_ends_session() {
        Owner::new().with(|| {
            let state = state_with(vec![bm("b", "B")]);
            let form = BookmarkFormController::new();
            form.open_edit(&bm("b", "B"));
            form.loading.set(true);

            let changes = BookmarkChanges {
                title: "Bee".to_string(),
                url: "https://bee.io".to_string(),
            };
            let next = apply_update_result(
                &state,
                &form,
                state.epoch(),
                "b",
                &changes,
                Err(ApiError::unauthorized()),
            );
            assert_eq!(next, Followup::EndSession);
            assert_eq!(titles(&state), vec!["B"]);
            assert!(!form.open.get_untracked());
        });
    }

    #[test]
    fn test_delete_failure_restores_row_and_shows_banner() {
        Owner::new().with(|| {
            let state = state_with(vec![bm("c", "C"), bm("b", "B"), bm("a", "A")]);
            let removal = state
                .bookmarks
                .try_update(|l| remove_optimistic(l, "b"))
                .flatten()
                .expect("b is present");
            assert_eq!(titles(&state), vec!["C", "A"]);

            let next = apply_delete_result(&state, state.epoch(), removal, Err(offline()));
            assert_eq!(next, Followup::Nothing);
            assert_eq!(titles(&state), vec!["C", "B", "A"]);
            let banner = state.bookmarks_error.get_untracked().unwrap_or_default();
            assert!(banner.contains("\"B\""), "{banner}");
        });
    }

    #[test]
    fn test_delete_success_keeps_row_removed() {
        Owner::new().with(|| {
            let state = state_with(vec![bm("b", "B"), bm("a", "A")]);
            let removal = state
                .bookmarks
                .try_update(|l| remove_optimistic(l, "b"))
                .flatten()
                .expect("b is present");

            assert_eq!(
                apply_delete_result(&state, state.epoch(), removal, Ok(())),
                Followup::Nothing
            );
            assert_eq!(titles(&state), vec!["A"]);
            assert!(state.bookmarks_error.get_untracked().is_none());
        });
    }

    #[test]
    fn test_failed_delete_after_sign_out_is_not_restored() {
        Owner::new().with(|| {
            let state = state_with(vec![bm("b", "B")]);
            let removal = state
                .bookmarks
                .try_update(|l| remove_optimistic(l, "b"))
                .flatten()
                .expect("b is present");
            let epoch = state.epoch();
            state.reset();

            apply_delete_result(&state, epoch, removal, Err(offline()));
            assert!(state.bookmarks.get_untracked().is_empty());
            assert!(state.bookmarks_error.get_untracked().is_none());
        });
    }
}
