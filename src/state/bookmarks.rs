//! Local projection of the `bookmarks` table.
//!
//! The list is loaded newest-first and then edited in place: creates are
//! prepended, edits keep their slot, deletes are removed by id and can be
//! put back when the backend rejects them.

use crate::models::{Bookmark, BookmarkChanges};

/// Prompt shown before a row is removed.
pub(crate) const DELETE_CONFIRMATION: &str = "Are you sure?";

/// A row taken out of the list ahead of the backend delete.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct PendingRemoval {
    pub index: usize,
    pub bookmark: Bookmark,
}

/// Puts a freshly created row at the top without re-sorting.
pub(crate) fn prepend_created(list: &mut Vec<Bookmark>, created: Bookmark) {
    list.retain(|b| b.id != created.id);
    list.insert(0, created);
}

/// Replaces `title`/`url` of the row with `id`, keeping its position.
/// Returns `false` when no such row is present.
pub(crate) fn apply_changes(list: &mut [Bookmark], id: &str, changes: &BookmarkChanges) -> bool {
    match list.iter_mut().find(|b| b.id == id) {
        Some(b) => {
            b.title = changes.title.clone();
            b.url = changes.url.clone();
            true
        }
        None => false,
    }
}

pub(crate) fn remove_optimistic(list: &mut Vec<Bookmark>, id: &str) -> Option<PendingRemoval> {
    let index = list.iter().position(|b| b.id == id)?;
    let bookmark = list.remove(index);
    Some(PendingRemoval { index, bookmark })
}

/// Undoes [`remove_optimistic`] after a failed delete. The row goes back to
/// its old index, clamped to the current length.
pub(crate) fn restore_removed(list: &mut Vec<Bookmark>, removal: PendingRemoval) {
    if list.iter().any(|b| b.id == removal.bookmark.id) {
        return;
    }
    let index = removal.index.min(list.len());
    list.insert(index, removal.bookmark);
}
