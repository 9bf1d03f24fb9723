use crate::models::{Bookmark, BookmarkChanges, NewBookmark};
use leptos::prelude::*;
use url::Url;

/// Which write the bookmark form issues on submit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) enum FormMode {
    #[default]
    Creating,
    Editing(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum FormError {
    MissingTitle,
    MissingUrl,
    InvalidUrl,
    NoSession,
}

impl std::fmt::Display for FormError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormError::MissingTitle => write!(f, "Title is required"),
            FormError::MissingUrl => write!(f, "URL is required"),
            FormError::InvalidUrl => write!(f, "Enter a full URL, e.g. https://example.com"),
            FormError::NoSession => write!(f, "You are signed out. Sign in again to save."),
        }
    }
}

impl std::error::Error for FormError {}

/// Absolute `http`/`https` URL with a host.
pub(crate) fn is_valid_url(u: &str) -> bool {
    match Url::parse(u) {
        Ok(parsed) => matches!(parsed.scheme(), "http" | "https") && parsed.host().is_some(),
        Err(_) => false,
    }
}

/// A validated write, ready to send.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum FormCommand {
    Create(NewBookmark),
    Update { id: String, changes: BookmarkChanges },
}

pub(crate) fn build_command(
    mode: &FormMode,
    title: &str,
    url: &str,
    user_id: Option<&str>,
) -> Result<FormCommand, FormError> {
    let title = title.trim();
    let url = url.trim();

    if title.is_empty() {
        return Err(FormError::MissingTitle);
    }
    if url.is_empty() {
        return Err(FormError::MissingUrl);
    }
    if !is_valid_url(url) {
        return Err(FormError::InvalidUrl);
    }

    match mode {
        FormMode::Editing(id) => Ok(FormCommand::Update {
            id: id.clone(),
            changes: BookmarkChanges {
                title: title.to_string(),
                url: url.to_string(),
            },
        }),
        FormMode::Creating => {
            let user_id = user_id
                .filter(|id| !id.trim().is_empty())
                .ok_or(FormError::NoSession)?;
            Ok(FormCommand::Create(NewBookmark {
                title: title.to_string(),
                url: url.to_string(),
                user_id: user_id.to_string(),
            }))
        }
    }
}

/// Signals behind the add/edit modal.
#[derive(Clone, Copy)]
pub(crate) struct BookmarkFormController {
    pub open: RwSignal<bool>,
    pub mode: RwSignal<FormMode>,
    pub title: RwSignal<String>,
    pub url: RwSignal<String>,
    pub loading: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
}

impl BookmarkFormController {
    pub fn new() -> Self {
        Self {
            open: RwSignal::new(false),
            mode: RwSignal::new(FormMode::Creating),
            title: RwSignal::new(String::new()),
            url: RwSignal::new(String::new()),
            loading: RwSignal::new(false),
            error: RwSignal::new(None),
        }
    }

    pub fn open_create(&self) {
        self.reset_fields();
        self.open.set(true);
    }

    pub fn open_edit(&self, bookmark: &Bookmark) {
        self.mode.set(FormMode::Editing(bookmark.id.clone()));
        self.title.set(bookmark.title.clone());
        self.url.set(bookmark.url.clone());
        self.error.set(None);
        self.open.set(true);
    }

    /// Every close path goes through here: cancel, dismiss, Escape, success.
    pub fn close(&self) {
        self.open.set(false);
        self.reset_fields();
    }

    fn reset_fields(&self) {
        self.mode.set(FormMode::Creating);
        self.title.set(String::new());
        self.url.set(String::new());
        self.error.set(None);
    }

    pub fn is_editing(&self) -> bool {
        self.mode.with(|m| matches!(m, FormMode::Editing(_)))
    }

    pub fn heading(&self) -> &'static str {
        if self.is_editing() {
            "Edit Bookmark"
        } else {
            "New Bookmark"
        }
    }

    pub fn submit_label(&self) -> &'static str {
        if self.loading.get() {
            "Saving..."
        } else if self.is_editing() {
            "Update Bookmark"
        } else {
            "Save Bookmark"
        }
    }

    pub fn command(&self, user_id: Option<&str>) -> Result<FormCommand, FormError> {
        self.mode.with_untracked(|mode| {
            build_command(
                mode,
                &self.title.get_untracked(),
                &self.url.get_untracked(),
                user_id,
            )
        })
    }
}

impl Default for BookmarkFormController {
    fn default() -> Self {
        Self::new()
    }
}
