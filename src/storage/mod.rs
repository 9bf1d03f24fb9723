use crate::models::Session;
use serde::{Deserialize, Serialize};

pub(crate) const SESSION_KEY: &str = "smart_bookmark_session";

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

pub(crate) fn load_json_from_storage<T: for<'de> Deserialize<'de>>(key: &str) -> Option<T> {
    let storage = local_storage()?;
    let json = storage.get_item(key).ok().flatten()?;
    serde_json::from_str(&json).ok()
}

pub(crate) fn save_json_to_storage<T: Serialize>(key: &str, value: &T) {
    if let Ok(json) = serde_json::to_string(value) {
        if let Some(storage) = local_storage() {
            let _ = storage.set_item(key, &json);
        }
    }
}

pub(crate) fn load_session_from_storage() -> Option<Session> {
    load_json_from_storage::<Session>(SESSION_KEY).filter(|s| !s.access_token.trim().is_empty())
}

pub(crate) fn save_session_to_storage(session: &Session) {
    save_json_to_storage(SESSION_KEY, session);
}

pub(crate) fn clear_session_storage() {
    if let Some(storage) = local_storage() {
        let _ = storage.remove_item(SESSION_KEY);
    }
}
