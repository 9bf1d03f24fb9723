use crate::api::{parse_oauth_fragment, ApiClient};
use crate::models::{Session, SessionUser};
use crate::util::now_secs;
use leptos::logging::{log, warn};
use wasm_bindgen::JsValue;

/// Picks up the session the auth server appended to the redirect URL and
/// scrubs the tokens from the address bar.
fn take_oauth_callback() -> Option<Session> {
    let window = web_sys::window()?;
    let location = window.location();
    let hash = location.hash().ok()?;
    let session = parse_oauth_fragment(&hash, now_secs())?;

    if let Ok(history) = window.history() {
        let path = location
            .pathname()
            .unwrap_or_else(|_| "/dashboard".to_string());
        let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(&path));
    }

    Some(session)
}

/// Resolves who is signed in. Any failure along the way counts as "nobody"
/// and drops the stored session; there is no retry.
pub(crate) async fn resolve_session(mut client: ApiClient) -> (ApiClient, Option<SessionUser>) {
    if let Some(session) = take_oauth_callback() {
        client.set_session(session);
        client.save_to_storage();
    }

    let Some(session) = client.session().cloned() else {
        return (client, None);
    };

    if session.is_expired(now_secs()) {
        let refreshed = match session.refresh_token.as_deref() {
            Some(token) => match client.refresh_session(token, now_secs()).await {
                Ok(s) => Some(s),
                Err(e) => {
                    warn!("session refresh failed ({:?}): {}", e.kind, e);
                    None
                }
            },
            None => None,
        };

        match refreshed {
            Some(s) => {
                client.set_session(s);
                client.save_to_storage();
            }
            None => {
                client.forget_session();
                return (client, None);
            }
        }
    }

    match client.get_user().await {
        Ok(user) => {
            log!("session resolved for user {}", user.id);
            (client, Some(user))
        }
        Err(e) => {
            warn!("session rejected ({:?}): {}", e.kind, e);
            client.forget_session();
            (client, None)
        }
    }
}
