pub(crate) fn now_ms() -> i64 {
    js_sys::Date::now().round() as i64
}

pub(crate) fn now_secs() -> i64 {
    now_ms() / 1000
}

/// `YYYY-MM-DD` part of a backend timestamp, or the input unchanged when it
/// does not start with a date.
pub(crate) fn created_date(created_at: &str) -> &str {
    let s = created_at.trim();
    let Some(date) = s.get(..10) else {
        return s;
    };

    let b = date.as_bytes();
    let is_date = b[4] == b'-'
        && b[7] == b'-'
        && b
            .iter()
            .enumerate()
            .all(|(i, c)| i == 4 || i == 7 || c.is_ascii_digit());

    if is_date {
        date
    } else {
        s
    }
}

/// Origin of the running page, e.g. `https://app.example.com`.
pub(crate) fn page_origin() -> Option<String> {
    web_sys::window().and_then(|w| w.location().origin().ok())
}

/// Blocking browser confirmation prompt. A prompt that cannot be shown counts
/// as "cancel".
pub(crate) fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}
