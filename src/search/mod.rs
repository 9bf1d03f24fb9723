use crate::models::Bookmark;

/// Strips a leading `http://` / `https://` and then a leading `www.`.
///
/// Expects an already lower-cased URL; both prefixes are optional and
/// removed at most once.
pub(crate) fn strip_scheme_and_www(url: &str) -> &str {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);
    rest.strip_prefix("www.").unwrap_or(rest)
}

/// Normalized form of a raw search box value. `None` means "no filter".
pub(crate) fn normalize_query(raw: &str) -> Option<String> {
    let q = raw.trim().to_lowercase();
    if q.is_empty() {
        None
    } else {
        Some(q)
    }
}

/// Prefix match against the title, the raw URL, or the URL without its
/// scheme and `www.`. `query` must already be normalized.
pub(crate) fn matches_prefix(bookmark: &Bookmark, query: &str) -> bool {
    if bookmark.title.to_lowercase().starts_with(query) {
        return true;
    }

    let url = bookmark.url.to_lowercase();
    url.starts_with(query) || strip_scheme_and_www(&url).starts_with(query)
}

/// Filters `bookmarks` by prefix, keeping their order. A blank query returns
/// the whole collection.
pub(crate) fn filter_bookmarks(bookmarks: &[Bookmark], raw_query: &str) -> Vec<Bookmark> {
    let Some(query) = normalize_query(raw_query) else {
        return bookmarks.to_vec();
    };

    bookmarks
        .iter()
        .filter(|b| matches_prefix(b, &query))
        .cloned()
        .collect()
}
