use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

/// Backends hand out row ids as UUID strings or bigint numbers depending on
/// the table schema. Both are kept as an opaque string on the client.
fn opaque_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(de::Error::custom(format!(
            "expected a string or numeric id, got {other}"
        ))),
    }
}

/// One row of the `bookmarks` table.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Bookmark {
    #[serde(deserialize_with = "opaque_id")]
    pub id: String,
    pub title: String,
    pub url: String,

    #[serde(default, deserialize_with = "opaque_id")]
    pub user_id: String,

    /// ISO-8601 timestamp assigned by the backend.
    #[serde(default)]
    pub created_at: String,
}

/// Insert payload. `id` and `created_at` are assigned server-side.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct NewBookmark {
    pub title: String,
    pub url: String,
    pub user_id: String,
}

/// Update payload; only the user-editable columns.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct BookmarkChanges {
    pub title: String,
    pub url: String,
}

/// Identity returned by the auth "current user" endpoint.
///
/// Only `id` is relied upon; the rest of the payload is kept opaque so that
/// provider-specific metadata does not break decoding.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct SessionUser {
    #[serde(deserialize_with = "opaque_id")]
    pub id: String,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(flatten)]
    pub extra: serde_json::Value,
}

/// Credentials issued by the OAuth callback or a token refresh.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Session {
    pub access_token: String,

    #[serde(default)]
    pub refresh_token: Option<String>,

    /// Seconds since the Unix epoch.
    #[serde(default)]
    pub expires_at: Option<i64>,

    #[serde(default)]
    pub token_type: Option<String>,
}

impl Session {
    /// Treats a session as expired slightly early so a request issued right
    /// now does not race the deadline.
    pub fn is_expired(&self, now_secs: i64) -> bool {
        self.expires_at
            .map(|exp| exp <= now_secs.saturating_add(10))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bookmark_row_with_uuid_id() {
        let json = r#"{
            "id": "6f1c7a52-3b8e-4c43-9f1e-2a1f4e0d9c11",
            "title": "Github",
            "url": "https://github.com",
            "user_id": "b3b7c1d2-0000-4000-8000-000000000001",
            "created_at": "2025-01-31T12:00:00.123456+00:00"
        }"#;
        let b: Bookmark = serde_json::from_str(json).expect("row should parse");
        assert_eq!(b.id, "6f1c7a52-3b8e-4c43-9f1e-2a1f4e0d9c11");
        assert_eq!(b.title, "Github");
        assert_eq!(b.created_at, "2025-01-31T12:00:00.123456+00:00");
    }

    #[test]
    fn test_bookmark_row_with_numeric_id() {
        let json = r#"{"id": 42, "title": "t", "url": "https://a.io", "user_id": "u1", "created_at": "2025-01-01T00:00:00Z"}"#;
        let b: Bookmark = serde_json::from_str(json).expect("row should parse");
        assert_eq!(b.id, "42");
    }

    #[test]
    fn test_bookmark_row_rejects_object_id() {
        let json = r#"{"id": {"x": 1}, "title": "t", "url": "https://a.io"}"#;
        assert!(serde_json::from_str::<Bookmark>(json).is_err());
    }

    #[test]
    fn test_bookmark_row_missing_optional_columns() {
        let json = r#"{"id": "a", "title": "t", "url": "https://a.io"}"#;
        let b: Bookmark = serde_json::from_str(json).expect("row should parse");
        assert!(b.user_id.is_empty());
        assert!(b.created_at.is_empty());
    }

    #[test]
    fn test_new_bookmark_serialization() {
        let v = serde_json::to_value(NewBookmark {
            title: "Github".to_string(),
            url: "https://github.com".to_string(),
            user_id: "u1".to_string(),
        })
        .expect("should serialize");
        assert_eq!(
            v,
            serde_json::json!({"title": "Github", "url": "https://github.com", "user_id": "u1"})
        );
    }

    #[test]
    fn test_session_user_keeps_provider_metadata() {
        let json = r#"{
            "id": "u1",
            "email": "u@example.com",
            "aud": "authenticated",
            "app_metadata": {"provider": "google"}
        }"#;
        let u: SessionUser = serde_json::from_str(json).expect("user should parse");
        assert_eq!(u.id, "u1");
        assert_eq!(u.email.as_deref(), Some("u@example.com"));
        assert_eq!(u.extra["app_metadata"]["provider"], "google");
    }

    #[test]
    fn test_session_expiry() {
        let s = Session {
            access_token: "t".to_string(),
            refresh_token: None,
            expires_at: Some(1_000),
            token_type: None,
        };
        assert!(!s.is_expired(900));
        assert!(s.is_expired(995));
        assert!(s.is_expired(2_000));

        let no_deadline = Session {
            expires_at: None,
            ..s
        };
        assert!(!no_deadline.is_expired(i64::MAX - 100));
    }
}
