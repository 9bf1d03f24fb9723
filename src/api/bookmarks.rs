use super::{ApiClient, ApiError, ApiResult};
use crate::models::{Bookmark, BookmarkChanges, NewBookmark};

const TABLE_PATH: &str = "/rest/v1/bookmarks";

impl ApiClient {
    pub(crate) fn list_bookmarks_url(&self) -> String {
        format!(
            "{}?select=*&order=created_at.desc",
            self.endpoint(TABLE_PATH)
        )
    }

    pub(crate) fn bookmark_by_id_url(&self, id: &str) -> String {
        format!(
            "{}?id=eq.{}",
            self.endpoint(TABLE_PATH),
            urlencoding::encode(id)
        )
    }

    /// The insert endpoint answers with an array of inserted rows; exactly
    /// one is expected.
    pub(crate) fn parse_inserted_rows(rows: Vec<Bookmark>) -> ApiResult<Bookmark> {
        rows.into_iter()
            .next()
            .ok_or_else(|| ApiError::parse("Insert succeeded but returned no row"))
    }

    /// All rows the session may read, newest first. Ownership scoping is the
    /// backend's row-level policy; no user filter is sent.
    pub async fn list_bookmarks(&self) -> ApiResult<Vec<Bookmark>> {
        let client = reqwest::Client::new();
        let req = self.with_headers(client.get(self.list_bookmarks_url()));
        Self::send_json(req, "Load bookmarks failed").await
    }

    pub async fn create_bookmark(&self, new: &NewBookmark) -> ApiResult<Bookmark> {
        let client = reqwest::Client::new();
        let req = self
            .with_headers(client.post(self.endpoint(TABLE_PATH)))
            .header("Prefer", "return=representation")
            .json(new);

        let rows: Vec<Bookmark> = Self::send_json(req, "Create bookmark failed").await?;
        Self::parse_inserted_rows(rows)
    }

    pub async fn update_bookmark(&self, id: &str, changes: &BookmarkChanges) -> ApiResult<()> {
        let client = reqwest::Client::new();
        let req = self
            .with_headers(client.patch(self.bookmark_by_id_url(id)))
            .header("Prefer", "return=minimal")
            .json(changes);
        Self::send_empty(req, "Update bookmark failed").await
    }

    pub async fn delete_bookmark(&self, id: &str) -> ApiResult<()> {
        let client = reqwest::Client::new();
        let req = self.with_headers(client.delete(self.bookmark_by_id_url(id)));
        Self::send_empty(req, "Delete bookmark failed").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiErrorKind, EnvConfig};

    fn client() -> ApiClient {
        ApiClient::new(EnvConfig::from_parts(
            Some("https://abc.supabase.co".to_string()),
            Some("anon".to_string()),
            None,
        ))
    }

    #[test]
    fn test_list_url_orders_newest_first() {
        assert_eq!(
            client().list_bookmarks_url(),
            "https://abc.supabase.co/rest/v1/bookmarks?select=*&order=created_at.desc"
        );
    }

    #[test]
    fn test_by_id_url_encodes_id() {
        let c = client();
        assert_eq!(
            c.bookmark_by_id_url("42"),
            "https://abc.supabase.co/rest/v1/bookmarks?id=eq.42"
        );
        assert_eq!(
            c.bookmark_by_id_url("a&b"),
            "https://abc.supabase.co/rest/v1/bookmarks?id=eq.a%26b"
        );
    }

    #[test]
    fn test_list_response_contract_deserialize() {
        let json = r#"[
            {"id": "b2", "title": "Newer", "url": "https://b.io", "user_id": "u1", "created_at": "2025-02-01T00:00:00+00:00"},
            {"id": "b1", "title": "Older", "url": "https://a.io", "user_id": "u1", "created_at": "2025-01-01T00:00:00+00:00"}
        ]"#;
        let rows: Vec<Bookmark> = serde_json::from_str(json).expect("list should parse");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id, "b2");
    }

    #[test]
    fn test_parse_inserted_rows_takes_first() {
        let row = Bookmark {
            id: "srv-1".to_string(),
            title: "Github".to_string(),
            url: "https://github.com".to_string(),
            user_id: "u1".to_string(),
            created_at: "2025-03-01T10:00:00+00:00".to_string(),
        };
        let got = ApiClient::parse_inserted_rows(vec![row.clone()]).expect("one row");
        assert_eq!(got, row);
    }

    #[test]
    fn test_parse_inserted_rows_empty_is_parse_error() {
        let err = ApiClient::parse_inserted_rows(vec![]).expect_err("no rows");
        assert_eq!(err.kind, ApiErrorKind::Parse);
    }
}
