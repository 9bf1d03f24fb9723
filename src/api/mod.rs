mod bookmarks;
mod session;

pub(crate) use session::parse_oauth_fragment;

use crate::models::Session;
use crate::storage::{clear_session_storage, load_session_from_storage, save_session_to_storage};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum ApiErrorKind {
    Unauthorized,
    Network,
    Http,
    Parse,
}

#[derive(Clone, Debug)]
pub(crate) struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    fn network(e: reqwest::Error) -> Self {
        Self {
            kind: ApiErrorKind::Network,
            message: e.to_string(),
        }
    }

    pub(crate) fn parse(e: impl std::fmt::Display) -> Self {
        Self {
            kind: ApiErrorKind::Parse,
            message: e.to_string(),
        }
    }

    pub(crate) fn unauthorized() -> Self {
        Self {
            kind: ApiErrorKind::Unauthorized,
            message: "Unauthorized".to_string(),
        }
    }

    fn http(status: reqwest::StatusCode, body: String, ctx: &str) -> Self {
        Self {
            kind: ApiErrorKind::Http,
            message: format!("{ctx} ({status}): {body}"),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.kind == ApiErrorKind::Unauthorized
    }
}

pub(crate) type ApiResult<T> = Result<T, ApiError>;

const DEFAULT_BACKEND_URL: &str = "http://localhost:54321";
const DEFAULT_OAUTH_PROVIDER: &str = "google";

/// Runtime configuration injected by `index.html` as `window.ENV`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct EnvConfig {
    pub supabase_url: String,
    pub supabase_anon_key: String,
    pub oauth_provider: String,
}

impl EnvConfig {
    pub fn new() -> Self {
        let env = web_sys::window()
            .and_then(|w| w.get("ENV"))
            .filter(|env| !env.is_undefined() && env.is_object());

        // Upper-case keys are the documented form; lower-case is accepted too.
        let read = |upper: &str, lower: &str| -> Option<String> {
            let env = env.as_ref()?;
            [upper, lower].into_iter().find_map(|k| {
                js_sys::Reflect::get(env, &k.into())
                    .ok()
                    .and_then(|v| v.as_string())
            })
        };

        Self::from_parts(
            read("SUPABASE_URL", "supabase_url"),
            read("SUPABASE_ANON_KEY", "supabase_anon_key"),
            read("OAUTH_PROVIDER", "oauth_provider"),
        )
    }

    pub(crate) fn from_parts(
        url: Option<String>,
        anon_key: Option<String>,
        provider: Option<String>,
    ) -> Self {
        let url = url
            .map(|u| u.trim().trim_end_matches('/').to_string())
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());

        let provider = provider
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| DEFAULT_OAUTH_PROVIDER.to_string());

        Self {
            supabase_url: url,
            supabase_anon_key: anon_key.unwrap_or_default().trim().to_string(),
            oauth_provider: provider,
        }
    }
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Client for the hosted backend: auth endpoints under `/auth/v1` and the
/// table API under `/rest/v1`.
#[derive(Clone)]
pub(crate) struct ApiClient {
    pub(crate) base_url: String,
    pub(crate) anon_key: String,
    pub(crate) oauth_provider: String,
    pub(crate) session: Option<Session>,
}

impl ApiClient {
    pub fn new(config: EnvConfig) -> Self {
        Self {
            base_url: config.supabase_url,
            anon_key: config.supabase_anon_key,
            oauth_provider: config.oauth_provider,
            session: None,
        }
    }

    pub fn load_from_storage() -> Self {
        let mut client = Self::new(EnvConfig::new());
        client.session = load_session_from_storage();
        client
    }

    pub fn save_to_storage(&self) {
        if let Some(session) = &self.session {
            save_session_to_storage(session);
        }
    }

    pub fn clear_storage() {
        clear_session_storage();
    }

    pub fn set_session(&mut self, session: Session) {
        self.session = Some(session);
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Drops the in-memory and stored session.
    pub fn forget_session(&mut self) {
        self.session = None;
        Self::clear_storage();
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    fn get_auth_header(&self) -> Option<String> {
        self.session
            .as_ref()
            .map(|s| format!("Bearer {}", s.access_token))
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn with_headers(&self, mut req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        req = req.header("apikey", &self.anon_key);
        if let Some(header) = self.get_auth_header() {
            req = req.header("Authorization", header);
        }
        req
    }

    async fn send(req: reqwest::RequestBuilder, ctx: &str) -> ApiResult<reqwest::Response> {
        let res = req.send().await.map_err(ApiError::network)?;

        if res.status().is_success() {
            Ok(res)
        } else if res.status().as_u16() == 401 {
            Err(ApiError::unauthorized())
        } else {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            Err(ApiError::http(status, body, ctx))
        }
    }

    async fn send_json<T: serde::de::DeserializeOwned>(
        req: reqwest::RequestBuilder,
        ctx: &str,
    ) -> ApiResult<T> {
        Self::send(req, ctx)
            .await?
            .json()
            .await
            .map_err(ApiError::parse)
    }

    async fn send_empty(req: reqwest::RequestBuilder, ctx: &str) -> ApiResult<()> {
        Self::send(req, ctx).await.map(|_| ())
    }
}
