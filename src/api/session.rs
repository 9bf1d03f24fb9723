use super::{ApiClient, ApiError, ApiResult};
use crate::models::{Session, SessionUser};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct RefreshRequest {
    pub refresh_token: String,
}

/// Token grant response of the auth server.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub expires_at: Option<i64>,
    #[serde(default)]
    pub token_type: Option<String>,
}

impl TokenResponse {
    pub(crate) fn into_session(self, now_secs: i64) -> Session {
        Session {
            expires_at: self
                .expires_at
                .or_else(|| self.expires_in.map(|secs| now_secs.saturating_add(secs))),
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            token_type: self.token_type,
        }
    }
}

/// Parses the implicit-grant callback fragment
/// (`#access_token=...&refresh_token=...&expires_in=3600&token_type=bearer`).
///
/// Returns `None` for fragments that carry no token, including error
/// callbacks (`#error=access_denied&error_description=...`).
pub(crate) fn parse_oauth_fragment(fragment: &str, now_secs: i64) -> Option<Session> {
    let fragment = fragment.trim_start_matches('#');
    let params: HashMap<String, String> = url::form_urlencoded::parse(fragment.as_bytes())
        .into_owned()
        .collect();

    let access_token = params
        .get("access_token")
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())?
        .to_string();

    let get_i64 = |k: &str| params.get(k).and_then(|v| v.trim().parse::<i64>().ok());
    let get_s = |k: &str| params.get(k).filter(|v| !v.trim().is_empty()).cloned();

    Some(
        TokenResponse {
            access_token,
            refresh_token: get_s("refresh_token"),
            expires_in: get_i64("expires_in"),
            expires_at: get_i64("expires_at"),
            token_type: get_s("token_type"),
        }
        .into_session(now_secs),
    )
}

impl ApiClient {
    /// Where the browser goes to start OAuth sign-in. The auth server sends
    /// the user back to `redirect_to` with the session in the URL fragment.
    pub fn authorize_url(&self, redirect_to: &str) -> String {
        format!(
            "{}?provider={}&redirect_to={}",
            self.endpoint("/auth/v1/authorize"),
            urlencoding::encode(&self.oauth_provider),
            urlencoding::encode(redirect_to)
        )
    }

    pub async fn get_user(&self) -> ApiResult<SessionUser> {
        if !self.is_authenticated() {
            return Err(ApiError::unauthorized());
        }

        let client = reqwest::Client::new();
        let req = self.with_headers(client.get(self.endpoint("/auth/v1/user")));
        Self::send_json(req, "Get user failed").await
    }

    pub async fn refresh_session(&self, refresh_token: &str, now_secs: i64) -> ApiResult<Session> {
        let client = reqwest::Client::new();
        let req = client
            .post(self.endpoint("/auth/v1/token?grant_type=refresh_token"))
            .header("apikey", &self.anon_key)
            .json(&RefreshRequest {
                refresh_token: refresh_token.to_string(),
            });

        let tokens: TokenResponse = Self::send_json(req, "Session refresh failed").await?;
        Ok(tokens.into_session(now_secs))
    }

    pub async fn sign_out(&self) -> ApiResult<()> {
        if !self.is_authenticated() {
            return Ok(());
        }

        let client = reqwest::Client::new();
        let req = self.with_headers(client.post(self.endpoint("/auth/v1/logout")));
        Self::send_empty(req, "Sign out failed").await
    }
}
