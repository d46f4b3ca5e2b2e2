//! HTTP client for the remote authentication API.
//!
//! The API is a collaborator, not part of this system: this module only
//! speaks its wire contract and classifies outcomes. No timeout and no retry
//! policy is applied; a call runs until the server answers or the connection
//! drops.

use models::{login, protected, register, ErrorBody};

use crate::session::errors::SessionError;

pub struct AuthApi {
    http: reqwest::Client,
    base_url: String,
}

impl AuthApi {
    /// Build a client for the given base URL (scheme + host, no trailing slash).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { http: reqwest::Client::new(), base_url: base_url.into() }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn login(&self, req: &login::Req) -> Result<login::Resp, SessionError> {
        let url = format!("{}{}", self.base_url, login::PATH);
        let resp = self
            .http
            .post(&url)
            .json(req)
            .send()
            .await
            .map_err(|e| SessionError::Transport(e.to_string()))?;
        Self::read_json(resp).await
    }

    pub async fn register(&self, req: &register::Req) -> Result<register::Resp, SessionError> {
        let url = format!("{}{}", self.base_url, register::PATH);
        let resp = self
            .http
            .post(&url)
            .json(req)
            .send()
            .await
            .map_err(|e| SessionError::Transport(e.to_string()))?;
        Self::read_json(resp).await
    }

    pub async fn protected(&self, token: &str) -> Result<protected::Resp, SessionError> {
        let url = format!("{}{}", self.base_url, protected::PATH);
        let resp = self
            .http
            .get(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| SessionError::Transport(e.to_string()))?;
        Self::read_json(resp).await
    }

    /// Any 2xx parses the typed record; any other status parses the `{error}`
    /// body into a rejection. A body that fits neither is a transport error.
    async fn read_json<T: serde::de::DeserializeOwned>(
        resp: reqwest::Response,
    ) -> Result<T, SessionError> {
        let status = resp.status();
        if status.is_success() {
            resp.json::<T>()
                .await
                .map_err(|e| SessionError::Transport(e.to_string()))
        } else {
            let body = resp
                .json::<ErrorBody>()
                .await
                .map_err(|e| SessionError::Transport(e.to_string()))?;
            Err(SessionError::Rejected(body.error))
        }
    }
}
