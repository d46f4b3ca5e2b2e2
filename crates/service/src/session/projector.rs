use std::sync::Arc;

use tracing::{info, instrument, warn};

use models::token::decode_payload;
use models::{login, register};

use super::domain::{LoginInput, LoginReceipt, RegisterInput, SessionView};
use super::errors::SessionError;
use super::store::{CredentialStore, TOKEN_KEY};
use crate::api::AuthApi;

/// Session projector independent of any UI surface.
pub struct SessionProjector<S: CredentialStore> {
    store: Arc<S>,
    api: AuthApi,
}

impl<S: CredentialStore> SessionProjector<S> {
    pub fn new(store: Arc<S>, api: AuthApi) -> Self {
        Self { store, api }
    }

    /// Project the current session view from the persisted slot.
    ///
    /// A stored token that fails to decode degrades to `Anonymous` with a
    /// warning; reads never mutate the slot, so the value stays in place
    /// for inspection.
    pub async fn current_view(&self) -> Result<SessionView, SessionError> {
        let token = self
            .store
            .get(TOKEN_KEY)
            .await
            .map_err(|e| SessionError::Storage(e.to_string()))?;
        Ok(match token {
            Some(token) => match decode_payload(&token) {
                Ok(payload) => SessionView::Authenticated { name: payload.name },
                Err(e) => {
                    warn!(error = %e, "stored token does not decode; treating session as anonymous");
                    SessionView::Anonymous
                }
            },
            None => SessionView::Anonymous,
        })
    }

    /// Restore the session at startup from whatever the slot holds.
    ///
    /// # Examples
    /// ```
    /// use service::api::AuthApi;
    /// use service::session::{store::mock::MemoryCredentialStore, SessionProjector};
    /// use std::sync::Arc;
    /// let store = Arc::new(MemoryCredentialStore::default());
    /// let projector = SessionProjector::new(store, AuthApi::new("http://localhost:5000"));
    /// let view = tokio_test::block_on(projector.initialize()).unwrap();
    /// assert!(!view.is_authenticated());
    /// ```
    #[instrument(skip(self))]
    pub async fn initialize(&self) -> Result<SessionView, SessionError> {
        let view = self.current_view().await?;
        info!(authenticated = view.is_authenticated(), "session_restored");
        Ok(view)
    }

    /// Submit credentials; on success persist the issued token and project it.
    ///
    /// The token is written to the slot before it is decoded, so a token the
    /// API issued but this client cannot read is still persisted when the
    /// call returns `MalformedToken`.
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn login(&self, input: LoginInput) -> Result<LoginReceipt, SessionError> {
        let req = login::Req { email: input.email, password: input.password };
        let resp = self.api.login(&req).await?;

        self.store
            .set(TOKEN_KEY, resp.token.clone())
            .await
            .map_err(|e| SessionError::Storage(e.to_string()))?;
        let payload =
            decode_payload(&resp.token).map_err(|e| SessionError::MalformedToken(e.to_string()))?;

        info!(name = %payload.name, "user_logged_in");
        Ok(LoginReceipt {
            message: resp.message,
            view: SessionView::Authenticated { name: payload.name },
        })
    }

    /// Create an account. The slot is never touched; the user logs in afterwards.
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn register(&self, input: RegisterInput) -> Result<String, SessionError> {
        let req = register::Req {
            name: input.name,
            email: input.email,
            password: input.password,
        };
        let resp = self.api.register(&req).await?;
        info!("user_registered");
        Ok(resp.message)
    }

    /// Clear the slot. Logging out twice is not an error.
    ///
    /// # Examples
    /// ```
    /// use service::api::AuthApi;
    /// use service::session::store::{mock::MemoryCredentialStore, CredentialStore, TOKEN_KEY};
    /// use service::session::SessionProjector;
    /// use std::sync::Arc;
    /// let store = Arc::new(MemoryCredentialStore::default());
    /// tokio_test::block_on(store.set(TOKEN_KEY, "h.eyJuYW1lIjoiQWRhIn0=.s".into())).unwrap();
    /// let projector = SessionProjector::new(store.clone(), AuthApi::new("http://localhost:5000"));
    /// let view = tokio_test::block_on(projector.logout()).unwrap();
    /// assert!(!view.is_authenticated());
    /// assert!(tokio_test::block_on(store.get(TOKEN_KEY)).unwrap().is_none());
    /// ```
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<SessionView, SessionError> {
        let existed = self
            .store
            .remove(TOKEN_KEY)
            .await
            .map_err(|e| SessionError::Storage(e.to_string()))?;
        info!(had_token = existed, "user_logged_out");
        Ok(SessionView::Anonymous)
    }

    /// Fetch the bearer-gated resource with the stored token.
    /// Fails locally without a network call when no token is stored.
    #[instrument(skip(self))]
    pub async fn fetch_protected(&self) -> Result<models::protected::Resp, SessionError> {
        let token = self
            .store
            .get(TOKEN_KEY)
            .await
            .map_err(|e| SessionError::Storage(e.to_string()))?
            .ok_or_else(|| SessionError::Rejected("not logged in".to_string()))?;
        self.api.protected(&token).await
    }
}
