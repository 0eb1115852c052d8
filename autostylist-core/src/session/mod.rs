// File: autostylist-core/src/session/mod.rs
//
// Anonymous <-> Authenticated state machine. The token lives in an
// `AuthContext` that every API call borrows; this type keeps it in sync with
// the durable store and tells subscribers about transitions.

pub mod token_store;

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{info, warn};

use autostylist_common::models::{AuthContext, AuthState, AuthToken};
use autostylist_common::traits::TokenStore;

use crate::eventbus::{AuthEvent, EventBus, LogoutReason};
use crate::Error;

pub use token_store::{build_token_store, FileTokenStore, KeyringTokenStore, MemoryTokenStore};

pub struct Session {
    ctx: AuthContext,
    store: Arc<dyn TokenStore>,
    bus: EventBus,
}

impl Session {
    pub fn new(store: Arc<dyn TokenStore>, bus: EventBus) -> Self {
        Self {
            ctx: AuthContext::new(),
            store,
            bus,
        }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryTokenStore::new()), EventBus::new())
    }

    /// The context to pass into API calls.
    pub fn context(&self) -> &AuthContext {
        &self.ctx
    }

    pub fn state(&self) -> AuthState {
        self.ctx.state()
    }

    pub fn is_authenticated(&self) -> bool {
        self.ctx.is_authenticated()
    }

    pub fn events(&self) -> &EventBus {
        &self.bus
    }

    pub async fn subscribe(&self) -> mpsc::Receiver<AuthEvent> {
        self.bus.subscribe(None).await
    }

    /// Stores or clears the token.
    ///
    /// Returns `true` on an actual change; only then is an event published.
    /// A failing store is logged and does not undo the in-memory change.
    pub async fn set_auth_token(&self, token: Option<AuthToken>) -> bool {
        self.apply(token, LogoutReason::UserRequested).await
    }

    /// Drops the token after the backend rejected it.
    pub async fn invalidate(&self) -> bool {
        self.apply(None, LogoutReason::AuthRejected).await
    }

    /// Clears the session when `err` is an authentication failure, then hands `err` back.
    pub async fn check<T>(&self, result: Result<T, Error>) -> Result<T, Error> {
        if let Err(err) = &result {
            if err.is_auth() && self.is_authenticated() {
                warn!("Backend rejected the session token: {}", err.body());
                self.invalidate().await;
            }
        }
        result
    }

    /// Loads a previously persisted token. Returns `true` if one was found.
    pub async fn restore(&self) -> Result<bool, Error> {
        match self.store.load()? {
            Some(raw) => {
                let token = AuthToken::new(raw);
                info!("Restored session token {}", token.fingerprint());
                let fingerprint = token.fingerprint();
                if self.ctx.set_token(Some(token)) {
                    self.bus.publish(AuthEvent::LoggedIn { fingerprint }).await;
                }
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn apply(&self, token: Option<AuthToken>, reason: LogoutReason) -> bool {
        let fingerprint = token.as_ref().map(AuthToken::fingerprint);
        let persisted = match &token {
            Some(t) => self.store.save(t.as_str()),
            None => self.store.clear(),
        };
        if let Err(e) = persisted {
            warn!("Token store update failed: {e}");
        }

        if !self.ctx.set_token(token) {
            return false;
        }

        let event = match fingerprint {
            Some(fingerprint) => {
                info!("Logged in ({fingerprint})");
                AuthEvent::LoggedIn { fingerprint }
            }
            None => {
                info!("Logged out ({reason:?})");
                AuthEvent::LoggedOut { reason }
            }
        };
        self.bus.publish(event).await;
        true
    }
}
