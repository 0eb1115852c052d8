use std::sync::Arc;

use tracing::{debug, info, warn};

use autostylist_common::models::{RegisterRequest, User};
use autostylist_common::traits::AuthApi;

use crate::session::Session;
use crate::Error;

/// Login, logout and "who am I", keeping the session in step with the backend.
pub struct AccountService {
    api: Arc<dyn AuthApi>,
    session: Arc<Session>,
}

impl AccountService {
    pub fn new(api: Arc<dyn AuthApi>, session: Arc<Session>) -> Self {
        Self { api, session }
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    /// Creates the account, then logs straight into it.
    pub async fn register_and_login(
        &self,
        full_name: &str,
        email: &str,
        password: &str,
    ) -> Result<User, Error> {
        let req = RegisterRequest {
            full_name: full_name.trim().to_string(),
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        if req.full_name.is_empty() || req.email.is_empty() || req.password.is_empty() {
            return Err(Error::validation("Full name, email and password are required"));
        }
        if !req.email.contains('@') {
            return Err(Error::validation("Please enter a valid email address"));
        }

        let user = self.api.register_user(&req).await?;
        info!("Registered account for {}", user.email);
        self.login(&req.email, &req.password).await
    }

    /// Succeeds only once the profile loads; otherwise the session ends anonymous.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, Error> {
        let token = self.api.login_user(email.trim(), password).await?;
        self.session.set_auth_token(Some(token.token())).await;
        let me = self.api.get_me(self.session.context()).await;
        match self.session.check(me).await {
            Ok(user) => Ok(user),
            Err(e) => {
                warn!("Profile did not load after login, signing out: {e}");
                self.session.set_auth_token(None).await;
                Err(e)
            }
        }
    }

    /// Always ends anonymous, whatever the backend says.
    pub async fn logout(&self) {
        if self.session.is_authenticated() {
            if let Err(e) = self.api.logout_user(self.session.context()).await {
                debug!("Server-side logout failed, clearing locally anyway: {e}");
            }
        }
        self.session.set_auth_token(None).await;
    }

    /// `None` while anonymous or once the backend rejects the stored token.
    pub async fn current_user(&self) -> Result<Option<User>, Error> {
        if !self.session.is_authenticated() {
            return Ok(None);
        }
        match self.api.get_me(self.session.context()).await {
            Ok(user) => Ok(Some(user)),
            Err(e) if e.is_auth() => {
                info!("Stored token no longer valid: {e}");
                self.session.invalidate().await;
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Picks up a persisted token and checks it against the backend.
    pub async fn restore(&self) -> Result<Option<User>, Error> {
        if !self.session.restore().await? {
            return Ok(None);
        }
        self.current_user().await
    }
}
