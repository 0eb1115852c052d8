// File: autostylist-common/src/models/auth.rs

use std::fmt;
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};

/// Opaque bearer credential. `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value for the `Authorization` header.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }

    /// Short, log-safe identifier for this token.
    pub fn fingerprint(&self) -> String {
        let tail: String = self.0.chars().rev().take(6).collect::<Vec<_>>().into_iter().rev().collect();
        format!("…{tail}")
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AuthToken({})", self.fingerprint())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    Anonymous,
    Authenticated,
}

/// Per-client authentication context, passed by reference into every request.
///
/// Cloning shares the same underlying slot. Requests snapshot the token at
/// send time, so a concurrent change only affects requests sent afterwards.
#[derive(Clone, Default)]
pub struct AuthContext {
    token: Arc<RwLock<Option<AuthToken>>>,
}

impl AuthContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: AuthToken) -> Self {
        Self {
            token: Arc::new(RwLock::new(Some(token))),
        }
    }

    /// Sets or clears the token. Returns `true` if the stored value changed.
    pub fn set_token(&self, token: Option<AuthToken>) -> bool {
        let mut slot = self.token.write().unwrap_or_else(|p| p.into_inner());
        if *slot == token {
            return false;
        }
        *slot = token;
        true
    }

    pub fn token(&self) -> Option<AuthToken> {
        self.token.read().unwrap_or_else(|p| p.into_inner()).clone()
    }

    pub fn state(&self) -> AuthState {
        if self.token.read().unwrap_or_else(|p| p.into_inner()).is_some() {
            AuthState::Authenticated
        } else {
            AuthState::Anonymous
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.state() == AuthState::Authenticated
    }
}

impl fmt::Debug for AuthContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthContext")
            .field("token", &self.token())
            .finish()
    }
}

/// JSON body for `POST /auth/register`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub full_name: String,
    pub email: String,
    pub password: String,
}

/// Response of `POST /auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

impl TokenResponse {
    pub fn token(&self) -> AuthToken {
        AuthToken::new(self.access_token.clone())
    }
}
