// File: autostylist-core/src/client/auth.rs

use async_trait::async_trait;

use autostylist_common::models::{Ack, AuthContext, RegisterRequest, TokenResponse, User};
use autostylist_common::traits::AuthApi;
use autostylist_common::ErrorKind;

use super::{Access, ApiClient, Operation};
use crate::http::{HttpRequest, RequestBody};
use crate::Error;

const REGISTER: Operation = Operation {
    name: "register",
    fallback: "Registration failed",
    in_band: ErrorKind::Validation,
};
const LOGIN: Operation = Operation {
    name: "login",
    fallback: "Invalid credentials",
    in_band: ErrorKind::Auth,
};
const ME: Operation = Operation {
    name: "me",
    fallback: "Failed to load profile",
    in_band: ErrorKind::Auth,
};
const LOGOUT: Operation = Operation {
    name: "logout",
    fallback: "Logout failed",
    in_band: ErrorKind::Transport,
};

#[async_trait]
impl AuthApi for ApiClient {
    async fn register_user(&self, req: &RegisterRequest) -> Result<User, Error> {
        let request = HttpRequest::post(self.url("/auth/register"))
            .with_body(RequestBody::Json(serde_json::to_value(req)?));
        self.call(&REGISTER, request).await
    }

    /// OAuth2 password form: the email goes in `username`.
    async fn login_user(&self, email: &str, password: &str) -> Result<TokenResponse, Error> {
        let request = HttpRequest::post(self.url("/auth/login")).with_body(RequestBody::Form(vec![
            ("username".to_string(), email.to_string()),
            ("password".to_string(), password.to_string()),
        ]));
        let resp: TokenResponse = self.call(&LOGIN, request).await?;
        if resp.access_token.is_empty() {
            return Err(Error::auth(LOGIN.fallback));
        }
        Ok(resp)
    }

    async fn get_me(&self, ctx: &AuthContext) -> Result<User, Error> {
        let request = self.authorize(HttpRequest::get(self.url("/auth/me")), ctx, Access::Required, &ME)?;
        self.call(&ME, request).await
    }

    async fn logout_user(&self, ctx: &AuthContext) -> Result<Ack, Error> {
        let request = self.authorize(
            HttpRequest::post(self.url("/auth/logout")),
            ctx,
            Access::Required,
            &LOGOUT,
        )?;
        self.call(&LOGOUT, request).await
    }
}
