//! src/client/mod.rs
//!
//! `ApiClient` is the single entry point to the AutoStylist backend. Each
//! operation builds an [`HttpRequest`], attaches the caller's bearer token
//! according to the endpoint's access rule, and normalizes every failure into
//! an [`Error`] carrying an `{error}` body.

mod auth;
mod recommend;
mod wardrobe;

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use autostylist_common::models::AuthContext;
use autostylist_common::{ErrorBody, ErrorKind};

use crate::assets::{image_url, ImageSource};
use crate::config::ClientConfig;
use crate::http::{DefaultHttpClient, HttpClient, HttpRequest, Method};
use crate::Error;

/// How an endpoint uses the session token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Access {
    /// Never send a token (register, login).
    Public,
    /// Send the token when there is one.
    Optional,
    /// Fail locally while anonymous.
    Required,
}

impl Access {
    pub(crate) fn from_flag(required: bool) -> Self {
        if required {
            Access::Required
        } else {
            Access::Optional
        }
    }
}

/// Static description of one backend operation.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Operation {
    pub name: &'static str,
    /// Message used when the backend gives no structured error.
    pub fallback: &'static str,
    /// Kind for an `{"error": ..}` body delivered with a 2xx status.
    pub in_band: ErrorKind,
}

pub struct ApiClient {
    config: ClientConfig,
    http: Arc<dyn HttpClient>,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> Result<Self, Error> {
        let http = DefaultHttpClient::with_options(config.timeout, &config.user_agent)?;
        Ok(Self::with_http_client(config, Arc::new(http)))
    }

    pub fn with_http_client(config: ClientConfig, http: Arc<dyn HttpClient>) -> Self {
        Self { config, http }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Absolute URL for an image path returned by the backend.
    pub fn image_url(&self, path: &str) -> String {
        image_url(&self.config.static_root(), path)
    }

    /// Where to load an image from, or the placeholder when `path` is blank.
    pub fn image_source(&self, path: &str) -> ImageSource {
        ImageSource::resolve(&self.config.static_root(), Some(path))
    }

    /// Resolves an image and checks that it can be fetched, falling back to
    /// the placeholder when it cannot.
    pub async fn probe_image(&self, path: Option<&str>) -> ImageSource {
        let source = ImageSource::resolve(&self.config.static_root(), path);
        let url = match &source {
            ImageSource::Remote(url) => url.clone(),
            ImageSource::Placeholder => return ImageSource::Placeholder,
        };
        match self.http.execute(HttpRequest::new(Method::Head, url.clone())).await {
            Ok(resp) if resp.is_success() => source,
            Ok(resp) => {
                debug!("Image {url} unavailable (HTTP {})", resp.status);
                ImageSource::Placeholder
            }
            Err(e) => {
                debug!("Image {url} unavailable: {e}");
                ImageSource::Placeholder
            }
        }
    }

    pub(crate) fn url(&self, path: &str) -> String {
        self.config.api_url(path)
    }

    /// Attaches `Authorization: Bearer <token>` from a snapshot of `ctx`.
    pub(crate) fn authorize(
        &self,
        request: HttpRequest,
        ctx: &AuthContext,
        access: Access,
        op: &Operation,
    ) -> Result<HttpRequest, Error> {
        if access == Access::Public {
            return Ok(request);
        }
        match ctx.token() {
            Some(token) => Ok(request.with_header("Authorization", token.bearer())),
            None if access == Access::Required => {
                debug!("{} refused locally: not logged in", op.name);
                Err(Error::auth("Not authenticated"))
            }
            None => Ok(request),
        }
    }

    /// Sends `request` and decodes a successful body into `T`.
    pub(crate) async fn call<T: DeserializeOwned>(
        &self,
        op: &Operation,
        request: HttpRequest,
    ) -> Result<T, Error> {
        debug!("{}: {} {}", op.name, request.method, request.url);

        let resp = match self.http.execute(request).await {
            Ok(resp) => resp,
            Err(e) => {
                warn!("{} failed before a response arrived: {e}", op.name);
                return Err(Error::Transport(ErrorBody::new(op.fallback)));
            }
        };

        if !resp.is_success() {
            let body = ErrorBody::from_response(&resp.body, op.fallback);
            let kind = ErrorKind::from_status(resp.status);
            warn!("{} => HTTP {} ({kind:?}): {body}", op.name, resp.status);
            return Err(Error::from_kind(kind, body));
        }

        let value: Value = if resp.body.trim().is_empty() {
            Value::Object(Default::default())
        } else {
            serde_json::from_str(&resp.body).map_err(|e| {
                warn!("{}: response is not JSON: {e}", op.name);
                Error::Transport(ErrorBody::new(op.fallback))
            })?
        };

        if matches!(value.get("error"), Some(v) if !v.is_null()) {
            let body = ErrorBody::from_json(&value).unwrap_or_else(|| ErrorBody::new(op.fallback));
            warn!("{} => in-band error ({:?}): {body}", op.name, op.in_band);
            return Err(Error::from_kind(op.in_band, body));
        }

        serde_json::from_value(value).map_err(|e| {
            warn!("{}: unexpected response shape: {e}", op.name);
            Error::Transport(ErrorBody::new(op.fallback))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{HttpResponse, MockHttpClient, RequestBody};
    use autostylist_common::models::{
        AuthToken, Category, FeedbackEvent, Gender, Occasion, RegisterRequest, Style, UploadFile,
    };
    use autostylist_common::traits::{AuthApi, RecommendationApi, WardrobeApi};
    use mockall::predicate::always;
    use serde_json::json;

    fn client_with(mock: MockHttpClient) -> ApiClient {
        ApiClient::with_http_client(ClientConfig::default(), Arc::new(mock))
    }

    fn authed() -> AuthContext {
        AuthContext::with_token(AuthToken::new("tok"))
    }

    #[tokio::test]
    async fn login_sends_form_fields_without_token() {
        let mut mock = MockHttpClient::new();
        mock.expect_execute()
            .withf(|req| {
                req.method == Method::Post
                    && req.url == "http://localhost:8000/api/auth/login"
                    && req.header("Authorization").is_none()
                    && req.body.field("username") == Some("a@b.c")
                    && req.body.field("password") == Some("pw")
                    && matches!(req.body, RequestBody::Form(_))
            })
            .times(1)
            .returning(|_| Ok(HttpResponse::json(200, &json!({"access_token": "t", "token_type": "bearer"}))));

        let tok = client_with(mock).login_user("a@b.c", "pw").await.unwrap();
        assert_eq!(tok.access_token, "t");
    }

    #[tokio::test]
    async fn authenticated_calls_carry_bearer_header() {
        let mut mock = MockHttpClient::new();
        mock.expect_execute()
            .withf(|req| req.url.ends_with("/api/auth/me") && req.header("authorization") == Some("Bearer tok"))
            .times(1)
            .returning(|_| Ok(HttpResponse::json(200, &json!({"full_name": "A", "email": "a@b.c"}))));

        let me = client_with(mock).get_me(&authed()).await.unwrap();
        assert_eq!(me.email, "a@b.c");
    }

    #[tokio::test]
    async fn required_auth_fails_locally() {
        let mut mock = MockHttpClient::new();
        mock.expect_execute().times(0);
        let client = client_with(mock);
        let anon = AuthContext::new();

        assert!(client.get_me(&anon).await.unwrap_err().is_auth());
        assert!(client.logout_user(&anon).await.unwrap_err().is_auth());
        assert!(client.get_wardrobe(&anon).await.unwrap_err().is_auth());
        assert!(client.get_wardrobe_stats(&anon).await.unwrap_err().is_auth());
        assert!(client.delete_wardrobe_item(&anon, "x").await.unwrap_err().is_auth());
        assert!(client.send_feedback(&anon, &FeedbackEvent::default()).await.unwrap_err().is_auth());
    }

    #[tokio::test]
    async fn optional_auth_sends_anonymously() {
        let mut mock = MockHttpClient::new();
        mock.expect_execute()
            .withf(|req| {
                req.url.ends_with("/api/recommend")
                    && req.header("Authorization").is_none()
                    && req.body.field("occasion") == Some("party")
                    && req.body.field("gender") == Some("female")
            })
            .times(1)
            .returning(|_| Ok(HttpResponse::json(200, &json!({"error": "Not enough wardrobe items"}))));

        let err = client_with(mock)
            .get_recommendations(&AuthContext::new(), Occasion::Party, Gender::Female)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
        assert_eq!(err.body().error, "Not enough wardrobe items");
    }

    #[tokio::test]
    async fn http_errors_are_normalized() {
        let mut mock = MockHttpClient::new();
        mock.expect_execute()
            .with(always())
            .times(1)
            .returning(|_| Ok(HttpResponse::json(400, &json!({"detail": "Email already registered"}))));
        let err = client_with(mock)
            .register_user(&RegisterRequest {
                full_name: "A".into(),
                email: "a@b.c".into(),
                password: "pw".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert_eq!(err.body().error, "Email already registered");

        let mut mock = MockHttpClient::new();
        mock.expect_execute()
            .returning(|_| Ok(HttpResponse::new(502, "<html>bad gateway</html>")));
        let err = client_with(mock).get_wardrobe(&authed()).await.unwrap_err();
        assert!(matches!(err, Error::Transport(_)));
        assert_eq!(err.body().error, "Failed to load wardrobe");
    }

    #[tokio::test]
    async fn network_failure_uses_operation_fallback() {
        let mut mock = MockHttpClient::new();
        mock.expect_execute()
            .returning(|_| Err(Error::transport("connection refused")));
        let err = client_with(mock).get_context(&AuthContext::new(), Occasion::Office).await.unwrap_err();
        assert!(matches!(err, Error::Transport(_)));
        assert_eq!(err.body().error, "Failed to get context");
    }

    #[tokio::test]
    async fn upload_is_validated_before_sending() {
        let mut mock = MockHttpClient::new();
        mock.expect_execute().times(0);
        let gif = UploadFile::new("a.gif", "image/gif", vec![1]);
        let err = client_with(mock)
            .upload_item(&AuthContext::new(), &gif, Category::Top, Style::Casual, Gender::Male)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[tokio::test]
    async fn upload_sends_multipart_file() {
        let mut mock = MockHttpClient::new();
        mock.expect_execute()
            .withf(|req| match &req.body {
                RequestBody::Multipart { file: Some(f), .. } => {
                    f.field == "file"
                        && f.content_type == "image/png"
                        && req.body.field("category") == Some("full_body")
                        && req.body.field("style") == Some("traditional")
                        && req.body.field("gender") == Some("female")
                }
                _ => false,
            })
            .times(1)
            .returning(|_| Ok(HttpResponse::json(200, &json!({"message": "ok", "image": "processed/x.png", "colors": []}))));

        let png = UploadFile::new("x.png", "image/png", vec![0x89, b'P']);
        let resp = client_with(mock)
            .upload_item(&AuthContext::new(), &png, Category::FullBody, Style::Traditional, Gender::Female)
            .await
            .unwrap();
        assert_eq!(resp.image, "processed/x.png");
    }

    #[tokio::test]
    async fn path_segments_are_encoded() {
        let mut mock = MockHttpClient::new();
        mock.expect_execute()
            .withf(|req| req.method == Method::Delete && req.url.ends_with("/api/wardrobe/a%2Fb%20c"))
            .times(1)
            .returning(|_| Ok(HttpResponse::json(200, &json!({"message": "Item deleted"}))));
        let ack = client_with(mock).delete_wardrobe_item(&authed(), "a/b c").await.unwrap();
        assert_eq!(ack.message, "Item deleted");
    }

    #[tokio::test]
    async fn probe_image_degrades_to_placeholder() {
        let mut mock = MockHttpClient::new();
        mock.expect_execute()
            .withf(|req| req.method == Method::Head)
            .returning(|req| {
                let status = if req.url.ends_with("ok.png") { 200 } else { 404 };
                Ok(HttpResponse::new(status, ""))
            });
        let client = client_with(mock);

        assert_eq!(
            client.probe_image(Some("ok.png")).await,
            ImageSource::Remote("http://localhost:8000/static/ok.png".into())
        );
        assert!(client.probe_image(Some("gone.png")).await.is_placeholder());
        assert!(client.probe_image(None).await.is_placeholder());
    }
}
