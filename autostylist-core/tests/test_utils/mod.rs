// File: autostylist-core/tests/test_utils/mod.rs
#![allow(dead_code)]

pub mod fake_backend;

use std::sync::Arc;

use autostylist_common::models::UploadFile;
use autostylist_core::services::{AccountService, RecommendationService, WardrobeService};
use autostylist_core::{ApiClient, ClientConfig, Session};

pub use fake_backend::FakeBackend;

/// Client, session and services wired to one in-memory backend.
pub struct Harness {
    pub backend: Arc<FakeBackend>,
    pub client: Arc<ApiClient>,
    pub session: Arc<Session>,
    pub account: AccountService,
    pub wardrobe: WardrobeService,
    pub recommend: RecommendationService,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_session(Session::in_memory())
    }

    pub fn with_session(session: Session) -> Self {
        let backend = Arc::new(FakeBackend::new());
        let client = Arc::new(ApiClient::with_http_client(ClientConfig::default(), backend.clone()));
        let session = Arc::new(session);
        Self {
            account: AccountService::new(client.clone(), session.clone()),
            wardrobe: WardrobeService::new(client.clone(), session.clone()),
            recommend: RecommendationService::new(client.clone(), session.clone()),
            backend,
            client,
            session,
        }
    }

    /// Registers `email` (password "secret123") and logs in.
    pub async fn signed_in(email: &str) -> Self {
        let h = Self::new();
        h.account
            .register_and_login("Test User", email, "secret123")
            .await
            .expect("register and login");
        h
    }
}

pub fn png(name: &str) -> UploadFile {
    UploadFile::new(name, "image/png", vec![0x89, b'P', b'N', b'G'])
}
