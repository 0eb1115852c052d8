pub mod commands;

use std::sync::Arc;

use autostylist_common::models::AuthState;
use autostylist_core::services::{AccountService, RecommendationService, WardrobeService};
use autostylist_core::{ApiClient, Session};

/// State shared by every command of the interactive shell.
pub struct TuiModule {
    pub client: Arc<ApiClient>,
    pub session: Arc<Session>,
    pub account: AccountService,
    pub wardrobe: WardrobeService,
    pub recommend: RecommendationService,
}

impl TuiModule {
    pub fn new(client: Arc<ApiClient>, session: Arc<Session>) -> Self {
        Self {
            account: AccountService::new(client.clone(), session.clone()),
            wardrobe: WardrobeService::new(client.clone(), session.clone()),
            recommend: RecommendationService::new(client.clone(), session.clone()),
            client,
            session,
        }
    }

    pub fn prompt_string(&self) -> String {
        match self.session.state() {
            AuthState::Authenticated => "stylist*> ".to_string(),
            AuthState::Anonymous => "stylist> ".to_string(),
        }
    }
}
