use async_trait::async_trait;

use crate::error::Error;
use crate::models::{
    Ack, AuthContext, Category, Context, FeedbackEvent, Gender, Occasion, RecommendationResponse,
    RegisterRequest, Style, TokenResponse, UploadFile, UploadResponse, User, WardrobeList,
    WardrobeStats,
};

#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn register_user(&self, req: &RegisterRequest) -> Result<User, Error>;
    async fn login_user(&self, email: &str, password: &str) -> Result<TokenResponse, Error>;
    async fn get_me(&self, ctx: &AuthContext) -> Result<User, Error>;
    async fn logout_user(&self, ctx: &AuthContext) -> Result<Ack, Error>;
}

#[async_trait]
pub trait WardrobeApi: Send + Sync {
    async fn upload_item(
        &self,
        ctx: &AuthContext,
        file: &UploadFile,
        category: Category,
        style: Style,
        gender: Gender,
    ) -> Result<UploadResponse, Error>;
    async fn get_wardrobe(&self, ctx: &AuthContext) -> Result<WardrobeList, Error>;
    async fn get_wardrobe_by_category(&self, ctx: &AuthContext, category: Category) -> Result<WardrobeList, Error>;
    async fn get_wardrobe_stats(&self, ctx: &AuthContext) -> Result<WardrobeStats, Error>;
    async fn delete_wardrobe_item(&self, ctx: &AuthContext, item_id: &str) -> Result<Ack, Error>;
}

#[async_trait]
pub trait RecommendationApi: Send + Sync {
    async fn get_recommendations(
        &self,
        ctx: &AuthContext,
        occasion: Occasion,
        gender: Gender,
    ) -> Result<RecommendationResponse, Error>;
    async fn get_context(&self, ctx: &AuthContext, occasion: Occasion) -> Result<Context, Error>;
    async fn send_feedback(&self, ctx: &AuthContext, feedback: &FeedbackEvent) -> Result<Ack, Error>;
}
