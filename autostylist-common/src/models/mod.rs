// File: autostylist-common/src/models/mod.rs
pub mod auth;
pub mod color;
pub mod feedback;
pub mod outfit;
pub mod user;
pub mod wardrobe;

pub use auth::{AuthContext, AuthState, AuthToken, RegisterRequest, TokenResponse};
pub use color::Color;
pub use feedback::{FeedbackAction, FeedbackEvent};
pub use outfit::{
    Context, Extras, Occasion, Outfit, OutfitBase, OutfitRank, OutfitRecommendationSet,
    RecommendationResponse,
};
pub use user::{Ack, User};
pub use wardrobe::{
    Category, Gender, Style, UploadFile, UploadResponse, WardrobeItem, WardrobeItemRef,
    WardrobeList, WardrobeStats, ALLOWED_UPLOAD_TYPES,
};
