pub mod api;
pub mod token_store_traits;

pub use api::{AuthApi, RecommendationApi, WardrobeApi};
pub use token_store_traits::TokenStore;
