pub mod account_service;
pub mod recommendation_service;
pub mod wardrobe_service;

pub use account_service::AccountService;
pub use recommendation_service::{RecommendationService, NOT_FOUND_HINT};
pub use wardrobe_service::{CategoryFilter, WardrobeService};
