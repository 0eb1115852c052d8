pub mod assets;
pub mod client;
pub mod config;
pub mod eventbus;
pub mod http;
pub mod services;
pub mod session;

pub use autostylist_common::error::Error;

pub use client::ApiClient;
pub use config::{AuthPolicy, ClientConfig, TokenStoreKind};
pub use eventbus::{AuthEvent, EventBus, LogoutReason};
pub use session::Session;
