// File: autostylist-core/src/config.rs

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use tracing::debug;
use url::Url;

use crate::http::DEFAULT_USER_AGENT;
use crate::Error;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Where the bearer token is persisted between runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TokenStoreKind {
    #[default]
    Keyring,
    File,
    Memory,
}

impl fmt::Display for TokenStoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenStoreKind::Keyring => write!(f, "keyring"),
            TokenStoreKind::File => write!(f, "file"),
            TokenStoreKind::Memory => write!(f, "memory"),
        }
    }
}

impl FromStr for TokenStoreKind {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "keyring" => Ok(TokenStoreKind::Keyring),
            "file" => Ok(TokenStoreKind::File),
            "memory" => Ok(TokenStoreKind::Memory),
            _ => Err(format!("Unknown token store: {}", s)),
        }
    }
}

/// Per-endpoint authentication for the endpoints whose requirement differs
/// between backend deployments.
///
/// `true` means the call fails locally while anonymous. `false` still attaches
/// the token when one is present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthPolicy {
    pub upload: bool,
    pub recommend: bool,
    pub wardrobe: bool,
}

impl Default for AuthPolicy {
    fn default() -> Self {
        Self {
            upload: false,
            recommend: false,
            wardrobe: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    base_url: String,
    pub api_prefix: String,
    pub static_prefix: String,
    pub auth_policy: AuthPolicy,
    pub token_store: TokenStoreKind,
    pub timeout: Option<Duration>,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_prefix: "/api".to_string(),
            static_prefix: "/static".to_string(),
            auth_policy: AuthPolicy::default(),
            token_store: TokenStoreKind::default(),
            timeout: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Result<Self, Error> {
        let mut cfg = Self::default();
        cfg.set_base_url(base_url)?;
        Ok(cfg)
    }

    /// Loads `.env` if present, then reads `AUTOSTYLIST_*` variables.
    pub fn from_env() -> Result<Self, Error> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        if let Some(url) = lookup("AUTOSTYLIST_BASE_URL") {
            cfg.set_base_url(&url)?;
        }
        if let Some(kind) = lookup("AUTOSTYLIST_TOKEN_STORE") {
            cfg.token_store = kind.parse().map_err(Error::Config)?;
        }
        if let Some(secs) = lookup("AUTOSTYLIST_TIMEOUT_SECS") {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                Error::Config(format!("AUTOSTYLIST_TIMEOUT_SECS must be a whole number, got '{secs}'"))
            })?;
            cfg.timeout = (secs > 0).then(|| Duration::from_secs(secs));
        }
        if let Some(v) = lookup("AUTOSTYLIST_UPLOAD_AUTH") {
            cfg.auth_policy.upload = parse_flag("AUTOSTYLIST_UPLOAD_AUTH", &v)?;
        }
        if let Some(v) = lookup("AUTOSTYLIST_RECOMMEND_AUTH") {
            cfg.auth_policy.recommend = parse_flag("AUTOSTYLIST_RECOMMEND_AUTH", &v)?;
        }
        if let Some(v) = lookup("AUTOSTYLIST_WARDROBE_AUTH") {
            cfg.auth_policy.wardrobe = parse_flag("AUTOSTYLIST_WARDROBE_AUTH", &v)?;
        }

        debug!("client config: base_url={}, token_store={}, policy={:?}",
               cfg.base_url, cfg.token_store, cfg.auth_policy);
        Ok(cfg)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn set_base_url(&mut self, base_url: &str) -> Result<(), Error> {
        let parsed = Url::parse(base_url.trim())?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::InvalidUrl(format!("unsupported scheme in {base_url}")));
        }
        self.base_url = parsed.as_str().trim_end_matches('/').to_string();
        Ok(())
    }

    /// `<base><api_prefix><path>`, e.g. `http://localhost:8000/api/auth/me`.
    pub fn api_url(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, self.api_prefix, path)
    }

    /// Root under which stored images are served.
    pub fn static_root(&self) -> String {
        format!("{}{}", self.base_url, self.static_prefix)
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool, Error> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(Error::Config(format!("{key} must be a boolean, got '{other}'"))),
    }
}
