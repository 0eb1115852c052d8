use crate::error::Error;

/// Durable storage for the single `"token"` entry.
pub trait TokenStore: Send + Sync {
    fn load(&self) -> Result<Option<String>, Error>;
    fn save(&self, token: &str) -> Result<(), Error>;
    /// Removing an absent token is not an error.
    fn clear(&self) -> Result<(), Error>;
}
